// Copyright 2025 Lars Brubaker
// Shared test utilities for lepp-delaunay tests.

#![allow(dead_code)]

use std::collections::HashMap;

use lepp_delaunay::{parse_mesh, EdgeSlot, Mesh, Real, Triangle, Vertex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Parse a fixture, panicking with the parse error on failure.
pub fn load(data: &str) -> Mesh {
    match parse_mesh(data) {
        Ok(mesh) => mesh,
        Err(e) => panic!("fixture failed to load: {}", e),
    }
}

/// Hashable key for an orientation-free edge.
fn edge_key(a: &Vertex, b: &Vertex) -> [(u64, u64); 2] {
    let ka = ((a.x + 0.0).to_bits(), (a.y + 0.0).to_bits());
    let kb = ((b.x + 0.0).to_bits(), (b.y + 0.0).to_bits());
    if ka <= kb {
        [ka, kb]
    } else {
        [kb, ka]
    }
}

fn triangle_key(t: &Triangle) -> [(u64, u64); 3] {
    let mut k = [t.va, t.vb, t.vc].map(|v| ((v.x + 0.0).to_bits(), (v.y + 0.0).to_bits()));
    k.sort_unstable();
    k
}

pub fn assert_area(mesh: &Mesh, expected: Real, epsilon: Real) {
    let area = mesh.total_area();
    assert!(
        (area - expected).abs() <= epsilon,
        "total area {} differs from expected {}",
        area,
        expected
    );
}

pub fn assert_no_degenerates(mesh: &Mesh) {
    for (i, t) in mesh.triangles().enumerate() {
        assert!(!t.is_degenerate(), "triangle {} is degenerate: {}", i, t);
        assert!(t.area() > 0.0, "triangle {} has no area: {}", i, t);
    }
}

pub fn assert_no_duplicates(mesh: &Mesh) {
    let mut seen = HashMap::new();
    for (i, t) in mesh.triangles().enumerate() {
        if let Some(j) = seen.insert(triangle_key(t), i) {
            panic!("triangles {} and {} are duplicates: {}", j, i, t);
        }
    }
}

/// Every edge is used by at most two triangles.
pub fn assert_conforming(mesh: &Mesh) {
    let mut uses: HashMap<[(u64, u64); 2], usize> = HashMap::new();
    for t in mesh.triangles() {
        for e in t.edges() {
            *uses.entry(edge_key(&e.v1, &e.v2)).or_default() += 1;
        }
    }
    for (k, n) in uses {
        assert!(n <= 2, "edge {:?} used by {} triangles", k, n);
    }
}

/// After `update_neighbours`: a neighbour across e has e and points back
/// across it; an absent neighbour means no other triangle has e.
pub fn assert_adjacency_symmetric(mesh: &Mesh) {
    assert!(mesh.is_adjacency_valid(), "adjacency is stale");
    for &id in mesh.ids() {
        let t = mesh.get(id).unwrap();
        for slot in EdgeSlot::ALL {
            let e = t.edge(slot);
            match t.neighbour(slot) {
                Some(n) => {
                    let nt = mesh.get(n).expect("neighbour id is dead");
                    let back = nt.slot_of(&e).expect("neighbour lacks the shared edge");
                    assert_eq!(nt.neighbour(back), Some(id), "asymmetric across {}", e);
                }
                None => {
                    let others = mesh
                        .ids()
                        .iter()
                        .filter(|&&o| o != id)
                        .filter(|&&o| mesh.get(o).unwrap().has_edge(&e))
                        .count();
                    assert_eq!(others, 0, "boundary edge {} is shared", e);
                }
            }
        }
        let longest = t.neighbour(t.longest_slot());
        assert_eq!(t.neighbour_longest_edge(), longest);
    }
}

/// All structural invariants at once.
pub fn assert_valid(mesh: &Mesh) {
    assert_no_degenerates(mesh);
    assert_no_duplicates(mesh);
    assert_conforming(mesh);
}

/// `n` x `n` grid of square cells with side `spacing`, each split into two
/// triangles with alternating diagonals. Interior grid points are moved by up
/// to `jitter` on each axis; keep `jitter < spacing / 4` so no triangle folds.
pub fn jittered_grid(n: usize, spacing: Real, jitter: Real, seed: u64) -> Mesh {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut points = vec![vec![Vertex::default(); n + 1]; n + 1];
    for (i, row) in points.iter_mut().enumerate() {
        for (j, p) in row.iter_mut().enumerate() {
            let interior = i > 0 && j > 0 && i < n && j < n;
            let (dx, dy) = if interior && jitter > 0.0 {
                (
                    rng.random_range(-jitter..jitter),
                    rng.random_range(-jitter..jitter),
                )
            } else {
                (0.0, 0.0)
            };
            *p = Vertex::new(i as Real * spacing + dx, j as Real * spacing + dy);
        }
    }
    let mut triangles = Vec::with_capacity(2 * n * n);
    for i in 0..n {
        for j in 0..n {
            let (a, b) = (points[i][j], points[i + 1][j]);
            let (c, d) = (points[i + 1][j + 1], points[i][j + 1]);
            if (i + j) % 2 == 0 {
                triangles.push(Triangle::new(a, b, c));
                triangles.push(Triangle::new(a, c, d));
            } else {
                triangles.push(Triangle::new(a, b, d));
                triangles.push(Triangle::new(b, c, d));
            }
        }
    }
    Mesh::from_triangles(triangles).expect("grid mesh is valid")
}
