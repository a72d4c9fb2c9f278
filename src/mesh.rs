// Copyright 2025 Lars Brubaker
// License: MIT
//
// Triangle mesh with derived adjacency.
//
// Triangles live in a generational arena and are addressed by `TriId`; a
// separate `order` vector records insertion order, which is what makes "the
// first bad triangle" deterministic. Adjacency is derived state: every
// insertion or removal marks it stale, and anything that reads neighbour
// slots checks `adjacency_valid` first.

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::arena::{Arena, TriId};
use crate::error::{MeshError, Result};
use crate::geom::{EdgeKey, Real, Vertex};
use crate::triangle::{EdgeSlot, Triangle};

pub mod delaunay;
pub mod lepp;
pub mod ops;

#[derive(Clone, Default)]
pub struct Mesh {
    arena: Arena<Triangle>,
    order: Vec<TriId>,
    adjacency_valid: bool,
}

impl Mesh {
    /// Create an empty mesh.
    pub fn new() -> Self {
        Mesh {
            arena: Arena::new(),
            order: Vec::new(),
            adjacency_valid: false,
        }
    }

    /// Build a mesh from an unstructured triangle list.
    ///
    /// Rejects zero-area triangles and triangles whose vertex set repeats an
    /// earlier one. Adjacency is left stale.
    pub fn from_triangles<I>(triangles: I) -> Result<Mesh>
    where
        I: IntoIterator<Item = Triangle>,
    {
        let iter = triangles.into_iter();
        let mut mesh = Mesh {
            arena: Arena::with_capacity(iter.size_hint().0),
            order: Vec::with_capacity(iter.size_hint().0),
            adjacency_valid: false,
        };
        let mut seen: HashSet<[(u64, u64); 3]> = HashSet::new();
        for (index, t) in iter.enumerate() {
            if t.is_degenerate() {
                return Err(MeshError::DegenerateTriangle { index });
            }
            if !seen.insert(vertex_set_key(&t)) {
                return Err(MeshError::DuplicateTriangle { index });
            }
            mesh.insert(Triangle::new(t.va, t.vb, t.vc));
        }
        Ok(mesh)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Live triangle ids in mesh order.
    #[inline]
    pub fn ids(&self) -> &[TriId] {
        &self.order
    }

    #[inline]
    pub fn contains(&self, id: TriId) -> bool {
        self.arena.contains(id)
    }

    #[inline]
    pub fn get(&self, id: TriId) -> Option<&Triangle> {
        self.arena.get(id)
    }

    /// Like `get`, but a dead id is an error.
    pub fn triangle(&self, id: TriId) -> Result<&Triangle> {
        self.arena.get(id).ok_or(MeshError::UnknownTriangle)
    }

    /// Triangles in mesh order.
    pub fn triangles(&self) -> impl Iterator<Item = &Triangle> + '_ {
        self.order.iter().filter_map(move |&id| self.arena.get(id))
    }

    /// Owned copies of the triangles in mesh order, without adjacency.
    pub fn to_triangles(&self) -> Vec<Triangle> {
        self.triangles()
            .map(|t| Triangle::new(t.va, t.vb, t.vc))
            .collect()
    }

    /// Append a triangle. Invalidates adjacency.
    pub fn insert(&mut self, t: Triangle) -> TriId {
        let id = self.arena.alloc(t);
        self.order.push(id);
        self.adjacency_valid = false;
        id
    }

    /// Remove a triangle by id. Invalidates adjacency.
    pub fn remove(&mut self, id: TriId) -> Option<Triangle> {
        let t = self.arena.free(id)?;
        if let Some(pos) = self.order.iter().position(|&o| o == id) {
            self.order.remove(pos);
        }
        self.adjacency_valid = false;
        Some(t)
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.order.clear();
        self.adjacency_valid = false;
    }

    /// True when neighbour slots reflect the current triangle set.
    #[inline]
    pub fn is_adjacency_valid(&self) -> bool {
        self.adjacency_valid
    }

    pub(crate) fn require_adjacency(&self) -> Result<()> {
        if self.adjacency_valid || self.is_empty() {
            Ok(())
        } else {
            Err(MeshError::StaleAdjacency)
        }
    }

    /// Edge -> triangles incident to it, in mesh order.
    fn edge_map(&self) -> HashMap<EdgeKey, Vec<TriId>> {
        let mut map: HashMap<EdgeKey, Vec<TriId>> = HashMap::with_capacity(self.len() * 2);
        for &id in &self.order {
            if let Some(t) = self.arena.get(id) {
                for e in t.edges() {
                    map.entry(e.key()).or_default().push(id);
                }
            }
        }
        map
    }

    /// Recompute, for every triangle, the neighbour across each of its edges,
    /// then its neighbour across the longest edge.
    ///
    /// Built from an edge -> triangle index rather than a pairwise scan; the
    /// result is the same. Where more than two triangles share an edge the
    /// first other one in mesh order is taken.
    pub fn update_neighbours(&mut self) {
        let map = self.edge_map();
        for &id in &self.order {
            let Some(t) = self.arena.get(id) else {
                continue;
            };
            let mut neighbours = [None; 3];
            for slot in EdgeSlot::ALL {
                neighbours[slot.index()] = map
                    .get(&t.edge(slot).key())
                    .and_then(|ts| ts.iter().copied().find(|&o| o != id));
            }
            if let Some(t) = self.arena.get_mut(id) {
                t.set_neighbours(neighbours);
            }
        }
        self.adjacency_valid = true;
    }

    /// Neighbour of `id` across `slot`. Requires fresh adjacency.
    pub fn neighbour(&self, id: TriId, slot: EdgeSlot) -> Result<Option<TriId>> {
        self.require_adjacency()?;
        Ok(self.triangle(id)?.neighbour(slot))
    }

    /// Every triangle whose minimum angle is strictly below `tolerance`
    /// degrees, in mesh order.
    pub fn find_bad_triangles(&self, tolerance: Real) -> Vec<TriId> {
        self.order
            .iter()
            .copied()
            .filter(|&id| {
                self.arena
                    .get(id)
                    .is_some_and(|t| t.min_angle() < tolerance)
            })
            .collect()
    }

    pub fn total_area(&self) -> Real {
        self.triangles().map(Triangle::area).sum()
    }

    /// Smallest interior angle over the whole mesh.
    pub fn min_angle(&self) -> Option<Real> {
        self.triangles().map(Triangle::min_angle).reduce(Real::min)
    }

    /// Number of edges used by exactly one triangle.
    pub fn boundary_edge_count(&self) -> usize {
        self.edge_map().values().filter(|ts| ts.len() == 1).count()
    }

    /// Distinct vertices, in order of first appearance.
    pub fn vertices(&self) -> Vec<Vertex> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for t in self.triangles() {
            for v in t.vertices() {
                if seen.insert(v.key()) {
                    out.push(v);
                }
            }
        }
        out
    }

    /// Three `[x0, y0, x1, y1]` segments per triangle, in mesh order.
    pub fn edge_segments(&self) -> Vec<[Real; 4]> {
        self.triangles()
            .flat_map(|t| t.edges())
            .map(|e| [e.v1.x, e.v1.y, e.v2.x, e.v2.y])
            .collect()
    }

    /// Slot of `a` and slot of `b` for the edge they share.
    pub(crate) fn shared_edge(&self, a: TriId, b: TriId) -> Result<(EdgeSlot, EdgeSlot)> {
        let ta = self.triangle(a)?;
        let tb = self.triangle(b)?;
        let sa = ta.shared_slot(tb).ok_or(MeshError::NotAdjacent)?;
        let sb = tb.slot_of(&ta.edge(sa)).ok_or(MeshError::NotAdjacent)?;
        Ok((sa, sb))
    }

    /// Replace `old` triangles with `new` ones. New triangles go to the end
    /// of the mesh order.
    pub(crate) fn replace(&mut self, old: &[TriId], new: Vec<Triangle>) -> Vec<TriId> {
        for &id in old {
            self.remove(id);
        }
        new.into_iter().map(|t| self.insert(t)).collect()
    }
}

fn vertex_set_key(t: &Triangle) -> [(u64, u64); 3] {
    let mut key = [t.va.key(), t.vb.key(), t.vc.key()];
    key.sort_unstable();
    key
}

impl fmt::Debug for Mesh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mesh")
            .field("triangles", &self.len())
            .field("adjacency_valid", &self.adjacency_valid)
            .finish()
    }
}
