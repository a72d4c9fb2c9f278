// Copyright 2025 Lars Brubaker
// Refinement operators: boundary bisection, diagonal swap, centroid insertion.
//
// Each operator validates the triangles it is about to create before touching
// the mesh, so a failed operator leaves the mesh unchanged.

use super::lepp::Lepp;
use super::Mesh;
use crate::arena::TriId;
use crate::error::{MeshError, Result};
use crate::geom::{centroid, Vertex};
use crate::triangle::{EdgeSlot, Triangle};

/// The quadrilateral formed by two edge-adjacent triangles, in
/// counter-clockwise cyclic order `p, d, q, r`: `(p, q)` is the shared edge,
/// `r` the far vertex of the last triangle and `d` the far vertex of the
/// other one.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Quad {
    pub p: Vertex,
    pub d: Vertex,
    pub q: Vertex,
    pub r: Vertex,
}

impl Quad {
    /// Build from the last triangle of a path and its predecessor.
    pub fn from_pair(last: &Triangle, prev: &Triangle) -> Result<Quad> {
        let [a, b, c] = last.to_ccw();
        let ccw = Triangle::new(a, b, c);
        let slot = ccw.shared_slot(prev).ok_or(MeshError::NotAdjacent)?;
        let d = prev.vertex_not_in(&ccw).ok_or(MeshError::NotAdjacent)?;
        let (p, q, r) = match slot {
            EdgeSlot::Ab => (a, b, c),
            EdgeSlot::Bc => (b, c, a),
            EdgeSlot::Ca => (c, a, b),
        };
        Ok(Quad { p, d, q, r })
    }

    pub fn vertices(&self) -> [Vertex; 4] {
        [self.p, self.d, self.q, self.r]
    }

    /// The two triangles on the other diagonal `(r, d)`.
    pub fn flipped(&self) -> [Triangle; 2] {
        [
            Triangle::new(self.p, self.d, self.r),
            Triangle::new(self.d, self.q, self.r),
        ]
    }

    /// Four triangles fanned from the vertex average.
    pub fn fan(&self) -> [Triangle; 4] {
        let g = centroid(&self.vertices());
        [
            Triangle::new(self.p, self.d, g),
            Triangle::new(self.d, self.q, g),
            Triangle::new(self.q, self.r, g),
            Triangle::new(self.r, self.p, g),
        ]
    }
}

/// Every triangle must be counter-clockwise and non-degenerate.
fn check_ccw(triangles: &[Triangle]) -> Result<()> {
    if triangles.iter().any(Triangle::is_degenerate) {
        return Err(MeshError::DegenerateGeometry);
    }
    if triangles.iter().any(|t| !t.is_ccw()) {
        return Err(MeshError::NonConvexQuadrilateral);
    }
    Ok(())
}

impl Mesh {
    /// Replace `id` with the two halves from bisecting its longest edge.
    pub fn bisect(&mut self, id: TriId) -> Result<[TriId; 2]> {
        let halves = self.triangle(id)?.divide_on_longest_edge();
        if halves.iter().any(Triangle::is_degenerate) {
            return Err(MeshError::DegenerateGeometry);
        }
        let new = self.replace(&[id], halves.to_vec());
        Ok([new[0], new[1]])
    }

    /// Border case: bisect the last triangle of the path at the midpoint of
    /// its longest edge.
    pub fn insert_center(&mut self, lepp: &Lepp) -> Result<[TriId; 2]> {
        let last = lepp.last().ok_or(MeshError::UnknownTriangle)?;
        self.bisect(last)
    }

    /// Replace two adjacent triangles with the two on the other diagonal of
    /// the quadrilateral they form.
    pub fn flip_pair(&mut self, prev: TriId, last: TriId) -> Result<[TriId; 2]> {
        self.shared_edge(prev, last)?;
        let quad = Quad::from_pair(self.triangle(last)?, self.triangle(prev)?)?;
        let flipped = quad.flipped();
        check_ccw(&flipped)?;
        let new = self.replace(&[last, prev], flipped.to_vec());
        Ok([new[0], new[1]])
    }

    /// Replace two adjacent triangles with four fanned from the centroid of
    /// the quadrilateral they form.
    pub fn split_pair_at_centroid(&mut self, prev: TriId, last: TriId) -> Result<[TriId; 4]> {
        self.shared_edge(prev, last)?;
        let quad = Quad::from_pair(self.triangle(last)?, self.triangle(prev)?)?;
        let fan = quad.fan();
        check_ccw(&fan)?;
        let new = self.replace(&[last, prev], fan.to_vec());
        Ok([new[0], new[1], new[2], new[3]])
    }

    /// Interior case, pair not locally Delaunay: swap the shared diagonal.
    pub fn swap_diagonals(&mut self, lepp: &Lepp) -> Result<[TriId; 2]> {
        let (prev, last) = lepp.terminal_pair().ok_or(MeshError::NotAdjacent)?;
        self.flip_pair(prev, last)
    }

    /// Interior case, pair locally Delaunay: insert the quadrilateral's
    /// centroid.
    pub fn insert_centroid(&mut self, lepp: &Lepp) -> Result<[TriId; 4]> {
        let (prev, last) = lepp.terminal_pair().ok_or(MeshError::NotAdjacent)?;
        self.split_pair_at_centroid(prev, last)
    }
}
