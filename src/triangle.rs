// Copyright 2025 Lars Brubaker
// License: MIT
//
// Triangle value type.
//
// Vertices (va, vb, vc) are kept in the order given; they define the edges
// ab = (va, vb), bc = (vb, vc), ca = (vc, va). Neighbour slots are non-owning
// `TriId`s filled in by `Mesh::update_neighbours` and meaningless until then.

use std::fmt;

use crate::arena::TriId;
use crate::geom::{angle_from_sides, orient2d, Edge, Real, Vertex, AREA_EPSILON};

/// Names one of the three sides of a triangle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EdgeSlot {
    Ab,
    Bc,
    Ca,
}

impl EdgeSlot {
    /// Priority order used to break ties between equally long edges.
    pub const ALL: [EdgeSlot; 3] = [EdgeSlot::Ab, EdgeSlot::Bc, EdgeSlot::Ca];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            EdgeSlot::Ab => 0,
            EdgeSlot::Bc => 1,
            EdgeSlot::Ca => 2,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Triangle {
    pub va: Vertex,
    pub vb: Vertex,
    pub vc: Vertex,
    /// Neighbour across ab, bc, ca (indexed by `EdgeSlot::index`).
    neighbours: [Option<TriId>; 3],
    longest: EdgeSlot,
    neighbour_longest: Option<TriId>,
}

impl Triangle {
    pub fn new(va: Vertex, vb: Vertex, vc: Vertex) -> Self {
        let mut t = Triangle {
            va,
            vb,
            vc,
            neighbours: [None; 3],
            longest: EdgeSlot::Ab,
            neighbour_longest: None,
        };
        t.longest = t.compute_longest();
        t
    }

    /// Build from `[xa, ya, xb, yb, xc, yc]`.
    pub fn from_coords(c: [Real; 6]) -> Self {
        Triangle::new(
            Vertex::new(c[0], c[1]),
            Vertex::new(c[2], c[3]),
            Vertex::new(c[4], c[5]),
        )
    }

    #[inline]
    pub fn vertices(&self) -> [Vertex; 3] {
        [self.va, self.vb, self.vc]
    }

    #[inline]
    pub fn ab(&self) -> Edge {
        Edge::new(self.va, self.vb)
    }

    #[inline]
    pub fn bc(&self) -> Edge {
        Edge::new(self.vb, self.vc)
    }

    #[inline]
    pub fn ca(&self) -> Edge {
        Edge::new(self.vc, self.va)
    }

    pub fn edge(&self, slot: EdgeSlot) -> Edge {
        match slot {
            EdgeSlot::Ab => self.ab(),
            EdgeSlot::Bc => self.bc(),
            EdgeSlot::Ca => self.ca(),
        }
    }

    pub fn edges(&self) -> [Edge; 3] {
        [self.ab(), self.bc(), self.ca()]
    }

    /// The vertex not on edge `slot`.
    pub fn opposite_vertex(&self, slot: EdgeSlot) -> Vertex {
        match slot {
            EdgeSlot::Ab => self.vc,
            EdgeSlot::Bc => self.va,
            EdgeSlot::Ca => self.vb,
        }
    }

    /// Interior angles in degrees at va, vb, vc.
    pub fn angles(&self) -> [Real; 3] {
        let ab = self.ab().length();
        let bc = self.bc().length();
        let ca = self.ca().length();
        [
            angle_from_sides(ab, ca, bc),
            angle_from_sides(ab, bc, ca),
            angle_from_sides(bc, ca, ab),
        ]
    }

    pub fn min_angle(&self) -> Real {
        let [a, b, c] = self.angles();
        a.min(b).min(c)
    }

    pub fn max_angle(&self) -> Real {
        let [a, b, c] = self.angles();
        a.max(b).max(c)
    }

    /// Twice the signed area; positive for counter-clockwise order.
    #[inline]
    pub fn signed_area2(&self) -> Real {
        orient2d(&self.va, &self.vb, &self.vc)
    }

    #[inline]
    pub fn area(&self) -> Real {
        self.signed_area2().abs() / 2.0
    }

    #[inline]
    pub fn is_ccw(&self) -> bool {
        self.signed_area2() > 0.0
    }

    /// True when the signed area is negligible relative to the edge lengths.
    pub fn is_degenerate(&self) -> bool {
        let scale = self
            .edges()
            .iter()
            .map(Edge::length)
            .fold(0.0, Real::max);
        scale == 0.0 || self.signed_area2().abs() <= AREA_EPSILON * scale * scale
    }

    /// Same vertices in counter-clockwise order (vb and vc swapped if needed).
    pub fn to_ccw(&self) -> [Vertex; 3] {
        if self.is_ccw() {
            [self.va, self.vb, self.vc]
        } else {
            [self.va, self.vc, self.vb]
        }
    }

    #[inline]
    pub fn has_vertex(&self, v: &Vertex) -> bool {
        self.va == *v || self.vb == *v || self.vc == *v
    }

    /// True iff `e` matches ab, bc or ca in either orientation.
    #[inline]
    pub fn has_edge(&self, e: &Edge) -> bool {
        self.slot_of(e).is_some()
    }

    pub fn slot_of(&self, e: &Edge) -> Option<EdgeSlot> {
        EdgeSlot::ALL.into_iter().find(|&s| self.edge(s) == *e)
    }

    /// First vertex of `self` that is not a vertex of `other`.
    pub fn vertex_not_in(&self, other: &Triangle) -> Option<Vertex> {
        self.vertices().into_iter().find(|v| !other.has_vertex(v))
    }

    /// Edge shared with `other`, as a slot of `self`.
    pub fn shared_slot(&self, other: &Triangle) -> Option<EdgeSlot> {
        EdgeSlot::ALL
            .into_iter()
            .find(|&s| other.has_edge(&self.edge(s)))
    }

    /// Orientation-independent vertex-set equality.
    pub fn same_vertices(&self, other: &Triangle) -> bool {
        other.has_vertex(&self.va) && other.has_vertex(&self.vb) && other.has_vertex(&self.vc)
    }

    fn compute_longest(&self) -> EdgeSlot {
        let mut best = EdgeSlot::Ab;
        let mut best_len = self.ab().length();
        for slot in [EdgeSlot::Bc, EdgeSlot::Ca] {
            let len = self.edge(slot).length();
            if len > best_len {
                best = slot;
                best_len = len;
            }
        }
        best
    }

    #[inline]
    pub fn longest_slot(&self) -> EdgeSlot {
        self.longest
    }

    /// Edge of maximal length; ties resolved in ab, bc, ca order.
    #[inline]
    pub fn longest_edge(&self) -> Edge {
        self.edge(self.longest)
    }

    /// Neighbour across edge `slot`, as of the last adjacency rebuild.
    #[inline]
    pub fn neighbour(&self, slot: EdgeSlot) -> Option<TriId> {
        self.neighbours[slot.index()]
    }

    /// Neighbour across bc (opposite va).
    #[inline]
    pub fn ta(&self) -> Option<TriId> {
        self.neighbour(EdgeSlot::Bc)
    }

    /// Neighbour across ca (opposite vb).
    #[inline]
    pub fn tb(&self) -> Option<TriId> {
        self.neighbour(EdgeSlot::Ca)
    }

    /// Neighbour across ab (opposite vc).
    #[inline]
    pub fn tc(&self) -> Option<TriId> {
        self.neighbour(EdgeSlot::Ab)
    }

    /// Neighbour across the longest edge, `None` on the mesh boundary.
    #[inline]
    pub fn neighbour_longest_edge(&self) -> Option<TriId> {
        self.neighbour_longest
    }

    pub(crate) fn set_neighbours(&mut self, neighbours: [Option<TriId>; 3]) {
        self.neighbours = neighbours;
        self.neighbour_longest = neighbours[self.longest.index()];
    }

    /// Bisect at the midpoint of the longest edge, joining it to the opposite
    /// vertex. Both halves keep the orientation of `self`.
    pub fn divide_on_longest_edge(&self) -> [Triangle; 2] {
        let m = self.longest_edge().midpoint();
        let (a, b, c) = (self.va, self.vb, self.vc);
        match self.longest {
            EdgeSlot::Ab => [Triangle::new(a, m, c), Triangle::new(m, b, c)],
            EdgeSlot::Bc => [Triangle::new(a, b, m), Triangle::new(a, m, c)],
            EdgeSlot::Ca => [Triangle::new(a, b, m), Triangle::new(m, b, c)],
        }
    }
}

impl PartialEq for Triangle {
    fn eq(&self, other: &Triangle) -> bool {
        self.same_vertices(other)
    }
}

impl fmt::Display for Triangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Triangle({}, {}, {})", self.va, self.vb, self.vc)
    }
}
