// Copyright 2025 Lars Brubaker
// Local Delaunay test for a pair of edge-adjacent triangles.

use super::Mesh;
use crate::arena::TriId;
use crate::error::{MeshError, Result};
use crate::geom::{circumcenter, Real, Vertex, INCIRCLE_EPSILON};
use crate::triangle::Triangle;

/// A pair with an interior angle above this is never treated as locally
/// Delaunay; the flip is forced.
pub const MAX_DELAUNAY_ANGLE: Real = 120.0;

/// Circumcenter of `t`. Collinear vertices are a `DegenerateGeometry` error.
pub fn circumcenter_of(t: &Triangle) -> Result<Vertex> {
    circumcenter(&t.va, &t.vb, &t.vc).ok_or(MeshError::DegenerateGeometry)
}

/// True if some vertex of `other` lies strictly inside the circumcircle of
/// `t`, by more than `INCIRCLE_EPSILON`.
fn circumcircle_contains_vertex_of(t: &Triangle, other: &Triangle) -> Result<bool> {
    let center = circumcenter_of(t)?;
    let r = center.distance_to(&t.va);
    Ok(other
        .vertices()
        .iter()
        .any(|v| center.distance_to(v) < r - INCIRCLE_EPSILON))
}

/// Two adjacent triangles are locally Delaunay unless either has an angle
/// above 120 degrees, or either circumcircle strictly contains a vertex of
/// the other. A degenerate triangle is an error.
pub fn are_locally_delaunay(t1: &Triangle, t2: &Triangle) -> Result<bool> {
    if t1.is_degenerate() || t2.is_degenerate() {
        return Err(MeshError::DegenerateGeometry);
    }
    if t1.max_angle() > MAX_DELAUNAY_ANGLE || t2.max_angle() > MAX_DELAUNAY_ANGLE {
        return Ok(false);
    }
    if circumcircle_contains_vertex_of(t1, t2)? {
        return Ok(false);
    }
    if circumcircle_contains_vertex_of(t2, t1)? {
        return Ok(false);
    }
    Ok(true)
}

impl Mesh {
    /// `are_locally_delaunay` for two triangles of this mesh.
    pub fn are_locally_delaunay(&self, t1: TriId, t2: TriId) -> Result<bool> {
        are_locally_delaunay(self.triangle(t1)?, self.triangle(t2)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symmetric_convex_pair_is_delaunay() {
        let t1 = Triangle::from_coords([0.0, 0.0, 4.0, 0.0, 2.0, 3.0]);
        let t2 = Triangle::from_coords([4.0, 0.0, 0.0, 0.0, 2.0, -3.0]);
        assert!(are_locally_delaunay(&t1, &t2).unwrap());
    }

    #[test]
    fn vertex_inside_circumcircle_is_not_delaunay() {
        // Apex angles of about 106 degrees each: their sum exceeds 180, so
        // each apex lies inside the other triangle's circumcircle.
        let t1 = Triangle::from_coords([0.0, 0.0, 4.0, 0.0, 2.0, 1.5]);
        let t2 = Triangle::from_coords([4.0, 0.0, 0.0, 0.0, 2.0, -1.5]);
        assert!(t1.max_angle() < MAX_DELAUNAY_ANGLE);
        assert!(!are_locally_delaunay(&t1, &t2).unwrap());
    }

    #[test]
    fn obtuse_pair_fails_unconditionally() {
        let t1 = Triangle::from_coords([0.0, 0.0, 10.0, 0.0, 5.0, 1.0]);
        let t2 = Triangle::from_coords([10.0, 0.0, 0.0, 0.0, 5.0, -20.0]);
        assert!(t1.max_angle() > MAX_DELAUNAY_ANGLE);
        assert!(!are_locally_delaunay(&t1, &t2).unwrap());
    }

    #[test]
    fn cocircular_pair_within_epsilon_is_delaunay() {
        // Unit square split on a diagonal: all four corners on one circle.
        let t1 = Triangle::from_coords([0.0, 0.0, 1.0, 0.0, 1.0, 1.0]);
        let t2 = Triangle::from_coords([0.0, 0.0, 1.0, 1.0, 0.0, 1.0]);
        assert!(are_locally_delaunay(&t1, &t2).unwrap());
    }

    #[test]
    fn degenerate_triangle_is_an_error() {
        let flat = Triangle::from_coords([0.0, 0.0, 1.0, 0.0, 2.0, 0.0]);
        let t = Triangle::from_coords([0.0, 0.0, 1.0, 0.0, 0.5, 1.0]);
        assert!(matches!(
            are_locally_delaunay(&t, &flat),
            Err(MeshError::DegenerateGeometry)
        ));
        assert!(matches!(circumcenter_of(&flat), Err(MeshError::DegenerateGeometry)));
    }
}
