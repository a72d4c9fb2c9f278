// Copyright 2025 Lars Brubaker
// License: MIT
//
// Planar geometric primitives: vertices, unordered edges, and the handful of
// floating-point predicates the refinement needs.
//
// All arithmetic is plain f64. Input coordinates are usually integral, but
// midpoints and centroids are not, so vertices are real-valued throughout.

use std::fmt;

pub type Real = f64;

/// Tolerance used by the circumcircle containment test.
pub const INCIRCLE_EPSILON: Real = 1e-7;

/// Signed areas below this magnitude are treated as collinear.
pub const AREA_EPSILON: Real = 1e-12;

/// A point in the plane. Equality is exact coordinate match.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vertex {
    pub x: Real,
    pub y: Real,
}

impl Vertex {
    #[inline]
    pub const fn new(x: Real, y: Real) -> Self {
        Vertex { x, y }
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance_to(&self, other: &Vertex) -> Real {
        (self.x - other.x).hypot(self.y - other.y)
    }

    #[inline]
    pub fn midpoint(&self, other: &Vertex) -> Vertex {
        Vertex::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Bit pattern used as a hash key. Adding zero folds -0.0 into +0.0 so
    /// that keys agree with `==`.
    #[inline]
    pub(crate) fn key(&self) -> (u64, u64) {
        ((self.x + 0.0).to_bits(), (self.y + 0.0).to_bits())
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vertex({}, {})", self.x, self.y)
    }
}

/// Euclidean distance between two vertices.
#[inline]
pub fn distance(v1: &Vertex, v2: &Vertex) -> Real {
    v1.distance_to(v2)
}

/// An unordered pair of vertices. `{a, b}` equals `{b, a}`.
#[derive(Copy, Clone, Debug)]
pub struct Edge {
    pub v1: Vertex,
    pub v2: Vertex,
}

impl Edge {
    #[inline]
    pub const fn new(v1: Vertex, v2: Vertex) -> Self {
        Edge { v1, v2 }
    }

    #[inline]
    pub fn length(&self) -> Real {
        self.v1.distance_to(&self.v2)
    }

    #[inline]
    pub fn midpoint(&self) -> Vertex {
        self.v1.midpoint(&self.v2)
    }

    #[inline]
    pub fn contains(&self, v: &Vertex) -> bool {
        self.v1 == *v || self.v2 == *v
    }

    /// Orientation-independent hash key.
    pub(crate) fn key(&self) -> EdgeKey {
        let (a, b) = (self.v1.key(), self.v2.key());
        if a <= b {
            EdgeKey(a, b)
        } else {
            EdgeKey(b, a)
        }
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Edge) -> bool {
        (self.v1 == other.v1 && self.v2 == other.v2) || (self.v1 == other.v2 && self.v2 == other.v1)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Edge({} - {})", self.v1, self.v2)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct EdgeKey((u64, u64), (u64, u64));

/// Twice the signed area of (a, b, c): the cross product (b - a) x (c - a).
/// Positive when the vertices are in counter-clockwise order.
#[inline]
pub fn orient2d(a: &Vertex, b: &Vertex, c: &Vertex) -> Real {
    (b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y)
}

/// Returns true if (a, b, c) are in strictly counter-clockwise order.
#[inline]
pub fn vert_ccw(a: &Vertex, b: &Vertex, c: &Vertex) -> bool {
    orient2d(a, b, c) > 0.0
}

/// Interior angle (degrees) opposite the side of length `opposite`, given the
/// two adjacent side lengths. Law of cosines; the cosine is clamped so that
/// rounding on near-degenerate triangles cannot produce NaN.
pub fn angle_from_sides(adjacent1: Real, adjacent2: Real, opposite: Real) -> Real {
    let denom = 2.0 * adjacent1 * adjacent2;
    if denom == 0.0 {
        return 0.0;
    }
    let cos = (adjacent1 * adjacent1 + adjacent2 * adjacent2 - opposite * opposite) / denom;
    cos.clamp(-1.0, 1.0).acos().to_degrees()
}

/// Center of the circle through a, b and c, by the determinant formula.
/// Returns `None` when the determinant vanishes (collinear vertices).
pub fn circumcenter(a: &Vertex, b: &Vertex, c: &Vertex) -> Option<Vertex> {
    let d = 2.0 * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y));
    if d == 0.0 || !d.is_finite() {
        return None;
    }
    let a2 = a.x * a.x + a.y * a.y;
    let b2 = b.x * b.x + b.y * b.y;
    let c2 = c.x * c.x + c.y * c.y;
    let px = (a2 * (b.y - c.y) + b2 * (c.y - a.y) + c2 * (a.y - b.y)) / d;
    let py = (a2 * (c.x - b.x) + b2 * (a.x - c.x) + c2 * (b.x - a.x)) / d;
    Some(Vertex::new(px, py))
}

/// Vertex average of a set of points.
pub fn centroid(points: &[Vertex]) -> Vertex {
    let n = points.len().max(1) as Real;
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Vertex::new(sx / n, sy / n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_3_4_5() {
        let a = Vertex::new(0.0, 0.0);
        let b = Vertex::new(3.0, 4.0);
        assert!((distance(&a, &b) - 5.0).abs() < 1e-12);
        assert!((b.distance_to(&a) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn edge_equality_ignores_orientation() {
        let a = Vertex::new(0.0, 0.0);
        let b = Vertex::new(4.0, 0.0);
        let c = Vertex::new(0.0, 3.0);
        assert_eq!(Edge::new(a, b), Edge::new(b, a));
        assert_ne!(Edge::new(a, b), Edge::new(a, c));
        assert_eq!(Edge::new(a, b).key(), Edge::new(b, a).key());
    }

    #[test]
    fn negative_zero_keys_match() {
        let a = Vertex::new(-0.0, 1.0);
        let b = Vertex::new(0.0, 1.0);
        assert_eq!(a, b);
        assert_eq!(a.key(), b.key());
    }

    #[test]
    fn orient2d_sign() {
        let a = Vertex::new(0.0, 0.0);
        let b = Vertex::new(1.0, 0.0);
        let c = Vertex::new(0.5, 1.0);
        assert!(vert_ccw(&a, &b, &c));
        assert!(!vert_ccw(&a, &c, &b));
        assert_eq!(orient2d(&a, &b, &Vertex::new(2.0, 0.0)), 0.0);
    }

    #[test]
    fn right_angle_from_sides() {
        let angle = angle_from_sides(3.0, 4.0, 5.0);
        assert!((angle - 90.0).abs() < 1e-9, "got {}", angle);
    }

    #[test]
    fn circumcenter_of_right_triangle_is_hypotenuse_midpoint() {
        let c = circumcenter(
            &Vertex::new(0.0, 0.0),
            &Vertex::new(4.0, 0.0),
            &Vertex::new(0.0, 3.0),
        )
        .unwrap();
        assert!((c.x - 2.0).abs() < 1e-12 && (c.y - 1.5).abs() < 1e-12, "got {}", c);
    }

    #[test]
    fn circumcenter_of_collinear_points_is_none() {
        let c = circumcenter(
            &Vertex::new(0.0, 0.0),
            &Vertex::new(1.0, 1.0),
            &Vertex::new(2.0, 2.0),
        );
        assert!(c.is_none());
    }

    #[test]
    fn centroid_of_square() {
        let g = centroid(&[
            Vertex::new(0.0, 0.0),
            Vertex::new(2.0, 0.0),
            Vertex::new(2.0, 2.0),
            Vertex::new(0.0, 2.0),
        ]);
        assert_eq!(g, Vertex::new(1.0, 1.0));
    }
}
