// Copyright 2025 Lars Brubaker
// License: MIT
//
// Error types for mesh loading and refinement.

use thiserror::Error;

/// Errors raised while reading the text mesh format.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("line {line}: {kind}")]
pub struct ParseError {
    /// 1-based line number in the input.
    pub line: usize,
    pub kind: ParseErrorKind,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseErrorKind {
    #[error("expected 6 coordinates, found {found}")]
    WrongTokenCount { found: usize },

    #[error("invalid number {token:?}")]
    InvalidNumber { token: String },
}

/// Errors raised by mesh construction and refinement.
#[derive(Debug, Error)]
pub enum MeshError {
    /// An input triangle has no area.
    #[error("triangle {index} is degenerate (collinear vertices)")]
    DegenerateTriangle { index: usize },

    /// An input triangle repeats the vertex set of an earlier one.
    #[error("triangle {index} duplicates an earlier triangle")]
    DuplicateTriangle { index: usize },

    /// A circumcenter was requested for collinear vertices, or an operator
    /// would have produced a zero-area triangle.
    #[error("degenerate geometry: collinear vertices")]
    DegenerateGeometry,

    #[error("invalid tolerance {0} (must be a finite angle in [0, 60] degrees)")]
    InvalidTolerance(f64),

    /// Adjacency was read after a mutation without `update_neighbours`.
    #[error("adjacency is stale; call update_neighbours first")]
    StaleAdjacency,

    #[error("triangle id does not refer to a live triangle")]
    UnknownTriangle,

    #[error("triangles do not share an edge")]
    NotAdjacent,

    /// The two triangles of an interior pair do not form a strictly convex
    /// quadrilateral, so the other diagonal would leave it.
    #[error("quadrilateral is not strictly convex")]
    NonConvexQuadrilateral,

    #[error("longest-edge propagation did not terminate after {steps} steps")]
    LeppDidNotTerminate { steps: usize },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type for mesh operations.
pub type Result<T> = std::result::Result<T, MeshError>;
