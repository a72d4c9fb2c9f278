// lepp-delaunay: Lepp-Delaunay quality refinement of planar triangle meshes
// Copyright 2025 Lars Brubaker
// License: MIT

pub mod arena;
pub mod error;
pub mod geom;
pub mod mesh;
pub mod parse;
pub mod refine;
pub mod triangle;

pub use arena::TriId;
pub use error::{MeshError, ParseError, ParseErrorKind, Result};
pub use geom::{distance, Edge, Real, Vertex};
pub use mesh::delaunay::{are_locally_delaunay, MAX_DELAUNAY_ANGLE};
pub use mesh::lepp::{Lepp, Terminal};
pub use mesh::ops::Quad;
pub use mesh::Mesh;
pub use parse::{format_triangles, parse_mesh, parse_triangles, read_file, write_file};
pub use refine::{LogObserver, RefineObserver, RefineOp, RefineParams, RefineReport, Silent};
pub use triangle::{EdgeSlot, Triangle};
