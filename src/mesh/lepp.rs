// Copyright 2025 Lars Brubaker
// Longest-edge propagation path (Lepp) traversal.

use super::Mesh;
use crate::arena::TriId;
use crate::error::{MeshError, Result};

/// How a Lepp walk ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Terminal {
    /// The last triangle's longest edge lies on the mesh boundary.
    Border,
    /// The last two triangles share an edge that is longest for both.
    Interior,
}

/// The ordered chain of triangles from a starting triangle to its terminal
/// configuration. Every triangle appears once.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Lepp {
    pub path: Vec<TriId>,
    pub terminal: Terminal,
}

impl Lepp {
    #[inline]
    pub fn is_border(&self) -> bool {
        self.terminal == Terminal::Border
    }

    /// Last triangle of the path; the one an operator acts on. `None` only
    /// for a hand-built empty path.
    #[inline]
    pub fn last(&self) -> Option<TriId> {
        self.path.last().copied()
    }

    /// `(second to last, last)` for an interior terminal.
    pub fn terminal_pair(&self) -> Option<(TriId, TriId)> {
        match (self.terminal, self.path.as_slice()) {
            (Terminal::Interior, [.., prev, last]) => Some((*prev, *last)),
            _ => None,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.path.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }
}

impl Mesh {
    /// Walk from `t0` across longest edges until one of the terminal
    /// configurations is reached:
    ///
    /// - the current triangle has no neighbour across its longest edge
    ///   (border; path ends with it),
    /// - that neighbour has no neighbour across its own longest edge
    ///   (border; path ends with the neighbour),
    /// - the shared edge is a longest edge of that neighbour too
    ///   (interior; path ends with the pair).
    ///
    /// The last case includes ties: when the neighbour has another edge
    /// exactly as long as the shared one, the pair is still terminal. Longest
    /// edges therefore strictly grow along the walk and it cannot cycle.
    ///
    /// Requires fresh adjacency.
    pub fn lepp(&self, t0: TriId) -> Result<Lepp> {
        self.require_adjacency()?;
        self.triangle(t0)?;

        let mut path = vec![t0];
        let mut current = t0;
        loop {
            if path.len() > self.len() {
                return Err(MeshError::LeppDidNotTerminate { steps: path.len() });
            }
            let t = self.triangle(current)?;
            let Some(next) = t.neighbour_longest_edge() else {
                return Ok(Lepp {
                    path,
                    terminal: Terminal::Border,
                });
            };
            let shared = t.longest_edge().length();
            path.push(next);

            let n = self.triangle(next)?;
            if n.longest_edge().length() <= shared {
                return Ok(Lepp {
                    path,
                    terminal: Terminal::Interior,
                });
            }
            if n.neighbour_longest_edge().is_none() {
                return Ok(Lepp {
                    path,
                    terminal: Terminal::Border,
                });
            }
            current = next;
        }
    }
}
