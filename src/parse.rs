// Copyright 2025 Lars Brubaker
// License: MIT
//
// Plain-text triangle list format.
//
// One triangle per line: `xa ya xb yb xc yc`, whitespace separated. Blank
// lines are skipped. Integer and real coordinates are both accepted.

use std::fs;
use std::path::Path;

use crate::error::{ParseError, ParseErrorKind, Result};
use crate::geom::Real;
use crate::mesh::Mesh;
use crate::triangle::Triangle;

/// Parse one triangle line. `line` is the 1-based line number for errors.
fn parse_line(text: &str, line: usize) -> std::result::Result<Triangle, ParseError> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.len() != 6 {
        return Err(ParseError {
            line,
            kind: ParseErrorKind::WrongTokenCount {
                found: tokens.len(),
            },
        });
    }
    let mut coords = [0.0 as Real; 6];
    for (slot, token) in coords.iter_mut().zip(&tokens) {
        *slot = match token.parse::<Real>() {
            Ok(v) if v.is_finite() => v,
            _ => {
                return Err(ParseError {
                    line,
                    kind: ParseErrorKind::InvalidNumber {
                        token: (*token).to_string(),
                    },
                })
            }
        };
    }
    Ok(Triangle::from_coords(coords))
}

/// Parse a whole triangle list.
pub fn parse_triangles(data: &str) -> std::result::Result<Vec<Triangle>, ParseError> {
    data.lines()
        .enumerate()
        .filter(|(_, l)| !l.trim().is_empty())
        .map(|(i, l)| parse_line(l, i + 1))
        .collect()
}

/// Parse a triangle list into a validated `Mesh`.
pub fn parse_mesh(data: &str) -> Result<Mesh> {
    Mesh::from_triangles(parse_triangles(data)?)
}

/// Read and parse a mesh file.
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Mesh> {
    let data = fs::read_to_string(path)?;
    parse_mesh(&data)
}

/// Serialize in the same format `parse_triangles` reads, in mesh order.
/// Coordinates are written in shortest round-trip form.
pub fn format_triangles(mesh: &Mesh) -> String {
    mesh.triangles()
        .map(|t| {
            format!(
                "{} {} {} {} {} {}\n",
                t.va.x, t.va.y, t.vb.x, t.vb.y, t.vc.x, t.vc.y
            )
        })
        .collect()
}

/// Write `mesh` to `path` in the text format.
pub fn write_file<P: AsRef<Path>>(mesh: &Mesh, path: P) -> Result<()> {
    fs::write(path, format_triangles(mesh))?;
    Ok(())
}
