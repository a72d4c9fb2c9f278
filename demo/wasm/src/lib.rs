// Copyright 2025 Lars Brubaker
// WASM bindings for lepp-delaunay

use lepp_delaunay::{parse_mesh, Mesh, RefineParams};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main_js() {
    console_error_panic_hook::set_once();
}

fn to_js(e: lepp_delaunay::MeshError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// A mesh that can be loaded from text, refined, and drawn as line segments.
#[wasm_bindgen]
pub struct MeshJs {
    inner: Mesh,
    last_report: String,
}

impl Default for MeshJs {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl MeshJs {
    #[wasm_bindgen(constructor)]
    pub fn new() -> MeshJs {
        MeshJs {
            inner: Mesh::new(),
            last_report: String::new(),
        }
    }

    /// Replace the mesh with the triangles in `text`, one
    /// `xa ya xb yb xc yc` line each.
    pub fn load(&mut self, text: &str) -> Result<(), JsValue> {
        self.inner = parse_mesh(text).map_err(to_js)?;
        self.last_report.clear();
        Ok(())
    }

    /// Refine until every angle reaches `tolerance` degrees or
    /// `max_iterations` operators ran. Returns true when fully refined.
    pub fn improve(&mut self, tolerance: f64, max_iterations: u32) -> Result<bool, JsValue> {
        let params = RefineParams::with_tolerance(tolerance).max_iterations(max_iterations as usize);
        let report = self.inner.improve(&params).map_err(to_js)?;
        self.last_report = report.to_string();
        Ok(report.complete)
    }

    /// Summary of the last `improve` call.
    pub fn report(&self) -> String {
        self.last_report.clone()
    }

    pub fn triangle_count(&self) -> u32 {
        self.inner.len() as u32
    }

    /// Smallest angle in the mesh in degrees, or 0 for an empty mesh.
    pub fn min_angle(&self) -> f64 {
        self.inner.min_angle().unwrap_or(0.0)
    }

    /// Flat `[x0, y0, x1, y1, ...]` line segments, three per triangle.
    pub fn get_segments(&self) -> Vec<f64> {
        self.inner.edge_segments().concat()
    }

    /// Same as `get_segments` with y mirrored for a canvas of `height` pixels.
    pub fn get_canvas_segments(&self, height: f64) -> Vec<f64> {
        self.inner
            .edge_segments()
            .iter()
            .flat_map(|&[x0, y0, x1, y1]| [x0, height - y0, x1, height - y1])
            .collect()
    }

    /// The mesh in the text format `load` reads.
    pub fn to_text(&self) -> String {
        lepp_delaunay::format_triangles(&self.inner)
    }
}

/// Convenience: load, refine with `tolerance`, and return the segments.
#[wasm_bindgen]
pub fn refine_text(text: &str, tolerance: f64, max_iterations: u32) -> Result<Vec<f64>, JsValue> {
    let mut mesh = MeshJs::new();
    mesh.load(text)?;
    mesh.improve(tolerance, max_iterations)?;
    Ok(mesh.get_segments())
}
