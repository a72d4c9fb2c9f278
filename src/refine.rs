// Copyright 2025 Lars Brubaker
// License: MIT
//
// Lepp-Delaunay refinement driver.
//
// Each iteration takes the first bad triangle in mesh order, walks its
// longest-edge propagation path, and applies one operator chosen by how the
// path ended:
//
//   border terminal                  -> bisect the last triangle
//   interior, not locally Delaunay   -> swap the shared diagonal
//   interior, locally Delaunay       -> insert the quadrilateral centroid
//
// Adjacency and the bad set are rebuilt from scratch after every operator.
// The loop stops when no bad triangle is left or the iteration cap is hit.

use std::fmt;

use log::{debug, trace, warn};

use crate::arena::TriId;
use crate::error::{MeshError, Result};
use crate::geom::Real;
use crate::mesh::lepp::Lepp;
use crate::mesh::Mesh;

/// Default minimum acceptable angle, in degrees.
pub const DEFAULT_TOLERANCE: Real = 30.0;

/// Default cap on refinement iterations.
pub const DEFAULT_MAX_ITERATIONS: usize = 400;

/// No triangle has a minimum angle above 60 degrees.
pub const MAX_TOLERANCE: Real = 60.0;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RefineParams {
    /// Triangles with a minimum angle strictly below this (degrees) are bad.
    pub tolerance: Real,
    /// Upper bound on operator applications.
    pub max_iterations: usize,
}

impl Default for RefineParams {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl RefineParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_tolerance(tolerance: Real) -> Self {
        Self {
            tolerance,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn tolerance(mut self, tolerance: Real) -> Self {
        self.tolerance = tolerance;
        self
    }

    #[must_use]
    pub const fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.tolerance.is_finite() || !(0.0..=MAX_TOLERANCE).contains(&self.tolerance) {
            return Err(MeshError::InvalidTolerance(self.tolerance));
        }
        Ok(())
    }
}

/// The operator applied in one iteration.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RefineOp {
    Bisect,
    Swap,
    Centroid,
}

impl fmt::Display for RefineOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RefineOp::Bisect => "bisect",
            RefineOp::Swap => "swap",
            RefineOp::Centroid => "centroid",
        })
    }
}

/// Outcome of an `improve` call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RefineReport {
    pub iterations: usize,
    pub bisections: usize,
    pub swaps: usize,
    pub centroid_insertions: usize,
    /// Bad triangles when refinement started.
    pub bad_initial: usize,
    /// Bad triangles left when refinement stopped.
    pub bad_remaining: usize,
    /// False when the iteration cap stopped the loop with bad triangles left.
    /// The mesh is still valid in that case, just not fully refined.
    pub complete: bool,
}

impl RefineReport {
    fn record(&mut self, op: RefineOp) {
        match op {
            RefineOp::Bisect => self.bisections += 1,
            RefineOp::Swap => self.swaps += 1,
            RefineOp::Centroid => self.centroid_insertions += 1,
        }
    }
}

impl fmt::Display for RefineReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} iterations ({} bisections, {} swaps, {} centroids), bad {} -> {}{}",
            self.iterations,
            self.bisections,
            self.swaps,
            self.centroid_insertions,
            self.bad_initial,
            self.bad_remaining,
            if self.complete { "" } else { " (incomplete)" }
        )
    }
}

/// Hooks into the refinement loop. All methods default to doing nothing.
pub trait RefineObserver {
    fn on_start(&mut self, _bad: usize) {}
    fn on_iteration(&mut self, _iteration: usize, _bad_remaining: usize) {}
    fn on_lepp(&mut self, _lepp: &Lepp) {}
    fn on_operation(&mut self, _op: RefineOp) {}
    fn on_finish(&mut self, _report: &RefineReport) {}
}

/// Observer that ignores everything.
#[derive(Copy, Clone, Debug, Default)]
pub struct Silent;

impl RefineObserver for Silent {}

/// Observer that forwards progress to the `log` facade.
#[derive(Copy, Clone, Debug, Default)]
pub struct LogObserver;

impl RefineObserver for LogObserver {
    fn on_start(&mut self, bad: usize) {
        debug!("refinement start: {} bad triangles", bad);
    }

    fn on_iteration(&mut self, iteration: usize, bad_remaining: usize) {
        debug!("iteration {:<6} {} bad triangles left", iteration, bad_remaining);
    }

    fn on_lepp(&mut self, lepp: &Lepp) {
        trace!("lepp length {} ({:?})", lepp.len(), lepp.terminal);
    }

    fn on_operation(&mut self, op: RefineOp) {
        trace!("applied {}", op);
    }

    fn on_finish(&mut self, report: &RefineReport) {
        debug!("refinement done: {}", report);
    }
}

impl Mesh {
    /// Refine until every triangle's minimum angle reaches
    /// `params.tolerance` or `params.max_iterations` operators were applied.
    ///
    /// Hitting the cap is not an error: the report has `complete == false`
    /// and the mesh holds the last refined state.
    ///
    /// # Errors
    ///
    /// Returns an error if the tolerance is invalid, or if an operator meets
    /// degenerate geometry. The mesh is valid in either case.
    pub fn improve(&mut self, params: &RefineParams) -> Result<RefineReport> {
        self.improve_with_observer(params, &mut Silent)
    }

    /// `improve` with progress reported to `observer`.
    pub fn improve_with_observer(
        &mut self,
        params: &RefineParams,
        observer: &mut dyn RefineObserver,
    ) -> Result<RefineReport> {
        params.validate()?;

        self.update_neighbours();
        let mut bad = self.find_bad_triangles(params.tolerance);

        let mut report = RefineReport {
            bad_initial: bad.len(),
            ..RefineReport::default()
        };
        observer.on_start(bad.len());

        while let Some(&t0) = bad.first() {
            if report.iterations >= params.max_iterations {
                break;
            }
            observer.on_iteration(report.iterations, bad.len());

            let lepp = self.lepp(t0)?;
            observer.on_lepp(&lepp);
            let op = self.apply_terminal_operator(&lepp)?;
            observer.on_operation(op);
            report.record(op);

            bad = self.update_bad_triangles(params.tolerance);
            report.iterations += 1;
        }

        report.bad_remaining = bad.len();
        report.complete = bad.is_empty();
        if !report.complete {
            warn!(
                "refinement stopped at the iteration cap ({}) with {} bad triangles left",
                params.max_iterations,
                bad.len()
            );
        }
        observer.on_finish(&report);
        Ok(report)
    }

    /// Run one refinement step on `t0`: compute its Lepp and apply the
    /// selected operator. Rebuilds adjacency first if it is stale.
    pub fn refine_triangle(&mut self, t0: TriId) -> Result<RefineOp> {
        if !self.is_adjacency_valid() {
            self.update_neighbours();
        }
        let lepp = self.lepp(t0)?;
        self.apply_terminal_operator(&lepp)
    }

    fn apply_terminal_operator(&mut self, lepp: &Lepp) -> Result<RefineOp> {
        if lepp.is_border() {
            self.insert_center(lepp)?;
            return Ok(RefineOp::Bisect);
        }
        let (prev, last) = lepp.terminal_pair().ok_or(MeshError::NotAdjacent)?;
        if self.are_locally_delaunay(prev, last)? {
            self.insert_centroid(lepp)?;
            Ok(RefineOp::Centroid)
        } else {
            self.swap_diagonals(lepp)?;
            Ok(RefineOp::Swap)
        }
    }

    /// Rebuild adjacency and re-scan the whole mesh for bad triangles.
    pub fn update_bad_triangles(&mut self, tolerance: Real) -> Vec<TriId> {
        self.update_neighbours();
        self.find_bad_triangles(tolerance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Vertex;
    use crate::triangle::Triangle;

    #[derive(Default)]
    struct Recorder {
        ops: Vec<RefineOp>,
        iterations: Vec<usize>,
        finished: bool,
    }

    impl RefineObserver for Recorder {
        fn on_iteration(&mut self, iteration: usize, _bad_remaining: usize) {
            self.iterations.push(iteration);
        }
        fn on_operation(&mut self, op: RefineOp) {
            self.ops.push(op);
        }
        fn on_finish(&mut self, _report: &RefineReport) {
            self.finished = true;
        }
    }

    fn right_triangle() -> Mesh {
        Mesh::from_triangles([Triangle::from_coords([0.0, 0.0, 4.0, 0.0, 0.0, 3.0])]).unwrap()
    }

    #[test]
    fn params_builder_and_validation() {
        let p = RefineParams::new().tolerance(25.0).max_iterations(10);
        assert_eq!(p.tolerance, 25.0);
        assert_eq!(p.max_iterations, 10);
        assert!(p.validate().is_ok());
        assert_eq!(RefineParams::default().max_iterations, 400);
        for bad in [-1.0, 61.0, Real::NAN, Real::INFINITY] {
            assert!(matches!(
                RefineParams::with_tolerance(bad).validate(),
                Err(MeshError::InvalidTolerance(_))
            ));
        }
    }

    #[test]
    fn empty_mesh_is_a_no_op() {
        let mut mesh = Mesh::new();
        let report = mesh.improve(&RefineParams::with_tolerance(30.0)).unwrap();
        assert!(report.complete);
        assert_eq!(report.iterations, 0);
        assert!(mesh.is_empty());
    }

    #[test]
    fn first_step_bisects_hypotenuse() {
        let mut mesh = right_triangle();
        let params = RefineParams::with_tolerance(40.0).max_iterations(1);
        let mut recorder = Recorder::default();
        let report = mesh.improve_with_observer(&params, &mut recorder).unwrap();
        assert_eq!(recorder.ops, vec![RefineOp::Bisect]);
        assert_eq!(report.iterations, 1);
        assert_eq!(report.bisections, 1);
        assert!(recorder.finished);
        assert_eq!(mesh.len(), 2);
        let m = Vertex::new(2.0, 1.5);
        assert!(mesh.triangles().all(|t| t.has_vertex(&m)));
        assert!((mesh.total_area() - 6.0).abs() < 1e-9);
    }

    #[test]
    fn log_observer_runs_without_logger() {
        let mut mesh = right_triangle();
        let params = RefineParams::with_tolerance(40.0).max_iterations(3);
        let report = mesh
            .improve_with_observer(&params, &mut LogObserver)
            .unwrap();
        assert!(report.iterations <= 3);
        // bisect adds one triangle, centroid two, swap none
        assert_eq!(
            mesh.len(),
            1 + report.bisections + 2 * report.centroid_insertions
        );
    }

    #[test]
    fn zero_cap_reports_incomplete() {
        let mut mesh = right_triangle();
        let report = mesh
            .improve(&RefineParams::with_tolerance(40.0).max_iterations(0))
            .unwrap();
        assert!(!report.complete);
        assert_eq!(report.bad_initial, 1);
        assert_eq!(report.bad_remaining, 1);
        assert_eq!(mesh.len(), 1);
        assert!(format!("{report}").contains("incomplete"));
    }

    #[test]
    fn good_mesh_is_untouched() {
        let mut mesh = right_triangle();
        let report = mesh.improve(&RefineParams::with_tolerance(30.0)).unwrap();
        assert!(report.complete);
        assert_eq!(report.iterations, 0);
        assert_eq!(mesh.len(), 1);
    }

    #[test]
    fn refine_triangle_rebuilds_stale_adjacency() {
        let mut mesh = Mesh::from_triangles([
            Triangle::from_coords([0.0, 0.0, 4.0, 0.0, 2.0, 1.5]),
            Triangle::from_coords([4.0, 0.0, 0.0, 0.0, 2.0, -1.5]),
        ])
        .unwrap();
        let t0 = mesh.ids()[0];
        assert_eq!(mesh.refine_triangle(t0).unwrap(), RefineOp::Swap);
        assert_eq!(mesh.len(), 2);
    }

    #[test]
    fn stops_within_cap_and_keeps_area() {
        let mut mesh = right_triangle();
        let params = RefineParams::with_tolerance(40.0).max_iterations(50);
        let report = mesh.improve(&params).unwrap();
        assert!(report.iterations <= 50);
        assert_eq!(report.complete, report.bad_remaining == 0);
        assert_eq!(
            report.iterations,
            report.bisections + report.swaps + report.centroid_insertions
        );
        assert!((mesh.total_area() - 6.0).abs() < 1e-9);
        assert!(mesh.triangles().all(|t| !t.is_degenerate()));
    }
}
