//! Test utilities and mock planners for Skyspace development.
//!
//! Provides text-frame grid fixtures and [`Planner`] mocks that break the
//! planner contract on purpose, so engine tests can exercise the fatal
//! error paths.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::sync::atomic::{AtomicUsize, Ordering};

use skyspace_core::{CellReader, GridError, MoveVector, Position};
use skyspace_planner::{Decision, Planner, Rule};

pub use fixtures::{grid_from_frame, pos};

/// Planner that always proposes the same vector, ignoring the grid.
///
/// Returns `Arrived` at the destination. Useful for forcing an
/// `InvalidClaim` against an occupied or no-fly target.
pub struct FixedPlanner {
    vector: MoveVector,
}

impl FixedPlanner {
    pub fn new(vector: MoveVector) -> Self {
        Self { vector }
    }
}

impl Planner for FixedPlanner {
    fn name(&self) -> &str {
        "FixedPlanner"
    }

    fn plan(
        &self,
        position: Position,
        destination: Position,
        _grid: &dyn CellReader,
    ) -> Result<Decision, GridError> {
        if position == destination {
            return Ok(Decision::Arrived);
        }
        if self.vector.is_hold() {
            return Ok(Decision::Hold);
        }
        Ok(Decision::Move {
            vector: self.vector,
            rule: Rule::Desired,
        })
    }
}

/// Planner that fails after a configurable number of successful calls,
/// delegating to an inner planner until then.
pub struct FailingPlanner<P> {
    inner: P,
    succeed_count: usize,
    call_count: AtomicUsize,
}

impl<P: Planner> FailingPlanner<P> {
    pub fn new(inner: P, succeed_count: usize) -> Self {
        Self {
            inner,
            succeed_count,
            call_count: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::Relaxed)
    }
}

impl<P: Planner> Planner for FailingPlanner<P> {
    fn name(&self) -> &str {
        "FailingPlanner"
    }

    fn plan(
        &self,
        position: Position,
        destination: Position,
        grid: &dyn CellReader,
    ) -> Result<Decision, GridError> {
        let n = self.call_count.fetch_add(1, Ordering::Relaxed);
        if n >= self.succeed_count {
            return Err(GridError::OutOfBounds {
                position,
                rows: grid.rows(),
                cols: grid.cols(),
            });
        }
        self.inner.plan(position, destination, grid)
    }
}
