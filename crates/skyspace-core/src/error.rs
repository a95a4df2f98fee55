//! Error types for the Skyspace simulator.
//!
//! Organized by phase: grid access ([`GridError`]), setup validation
//! ([`SetupError`]) and tick execution ([`SimError`]). Nothing is retried:
//! setup errors stop a run before it starts, and any [`SimError`]
//! invalidates the run it came from.

use crate::cell::CellState;
use crate::id::{AircraftId, GridVersion, WorkerId};
use crate::position::Position;
use std::fmt;

/// Errors from bounds-checked grid access and cell mutation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// A queried or proposed coordinate lies outside the grid extents.
    #[error("position {position} out of bounds: [0, {rows}) x [0, {cols})")]
    OutOfBounds {
        /// The offending coordinate.
        position: Position,
        /// Grid row count.
        rows: u32,
        /// Grid column count.
        cols: u32,
    },
    /// Attempted to occupy a cell that is not `Free`.
    ///
    /// Planners only return validated targets, so this indicates a stale
    /// grid read.
    #[error("invalid claim on {position}: cell is {state}")]
    InvalidClaim {
        /// The cell that could not be claimed.
        position: Position,
        /// Its state at the time of the claim.
        state: CellState,
    },
    /// Attempted to vacate a cell that is not `Occupied`.
    #[error("cannot vacate {position}: cell is {state}")]
    NotOccupied {
        /// The cell that could not be vacated.
        position: Position,
        /// Its state at the time of the release.
        state: CellState,
    },
    /// Attempted to toggle occupancy of a no-fly cell.
    #[error("cannot toggle occupancy of no-fly cell {position}")]
    NoFlyToggle {
        /// The no-fly cell.
        position: Position,
    },
    /// Attempted to mark a cell no-fly that is already non-`Free`.
    #[error("cannot mark {position} no-fly: cell is {state}")]
    AlreadyMarked {
        /// The cell.
        position: Position,
        /// Its current state.
        state: CellState,
    },
    /// Attempted to construct a grid with zero cells.
    #[error("grid must have at least one cell")]
    EmptyGrid,
    /// A grid dimension exceeds the coordinate range.
    #[error("{name} = {value} exceeds maximum {max}")]
    DimensionTooLarge {
        /// Which dimension (`"rows"` or `"cols"`).
        name: &'static str,
        /// The requested value.
        value: u32,
        /// The largest accepted value.
        max: u32,
    },
}

/// Which setup entry claimed a coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Placement {
    /// Departure cell of an aircraft.
    Departure(AircraftId),
    /// Destination cell of an aircraft.
    Destination(AircraftId),
    /// A no-fly cell.
    NoFly,
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Placement::Departure(id) => write!(f, "departure of aircraft {id}"),
            Placement::Destination(id) => write!(f, "destination of aircraft {id}"),
            Placement::NoFly => write!(f, "no-fly cell"),
        }
    }
}

/// Errors detected while validating a configuration. The run does not
/// start.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    /// Two setup entries claim the same coordinate.
    #[error("duplicate initial placement at {position}: {first} and {second}")]
    DuplicateInitialPlacement {
        /// The contested coordinate.
        position: Position,
        /// The entry registered first.
        first: Placement,
        /// The conflicting entry.
        second: Placement,
    },
    /// Two aircraft share a priority rank, so ranks are not a total order.
    #[error("aircraft {first} and {second} share priority rank {rank}")]
    DuplicatePriorityRank {
        /// The shared rank.
        rank: u32,
        /// Aircraft registered first.
        first: AircraftId,
        /// Conflicting aircraft.
        second: AircraftId,
    },
    /// Distributed mode requested with zero workers.
    #[error("distributed mode requires at least one worker")]
    NoWorkers,
    /// A generated scenario does not fit on the grid.
    #[error("scenario needs {requested} cells but only {available} are available")]
    InsufficientCells {
        /// Cells the request needs.
        requested: usize,
        /// Cells that can hold them.
        available: usize,
    },
    /// A worker thread could not be spawned.
    #[error("failed to spawn worker {worker}: {reason}")]
    SpawnFailed {
        /// The worker that failed to start.
        worker: WorkerId,
        /// OS error description.
        reason: String,
    },
    /// Grid construction or placement failed.
    #[error("grid: {0}")]
    Grid(#[from] GridError),
}

/// Errors raised while advancing a run.
///
/// Every variant is fatal: the occupancy invariant can no longer be
/// trusted and the world refuses further ticks.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SimError {
    /// A grid operation failed during move application.
    #[error("grid consistency violation: {0}")]
    Grid(#[from] GridError),
    /// A worker was handed a turn while holding an out-of-date replica,
    /// or received updates out of order.
    #[error("worker {worker} replica is stale: expected {expected}, found {found}")]
    StaleReplica {
        /// The worker (or coordinator) whose replica diverged.
        worker: WorkerId,
        /// Version the sender expected.
        expected: GridVersion,
        /// Version the replica holds.
        found: GridVersion,
    },
    /// A post-tick invariant check failed.
    #[error("invariant violated: {reason}")]
    InvariantViolated {
        /// What was observed.
        reason: String,
    },
    /// A worker's channel closed before the tick completed.
    #[error("worker {worker} disconnected")]
    WorkerDisconnected {
        /// The missing worker.
        worker: WorkerId,
    },
    /// An earlier error invalidated this run.
    #[error("run invalidated by an earlier error")]
    RunInvalidated,
    /// The run driver's tick limit was reached before every aircraft
    /// arrived.
    #[error("tick limit {limit} reached before all aircraft arrived")]
    TickLimitExceeded {
        /// The configured limit.
        limit: u64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_cell() {
        let e = GridError::OutOfBounds {
            position: Position::new(-1, 3),
            rows: 4,
            cols: 5,
        };
        assert_eq!(e.to_string(), "position (-1, 3) out of bounds: [0, 4) x [0, 5)");

        let e = SetupError::DuplicateInitialPlacement {
            position: Position::new(2, 2),
            first: Placement::Departure(AircraftId(0)),
            second: Placement::NoFly,
        };
        assert_eq!(
            e.to_string(),
            "duplicate initial placement at (2, 2): departure of aircraft 0 and no-fly cell"
        );
    }

    #[test]
    fn grid_errors_convert_into_sim_errors() {
        let e: SimError = GridError::InvalidClaim {
            position: Position::new(1, 1),
            state: CellState::Occupied,
        }
        .into();
        assert!(matches!(e, SimError::Grid(GridError::InvalidClaim { .. })));
    }
}
