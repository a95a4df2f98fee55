//! Messages exchanged between the coordinator and workers.

use std::sync::Arc;

use skyspace_core::{GridVersion, SimError, TickId, WorkerId};
use skyspace_grid::Grid;

use crate::aircraft::Aircraft;
use crate::report::MoveRecord;

/// The full grid after one applied move, stamped with its version.
#[derive(Debug)]
pub(crate) struct GridUpdate {
    pub origin: WorkerId,
    pub version: GridVersion,
    pub grid: Grid,
    pub record: MoveRecord,
}

/// Coordinator or peer to worker.
pub(crate) enum WorkerMsg {
    /// This tick's partition, in commit order.
    Assign { tick: TickId, aircraft: Vec<Aircraft> },
    /// Permission to move; `version` is the grid the sender left behind.
    Turn { tick: TickId, version: GridVersion },
    /// A peer moved.
    Sync(Arc<GridUpdate>),
    Shutdown,
}

/// Worker to coordinator.
pub(crate) enum CoordinatorMsg {
    Sync(Arc<GridUpdate>),
    /// The worker's turn is over; its aircraft come home.
    Finished {
        worker: WorkerId,
        aircraft: Vec<Aircraft>,
        version: GridVersion,
        broadcasts: u64,
    },
    Failed { worker: WorkerId, error: SimError },
}
