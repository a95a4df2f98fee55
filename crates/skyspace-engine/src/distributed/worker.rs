//! Worker thread: one grid replica, one partition per tick.

use std::io;
use std::mem;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender};
use skyspace_core::{GridVersion, SimError, TickId, WorkerId};
use skyspace_grid::Grid;
use skyspace_planner::Planner;
use tracing::{debug, debug_span, trace, warn};

use super::message::{CoordinatorMsg, GridUpdate, WorkerMsg};
use crate::aircraft::Aircraft;
use crate::flight::fly;
use crate::report::MoveRecord;

pub(crate) struct Worker {
    id: WorkerId,
    inbox: Receiver<WorkerMsg>,
    peers: Vec<(WorkerId, Sender<WorkerMsg>)>,
    next: Option<(WorkerId, Sender<WorkerMsg>)>,
    coordinator: Sender<CoordinatorMsg>,
    planner: Arc<dyn Planner>,
    replica: Grid,
    version: GridVersion,
    partition: Vec<Aircraft>,
}

impl Worker {
    pub(crate) fn new(
        id: WorkerId,
        inbox: Receiver<WorkerMsg>,
        peers: Vec<(WorkerId, Sender<WorkerMsg>)>,
        next: Option<(WorkerId, Sender<WorkerMsg>)>,
        coordinator: Sender<CoordinatorMsg>,
        planner: Arc<dyn Planner>,
        replica: Grid,
    ) -> Self {
        Self {
            id,
            inbox,
            peers,
            next,
            coordinator,
            planner,
            replica,
            version: GridVersion::default(),
            partition: Vec::new(),
        }
    }

    /// Start the worker on its own thread.
    ///
    /// A panic inside the worker is reported to the coordinator as a
    /// disconnect so the coordinator never waits on a dead thread.
    pub(crate) fn spawn(self) -> io::Result<JoinHandle<()>> {
        let id = self.id;
        let coordinator = self.coordinator.clone();
        thread::Builder::new()
            .name(format!("skyspace-worker-{}", id.0))
            .spawn(move || {
                let outcome = panic::catch_unwind(AssertUnwindSafe(move || self.run()));
                if outcome.is_err() {
                    let _ = coordinator.send(CoordinatorMsg::Failed {
                        worker: id,
                        error: SimError::WorkerDisconnected { worker: id },
                    });
                }
            })
    }

    fn run(mut self) {
        let span = debug_span!("worker", worker = self.id.0);
        let _entered = span.enter();
        debug!(peers = self.peers.len(), "worker started");

        while let Ok(msg) = self.inbox.recv() {
            let outcome = match msg {
                WorkerMsg::Assign { tick, aircraft } => {
                    trace!(%tick, aircraft = aircraft.len(), "partition assigned");
                    self.partition = aircraft;
                    Ok(())
                }
                WorkerMsg::Turn { tick, version } => self.take_turn(tick, version),
                WorkerMsg::Sync(update) => self.apply_sync(&update),
                WorkerMsg::Shutdown => break,
            };
            if let Err(error) = outcome {
                warn!(%error, "worker failed");
                let failed = CoordinatorMsg::Failed {
                    worker: self.id,
                    error,
                };
                if self.coordinator.send(failed).is_err() {
                    break;
                }
            }
        }
        debug!("worker stopped");
    }

    /// Move every aircraft in the partition, broadcasting after each one,
    /// then hand the aircraft back and pass the turn on.
    fn take_turn(&mut self, tick: TickId, version: GridVersion) -> Result<(), SimError> {
        if version != self.version {
            return Err(SimError::StaleReplica {
                worker: self.id,
                expected: version,
                found: self.version,
            });
        }

        let mut partition = mem::take(&mut self.partition);
        let mut broadcasts = 0;
        for aircraft in &mut partition {
            let record = fly(aircraft, &mut self.replica, self.planner.as_ref())?;
            self.version = self.version.next();
            broadcasts += self.publish(record)?;
        }
        trace!(%tick, aircraft = partition.len(), version = %self.version, "turn complete");

        self.coordinator
            .send(CoordinatorMsg::Finished {
                worker: self.id,
                aircraft: partition,
                version: self.version,
                broadcasts,
            })
            .map_err(|_| SimError::WorkerDisconnected { worker: self.id })?;

        if let Some((next_id, next)) = &self.next {
            next.send(WorkerMsg::Turn {
                tick,
                version: self.version,
            })
            .map_err(|_| SimError::WorkerDisconnected { worker: *next_id })?;
        }
        Ok(())
    }

    /// Send the current replica to every peer and the coordinator.
    /// Returns the number of messages sent.
    fn publish(&self, record: MoveRecord) -> Result<u64, SimError> {
        let update = Arc::new(GridUpdate {
            origin: self.id,
            version: self.version,
            grid: self.replica.clone(),
            record,
        });
        for (peer, tx) in &self.peers {
            tx.send(WorkerMsg::Sync(Arc::clone(&update)))
                .map_err(|_| SimError::WorkerDisconnected { worker: *peer })?;
        }
        self.coordinator
            .send(CoordinatorMsg::Sync(update))
            .map_err(|_| SimError::WorkerDisconnected { worker: self.id })?;
        Ok(self.peers.len() as u64 + 1)
    }

    /// Replace the replica with a peer's grid. Updates must arrive in
    /// version order with no gaps.
    fn apply_sync(&mut self, update: &GridUpdate) -> Result<(), SimError> {
        let expected = self.version.next();
        if update.version != expected {
            return Err(SimError::StaleReplica {
                worker: self.id,
                expected,
                found: update.version,
            });
        }
        self.replica.clone_from(&update.grid);
        self.version = update.version;
        trace!(origin = %update.origin, version = %update.version, "replica synced");
        Ok(())
    }
}
