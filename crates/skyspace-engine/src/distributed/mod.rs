//! Distributed simulation world.
//!
//! [`DistributedWorld`] is the coordinator. It spawns one thread per
//! worker; each worker holds a full grid replica and shares nothing with
//! the others. Every tick the coordinator:
//!
//! 1. splits the en-route aircraft, in ascending id order, into one
//!    contiguous [`partition`] per worker,
//! 2. hands worker 0 the turn,
//! 3. collects every grid update and the returned aircraft.
//!
//! A worker holding the turn moves its aircraft one at a time. After each
//! move it broadcasts the complete grid, stamped with the next
//! [`GridVersion`], to every other worker and to the coordinator, then
//! continues. When its partition is done it passes the turn to the next
//! worker. Workers with an empty partition pass the turn straight on.
//!
//! Each grid update is received by every other participant before any
//! later aircraft plans, so a run here visits aircraft in exactly the
//! order a [`TickScheduler`](crate::TickScheduler) with default ranks
//! would, and produces the same trajectories.
//!
//! # Failure
//!
//! A version gap on any replica is reported as
//! [`SimError::StaleReplica`]. Any error poisons the world; later ticks
//! return [`SimError::RunInvalidated`].
//!
//! # Shutdown
//!
//! Dropping the world sends every worker a shutdown message and joins
//! its thread.

mod message;
mod partition;
mod worker;

pub use partition::partition;

use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Instant;

use crossbeam_channel::{unbounded, Receiver, Sender};
use skyspace_core::{
    AircraftId, GridVersion, Position, SetupError, SimError, TickId, WorkerId,
};
use skyspace_grid::Grid;
use skyspace_planner::{Planner, PriorityFallback};
use tracing::{debug, info, warn};

use crate::aircraft::Aircraft;
use crate::config::{DistributedConfig, SimConfig};
use crate::flight::check_invariants;
use crate::report::{tally, TickReport};
use crate::simulation::Simulation;
use message::{CoordinatorMsg, GridUpdate, WorkerMsg};
use worker::Worker;

struct WorkerHandle {
    id: WorkerId,
    tx: Sender<WorkerMsg>,
    thread: Option<JoinHandle<()>>,
}

impl WorkerHandle {
    fn send(&self, msg: WorkerMsg) -> Result<(), SimError> {
        self.tx
            .send(msg)
            .map_err(|_| SimError::WorkerDisconnected { worker: self.id })
    }
}

/// Coordinator for a multi-threaded run.
pub struct DistributedWorld {
    replica: Grid,
    version: GridVersion,
    /// Indexed by aircraft id. A slot is empty while its aircraft is out
    /// with a worker.
    slots: Vec<Option<Aircraft>>,
    inbox: Receiver<CoordinatorMsg>,
    workers: Vec<WorkerHandle>,
    current_tick: TickId,
    arrived: usize,
    no_fly: usize,
    verify: bool,
    poisoned: bool,
}

impl DistributedWorld {
    /// Build a world using the priority-fallback planner with the
    /// config's border policy.
    pub fn new(config: SimConfig, distributed: DistributedConfig) -> Result<Self, SetupError> {
        let planner = PriorityFallback::new(config.border);
        Self::with_planner(config, distributed, Arc::new(planner))
    }

    /// Build a world around a custom planner, shared by all workers.
    pub fn with_planner(
        config: SimConfig,
        distributed: DistributedConfig,
        planner: Arc<dyn Planner>,
    ) -> Result<Self, SetupError> {
        distributed.validate()?;
        let airspace = config.build()?;
        let arrived = airspace.aircraft.iter().filter(|a| a.is_arrived()).count();
        let no_fly = airspace.grid.no_fly_count();

        let (coordinator_tx, inbox) = unbounded();
        let (senders, receivers): (Vec<Sender<WorkerMsg>>, Vec<Receiver<WorkerMsg>>) =
            (0..distributed.workers).map(|_| unbounded()).unzip();

        let mut world = Self {
            replica: airspace.grid,
            version: GridVersion::default(),
            slots: airspace.aircraft.into_iter().map(Some).collect(),
            inbox,
            workers: Vec::with_capacity(distributed.workers),
            current_tick: TickId::default(),
            arrived,
            no_fly,
            verify: config.verify_invariants,
            poisoned: false,
        };

        for (w, rx) in receivers.into_iter().enumerate() {
            let id = WorkerId(w as u32);
            let peers = senders
                .iter()
                .enumerate()
                .filter(|&(p, _)| p != w)
                .map(|(p, tx)| (WorkerId(p as u32), tx.clone()))
                .collect();
            let next = senders
                .get(w + 1)
                .map(|tx| (WorkerId(w as u32 + 1), tx.clone()));
            let worker = Worker::new(
                id,
                rx,
                peers,
                next,
                coordinator_tx.clone(),
                Arc::clone(&planner),
                world.replica.clone(),
            );
            // On failure `world` drops here and shuts down the workers
            // spawned so far.
            let thread = worker.spawn().map_err(|e| SetupError::SpawnFailed {
                worker: id,
                reason: e.to_string(),
            })?;
            world.workers.push(WorkerHandle {
                id,
                tx: senders[w].clone(),
                thread: Some(thread),
            });
        }

        debug!(
            rows = config.rows,
            cols = config.cols,
            aircraft = world.slots.len(),
            workers = world.workers.len(),
            planner = planner.name(),
            "distributed world ready"
        );
        Ok(world)
    }

    /// Run one tick across all workers.
    ///
    /// On a finished world this returns an empty report and the tick
    /// counter does not move.
    pub fn advance_tick(&mut self) -> Result<TickReport, SimError> {
        if self.poisoned {
            return Err(SimError::RunInvalidated);
        }
        if self.is_done() {
            return Ok(TickReport::idle(self.current_tick, self.arrived));
        }
        let result = self.run_tick();
        if result.is_err() {
            self.poisoned = true;
        }
        result
    }

    fn run_tick(&mut self) -> Result<TickReport, SimError> {
        let start = Instant::now();
        let tick = self.current_tick.next();

        let en_route: Vec<usize> = self
            .slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| match slot {
                Some(a) if !a.is_arrived() => Some(i),
                _ => None,
            })
            .collect();

        let ranges = partition(en_route.len(), self.workers.len());
        for (worker, range) in self.workers.iter().zip(ranges) {
            let mut batch = Vec::with_capacity(range.len());
            for &i in &en_route[range] {
                let aircraft = self.slots[i].take().ok_or_else(|| SimError::InvariantViolated {
                    reason: format!("aircraft {i} is missing from the coordinator"),
                })?;
                batch.push(aircraft);
            }
            worker.send(WorkerMsg::Assign {
                tick,
                aircraft: batch,
            })?;
        }
        if let Some(first) = self.workers.first() {
            first.send(WorkerMsg::Turn {
                tick,
                version: self.version,
            })?;
        }

        let mut moves = Vec::with_capacity(en_route.len());
        let mut broadcasts = 0;
        let mut finished = 0;
        while let Some(handle) = self.workers.get(finished) {
            // Turns run in worker order, so the next Finished is from `awaiting`.
            let awaiting = handle.id;
            let msg = self
                .inbox
                .recv()
                .map_err(|_| SimError::WorkerDisconnected { worker: awaiting })?;
            match msg {
                CoordinatorMsg::Sync(update) => {
                    self.apply_sync(&update)?;
                    moves.push(update.record);
                }
                CoordinatorMsg::Finished {
                    worker,
                    aircraft,
                    version,
                    broadcasts: sent,
                } => {
                    if worker != awaiting {
                        return Err(SimError::InvariantViolated {
                            reason: format!(
                                "worker {worker} finished out of turn, awaiting {awaiting}"
                            ),
                        });
                    }
                    if version != self.version {
                        return Err(SimError::StaleReplica {
                            worker,
                            expected: self.version,
                            found: version,
                        });
                    }
                    for a in aircraft {
                        let index = a.id().0 as usize;
                        let Some(slot) = self.slots.get_mut(index) else {
                            return Err(SimError::InvariantViolated {
                                reason: format!("worker {worker} returned unknown aircraft {}", a.id()),
                            });
                        };
                        *slot = Some(a);
                    }
                    broadcasts += sent;
                    finished += 1;
                }
                CoordinatorMsg::Failed { worker, error } => {
                    warn!(%worker, %error, "worker failed");
                    return Err(error);
                }
            }
        }

        self.current_tick = tick;
        let landed = moves.iter().filter(|m| m.landed).count();
        self.arrived += landed;
        if self.verify {
            self.check_invariants()?;
        }

        let en_route = self.slots.len() - self.arrived;
        let mut report = TickReport {
            tick,
            moves,
            arrived_total: self.arrived,
            en_route,
            metrics: Default::default(),
        };
        tally(&report.moves, &mut report.metrics);
        report.metrics.broadcasts = broadcasts;
        report.metrics.total_us = start.elapsed().as_micros() as u64;
        debug!(
            %tick,
            moved = report.metrics.moved,
            held = report.metrics.held,
            landed,
            en_route,
            version = %self.version,
            "tick complete"
        );
        if self.is_done() {
            info!(%tick, aircraft = self.slots.len(), "all aircraft arrived");
        }
        Ok(report)
    }

    fn apply_sync(&mut self, update: &GridUpdate) -> Result<(), SimError> {
        let expected = self.version.next();
        if update.version != expected {
            return Err(SimError::StaleReplica {
                worker: update.origin,
                expected,
                found: update.version,
            });
        }
        self.replica.clone_from(&update.grid);
        self.version = update.version;
        Ok(())
    }

    /// Verify the occupancy invariant against the coordinator's replica.
    pub fn check_invariants(&self) -> Result<(), SimError> {
        check_invariants(&self.replica, self.slots.iter().flatten(), self.no_fly)
    }

    /// Number of worker threads.
    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    /// Version of the coordinator's replica: the number of moves applied
    /// since the run started.
    pub fn version(&self) -> GridVersion {
        self.version
    }

    /// `true` once an earlier error or [`shutdown()`](Self::shutdown)
    /// invalidated the run.
    pub fn is_poisoned(&self) -> bool {
        self.poisoned
    }

    /// Stop and join every worker. Returns the number of threads joined
    /// cleanly. Idempotent; later ticks return
    /// [`SimError::RunInvalidated`].
    pub fn shutdown(&mut self) -> usize {
        self.poisoned = true;
        for worker in &self.workers {
            let _ = worker.tx.send(WorkerMsg::Shutdown);
        }
        let mut joined = 0;
        for worker in &mut self.workers {
            if let Some(thread) = worker.thread.take() {
                if thread.join().is_ok() {
                    joined += 1;
                }
            }
        }
        joined
    }
}

impl Drop for DistributedWorld {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl Simulation for DistributedWorld {
    fn advance_tick(&mut self) -> Result<TickReport, SimError> {
        DistributedWorld::advance_tick(self)
    }

    fn is_done(&self) -> bool {
        self.arrived == self.slots.len()
    }

    fn current_tick(&self) -> TickId {
        self.current_tick
    }

    fn grid(&self) -> &Grid {
        &self.replica
    }

    fn positions(&self) -> Vec<(AircraftId, Position)> {
        self.slots
            .iter()
            .flatten()
            .filter(|a| !a.is_arrived())
            .map(|a| (a.id(), a.position()))
            .collect()
    }

    fn arrived_count(&self) -> usize {
        self.arrived
    }

    fn aircraft_count(&self) -> usize {
        self.slots.len()
    }
}
