//! Single-process tick scheduler.
//!
//! [`TickScheduler`] owns the grid exclusively. Each
//! [`advance_tick()`](TickScheduler::advance_tick) visits every en-route
//! aircraft once in ascending `(priority_rank, id)` order; each aircraft
//! plans against the grid as left by the aircraft before it, and its move
//! is applied before the next one plans.
//!
//! # Failure
//!
//! Any error during a tick leaves the world poisoned. The grid may hold a
//! partially applied tick, so every later `advance_tick()` returns
//! [`SimError::RunInvalidated`].

use std::time::Instant;

use indexmap::IndexMap;
use skyspace_core::{AircraftId, Position, SetupError, SimError, TickId};
use skyspace_grid::Grid;
use skyspace_planner::{Planner, PriorityFallback};
use tracing::{debug, info};

use crate::aircraft::Aircraft;
use crate::config::SimConfig;
use crate::flight::{check_invariants, fly};
use crate::report::{tally, TickReport};
use crate::simulation::Simulation;

// Compile-time assertion: TickScheduler can move to another thread.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<TickScheduler>();
    }
};

/// Single-threaded simulation world.
pub struct TickScheduler {
    grid: Grid,
    aircraft: IndexMap<AircraftId, Aircraft>,
    planner: Box<dyn Planner>,
    current_tick: TickId,
    arrived: usize,
    no_fly: usize,
    verify: bool,
    poisoned: bool,
}

impl TickScheduler {
    /// Build a world using the priority-fallback planner with the
    /// config's border policy.
    pub fn new(config: SimConfig) -> Result<Self, SetupError> {
        let planner = PriorityFallback::new(config.border);
        Self::with_planner(config, Box::new(planner))
    }

    /// Build a world around a custom planner.
    pub fn with_planner(config: SimConfig, planner: Box<dyn Planner>) -> Result<Self, SetupError> {
        let airspace = config.build()?;
        let arrived = airspace.aircraft.iter().filter(|a| a.is_arrived()).count();
        let no_fly = airspace.grid.no_fly_count();
        let aircraft: IndexMap<AircraftId, Aircraft> =
            airspace.aircraft.into_iter().map(|a| (a.id(), a)).collect();
        debug!(
            rows = config.rows,
            cols = config.cols,
            aircraft = aircraft.len(),
            no_fly,
            planner = planner.name(),
            "scheduler ready"
        );
        Ok(Self {
            grid: airspace.grid,
            aircraft,
            planner,
            current_tick: TickId::default(),
            arrived,
            no_fly,
            verify: config.verify_invariants,
            poisoned: false,
        })
    }

    /// Run one tick.
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

        let mut order: Vec<(u32, AircraftId)> = self
            .aircraft
            .values()
            .filter(|a| !a.is_arrived())
            .map(|a| (a.priority_rank(), a.id()))
            .collect();
        order.sort_unstable();

        let mut moves = Vec::with_capacity(order.len());
        for (_, id) in order {
            let Some(aircraft) = self.aircraft.get_mut(&id) else {
                continue;
            };
            moves.push(fly(aircraft, &mut self.grid, self.planner.as_ref())?);
        }

        self.current_tick = tick;
        let landed = moves.iter().filter(|m| m.landed).count();
        self.arrived += landed;
        if self.verify {
            self.check_invariants()?;
        }

        let en_route = self.aircraft.len() - self.arrived;
        let mut report = TickReport {
            tick,
            moves,
            arrived_total: self.arrived,
            en_route,
            metrics: Default::default(),
        };
        tally(&report.moves, &mut report.metrics);
        report.metrics.total_us = start.elapsed().as_micros() as u64;
        debug!(
            %tick,
            moved = report.metrics.moved,
            held = report.metrics.held,
            landed,
            en_route,
            "tick complete"
        );
        if self.is_done() {
            info!(%tick, aircraft = self.aircraft.len(), "all aircraft arrived");
        }
        Ok(report)
    }

    /// Verify the occupancy invariant against the current state.
    pub fn check_invariants(&self) -> Result<(), SimError> {
        check_invariants(&self.grid, self.aircraft.values(), self.no_fly)
    }

    /// Look up one aircraft.
    pub fn aircraft(&self, id: AircraftId) -> Option<&Aircraft> {
        self.aircraft.get(&id)
    }

    /// All aircraft in id order.
    pub fn fleet(&self) -> impl Iterator<Item = &Aircraft> + '_ {
        self.aircraft.values()
    }

    /// `true` once an earlier error invalidated the run.
    pub fn is_poisoned(&self) -> bool {
        self.poisoned
    }
}

impl Simulation for TickScheduler {
    fn advance_tick(&mut self) -> Result<TickReport, SimError> {
        TickScheduler::advance_tick(self)
    }

    fn is_done(&self) -> bool {
        self.arrived == self.aircraft.len()
    }

    fn current_tick(&self) -> TickId {
        self.current_tick
    }

    fn grid(&self) -> &Grid {
        &self.grid
    }

    fn positions(&self) -> Vec<(AircraftId, Position)> {
        self.aircraft
            .values()
            .filter(|a| !a.is_arrived())
            .map(|a| (a.id(), a.position()))
            .collect()
    }

    fn arrived_count(&self) -> usize {
        self.arrived
    }

    fn aircraft_count(&self) -> usize {
        self.aircraft.len()
    }
}
