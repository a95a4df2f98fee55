//! The interface shared by both execution modes, and the run driver.

use std::time::Instant;

use skyspace_core::{AircraftId, Position, SimError, TickId};
use skyspace_grid::Grid;
use tracing::info;

use crate::report::TickReport;

/// A world that advances in ticks.
///
/// Implemented by [`TickScheduler`](crate::TickScheduler) and
/// [`DistributedWorld`](crate::DistributedWorld). For equal inputs and
/// commit order, both produce identical reports and grids.
pub trait Simulation {
    /// Run one tick. A finished world returns an empty report without
    /// advancing the tick counter.
    fn advance_tick(&mut self) -> Result<TickReport, SimError>;

    /// `true` once every aircraft has arrived.
    fn is_done(&self) -> bool;

    /// Number of completed ticks.
    fn current_tick(&self) -> TickId;

    /// The authoritative grid.
    fn grid(&self) -> &Grid;

    /// The cell of every en-route aircraft, in id order.
    ///
    /// An arrived aircraft has left the airspace and its cell may be
    /// reused, so it is not listed. No two entries share a position.
    fn positions(&self) -> Vec<(AircraftId, Position)>;

    /// Aircraft that have arrived.
    fn arrived_count(&self) -> usize;

    /// Total aircraft in the world.
    fn aircraft_count(&self) -> usize;
}

/// State visible to a [`TickObserver`] after each tick.
pub struct TickFrame<'a> {
    /// The tick just completed.
    pub tick: TickId,
    /// Grid after the tick.
    pub grid: &'a Grid,
    /// What happened during the tick.
    pub report: &'a TickReport,
}

/// Read-only hook called after every completed tick.
pub trait TickObserver {
    /// Inspect the world after a tick.
    fn on_tick(&mut self, frame: &TickFrame<'_>);
}

impl<F: FnMut(&TickFrame<'_>)> TickObserver for F {
    fn on_tick(&mut self, frame: &TickFrame<'_>) {
        self(frame)
    }
}

/// Totals for a completed run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Ticks taken until every aircraft arrived.
    pub ticks: u64,
    /// Aircraft in the world.
    pub aircraft: usize,
    /// Cells moved, summed over all aircraft.
    pub moves: u64,
    /// Holds, summed over all aircraft.
    pub holds: u64,
    /// Grid updates broadcast (distributed mode only).
    pub broadcasts: u64,
    /// Wall-clock time, in microseconds.
    pub elapsed_us: u64,
}

/// Advance `sim` until every aircraft has arrived, calling `observer`
/// after each tick.
///
/// With `limit = Some(n)`, gives up with [`SimError::TickLimitExceeded`]
/// once `n` ticks have run and aircraft are still en route. Holds can
/// repeat forever in a gridlocked world, so unattended runs should set a
/// limit.
pub fn run_to_completion<S: Simulation + ?Sized>(
    sim: &mut S,
    observer: &mut dyn TickObserver,
    limit: Option<u64>,
) -> Result<RunSummary, SimError> {
    let start = Instant::now();
    let mut summary = RunSummary {
        aircraft: sim.aircraft_count(),
        ..Default::default()
    };
    while !sim.is_done() {
        if let Some(limit) = limit {
            if sim.current_tick().0 >= limit {
                return Err(SimError::TickLimitExceeded { limit });
            }
        }
        let report = sim.advance_tick()?;
        summary.moves += u64::from(report.metrics.moved);
        summary.holds += u64::from(report.metrics.held);
        summary.broadcasts += report.metrics.broadcasts;
        observer.on_tick(&TickFrame {
            tick: report.tick,
            grid: sim.grid(),
            report: &report,
        });
    }
    summary.ticks = sim.current_tick().0;
    summary.elapsed_us = start.elapsed().as_micros() as u64;
    info!(
        ticks = summary.ticks,
        aircraft = summary.aircraft,
        moves = summary.moves,
        holds = summary.holds,
        "run complete"
    );
    Ok(summary)
}
