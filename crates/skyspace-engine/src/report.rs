//! What happened during one tick.

use skyspace_core::{AircraftId, Position, TickId};
use skyspace_planner::Rule;

use crate::metrics::TickMetrics;

/// One applied planner decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveRecord {
    /// The aircraft that planned.
    pub aircraft: AircraftId,
    /// Cell before the move.
    pub from: Position,
    /// Cell after the move. Equal to `from` on a hold.
    pub to: Position,
    /// Fallback step that produced the move.
    pub rule: Rule,
    /// The move reached the destination and released the cell.
    pub landed: bool,
}

impl MoveRecord {
    /// `true` if the aircraft stayed put.
    pub fn is_hold(&self) -> bool {
        self.from == self.to
    }
}

/// Result of one [`Simulation::advance_tick`](crate::Simulation::advance_tick).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TickReport {
    /// The tick this report describes.
    pub tick: TickId,
    /// Applied decisions in commit order.
    pub moves: Vec<MoveRecord>,
    /// Total aircraft arrived after this tick.
    pub arrived_total: usize,
    /// Aircraft still en route after this tick.
    pub en_route: usize,
    /// Counters and timing.
    pub metrics: TickMetrics,
}

impl TickReport {
    /// Report for a call that found nothing left to fly.
    pub(crate) fn idle(tick: TickId, arrived_total: usize) -> Self {
        Self {
            tick,
            moves: Vec::new(),
            arrived_total,
            en_route: 0,
            metrics: TickMetrics::default(),
        }
    }

    /// Aircraft that landed during this tick.
    pub fn landed(&self) -> impl Iterator<Item = AircraftId> + '_ {
        self.moves.iter().filter(|m| m.landed).map(|m| m.aircraft)
    }

    /// Aircraft that held during this tick.
    pub fn held(&self) -> impl Iterator<Item = AircraftId> + '_ {
        self.moves.iter().filter(|m| m.is_hold()).map(|m| m.aircraft)
    }

    /// `true` if this tick moved nobody.
    pub fn is_idle(&self) -> bool {
        self.moves.is_empty()
    }
}

/// Fold a tick's move records into its counters.
pub(crate) fn tally(moves: &[MoveRecord], metrics: &mut TickMetrics) {
    for record in moves {
        metrics.planned += 1;
        if record.is_hold() {
            metrics.held += 1;
        } else {
            metrics.moved += 1;
        }
        if record.landed {
            metrics.landed += 1;
        }
    }
}
