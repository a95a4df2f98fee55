//! The per-aircraft step shared by both execution modes, plus the
//! post-tick invariant check.

use std::collections::HashSet;

use skyspace_core::{CellReader, CellState, SimError};
use skyspace_grid::Grid;
use skyspace_planner::Planner;
use tracing::debug;

use crate::aircraft::Aircraft;
use crate::report::MoveRecord;

/// Plan, apply and record one aircraft's move against `grid`.
///
/// The grid update happens before this returns, so the next aircraft to
/// plan observes it. A landing releases the destination cell.
pub(crate) fn fly(
    aircraft: &mut Aircraft,
    grid: &mut Grid,
    planner: &dyn Planner,
) -> Result<MoveRecord, SimError> {
    let decision = aircraft.plan(planner, &*grid)?;
    let from = aircraft.position();
    let to = from.offset(decision.vector());
    grid.apply_move(from, to)?;
    let landed = aircraft.advance(to);
    if landed {
        grid.release(to)?;
    }

    let record = MoveRecord {
        aircraft: aircraft.id(),
        from,
        to,
        rule: decision.rule(),
        landed,
    };
    if record.is_hold() {
        debug!(aircraft = %record.aircraft, position = %from, "holding");
    } else {
        debug!(
            aircraft = %record.aircraft,
            %from,
            %to,
            rule = %record.rule,
            landed,
            "moved"
        );
    }
    Ok(record)
}

/// Check the grid against the aircraft that are supposed to be on it.
///
/// - the number of `Occupied` cells equals the number of en-route aircraft
/// - every en-route aircraft sits on its own `Occupied` cell
/// - the no-fly count never changes
pub(crate) fn check_invariants<'a>(
    grid: &Grid,
    aircraft: impl IntoIterator<Item = &'a Aircraft>,
    no_fly: usize,
) -> Result<(), SimError> {
    let mut seen = HashSet::new();
    for a in aircraft.into_iter().filter(|a| !a.is_arrived()) {
        if !seen.insert(a.position()) {
            return Err(SimError::InvariantViolated {
                reason: format!("two en-route aircraft share cell {}", a.position()),
            });
        }
        let state = grid.cell_state(a.position())?;
        if state != CellState::Occupied {
            return Err(SimError::InvariantViolated {
                reason: format!(
                    "aircraft {} at {} but the cell is {state}",
                    a.id(),
                    a.position()
                ),
            });
        }
    }
    if grid.occupied_count() != seen.len() {
        return Err(SimError::InvariantViolated {
            reason: format!(
                "{} occupied cells for {} en-route aircraft",
                grid.occupied_count(),
                seen.len()
            ),
        });
    }
    if grid.no_fly_count() != no_fly {
        return Err(SimError::InvariantViolated {
            reason: format!(
                "no-fly count changed from {no_fly} to {}",
                grid.no_fly_count()
            ),
        });
    }
    Ok(())
}
