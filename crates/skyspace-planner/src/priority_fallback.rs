//! The priority-fallback planner.
//!
//! Evaluates [`fallback_candidates`] in order and accepts the first whose
//! target cell is `Free`. Occupied and no-fly cells are never valid.
//! Candidates off the grid edge are resolved by the configured
//! [`BorderPolicy`].

use crate::candidates::fallback_candidates;
use crate::planner::{Decision, Planner};
use skyspace_core::{CellReader, GridError, MoveVector, Position};
use skyspace_grid::{probe, BorderPolicy};
use tracing::trace;

/// Reference planner implementing the fixed priority-fallback rule.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PriorityFallback {
    border: BorderPolicy,
}

impl PriorityFallback {
    /// Create a planner with the given border policy.
    pub fn new(border: BorderPolicy) -> Self {
        Self { border }
    }

    /// The border policy in effect.
    pub fn border(&self) -> BorderPolicy {
        self.border
    }
}

impl Planner for PriorityFallback {
    fn name(&self) -> &str {
        "PriorityFallback"
    }

    fn plan(
        &self,
        position: Position,
        destination: Position,
        grid: &dyn CellReader,
    ) -> Result<Decision, GridError> {
        let desired = MoveVector::toward(position, destination);
        if desired.is_hold() {
            return Ok(Decision::Arrived);
        }

        for candidate in fallback_candidates(desired) {
            let target = position.offset(candidate.vector);
            if probe(grid, target, self.border)? {
                return Ok(Decision::Move {
                    vector: candidate.vector,
                    rule: candidate.rule,
                });
            }
            trace!(%position, %target, rule = %candidate.rule, "candidate blocked");
        }
        Ok(Decision::Hold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::Rule;
    use skyspace_core::CellState;
    use skyspace_grid::Grid;

    fn p(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    fn v(dx: i8, dy: i8) -> MoveVector {
        MoveVector::new(dx, dy).unwrap()
    }

    fn grid_with(occupied: &[(i32, i32)], no_fly: &[(i32, i32)]) -> Grid {
        let mut g = Grid::new(12, 12).unwrap();
        for &(x, y) in occupied {
            g.claim(p(x, y)).unwrap();
        }
        for &(x, y) in no_fly {
            g.mark_no_fly(p(x, y)).unwrap();
        }
        g
    }

    fn plan(grid: &Grid, from: (i32, i32), to: (i32, i32)) -> Decision {
        PriorityFallback::default()
            .plan(p(from.0, from.1), p(to.0, to.1), grid)
            .unwrap()
    }

    #[test]
    fn at_destination_is_arrived() {
        let g = grid_with(&[(5, 5)], &[]);
        assert_eq!(plan(&g, (5, 5), (5, 5)), Decision::Arrived);
    }

    #[test]
    fn free_desired_move_wins() {
        let g = grid_with(&[(5, 5)], &[]);
        assert_eq!(
            plan(&g, (5, 5), (8, 8)),
            Decision::Move {
                vector: v(1, 1),
                rule: Rule::Desired
            }
        );
        assert_eq!(
            plan(&g, (5, 5), (5, 0)),
            Decision::Move {
                vector: v(0, -1),
                rule: Rule::Desired
            }
        );
    }

    #[test]
    fn diagonal_blocked_prefers_drop_dy() {
        // (6,6) occupied; (6,5) and (5,6) free: (6,5) wins.
        let g = grid_with(&[(5, 5), (6, 6)], &[]);
        let d = plan(&g, (5, 5), (8, 8));
        assert_eq!(
            d,
            Decision::Move {
                vector: v(1, 0),
                rule: Rule::DropDy
            }
        );
        assert_eq!(p(5, 5).offset(d.vector()), p(6, 5));
    }

    #[test]
    fn diagonal_fallback_walks_full_order() {
        // Block desired and drop-dy: drop-dx (5,6) chosen.
        let g = grid_with(&[(5, 5), (6, 6)], &[(6, 5)]);
        assert_eq!(plan(&g, (5, 5), (8, 8)).rule(), Rule::DropDx);

        // Block drop-dx too: mirror-dy (6,4).
        let g = grid_with(&[(5, 5), (6, 6), (5, 6)], &[(6, 5)]);
        let d = plan(&g, (5, 5), (8, 8));
        assert_eq!(d.rule(), Rule::MirrorDy);
        assert_eq!(d.vector(), v(1, -1));

        // Block mirror-dy: mirror-dx (4,6).
        let g = grid_with(&[(5, 5), (6, 6), (5, 6), (6, 4)], &[(6, 5)]);
        let d = plan(&g, (5, 5), (8, 8));
        assert_eq!(d.rule(), Rule::MirrorDx);
        assert_eq!(d.vector(), v(-1, 1));
    }

    #[test]
    fn all_candidates_blocked_holds() {
        let g = grid_with(&[(5, 5), (6, 6), (5, 6)], &[(6, 5), (6, 4), (4, 6)]);
        let d = plan(&g, (5, 5), (8, 8));
        assert_eq!(d, Decision::Hold);
        assert!(d.vector().is_hold());
    }

    #[test]
    fn axis_blocked_sidesteps_positive_first() {
        let g = grid_with(&[(5, 5), (6, 5)], &[]);
        let d = plan(&g, (5, 5), (8, 5));
        assert_eq!(
            d,
            Decision::Move {
                vector: v(1, 1),
                rule: Rule::SidestepPositive
            }
        );

        let g = grid_with(&[(5, 5), (6, 5)], &[(6, 6)]);
        let d = plan(&g, (5, 5), (8, 5));
        assert_eq!(
            d,
            Decision::Move {
                vector: v(1, -1),
                rule: Rule::SidestepNegative
            }
        );
    }

    #[test]
    fn column_axis_sidestep_adjusts_row() {
        // Heading west along row 5; (5,4) blocked.
        let g = grid_with(&[(5, 5), (5, 4)], &[]);
        assert_eq!(plan(&g, (5, 5), (5, 1)).vector(), v(1, -1));

        let g = grid_with(&[(5, 5), (5, 4), (6, 4)], &[]);
        assert_eq!(plan(&g, (5, 5), (5, 1)).vector(), v(-1, -1));

        let g = grid_with(&[(5, 5), (5, 4), (6, 4), (4, 4)], &[]);
        assert_eq!(plan(&g, (5, 5), (5, 1)), Decision::Hold);
    }

    #[test]
    fn axis_case_never_tries_backwards_moves() {
        // Everything ahead blocked, everything behind free: still a hold.
        let g = grid_with(&[(5, 5)], &[(6, 4), (6, 5), (6, 6)]);
        assert_eq!(plan(&g, (5, 5), (9, 5)), Decision::Hold);
    }

    #[test]
    fn no_fly_is_never_a_valid_target() {
        let g = grid_with(&[(5, 5)], &[(6, 6)]);
        let d = plan(&g, (5, 5), (8, 8));
        let target = p(5, 5).offset(d.vector());
        assert_eq!(g.cell_state(target), Ok(CellState::Free));
    }

    // ── Border policy ───────────────────────────────────────────

    #[test]
    fn blocked_border_treats_edge_as_wall() {
        // Top row, heading east; (0,1) and (1,1) occupied, (-1,1) off-grid.
        let g = grid_with(&[(0, 0), (0, 1), (1, 1)], &[]);
        let planner = PriorityFallback::new(BorderPolicy::Blocked);
        assert_eq!(planner.plan(p(0, 0), p(0, 5), &g), Ok(Decision::Hold));
    }

    #[test]
    fn strict_border_surfaces_out_of_bounds() {
        let g = grid_with(&[(0, 0), (0, 1), (1, 1)], &[]);
        let planner = PriorityFallback::new(BorderPolicy::Strict);
        assert_eq!(
            planner.plan(p(0, 0), p(0, 5), &g),
            Err(GridError::OutOfBounds {
                position: p(-1, 1),
                rows: 12,
                cols: 12
            })
        );
    }

    #[test]
    fn strict_border_is_silent_when_a_candidate_succeeds_first() {
        let g = grid_with(&[(0, 0), (0, 1)], &[]);
        let planner = PriorityFallback::new(BorderPolicy::Strict);
        assert_eq!(planner.plan(p(0, 0), p(0, 5), &g).unwrap().vector(), v(1, 1));
    }
}
