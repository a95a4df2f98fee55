//! Simulation configuration and setup validation.
//!
//! [`SimConfig`] is the builder-input for constructing either world.
//! [`validate()`](SimConfig::validate) checks placement invariants at
//! setup; a failing config never produces a world.

use std::collections::{HashMap, HashSet};

use skyspace_core::{AircraftId, GridError, Placement, Position, SetupError};
use skyspace_grid::{BorderPolicy, Extent, Grid};

use crate::aircraft::Aircraft;

// ── AircraftSpec ───────────────────────────────────────────────────

/// Setup entry for one aircraft.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AircraftSpec {
    /// Starting cell.
    pub departure: Position,
    /// Target cell.
    pub destination: Position,
    /// Commit-order key. `None` = the aircraft's index.
    pub priority_rank: Option<u32>,
}

impl AircraftSpec {
    /// An aircraft with the default (index) priority rank.
    pub fn new(departure: Position, destination: Position) -> Self {
        Self {
            departure,
            destination,
            priority_rank: None,
        }
    }

    /// Set an explicit priority rank (lower = plans earlier).
    pub fn with_rank(mut self, rank: u32) -> Self {
        self.priority_rank = Some(rank);
        self
    }
}

// ── DistributedConfig ──────────────────────────────────────────────

/// Configuration for [`DistributedWorld`](crate::DistributedWorld).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DistributedConfig {
    /// Number of worker threads. Must be at least 1.
    pub workers: usize,
}

impl Default for DistributedConfig {
    fn default() -> Self {
        Self { workers: 4 }
    }
}

impl DistributedConfig {
    /// Reject a zero worker count.
    pub fn validate(&self) -> Result<(), SetupError> {
        if self.workers == 0 {
            return Err(SetupError::NoWorkers);
        }
        Ok(())
    }
}

// ── SimConfig ──────────────────────────────────────────────────────

/// Everything the setup collaborator supplies for one run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimConfig {
    /// Grid rows.
    pub rows: u32,
    /// Grid columns.
    pub cols: u32,
    /// Aircraft, in id order.
    pub aircraft: Vec<AircraftSpec>,
    /// Restricted cells.
    pub no_fly: Vec<Position>,
    /// How the planner treats candidates off the grid edge.
    pub border: BorderPolicy,
    /// Check the occupancy invariant after every tick. Default: true.
    pub verify_invariants: bool,
}

/// The validated initial state built from a [`SimConfig`].
pub(crate) struct Airspace {
    pub grid: Grid,
    pub aircraft: Vec<Aircraft>,
}

impl SimConfig {
    /// An empty `rows x cols` airspace.
    pub fn new(rows: u32, cols: u32) -> Self {
        Self {
            rows,
            cols,
            aircraft: Vec::new(),
            no_fly: Vec::new(),
            border: BorderPolicy::default(),
            verify_invariants: true,
        }
    }

    /// Append an aircraft.
    pub fn with_aircraft(mut self, spec: AircraftSpec) -> Self {
        self.aircraft.push(spec);
        self
    }

    /// Append a no-fly cell.
    pub fn with_no_fly(mut self, position: Position) -> Self {
        self.no_fly.push(position);
        self
    }

    /// Set the border policy.
    pub fn with_border(mut self, border: BorderPolicy) -> Self {
        self.border = border;
        self
    }

    /// Resolved priority rank for aircraft `index`.
    fn rank_of(&self, index: usize) -> u32 {
        self.aircraft[index]
            .priority_rank
            .unwrap_or(index as u32)
    }

    /// Validate structural invariants.
    ///
    /// - grid dimensions are non-zero and fit `i32`
    /// - every coordinate lies on the grid
    /// - departures are unique, destinations are unique
    /// - no no-fly cell coincides with a departure, destination or
    ///   another no-fly cell
    /// - priority ranks are unique
    pub fn validate(&self) -> Result<(), SetupError> {
        let extent = Extent::new(self.rows, self.cols)?;
        let in_bounds = |position: Position| extent.check(position).map_err(SetupError::from);

        let mut departures: HashMap<Position, AircraftId> = HashMap::new();
        let mut destinations: HashMap<Position, AircraftId> = HashMap::new();
        let mut ranks: HashMap<u32, AircraftId> = HashMap::new();

        for (i, spec) in self.aircraft.iter().enumerate() {
            let id = AircraftId(i as u32);
            in_bounds(spec.departure)?;
            in_bounds(spec.destination)?;

            if let Some(&first) = departures.get(&spec.departure) {
                return Err(SetupError::DuplicateInitialPlacement {
                    position: spec.departure,
                    first: Placement::Departure(first),
                    second: Placement::Departure(id),
                });
            }
            departures.insert(spec.departure, id);

            if let Some(&first) = destinations.get(&spec.destination) {
                return Err(SetupError::DuplicateInitialPlacement {
                    position: spec.destination,
                    first: Placement::Destination(first),
                    second: Placement::Destination(id),
                });
            }
            destinations.insert(spec.destination, id);

            let rank = self.rank_of(i);
            if let Some(&first) = ranks.get(&rank) {
                return Err(SetupError::DuplicatePriorityRank {
                    rank,
                    first,
                    second: id,
                });
            }
            ranks.insert(rank, id);
        }

        let mut no_fly: HashSet<Position> = HashSet::new();
        for &position in &self.no_fly {
            in_bounds(position)?;
            let first = if let Some(&id) = departures.get(&position) {
                Some(Placement::Departure(id))
            } else if let Some(&id) = destinations.get(&position) {
                Some(Placement::Destination(id))
            } else if no_fly.contains(&position) {
                Some(Placement::NoFly)
            } else {
                None
            };
            if let Some(first) = first {
                return Err(SetupError::DuplicateInitialPlacement {
                    position,
                    first,
                    second: Placement::NoFly,
                });
            }
            no_fly.insert(position);
        }
        Ok(())
    }

    /// Validate, then build the initial grid and aircraft.
    ///
    /// En-route aircraft claim their departure cell; aircraft that start
    /// at their destination claim nothing.
    pub(crate) fn build(&self) -> Result<Airspace, SetupError> {
        self.validate()?;
        let mut grid = Grid::new(self.rows, self.cols)?;
        for &position in &self.no_fly {
            grid.mark_no_fly(position)?;
        }
        let mut aircraft = Vec::with_capacity(self.aircraft.len());
        for (i, spec) in self.aircraft.iter().enumerate() {
            let a = Aircraft::new(
                AircraftId(i as u32),
                self.rank_of(i),
                spec.departure,
                spec.destination,
            );
            if !a.is_arrived() {
                grid.claim(a.position()).map_err(|e| match e {
                    // Validation rules out every other cause.
                    GridError::InvalidClaim { position, .. } => {
                        SetupError::DuplicateInitialPlacement {
                            position,
                            first: Placement::NoFly,
                            second: Placement::Departure(a.id()),
                        }
                    }
                    other => SetupError::Grid(other),
                })?;
            }
            aircraft.push(a);
        }
        Ok(Airspace { grid, aircraft })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skyspace_core::{CellReader, CellState};

    fn p(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    fn two_aircraft() -> SimConfig {
        SimConfig::new(8, 8)
            .with_aircraft(AircraftSpec::new(p(0, 0), p(7, 7)))
            .with_aircraft(AircraftSpec::new(p(0, 7), p(7, 0)))
    }

    #[test]
    fn valid_config_passes() {
        assert_eq!(two_aircraft().with_no_fly(p(4, 4)).validate(), Ok(()));
    }

    #[test]
    fn empty_grid_rejected() {
        assert_eq!(
            SimConfig::new(0, 4).validate(),
            Err(SetupError::Grid(GridError::EmptyGrid))
        );
    }

    #[test]
    fn out_of_bounds_placement_rejected() {
        let cfg = two_aircraft().with_no_fly(p(8, 0));
        assert!(matches!(
            cfg.validate(),
            Err(SetupError::Grid(GridError::OutOfBounds { .. }))
        ));
    }

    #[test]
    fn duplicate_departure_rejected() {
        let cfg = two_aircraft().with_aircraft(AircraftSpec::new(p(0, 0), p(3, 3)));
        assert_eq!(
            cfg.validate(),
            Err(SetupError::DuplicateInitialPlacement {
                position: p(0, 0),
                first: Placement::Departure(AircraftId(0)),
                second: Placement::Departure(AircraftId(2)),
            })
        );
    }

    #[test]
    fn duplicate_destination_rejected() {
        let cfg = two_aircraft().with_aircraft(AircraftSpec::new(p(3, 3), p(7, 0)));
        assert_eq!(
            cfg.validate(),
            Err(SetupError::DuplicateInitialPlacement {
                position: p(7, 0),
                first: Placement::Destination(AircraftId(1)),
                second: Placement::Destination(AircraftId(2)),
            })
        );
    }

    #[test]
    fn no_fly_overlaps_rejected() {
        let on_departure = two_aircraft().with_no_fly(p(0, 7));
        assert!(matches!(
            on_departure.validate(),
            Err(SetupError::DuplicateInitialPlacement {
                first: Placement::Departure(AircraftId(1)),
                second: Placement::NoFly,
                ..
            })
        ));

        let on_destination = two_aircraft().with_no_fly(p(7, 7));
        assert!(matches!(
            on_destination.validate(),
            Err(SetupError::DuplicateInitialPlacement {
                first: Placement::Destination(AircraftId(0)),
                ..
            })
        ));

        let twice = two_aircraft().with_no_fly(p(3, 3)).with_no_fly(p(3, 3));
        assert!(matches!(
            twice.validate(),
            Err(SetupError::DuplicateInitialPlacement {
                first: Placement::NoFly,
                second: Placement::NoFly,
                ..
            })
        ));
    }

    #[test]
    fn departure_may_be_another_aircrafts_destination() {
        let cfg = SimConfig::new(4, 4)
            .with_aircraft(AircraftSpec::new(p(0, 0), p(1, 1)))
            .with_aircraft(AircraftSpec::new(p(1, 1), p(3, 3)));
        assert_eq!(cfg.validate(), Ok(()));
    }

    #[test]
    fn duplicate_rank_rejected() {
        let cfg = SimConfig::new(4, 4)
            .with_aircraft(AircraftSpec::new(p(0, 0), p(3, 3)).with_rank(5))
            .with_aircraft(AircraftSpec::new(p(0, 3), p(3, 0)).with_rank(5));
        assert_eq!(
            cfg.validate(),
            Err(SetupError::DuplicatePriorityRank {
                rank: 5,
                first: AircraftId(0),
                second: AircraftId(1),
            })
        );
    }

    #[test]
    fn explicit_rank_may_collide_with_default_index_rank() {
        // Aircraft 1 defaults to rank 1, which aircraft 0 claims explicitly.
        let cfg = SimConfig::new(4, 4)
            .with_aircraft(AircraftSpec::new(p(0, 0), p(3, 3)).with_rank(1))
            .with_aircraft(AircraftSpec::new(p(0, 3), p(3, 0)));
        assert!(matches!(
            cfg.validate(),
            Err(SetupError::DuplicatePriorityRank { rank: 1, .. })
        ));
    }

    #[test]
    fn build_claims_departures_and_marks_no_fly() {
        let cfg = two_aircraft()
            .with_aircraft(AircraftSpec::new(p(5, 5), p(5, 5)))
            .with_no_fly(p(4, 4));
        let airspace = cfg.build().unwrap();
        assert_eq!(airspace.grid.occupied_count(), 2);
        assert_eq!(airspace.grid.cell_state(p(0, 0)), Ok(CellState::Occupied));
        assert_eq!(airspace.grid.cell_state(p(4, 4)), Ok(CellState::NoFly));
        // Already-arrived aircraft claims nothing.
        assert_eq!(airspace.grid.cell_state(p(5, 5)), Ok(CellState::Free));
        assert!(airspace.aircraft[2].is_arrived());
        assert_eq!(airspace.aircraft[1].priority_rank(), 1);
    }

    #[test]
    fn zero_workers_rejected() {
        assert_eq!(
            DistributedConfig { workers: 0 }.validate(),
            Err(SetupError::NoWorkers)
        );
        assert_eq!(DistributedConfig::default().validate(), Ok(()));
    }

    #[test]
    fn validation_does_not_allocate_the_grid() {
        // A billion-by-billion grid would never fit in memory.
        let huge = 1 << 30;
        let config = SimConfig::new(huge, huge)
            .with_aircraft(AircraftSpec::new(p(0, 0), p(huge as i32 - 1, 5)))
            .with_no_fly(p(7, 7));
        config.validate().unwrap();
        assert!(matches!(
            config.with_no_fly(p(huge as i32, 0)).validate(),
            Err(SetupError::Grid(GridError::OutOfBounds { .. }))
        ));
    }
}
