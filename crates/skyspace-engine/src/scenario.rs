//! Seeded random scenario generation.
//!
//! A [`Scenario`] draws unique departures, unique destinations and a set
//! of no-fly cells disjoint from both. The same seed always yields the
//! same [`SimConfig`].

use std::collections::HashSet;

use rand::seq::index;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use skyspace_core::SetupError;
use skyspace_grid::{BorderPolicy, Extent};

use crate::config::{AircraftSpec, SimConfig};

/// Parameters for a random airspace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scenario {
    /// Grid rows.
    pub rows: u32,
    /// Grid columns.
    pub cols: u32,
    /// Number of aircraft.
    pub aircraft: usize,
    /// Number of no-fly cells.
    pub no_fly: usize,
    /// RNG seed.
    pub seed: u64,
    /// Border policy for the generated config.
    pub border: BorderPolicy,
}

impl Scenario {
    /// A scenario with the default border policy.
    pub fn new(rows: u32, cols: u32, aircraft: usize, no_fly: usize, seed: u64) -> Self {
        Self {
            rows,
            cols,
            aircraft,
            no_fly,
            seed,
            border: BorderPolicy::default(),
        }
    }

    /// 100x100 grid, 60 aircraft, 20 no-fly cells.
    pub fn serial_reference(seed: u64) -> Self {
        Self::new(100, 100, 60, 20, seed)
    }

    /// 100x100 grid, 90 aircraft, 80 no-fly cells.
    pub fn parallel_reference(seed: u64) -> Self {
        Self::new(100, 100, 90, 80, seed)
    }

    /// Draw a config.
    ///
    /// Fails with [`SetupError::InsufficientCells`] when the grid cannot
    /// hold the requested placements.
    pub fn generate(&self) -> Result<SimConfig, SetupError> {
        let extent = Extent::new(self.rows, self.cols)?;
        let cells = extent.cell_count();
        if self.aircraft > cells {
            return Err(SetupError::InsufficientCells {
                requested: self.aircraft,
                available: cells,
            });
        }

        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let departures = index::sample(&mut rng, cells, self.aircraft).into_vec();
        let destinations = index::sample(&mut rng, cells, self.aircraft).into_vec();

        let taken: HashSet<usize> = departures.iter().chain(&destinations).copied().collect();
        let available = cells - taken.len();
        if self.no_fly > available {
            return Err(SetupError::InsufficientCells {
                requested: self.no_fly,
                available,
            });
        }

        // Rejection sampling; terminates because enough cells are left.
        let mut chosen = HashSet::with_capacity(self.no_fly);
        let mut no_fly = Vec::with_capacity(self.no_fly);
        while no_fly.len() < self.no_fly {
            let i = rng.random_range(0..cells);
            if !taken.contains(&i) && chosen.insert(i) {
                no_fly.push(extent.position_of(i));
            }
        }

        let aircraft = departures
            .into_iter()
            .zip(destinations)
            .map(|(d, t)| AircraftSpec::new(extent.position_of(d), extent.position_of(t)))
            .collect();

        Ok(SimConfig {
            aircraft,
            no_fly,
            ..SimConfig::new(self.rows, self.cols).with_border(self.border)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_scenarios_are_valid() {
        for seed in 0..5 {
            let serial = Scenario::serial_reference(seed).generate().unwrap();
            assert_eq!(serial.aircraft.len(), 60);
            assert_eq!(serial.no_fly.len(), 20);
            serial.validate().unwrap();

            let parallel = Scenario::parallel_reference(seed).generate().unwrap();
            assert_eq!(parallel.aircraft.len(), 90);
            assert_eq!(parallel.no_fly.len(), 80);
            parallel.validate().unwrap();
        }
    }

    #[test]
    fn same_seed_same_config() {
        let a = Scenario::new(20, 30, 15, 10, 42).generate().unwrap();
        let b = Scenario::new(20, 30, 15, 10, 42).generate().unwrap();
        assert_eq!(a, b);
        let c = Scenario::new(20, 30, 15, 10, 43).generate().unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn placements_stay_on_grid() {
        let cfg = Scenario::new(7, 3, 5, 6, 9).generate().unwrap();
        for spec in &cfg.aircraft {
            for p in [spec.departure, spec.destination] {
                assert!((0..7).contains(&p.x) && (0..3).contains(&p.y));
            }
        }
        cfg.validate().unwrap();
    }

    #[test]
    fn a_full_grid_can_still_be_generated() {
        // Departures alone cover every cell.
        let cfg = Scenario::new(2, 2, 4, 0, 1).generate().unwrap();
        cfg.validate().unwrap();
    }

    #[test]
    fn too_many_aircraft_rejected() {
        assert_eq!(
            Scenario::new(3, 3, 10, 0, 0).generate(),
            Err(SetupError::InsufficientCells {
                requested: 10,
                available: 9
            })
        );
    }

    #[test]
    fn too_many_no_fly_rejected() {
        assert!(matches!(
            Scenario::new(3, 3, 2, 9, 0).generate(),
            Err(SetupError::InsufficientCells { requested: 9, .. })
        ));
    }
}
