//! Property tests over randomly generated airspaces.

use std::collections::HashSet;

use proptest::prelude::*;
use skyspace_core::{CellReader, CellState, SimError};
use skyspace_engine::{
    DistributedConfig, DistributedWorld, Scenario, SimConfig, Simulation, TickScheduler,
};

const TICKS: usize = 40;

/// A small scenario whose placements always fit.
fn arb_config() -> impl Strategy<Value = SimConfig> {
    (3u32..12, 3u32..12, any::<u64>())
        .prop_flat_map(|(rows, cols, seed)| {
            let cells = (rows * cols) as usize;
            let max_aircraft = cells / 3;
            (Just((rows, cols, seed)), 0..=max_aircraft, 0..=cells / 3)
        })
        .prop_map(|((rows, cols, seed), aircraft, no_fly)| {
            Scenario::new(rows, cols, aircraft, no_fly, seed)
                .generate()
                .expect("placements fit by construction")
        })
}

fn drive<S: Simulation>(sim: &mut S) -> Result<(), TestCaseError> {
    let no_fly = sim.grid().positions_in(CellState::NoFly);
    let mut arrived = sim.arrived_count();
    for _ in 0..TICKS {
        if sim.is_done() {
            break;
        }
        let report = sim.advance_tick().map_err(|e| TestCaseError::fail(e.to_string()))?;

        prop_assert_eq!(
            sim.grid().occupied_count(),
            sim.aircraft_count() - sim.arrived_count()
        );
        prop_assert_eq!(&sim.grid().positions_in(CellState::NoFly), &no_fly);
        prop_assert!(sim.arrived_count() >= arrived);
        arrived = sim.arrived_count();
        prop_assert_eq!(report.arrived_total, arrived);

        let positions = sim.positions();
        let cells: HashSet<_> = positions.iter().map(|&(_, p)| p).collect();
        prop_assert_eq!(cells.len(), positions.len());
        prop_assert_eq!(positions.len(), sim.aircraft_count() - arrived);
        for p in cells {
            prop_assert_eq!(sim.grid().cell_state(p), Ok(CellState::Occupied));
        }

        for m in &report.moves {
            prop_assert!(m.from.chebyshev(m.to) <= 1);
            prop_assert!(!no_fly.contains(&m.to));
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn single_process_keeps_invariants(config in arb_config()) {
        let mut sim = TickScheduler::new(config).unwrap();
        drive(&mut sim)?;
    }

    #[test]
    fn single_process_is_deterministic(config in arb_config()) {
        let mut a = TickScheduler::new(config.clone()).unwrap();
        let mut b = TickScheduler::new(config).unwrap();
        for _ in 0..TICKS {
            prop_assert_eq!(
                a.advance_tick().map(|r| r.moves),
                b.advance_tick().map(|r| r.moves)
            );
        }
        prop_assert_eq!(a.grid(), b.grid());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn distributed_keeps_invariants(config in arb_config(), workers in 1usize..5) {
        let mut world = DistributedWorld::new(config, DistributedConfig { workers }).unwrap();
        drive(&mut world)?;
    }

    #[test]
    fn distributed_matches_single_process(config in arb_config(), workers in 1usize..5) {
        let mut reference = TickScheduler::new(config.clone()).unwrap();
        let mut world = DistributedWorld::new(config, DistributedConfig { workers }).unwrap();
        for _ in 0..TICKS {
            let expected = reference.advance_tick().map(|r| r.moves);
            let actual = world.advance_tick().map(|r| r.moves);
            prop_assert_eq!(actual, expected);
            prop_assert_eq!(world.grid(), reference.grid());
            prop_assert_eq!(world.current_tick(), reference.current_tick());
        }
        prop_assert_eq!(world.positions(), reference.positions());
    }
}

#[test]
fn gridlock_is_reported_not_hung() {
    // Two aircraft facing each other in a 1-wide corridor.
    let config = SimConfig::new(1, 4)
        .with_aircraft(skyspace_engine::AircraftSpec::new((0, 0).into(), (0, 3).into()))
        .with_aircraft(skyspace_engine::AircraftSpec::new((0, 3).into(), (0, 0).into()));
    let mut sim = TickScheduler::new(config).unwrap();
    let mut observer = |_: &skyspace_engine::TickFrame<'_>| {};
    let outcome = skyspace_engine::run_to_completion(&mut sim, &mut observer, Some(20));
    assert_eq!(outcome, Err(SimError::TickLimitExceeded { limit: 20 }));
}
