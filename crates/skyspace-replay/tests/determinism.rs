//! Recorded runs agree across repeats and across execution modes.

use proptest::prelude::*;
use skyspace_core::SimError;
use skyspace_engine::{
    run_to_completion, AircraftSpec, DistributedConfig, DistributedWorld, Scenario, SimConfig,
    Simulation, TickScheduler,
};
use skyspace_replay::{first_divergence, DivergenceKind, FlightRecorder};
use skyspace_test_utils::pos;

const LIMIT: Option<u64> = Some(400);

fn scenario() -> SimConfig {
    Scenario::new(24, 24, 30, 25, 2024).generate().unwrap()
}

/// Record up to `LIMIT` ticks. A gridlocked run still yields its frames.
fn record<S: Simulation>(sim: &mut S) -> FlightRecorder {
    let mut recorder = FlightRecorder::new();
    match run_to_completion(sim, &mut recorder, LIMIT) {
        Ok(_) | Err(SimError::TickLimitExceeded { .. }) => recorder,
        Err(e) => panic!("run failed: {e}"),
    }
}

fn record_single(config: SimConfig) -> FlightRecorder {
    record(&mut TickScheduler::new(config).unwrap())
}

fn record_distributed(config: SimConfig, workers: usize) -> FlightRecorder {
    record(&mut DistributedWorld::new(config, DistributedConfig { workers }).unwrap())
}

#[test]
fn repeated_single_process_runs_are_identical() {
    let a = record_single(scenario());
    let b = record_single(scenario());
    assert!(!a.is_empty());
    assert_eq!(first_divergence(a.frames(), b.frames()), None);
}

#[test]
fn distributed_runs_match_single_process() {
    let reference = record_single(scenario());
    for workers in [1, 2, 3, 8] {
        let run = record_distributed(scenario(), workers);
        assert_eq!(
            first_divergence(reference.frames(), run.frames()),
            None,
            "workers = {workers}"
        );
    }
}

#[test]
fn commit_order_changes_are_detected() {
    let by_index = SimConfig::new(5, 5)
        .with_aircraft(AircraftSpec::new(pos(0, 0), pos(2, 2)))
        .with_aircraft(AircraftSpec::new(pos(2, 0), pos(0, 2)));
    let reversed = SimConfig::new(5, 5)
        .with_aircraft(AircraftSpec::new(pos(0, 0), pos(2, 2)).with_rank(1))
        .with_aircraft(AircraftSpec::new(pos(2, 0), pos(0, 2)).with_rank(0));

    let a = record_single(by_index);
    let b = record_single(reversed);
    let d = first_divergence(a.frames(), b.frames()).expect("runs should differ");
    assert_eq!(d.tick.0, 1);
    assert_eq!(d.kind, DivergenceKind::Moves);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn any_small_airspace_replays_identically(seed in any::<u64>(), workers in 1usize..5) {
        let config = Scenario::new(8, 8, 6, 4, seed).generate().unwrap();
        let single = record_single(config.clone());
        let distributed = record_distributed(config, workers);
        prop_assert_eq!(first_divergence(single.frames(), distributed.frames()), None);
    }
}
