//! Self-spacing demo.
//!
//! Runs the reference airspace single-process, then the distributed
//! airspace in both modes, and checks that the two recordings agree.
//!
//! ```text
//! cargo run -p skyspace-bench --example self_spacing -- [seed] [workers]
//! RUST_LOG=skyspace_engine=debug cargo run -p skyspace-bench --example self_spacing
//! ```

use std::error::Error;

use skyspace_bench::{parallel_profile, reference_profile};
use skyspace_engine::{
    run_to_completion, DistributedConfig, DistributedWorld, Simulation, TickFrame, TickScheduler,
};
use skyspace_replay::{first_divergence, FlightRecorder};
use tracing_subscriber::EnvFilter;

const TICK_LIMIT: Option<u64> = Some(2_000);

fn main() -> Result<(), Box<dyn Error>> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let mut args = std::env::args().skip(1);
    let seed: u64 = args.next().map(|s| s.parse()).transpose()?.unwrap_or(42);
    let workers: usize = args.next().map(|s| s.parse()).transpose()?.unwrap_or(4);

    println!("=== Skyspace self-spacing demo (seed {seed}) ===\n");

    // --- Single process: reference airspace ---
    println!("Single-process reference: 100x100, 60 aircraft, 20 no-fly");
    let mut world = TickScheduler::new(reference_profile(seed))?;
    let mut progress = |frame: &TickFrame<'_>| {
        let r = frame.report;
        if r.tick.0 % 10 == 0 || r.en_route == 0 {
            println!(
                "  tick {:>4}: moved={:>3} held={:>3} landed={:>2} en_route={:>3} time={:>6}us",
                r.tick, r.metrics.moved, r.metrics.held, r.metrics.landed, r.en_route, r.metrics.total_us,
            );
        }
    };
    let summary = run_to_completion(&mut world, &mut progress, TICK_LIMIT)?;
    println!(
        "  done: {} ticks, {} moves, {} holds, {}us\n",
        summary.ticks, summary.moves, summary.holds, summary.elapsed_us
    );
    println!("Final frame:\n{}", world.grid());

    // --- Both modes: distributed airspace ---
    println!("Distributed reference: 100x100, 90 aircraft, 80 no-fly, {workers} workers");
    let config = parallel_profile(seed);

    let mut single = TickScheduler::new(config.clone())?;
    let (single_run, _) = FlightRecorder::record(&mut single, TICK_LIMIT)?;

    let mut distributed = DistributedWorld::new(config, DistributedConfig { workers })?;
    let (distributed_run, summary) = FlightRecorder::record(&mut distributed, TICK_LIMIT)?;
    println!(
        "  done: {} ticks, {} broadcasts, {}us",
        summary.ticks, summary.broadcasts, summary.elapsed_us
    );

    match first_divergence(single_run.frames(), distributed_run.frames()) {
        None => println!("  trajectories identical across modes ({} ticks)", single_run.len()),
        Some(d) => println!("  DIVERGED: {d}"),
    }
    println!("  arrived: {}/{}", distributed.arrived_count(), distributed.aircraft_count());
    Ok(())
}
