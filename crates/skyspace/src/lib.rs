//! Skyspace: self-spacing simulation for autonomous aircraft.
//!
//! Aircraft share a rectangular grid. Each tick every en-route aircraft
//! takes one step toward its destination, sidestepping occupied and
//! no-fly cells with a fixed priority-fallback rule, and the move is
//! visible to every aircraft that plans after it.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Skyspace sub-crates.
//!
//! # Quick start
//!
//! ```rust
//! use skyspace::prelude::*;
//!
//! let config = SimConfig::new(10, 10)
//!     .with_aircraft(AircraftSpec::new(Position::new(0, 0), Position::new(3, 5)))
//!     .with_aircraft(AircraftSpec::new(Position::new(9, 9), Position::new(0, 9)))
//!     .with_no_fly(Position::new(5, 5));
//!
//! let mut world = TickScheduler::new(config).unwrap();
//! let mut recorder = FlightRecorder::new();
//! let summary = run_to_completion(&mut world, &mut recorder, Some(100)).unwrap();
//!
//! assert!(world.is_done());
//! assert_eq!(summary.ticks as usize, recorder.len());
//! assert_eq!(world.grid().occupied_count(), 0);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `skyspace-core` | IDs, positions, cell states, errors |
//! | [`grid`] | `skyspace-grid` | The occupancy grid and border policy |
//! | [`planner`] | `skyspace-planner` | Planner trait and the priority-fallback rule |
//! | [`engine`] | `skyspace-engine` | Single-process and distributed worlds |
//! | [`replay`] | `skyspace-replay` | Recording, hashing and run comparison |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, IDs and errors (`skyspace-core`).
pub use skyspace_core as types;

/// The shared occupancy grid (`skyspace-grid`).
pub use skyspace_grid as grid;

/// Movement planning (`skyspace-planner`).
///
/// Implement [`planner::Planner`] to swap in a different rule.
pub use skyspace_planner as planner;

/// Simulation worlds (`skyspace-engine`).
///
/// [`engine::TickScheduler`] runs in one thread;
/// [`engine::DistributedWorld`] spreads aircraft across worker threads
/// and produces the same trajectories.
pub use skyspace_engine as engine;

/// Recording and determinism checks (`skyspace-replay`).
pub use skyspace_replay as replay;

/// Common imports for typical Skyspace usage.
pub mod prelude {
    // Core types and traits
    pub use skyspace_core::{AircraftId, CellReader, CellState, Position, TickId};

    // Errors
    pub use skyspace_core::{GridError, SetupError, SimError};

    // Grid
    pub use skyspace_grid::{BorderPolicy, Grid};

    // Planning
    pub use skyspace_planner::{Decision, Planner, PriorityFallback, Rule};

    // Worlds
    pub use skyspace_engine::{
        run_to_completion, AircraftSpec, DistributedConfig, DistributedWorld, Scenario, SimConfig,
        Simulation, TickFrame, TickObserver, TickReport, TickScheduler,
    };

    // Replay
    pub use skyspace_replay::{first_divergence, FlightRecorder};
}
