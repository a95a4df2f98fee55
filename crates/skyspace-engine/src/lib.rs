//! Tick scheduling and distributed coordination for Skyspace simulations.
//!
//! Two execution modes share one move-application step and one
//! [`Simulation`] interface:
//!
//! - [`TickScheduler`]: single-threaded. Owns the grid exclusively and
//!   visits en-route aircraft in ascending priority rank, applying each
//!   move before the next aircraft plans.
//! - [`DistributedWorld`]: a coordinator plus worker threads that share
//!   nothing. Each worker holds a grid replica; after every move the
//!   mover broadcasts the full grid to all other participants before the
//!   next aircraft anywhere may plan.
//!
//! Both modes start from a validated [`SimConfig`], which the seeded
//! [`Scenario`] generator can produce.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod aircraft;
pub mod config;
pub mod distributed;
mod flight;
pub mod metrics;
pub mod report;
pub mod scenario;
pub mod scheduler;
pub mod simulation;

pub use aircraft::{Aircraft, FlightStatus};
pub use config::{AircraftSpec, DistributedConfig, SimConfig};
pub use distributed::{partition, DistributedWorld};
pub use metrics::TickMetrics;
pub use report::{MoveRecord, TickReport};
pub use scenario::Scenario;
pub use scheduler::TickScheduler;
pub use simulation::{run_to_completion, RunSummary, Simulation, TickFrame, TickObserver};
