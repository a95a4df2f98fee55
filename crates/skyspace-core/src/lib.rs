//! Core types and traits for the Skyspace self-spacing simulator.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions used throughout the workspace: strong
//! IDs, grid positions and move vectors, cell states, error types, and
//! the read-only [`CellReader`] trait through which planners see a grid.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cell;
pub mod error;
pub mod id;
pub mod position;
pub mod traits;

pub use cell::CellState;
pub use error::{GridError, Placement, SetupError, SimError};
pub use id::{AircraftId, GridVersion, TickId, WorkerId};
pub use position::{MoveVector, Position};
pub use traits::CellReader;
