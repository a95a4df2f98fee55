//! The shared airspace occupancy grid.
//!
//! [`Grid`] is a fixed-size `rows x cols` map from [`Position`] to
//! [`CellState`]. It is pure state plus cell-level accessors: it has no
//! internal concurrency control, and callers decide how access is
//! serialized (exclusive ownership in the single-process scheduler,
//! versioned replicas in the distributed coordinator).
//!
//! [`BorderPolicy`] decides what a planner sees when a candidate move
//! would leave the grid.
//!
//! [`Position`]: skyspace_core::Position
//! [`CellState`]: skyspace_core::CellState

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod border;
pub mod grid;

pub use border::BorderPolicy;
pub use grid::{probe, CellPair, Extent, Grid};
