//! Trajectory recording and determinism checks for Skyspace simulations.
//!
//! A [`FlightRecorder`] observes a run and keeps one [`Frame`] per tick:
//! the grid hash plus the applied moves. Two recordings can then be
//! compared with [`first_divergence`], which is how single-process and
//! distributed runs are shown to agree.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod compare;
pub mod hash;
pub mod recorder;

pub use compare::{first_divergence, Divergence, DivergenceKind};
pub use hash::{grid_hash, moves_hash};
pub use recorder::{FlightRecorder, Frame};
