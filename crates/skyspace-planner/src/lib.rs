//! Move planning for Skyspace aircraft.
//!
//! A [`Planner`] maps an aircraft's position, its destination and a
//! read-only grid view to exactly one [`Decision`]. The reference
//! implementation, [`PriorityFallback`], walks a fixed, ordered list of
//! candidate moves (see [`candidates`]) and takes the first whose target
//! cell is `Free`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod candidates;
pub mod planner;
pub mod priority_fallback;

pub use candidates::{fallback_candidates, Candidate, Candidates};
pub use planner::{Decision, Planner, Rule};
pub use priority_fallback::PriorityFallback;
