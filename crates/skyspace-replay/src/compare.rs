//! Recording comparison.

use std::fmt;

use skyspace_core::TickId;

use crate::recorder::Frame;

/// How two recordings first disagree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DivergenceKind {
    /// Different applied moves.
    Moves,
    /// Same moves, different grids.
    Grid {
        /// Hash from the left recording.
        left: u64,
        /// Hash from the right recording.
        right: u64,
    },
    /// One recording ends here; the other keeps going.
    Length {
        /// Frames in the left recording.
        left: usize,
        /// Frames in the right recording.
        right: usize,
    },
}

/// The first point at which two recordings disagree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Divergence {
    /// First tick that differs.
    pub tick: TickId,
    /// What differs.
    pub kind: DivergenceKind,
}

impl fmt::Display for Divergence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DivergenceKind::Moves => write!(f, "tick {}: moves differ", self.tick),
            DivergenceKind::Grid { left, right } => {
                write!(f, "tick {}: grid hash {left:#018x} != {right:#018x}", self.tick)
            }
            DivergenceKind::Length { left, right } => {
                write!(f, "tick {}: recording lengths {left} != {right}", self.tick)
            }
        }
    }
}

/// Walk two recordings in lockstep and report the first difference.
///
/// Moves are compared before grid hashes, so a divergence points at the
/// decision that caused it rather than its effect. Returns `None` when
/// the recordings are identical.
pub fn first_divergence(left: &[Frame], right: &[Frame]) -> Option<Divergence> {
    for (l, r) in left.iter().zip(right) {
        if l.tick != r.tick || l.moves != r.moves {
            return Some(Divergence {
                tick: l.tick,
                kind: DivergenceKind::Moves,
            });
        }
        if l.grid_hash != r.grid_hash {
            return Some(Divergence {
                tick: l.tick,
                kind: DivergenceKind::Grid {
                    left: l.grid_hash,
                    right: r.grid_hash,
                },
            });
        }
    }
    let common = left.len().min(right.len());
    if let Some(extra) = left.get(common).or_else(|| right.get(common)) {
        return Some(Divergence {
            tick: extra.tick,
            kind: DivergenceKind::Length {
                left: left.len(),
                right: right.len(),
            },
        });
    }
    None
}
