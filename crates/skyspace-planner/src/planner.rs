//! The [`Planner`] trait and its [`Decision`] output.

use skyspace_core::{CellReader, GridError, MoveVector, Position};
use std::fmt;

/// Which step of the fallback order produced a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Rule {
    /// The unobstructed unit step toward the destination.
    Desired,
    /// Axis-aligned desired move blocked: zero component set to `+1`.
    SidestepPositive,
    /// Axis-aligned desired move blocked: zero component set to `-1`.
    SidestepNegative,
    /// Diagonal desired move blocked: column component dropped.
    DropDy,
    /// Diagonal desired move blocked: row component dropped.
    DropDx,
    /// Diagonal desired move blocked: row kept, column negated.
    MirrorDy,
    /// Diagonal desired move blocked: column kept, row negated.
    MirrorDx,
    /// Every candidate blocked; the aircraft stays put.
    Hold,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Rule::Desired => "desired",
            Rule::SidestepPositive => "sidestep+",
            Rule::SidestepNegative => "sidestep-",
            Rule::DropDy => "drop-dy",
            Rule::DropDx => "drop-dx",
            Rule::MirrorDy => "mirror-dy",
            Rule::MirrorDx => "mirror-dx",
            Rule::Hold => "hold",
        };
        f.write_str(s)
    }
}

/// Outcome of one planning call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    /// Position equals destination; nothing to plan.
    Arrived,
    /// Move by `vector`, selected by `rule`.
    Move {
        /// The chosen single-step displacement. Never `(0, 0)`.
        vector: MoveVector,
        /// The fallback step that accepted it.
        rule: Rule,
    },
    /// Every candidate was blocked.
    Hold,
}

impl Decision {
    /// The displacement to apply: [`MoveVector::HOLD`] unless moving.
    pub fn vector(&self) -> MoveVector {
        match self {
            Decision::Move { vector, .. } => *vector,
            Decision::Arrived | Decision::Hold => MoveVector::HOLD,
        }
    }

    /// The rule that produced this decision. `Arrived` reports `Hold`,
    /// since no displacement is applied.
    pub fn rule(&self) -> Rule {
        match self {
            Decision::Move { rule, .. } => *rule,
            Decision::Arrived | Decision::Hold => Rule::Hold,
        }
    }
}

/// A pure move-planning function.
///
/// # Contract
///
/// - `plan()` MUST be deterministic: identical inputs give identical output.
/// - `plan()` MUST NOT return a `Move` whose target cell is not `Free`
///   in `grid` at the time of the call.
/// - `&self`: planners are stateless; all state lives in the grid and
///   the aircraft.
///
/// `Send + Sync` because distributed workers share one planner.
///
/// # Examples
///
/// A planner that never moves:
///
/// ```
/// use skyspace_core::{CellReader, GridError, Position};
/// use skyspace_planner::{Decision, Planner};
///
/// struct Grounded;
///
/// impl Planner for Grounded {
///     fn name(&self) -> &str { "grounded" }
///
///     fn plan(
///         &self,
///         position: Position,
///         destination: Position,
///         _grid: &dyn CellReader,
///     ) -> Result<Decision, GridError> {
///         Ok(if position == destination { Decision::Arrived } else { Decision::Hold })
///     }
/// }
///
/// assert_eq!(Grounded.name(), "grounded");
/// ```
pub trait Planner: Send + Sync + 'static {
    /// Human-readable name for logging.
    fn name(&self) -> &str;

    /// Choose the next move for an aircraft at `position` heading to
    /// `destination`, reading `grid`.
    ///
    /// # Errors
    ///
    /// Implementations may surface grid read failures (for example an
    /// out-of-range candidate under a strict border policy). Such errors
    /// are fatal to the run.
    fn plan(
        &self,
        position: Position,
        destination: Position,
        grid: &dyn CellReader,
    ) -> Result<Decision, GridError>;
}
