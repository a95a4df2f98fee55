//! Grid positions and single-step move vectors.

use std::fmt;

/// A cell coordinate on the airspace grid.
///
/// `x` indexes rows (`0..rows`) and `y` indexes columns (`0..cols`).
/// Signed so that candidate moves off the grid edge are representable
/// before they are bounds-checked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    /// Row index.
    pub x: i32,
    /// Column index.
    pub y: i32,
}

impl Position {
    /// Create a position from row and column.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The position reached by applying `step` to this one.
    pub fn offset(self, step: MoveVector) -> Self {
        Self {
            x: self.x + i32::from(step.dx()),
            y: self.y + i32::from(step.dy()),
        }
    }

    /// Chebyshev (L-inf) distance: the minimum number of unobstructed
    /// 8-connected steps between two cells.
    pub fn chebyshev(self, other: Position) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }

    /// Manhattan (L1) distance.
    pub fn manhattan(self, other: Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A single-step displacement with each component in `{-1, 0, 1}`.
///
/// `(0, 0)` is [`MoveVector::HOLD`]. The component range is enforced at
/// construction, so every value of this type is a legal step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct MoveVector {
    dx: i8,
    dy: i8,
}

impl MoveVector {
    /// Stay in the current cell.
    pub const HOLD: MoveVector = MoveVector { dx: 0, dy: 0 };

    /// Create a move vector. Returns `None` if either component is
    /// outside `{-1, 0, 1}`.
    pub fn new(dx: i8, dy: i8) -> Option<Self> {
        if (-1..=1).contains(&dx) && (-1..=1).contains(&dy) {
            Some(Self { dx, dy })
        } else {
            None
        }
    }

    /// The unit step from `from` toward `to`, ignoring obstacles:
    /// the per-axis sign of the displacement.
    pub fn toward(from: Position, to: Position) -> Self {
        Self {
            dx: (to.x - from.x).signum() as i8,
            dy: (to.y - from.y).signum() as i8,
        }
    }

    /// Row component.
    pub fn dx(self) -> i8 {
        self.dx
    }

    /// Column component.
    pub fn dy(self) -> i8 {
        self.dy
    }

    /// `true` for `(0, 0)`.
    pub fn is_hold(self) -> bool {
        self.dx == 0 && self.dy == 0
    }

    /// `true` when exactly one component is non-zero.
    pub fn is_axis_aligned(self) -> bool {
        (self.dx != 0) != (self.dy != 0)
    }

    /// `true` when both components are non-zero.
    pub fn is_diagonal(self) -> bool {
        self.dx != 0 && self.dy != 0
    }

    /// This vector with the row component replaced.
    pub fn with_dx(self, dx: i8) -> Option<Self> {
        Self::new(dx, self.dy)
    }

    /// This vector with the column component replaced.
    pub fn with_dy(self, dy: i8) -> Option<Self> {
        Self::new(self.dx, dy)
    }
}

impl fmt::Display for MoveVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.dx, self.dy)
    }
}
