//! Grid cell states.

use std::fmt;

/// State of a single grid cell.
///
/// `NoFly` cells are assigned once at setup and never change. `Free` and
/// `Occupied` toggle as aircraft depart and arrive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CellState {
    /// No aircraft and not restricted.
    #[default]
    Free = 0,
    /// Claimed by exactly one en-route aircraft.
    Occupied = 1,
    /// Restricted airspace. Never claimable.
    NoFly = 2,
}

impl CellState {
    /// Whether an aircraft may move into this cell.
    pub fn is_free(self) -> bool {
        self == CellState::Free
    }

    /// Single-character glyph used for text frames.
    pub fn glyph(self) -> char {
        match self {
            CellState::Free => '.',
            CellState::Occupied => 'A',
            CellState::NoFly => '#',
        }
    }
}

impl fmt::Display for CellState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellState::Free => write!(f, "free"),
            CellState::Occupied => write!(f, "occupied"),
            CellState::NoFly => write!(f, "no-fly"),
        }
    }
}
