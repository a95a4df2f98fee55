//! 2D occupancy grid with bounds-checked cell access.

use crate::border::BorderPolicy;
use skyspace_core::{CellReader, CellState, GridError, Position};
use std::fmt;

/// The before/after cells of one applied move.
///
/// For a hold, `from == to` and the grid is unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellPair {
    /// Cell vacated.
    pub from: Position,
    /// Cell claimed.
    pub to: Position,
}

impl CellPair {
    /// Whether the pair describes a hold (no cell changed).
    pub fn is_hold(&self) -> bool {
        self.from == self.to
    }
}

// ── Extent ──────────────────────────────────────────────────────

/// Validated grid dimensions, without cell storage.
///
/// Setup code checks coordinates against an `Extent` before any grid is
/// allocated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Extent {
    rows: u32,
    cols: u32,
}

impl Extent {
    /// Maximum dimension size: coordinates use `i32`, so each axis must fit.
    pub const MAX_DIM: u32 = i32::MAX as u32;

    /// Returns `Err(GridError::EmptyGrid)` if either dimension is 0, or
    /// `Err(GridError::DimensionTooLarge)` if either exceeds `i32::MAX`.
    pub fn new(rows: u32, cols: u32) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::EmptyGrid);
        }
        for (name, value) in [("rows", rows), ("cols", cols)] {
            if value > Self::MAX_DIM {
                return Err(GridError::DimensionTooLarge {
                    name,
                    value,
                    max: Self::MAX_DIM,
                });
            }
        }
        Ok(Self { rows, cols })
    }

    /// Row count.
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Column count.
    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    /// `Ok` if `position` lies inside, else `GridError::OutOfBounds`.
    pub fn check(&self, position: Position) -> Result<(), GridError> {
        let inside = position.x >= 0
            && position.y >= 0
            && (position.x as u32) < self.rows
            && (position.y as u32) < self.cols;
        if inside {
            Ok(())
        } else {
            Err(GridError::OutOfBounds {
                position,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    /// Position of row-major cell `index`.
    pub fn position_of(&self, index: usize) -> Position {
        let cols = self.cols as usize;
        Position::new((index / cols) as i32, (index % cols) as i32)
    }
}

// ── Grid ────────────────────────────────────────────────────────

/// A two-dimensional airspace grid.
///
/// Cells are stored row-major. Coordinates are `Position { x: row, y: col }`.
/// Occupied and no-fly counts are maintained incrementally so invariant
/// checks are O(1).
///
/// Invariant: no mutation ever turns a `NoFly` cell into anything else,
/// and no mutation ever claims a cell that is not `Free`.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    rows: u32,
    cols: u32,
    cells: Vec<CellState>,
    occupied: usize,
    no_fly: usize,
}

impl Grid {
    /// Maximum dimension size: coordinates use `i32`, so each axis must fit.
    pub const MAX_DIM: u32 = Extent::MAX_DIM;

    /// Create an all-`Free` grid with `rows * cols` cells.
    ///
    /// Fails on the same dimensions [`Extent::new`] rejects.
    pub fn new(rows: u32, cols: u32) -> Result<Self, GridError> {
        let extent = Extent::new(rows, cols)?;
        Ok(Self {
            rows,
            cols,
            cells: vec![CellState::Free; extent.cell_count()],
            occupied: 0,
            no_fly: 0,
        })
    }

    /// The grid's dimensions.
    pub fn extent(&self) -> Extent {
        Extent {
            rows: self.rows,
            cols: self.cols,
        }
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Number of `Occupied` cells.
    pub fn occupied_count(&self) -> usize {
        self.occupied
    }

    /// Number of `NoFly` cells.
    pub fn no_fly_count(&self) -> usize {
        self.no_fly
    }

    /// Number of `Free` cells.
    pub fn free_count(&self) -> usize {
        self.cells.len() - self.occupied - self.no_fly
    }

    fn index(&self, position: Position) -> Result<usize, GridError> {
        self.extent().check(position)?;
        Ok(position.x as usize * self.cols as usize + position.y as usize)
    }

    fn position_of(&self, index: usize) -> Position {
        self.extent().position_of(index)
    }

    /// Flip a cell strictly between `Free` and `Occupied`.
    ///
    /// Returns the new state. Toggling a `NoFly` cell is a programming
    /// error and yields [`GridError::NoFlyToggle`].
    pub fn toggle_occupancy(&mut self, position: Position) -> Result<CellState, GridError> {
        let i = self.index(position)?;
        let next = match self.cells[i] {
            CellState::Free => {
                self.occupied += 1;
                CellState::Occupied
            }
            CellState::Occupied => {
                self.occupied -= 1;
                CellState::Free
            }
            CellState::NoFly => return Err(GridError::NoFlyToggle { position }),
        };
        self.cells[i] = next;
        Ok(next)
    }

    /// Mark a cell no-fly. Setup-time only.
    ///
    /// Fails with [`GridError::AlreadyMarked`] if the cell is not `Free`.
    pub fn mark_no_fly(&mut self, position: Position) -> Result<(), GridError> {
        let i = self.index(position)?;
        let state = self.cells[i];
        if state != CellState::Free {
            return Err(GridError::AlreadyMarked { position, state });
        }
        self.cells[i] = CellState::NoFly;
        self.no_fly += 1;
        Ok(())
    }

    /// Occupy a `Free` cell.
    ///
    /// Fails with [`GridError::InvalidClaim`] for any other state.
    pub fn claim(&mut self, position: Position) -> Result<(), GridError> {
        let state = self.cell_state(position)?;
        if state != CellState::Free {
            return Err(GridError::InvalidClaim { position, state });
        }
        self.toggle_occupancy(position).map(|_| ())
    }

    /// Vacate an `Occupied` cell.
    ///
    /// Fails with [`GridError::NotOccupied`] for any other state.
    pub fn release(&mut self, position: Position) -> Result<(), GridError> {
        let state = self.cell_state(position)?;
        if state != CellState::Occupied {
            return Err(GridError::NotOccupied { position, state });
        }
        self.toggle_occupancy(position).map(|_| ())
    }

    /// Vacate `from` and claim `to` as one update.
    ///
    /// Both cells are validated before either is written, so a failed
    /// move leaves the grid untouched. `from == to` is a hold and a no-op.
    pub fn apply_move(&mut self, from: Position, to: Position) -> Result<CellPair, GridError> {
        let pair = CellPair { from, to };
        if pair.is_hold() {
            self.index(from)?;
            return Ok(pair);
        }
        let from_state = self.cell_state(from)?;
        if from_state != CellState::Occupied {
            return Err(GridError::NotOccupied {
                position: from,
                state: from_state,
            });
        }
        let to_state = self.cell_state(to)?;
        if to_state != CellState::Free {
            return Err(GridError::InvalidClaim {
                position: to,
                state: to_state,
            });
        }
        self.toggle_occupancy(from)?;
        self.toggle_occupancy(to)?;
        Ok(pair)
    }

    /// Whether a planner may move into `position`.
    ///
    /// In-range cells are free iff their state is `Free`. Out-of-range
    /// cells are resolved by `border`.
    pub fn probe(&self, position: Position, border: BorderPolicy) -> Result<bool, GridError> {
        probe(self, position, border)
    }

    /// Enumerate every cell with its state in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Position, CellState)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &state)| (self.position_of(i), state))
    }

    /// Positions of every cell in `state`, row-major.
    pub fn positions_in(&self, state: CellState) -> Vec<Position> {
        self.cells()
            .filter(|&(_, s)| s == state)
            .map(|(p, _)| p)
            .collect()
    }

    /// Raw row-major cell states.
    pub fn as_slice(&self) -> &[CellState] {
        &self.cells
    }
}

/// Resolve whether `position` is a legal move target on any
/// [`CellReader`] under `border`.
pub fn probe(
    grid: &(impl CellReader + ?Sized),
    position: Position,
    border: BorderPolicy,
) -> Result<bool, GridError> {
    match grid.cell_state(position) {
        Ok(state) => Ok(state.is_free()),
        Err(GridError::OutOfBounds { .. }) if border == BorderPolicy::Blocked => Ok(false),
        Err(e) => Err(e),
    }
}

impl CellReader for Grid {
    fn rows(&self) -> u32 {
        self.rows
    }

    fn cols(&self) -> u32 {
        self.cols
    }

    fn cell_state(&self, position: Position) -> Result<CellState, GridError> {
        self.index(position).map(|i| self.cells[i])
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid")
            .field("rows", &self.rows)
            .field("cols", &self.cols)
            .field("occupied", &self.occupied)
            .field("no_fly", &self.no_fly)
            .finish()
    }
}

/// Text frame: one line per row, `.` free, `A` occupied, `#` no-fly.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.cols as usize) {
            for state in row {
                write!(f, "{}", state.glyph())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
