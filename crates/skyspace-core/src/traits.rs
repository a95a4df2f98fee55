//! Core abstraction traits for grid reading.

use crate::cell::CellState;
use crate::error::GridError;
use crate::position::Position;

/// Read-only access to a grid's cell states.
///
/// Planners read through `&dyn CellReader` rather than a concrete grid
/// type, so a planning decision can never mutate the state it is
/// evaluated against.
pub trait CellReader {
    /// Number of rows.
    fn rows(&self) -> u32;

    /// Number of columns.
    fn cols(&self) -> u32;

    /// Bounds-checked read of a single cell.
    ///
    /// Returns [`GridError::OutOfBounds`] if `position` lies outside
    /// `[0, rows) x [0, cols)`.
    fn cell_state(&self, position: Position) -> Result<CellState, GridError>;

    /// Whether `position` lies inside the grid.
    fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && (position.x as u32) < self.rows()
            && (position.y as u32) < self.cols()
    }
}
