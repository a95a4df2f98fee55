//! Border (edge) handling for move planning.

/// How out-of-range candidate cells are treated during planning.
///
/// # Examples
///
/// ```
/// use skyspace_core::Position;
/// use skyspace_grid::{BorderPolicy, Grid};
///
/// let grid = Grid::new(4, 4).unwrap();
/// let outside = Position::new(-1, 0);
///
/// // Blocked: the edge behaves like a wall.
/// assert_eq!(grid.probe(outside, BorderPolicy::Blocked), Ok(false));
///
/// // Strict: evaluating an off-grid candidate is a fatal error.
/// assert!(grid.probe(outside, BorderPolicy::Strict).is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BorderPolicy {
    /// Out-of-range cells are permanently non-`Free`.
    #[default]
    Blocked,
    /// Out-of-range cells are rejected with `OutOfBounds`.
    Strict,
}
