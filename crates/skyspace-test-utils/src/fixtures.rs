//! Grid fixtures built from text frames.

use skyspace_core::Position;
use skyspace_grid::Grid;

/// Shorthand for `Position::new(x, y)`.
pub fn pos(x: i32, y: i32) -> Position {
    Position::new(x, y)
}

/// Parse a text frame into a grid.
///
/// One line per row; `.` is free, `A` occupied, `#` no-fly. Leading and
/// trailing whitespace on each line is ignored, as are blank lines, so
/// frames can be written as indented raw strings.
///
/// # Panics
///
/// On ragged rows, unknown glyphs, or an empty frame.
pub fn grid_from_frame(frame: &str) -> Grid {
    let rows: Vec<&str> = frame
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    assert!(!rows.is_empty(), "empty frame");
    let cols = rows[0].chars().count();
    let mut grid = Grid::new(rows.len() as u32, cols as u32).expect("frame dimensions");
    for (x, line) in rows.iter().enumerate() {
        assert_eq!(line.chars().count(), cols, "ragged row {x}");
        for (y, glyph) in line.chars().enumerate() {
            let p = pos(x as i32, y as i32);
            match glyph {
                '.' => {}
                'A' => grid.claim(p).expect("claim"),
                '#' => grid.mark_no_fly(p).expect("no-fly"),
                other => panic!("unknown glyph {other:?} at {p}"),
            }
        }
    }
    grid
}
