//! Benchmark profiles for the Skyspace simulation.
//!
//! Provides pre-built [`SimConfig`] profiles for benchmarking and demos:
//!
//! - [`reference_profile`]: 100x100 grid, 60 aircraft, 20 no-fly cells
//! - [`parallel_profile`]: 100x100 grid, 90 aircraft, 80 no-fly cells
//! - [`stress_profile`]: 316x316 grid (~100K cells), 900 aircraft
//! - [`congested_grid`]: a half-occupied grid for planner micro-benchmarks

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use skyspace_core::Position;
use skyspace_engine::{Scenario, SimConfig};
use skyspace_grid::Grid;

/// The single-process reference airspace.
pub fn reference_profile(seed: u64) -> SimConfig {
    generate(Scenario::serial_reference(seed))
}

/// The distributed reference airspace.
pub fn parallel_profile(seed: u64) -> SimConfig {
    generate(Scenario::parallel_reference(seed))
}

/// Same density as [`parallel_profile`] at 10x the cell count.
pub fn stress_profile(seed: u64) -> SimConfig {
    generate(Scenario::new(316, 316, 900, 800, seed))
}

fn generate(scenario: Scenario) -> SimConfig {
    scenario
        .generate()
        .expect("benchmark profiles fit their grids")
}

/// A `size x size` grid with every other cell in a checkerboard occupied
/// and every seventh cell no-fly, so most plans walk the fallback list.
pub fn congested_grid(size: u32) -> Grid {
    let mut grid = Grid::new(size, size).expect("benchmark grid size is non-zero");
    for x in 0..size as i32 {
        for y in 0..size as i32 {
            let p = Position::new(x, y);
            let i = x * size as i32 + y;
            if i % 7 == 0 {
                let _ = grid.mark_no_fly(p);
            } else if (x + y) % 2 == 0 {
                let _ = grid.claim(p);
            }
        }
    }
    grid
}
