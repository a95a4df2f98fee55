//! Hashing utilities for grid and trajectory comparison.
//!
//! Uses FNV-1a for fast, deterministic hashing of simulation state.
//! These hashes are not cryptographically secure; they are used for
//! fast equality checks between recorded runs.

use skyspace_core::CellReader;
use skyspace_engine::MoveRecord;
use skyspace_grid::Grid;

/// FNV-1a offset basis for 64-bit.
const FNV_OFFSET: u64 = 0xcbf29ce484222325;
/// FNV-1a prime for 64-bit.
const FNV_PRIME: u64 = 0x00000100000001B3;

#[inline]
fn fnv1a_byte(hash: u64, byte: u8) -> u64 {
    (hash ^ byte as u64).wrapping_mul(FNV_PRIME)
}

#[inline]
fn fnv1a_bytes(mut hash: u64, bytes: &[u8]) -> u64 {
    for &b in bytes {
        hash = fnv1a_byte(hash, b);
    }
    hash
}

#[inline]
fn fnv1a_u32(hash: u64, v: u32) -> u64 {
    fnv1a_bytes(hash, &v.to_le_bytes())
}

#[inline]
fn fnv1a_i32(hash: u64, v: i32) -> u64 {
    fnv1a_bytes(hash, &v.to_le_bytes())
}

/// Hash a grid's dimensions and every cell state in row-major order.
///
/// Dimensions are folded in first, so a 2x3 and a 3x2 grid of free
/// cells hash differently.
pub fn grid_hash(grid: &Grid) -> u64 {
    let mut hash = FNV_OFFSET;
    hash = fnv1a_u32(hash, grid.rows());
    hash = fnv1a_u32(hash, grid.cols());
    for &state in grid.as_slice() {
        hash = fnv1a_byte(hash, state as u8);
    }
    hash
}

/// Hash a tick's applied moves in commit order.
pub fn moves_hash(moves: &[MoveRecord]) -> u64 {
    let mut hash = FNV_OFFSET;
    for m in moves {
        hash = fnv1a_u32(hash, m.aircraft.0);
        hash = fnv1a_i32(hash, m.from.x);
        hash = fnv1a_i32(hash, m.from.y);
        hash = fnv1a_i32(hash, m.to.x);
        hash = fnv1a_i32(hash, m.to.y);
        hash = fnv1a_byte(hash, m.rule as u8);
        hash = fnv1a_byte(hash, m.landed as u8);
    }
    hash
}
