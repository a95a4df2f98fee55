//! Contiguous work split for distributed ticks.

use std::ops::Range;

/// Split `len` items into `workers` contiguous ranges of at most
/// `ceil(len / workers)` items each.
///
/// Always returns exactly `workers` ranges, in order; trailing ranges are
/// empty when there are fewer items than workers. Concatenated, the
/// ranges cover `0..len` exactly once.
///
/// ```
/// use skyspace_engine::partition;
///
/// assert_eq!(partition(5, 2), vec![0..3, 3..5]);
/// assert_eq!(partition(2, 4), vec![0..1, 1..2, 2..2, 2..2]);
/// ```
pub fn partition(len: usize, workers: usize) -> Vec<Range<usize>> {
    if workers == 0 {
        return Vec::new();
    }
    let chunk = len.div_ceil(workers);
    (0..workers)
        .map(|w| {
            let start = (w * chunk).min(len);
            let end = (start + chunk).min(len);
            start..end
        })
        .collect()
}
