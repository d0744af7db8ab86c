//! Tuning thresholds shared by the quicksort driver and its fallbacks.

/// Ranges of at most this many elements are finished with compare-and-swap.
pub const SCALAR_SORT_THRESHOLD: usize = 3;

/// Ranges shorter than this are finished with insertion sort.
pub const INSERTION_SORT_THRESHOLD: usize = 16;

/// Largest number of vector blocks handled by one bitonic network.
pub const SMALL_SORT_THRESHOLD_BLOCKS: usize = 16;

/// The recursion budget is this many times `floor(log2(len))`.
pub const DEPTH_LIMIT_FACTOR: u32 = 2;

/// Iteration budget for a range of `len` elements.
#[inline]
pub(crate) fn depth_limit(len: usize) -> u32 {
    match len {
        0 => 0,
        _ => DEPTH_LIMIT_FACTOR * len.ilog2(),
    }
}
