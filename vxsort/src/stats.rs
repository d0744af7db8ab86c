//! Optional per-thread counters describing what the sort did.
//!
//! Counting is compiled in only with the `stats` feature. Without it the
//! `stat!` macro expands to nothing and [`snapshot`] always reports zeros.

#[cfg(feature = "stats")]
use std::cell::Cell;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SortStats {
    /// Calls to the vectorized partitioner.
    pub partition_calls: u64,
    pub vector_loads: u64,
    pub vector_stores: u64,
    /// Blocks reordered through the permutation table.
    pub permutations: u64,
    /// Ranges finished by a bitonic network.
    pub small_sorts: u64,
    /// Degenerate pivots that handed the range to the scalar quicksort.
    pub scalar_fallbacks: u64,
    /// Ranges finished by heapsort after the depth budget ran out.
    pub depth_limit_fallbacks: u64,
}

#[cfg(feature = "stats")]
#[derive(Default)]
pub(crate) struct Counters {
    pub partition_calls: Cell<u64>,
    pub vector_loads: Cell<u64>,
    pub vector_stores: Cell<u64>,
    pub permutations: Cell<u64>,
    pub small_sorts: Cell<u64>,
    pub scalar_fallbacks: Cell<u64>,
    pub depth_limit_fallbacks: Cell<u64>,
}

#[cfg(feature = "stats")]
thread_local! {
    pub(crate) static COUNTERS: Counters = Counters::default();
}

/// Bumps a counter of the current thread, e.g. `stat!(vector_loads += 2)`.
macro_rules! stat {
    ($counter:ident += $n:expr) => {
        #[cfg(feature = "stats")]
        $crate::stats::COUNTERS.with(|c| c.$counter.set(c.$counter.get() + ($n) as u64));
    };
}
pub(crate) use stat;

/// Counters accumulated on the calling thread since the last [`reset`].
pub fn snapshot() -> SortStats {
    #[cfg(feature = "stats")]
    {
        COUNTERS.with(|c| SortStats {
            partition_calls: c.partition_calls.get(),
            vector_loads: c.vector_loads.get(),
            vector_stores: c.vector_stores.get(),
            permutations: c.permutations.get(),
            small_sorts: c.small_sorts.get(),
            scalar_fallbacks: c.scalar_fallbacks.get(),
            depth_limit_fallbacks: c.depth_limit_fallbacks.get(),
        })
    }
    #[cfg(not(feature = "stats"))]
    {
        SortStats::default()
    }
}

pub fn reset() {
    #[cfg(feature = "stats")]
    COUNTERS.with(|c| {
        c.partition_calls.set(0);
        c.vector_loads.set(0);
        c.vector_stores.set(0);
        c.permutations.set(0);
        c.small_sorts.set(0);
        c.scalar_fallbacks.set(0);
        c.depth_limit_fallbacks.set(0);
    });
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    #[cfg(feature = "stats")]
    fn test_counters_accumulate_and_reset() {
        reset();
        stat!(vector_loads += 2);
        stat!(vector_loads += 3);
        stat!(partition_calls += 1);
        let stats = snapshot();
        assert_eq!(stats.vector_loads, 5);
        assert_eq!(stats.partition_calls, 1);
        reset();
        assert_eq!(snapshot(), SortStats::default());
    }

    #[test]
    #[cfg(not(feature = "stats"))]
    fn test_disabled_counters_stay_zero() {
        stat!(vector_loads += 2);
        assert_eq!(snapshot(), SortStats::default());
    }
}
