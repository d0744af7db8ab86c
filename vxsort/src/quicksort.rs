use log::debug;

use crate::{
    bitonic,
    constants::{
        depth_limit, INSERTION_SORT_THRESHOLD, SCALAR_SORT_THRESHOLD, SMALL_SORT_THRESHOLD_BLOCKS,
    },
    partition::vectorized_partition,
    scalar,
    stats::stat,
    BitonicVector, SimdSortable,
};

/// Pending ranges never exceed `log2(len) + 1`: the larger side of every
/// split waits on the stack while the smaller side, at most half the range,
/// is sorted first.
const STACK_CAPACITY: usize = usize::BITS as usize + 1;

/// Sorts `data` with vector type `V`, starting from a full depth budget.
#[inline(always)]
pub(crate) fn sort<T, const N: usize, V>(data: &mut [T])
where
    T: SimdSortable,
    V: BitonicVector<T, N>,
{
    qsort::<T, N, V>(data, depth_limit(data.len()))
}

/// Quicksort over an explicit range stack. Must stay free of self-calls: the
/// driver, the partitioner and the networks inline into the `avx2` entry
/// points.
#[inline(always)]
pub(crate) fn qsort<T, const N: usize, V>(data: &mut [T], max_iters: u32)
where
    T: SimdSortable,
    V: BitonicVector<T, N>,
{
    let mut stack = [(0usize, 0usize, 0u32); STACK_CAPACITY];
    let mut pending = 0;
    let (mut start, mut end, mut budget) = (0, data.len(), max_iters);

    loop {
        match partition_or_finish::<T, N, V>(&mut data[start..end], budget) {
            Some(boundary) => {
                let pivot = start + boundary;
                let (left, right) = ((start, pivot), (pivot + 1, end));
                let (small, large) = if pivot - start <= end - pivot - 1 {
                    (left, right)
                } else {
                    (right, left)
                };
                budget -= 1;
                stack[pending] = (large.0, large.1, budget);
                pending += 1;
                (start, end) = small;
            }
            None => {
                if pending == 0 {
                    return;
                }
                pending -= 1;
                (start, end, budget) = stack[pending];
            }
        }
    }
}

/// Either sorts `data` completely and returns `None`, or partitions it around
/// a median-of-three pivot and returns the pivot's final index.
#[inline(always)]
fn partition_or_finish<T, const N: usize, V>(data: &mut [T], max_iters: u32) -> Option<usize>
where
    T: SimdSortable,
    V: BitonicVector<T, N>,
{
    let len = data.len();
    if len <= SCALAR_SORT_THRESHOLD {
        scalar::sort_tiny(data);
        return None;
    }
    if len < INSERTION_SORT_THRESHOLD {
        scalar::insertion_sort(data);
        return None;
    }
    if len <= N * SMALL_SORT_THRESHOLD_BLOCKS {
        bitonic::sort_blocks::<T, N, V>(data);
        return None;
    }
    /*
     * Resort to heapsort if quicksort isn't making any progress
     */
    if max_iters == 0 {
        debug!("QSORT DEPTH LIMIT: len={}, falling back to heapsort", len);
        stat!(depth_limit_fallbacks += 1);
        scalar::heapsort(data);
        return None;
    }

    let last = len - 1;
    let mid = len / 2;
    // median of three lands in the middle; park it at the end as the pivot
    scalar::sort3(data, 0, mid, last);
    data.swap(mid, last);

    let boundary = vectorized_partition::<T, N, V>(data);
    if boundary == last {
        // every element compared <= pivot
        debug!("QSORT DEGENERATE PIVOT: len={}, falling back to scalar quicksort", len);
        stat!(scalar_fallbacks += 1);
        scalar::quicksort(data);
        return None;
    }
    Some(boundary)
}
