//! Double-pumped in-place partitioning around the last element of a range.
//!
//! The first and last blocks are held in registers, which opens a hole of
//! two blocks. Each step reads one more block from whichever end has less
//! free space, permutes it so its `<= pivot` lanes come first, and stores it
//! whole at both write cursors: the left cursor keeps the `<=` lanes, the
//! right cursor keeps the `>` lanes, and the rest of each store lands in the
//! hole and is overwritten later. Reads stay at least one block ahead of the
//! writes on both sides, so no unread element is ever overwritten.

use crate::{stats::stat, SimdCompare, SimdSortable};

/// Partitions one block and stores it at both write cursors.
///
/// # Safety
/// `[write_left, write_left + N)` and `[write_right - N, write_right)` must be
/// in bounds and hold no unread elements.
#[inline(always)]
unsafe fn partition_block<T, const N: usize, V>(
    ptr: *mut T,
    block: V,
    pivot_vec: V,
    write_left: &mut usize,
    write_right: &mut usize,
) where
    T: SimdSortable,
    V: SimdCompare<T, N>,
{
    let gt_mask = V::gt_mask(block, pivot_vec);
    let amount_gt_pivot = gt_mask.count_ones() as usize;
    let permuted = V::permute_by_mask(block, gt_mask);
    V::storeu_ptr(permuted, ptr.add(*write_left));
    V::storeu_ptr(permuted, ptr.add(*write_right - N));
    *write_left += N - amount_gt_pivot;
    *write_right -= amount_gt_pivot;
    stat!(permutations += 1);
    stat!(vector_stores += 2);
}

/// Partitions `data[..len - 1]` around the pivot `data[len - 1]` and moves the
/// pivot to the boundary.
///
/// Returns `b` such that `data[..b] <= pivot`, `data[b] == pivot` and
/// `data[b + 1..] > pivot`. `data` must hold more than two blocks.
#[inline(always)]
pub(crate) fn vectorized_partition<T, const N: usize, V>(data: &mut [T]) -> usize
where
    T: SimdSortable,
    V: SimdCompare<T, N>,
{
    let len = data.len();
    assert!(len > 2 * N, "partition needs more than {} elements, got {len}", 2 * N);
    let last = len - 1;
    let pivot = data[last];
    let pivot_vec = V::set(pivot);
    stat!(partition_calls += 1);

    let boundary = unsafe {
        let ptr = data.as_mut_ptr();

        // first and last N values are partitioned at the end
        let vec_left = V::loadu_ptr(ptr);
        let vec_right = V::loadu_ptr(ptr.add(last - N));
        stat!(vector_loads += 2);

        let mut read_left = N;
        let mut read_right = last - N;
        let mut write_left = 0;
        let mut write_right = last;

        while read_right - read_left >= N {
            debug_assert_eq!(
                (read_left - write_left) + (write_right - read_right),
                2 * N
            );
            /*
             * if fewer elements are free on the right side of the array,
             * then next elements are loaded from the right side,
             * otherwise from the left side
             */
            let block = if write_right - read_right < read_left - write_left {
                read_right -= N;
                V::loadu_ptr(ptr.add(read_right))
            } else {
                let block = V::loadu_ptr(ptr.add(read_left));
                read_left += N;
                block
            };
            stat!(vector_loads += 1);
            partition_block::<T, N, V>(ptr, block, pivot_vec, &mut write_left, &mut write_right);
        }

        // Fewer than N unread elements remain. Read the block ending at
        // `read_right`; its leading lanes overlap memory that was already
        // consumed and are discarded, only the trailing `tail` lanes are placed.
        let tail = read_right - read_left;
        if tail > 0 {
            let spill = V::to_array(V::loadu_ptr(ptr.add(read_right - N)));
            stat!(vector_loads += 1);
            for &value in &spill[N - tail..] {
                if value > pivot {
                    write_right -= 1;
                    *ptr.add(write_right) = value;
                } else {
                    *ptr.add(write_left) = value;
                    write_left += 1;
                }
            }
        }
        debug_assert_eq!(write_right - write_left, 2 * N);

        partition_block::<T, N, V>(ptr, vec_left, pivot_vec, &mut write_left, &mut write_right);
        debug_assert_eq!(write_right - write_left, N);

        // the hole is exactly one block wide now
        let gt_mask = V::gt_mask(vec_right, pivot_vec);
        V::storeu_ptr(V::permute_by_mask(vec_right, gt_mask), ptr.add(write_left));
        stat!(permutations += 1);
        stat!(vector_stores += 1);
        write_left + N - gt_mask.count_ones() as usize
    };

    debug_assert!(boundary <= last);
    data.swap(boundary, last);
    boundary
}
