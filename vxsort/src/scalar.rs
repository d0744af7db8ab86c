//! Scalar building blocks: tiny sorts, insertion sort, heapsort, and the
//! Hoare-partition quicksort that takes over from degenerate pivots.

use crate::constants::{depth_limit, INSERTION_SORT_THRESHOLD};

#[inline(always)]
fn swap_if_greater<T: PartialOrd>(data: &mut [T], a: usize, b: usize) {
    if data[a] > data[b] {
        data.swap(a, b);
    }
}

/// Sorts `data[a]`, `data[b]`, `data[c]` in place.
#[inline(always)]
pub(crate) fn sort3<T: PartialOrd>(data: &mut [T], a: usize, b: usize, c: usize) {
    swap_if_greater(data, a, b);
    swap_if_greater(data, b, c);
    swap_if_greater(data, a, b);
}

/// Sorts ranges of at most three elements.
#[inline(always)]
pub(crate) fn sort_tiny<T: PartialOrd>(data: &mut [T]) {
    match data.len() {
        0 | 1 => {}
        2 => swap_if_greater(data, 0, 1),
        3 => sort3(data, 0, 1, 2),
        len => panic!("tiny sort called on {len} elements"),
    }
}

pub(crate) fn insertion_sort<T: PartialOrd + Copy>(data: &mut [T]) {
    for i in 1..data.len() {
        let value = data[i];
        let mut j = i;
        while j > 0 && data[j - 1] > value {
            data[j] = data[j - 1];
            j -= 1;
        }
        data[j] = value;
    }
}

fn sift_down<T: PartialOrd>(data: &mut [T], mut root: usize, end: usize) {
    loop {
        let mut child = 2 * root + 1;
        if child >= end {
            return;
        }
        if child + 1 < end && data[child] < data[child + 1] {
            child += 1;
        }
        if !(data[root] < data[child]) {
            return;
        }
        data.swap(root, child);
        root = child;
    }
}

pub(crate) fn heapsort<T: PartialOrd>(data: &mut [T]) {
    let len = data.len();
    for root in (0..len / 2).rev() {
        sift_down(data, root, len);
    }
    for end in (1..len).rev() {
        data.swap(0, end);
        sift_down(data, 0, end);
    }
}

/// Hoare partition around the median of the first, middle and last elements.
///
/// Returns `split` with `data[..split] <= pivot <= data[split..]`; both sides
/// are non-empty. Scans stop on keys equal to the pivot, so runs of equal keys
/// split evenly.
fn hoare_partition<T: PartialOrd + Copy>(data: &mut [T]) -> usize {
    let last = data.len() - 1;
    let mid = last / 2;
    sort3(data, 0, mid, last);
    let pivot = data[mid];

    let mut i = 0;
    let mut j = last;
    loop {
        while data[i] < pivot {
            i += 1;
        }
        while data[j] > pivot {
            j -= 1;
        }
        if i >= j {
            return j + 1;
        }
        data.swap(i, j);
        i += 1;
        j -= 1;
    }
}

fn quicksort_bounded<T: PartialOrd + Copy>(mut data: &mut [T], mut limit: u32) {
    loop {
        if data.len() < INSERTION_SORT_THRESHOLD {
            insertion_sort(data);
            return;
        }
        if limit == 0 {
            heapsort(data);
            return;
        }
        limit -= 1;

        let split = hoare_partition(data);
        let (left, right) = std::mem::take(&mut data).split_at_mut(split);
        // recurse into the smaller side, loop on the larger
        if left.len() < right.len() {
            quicksort_bounded(left, limit);
            data = right;
        } else {
            quicksort_bounded(right, limit);
            data = left;
        }
    }
}

/// Depth-limited scalar quicksort with insertion sort for short ranges.
pub(crate) fn quicksort<T: PartialOrd + Copy>(data: &mut [T]) {
    quicksort_bounded(data, depth_limit(data.len()));
}
