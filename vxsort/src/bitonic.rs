//! Bitonic sorting networks over 1 to 16 vector registers.
//!
//! Every network sorts each register in place, then repeatedly merges pairs
//! of sorted runs of registers: first a compare-exchange of each lane with its
//! mirror across the two runs, then half cleaners between registers, then the
//! in-register half cleaners of [`BitonicVector::merge_vector`].

use crate::{
    coex, constants::SMALL_SORT_THRESHOLD_BLOCKS, stats::stat, BitonicVector, SimdSortable,
};

// Assumes regs[..k/2] and regs[k/2..] are sorted runs and merges them
#[inline(always)]
fn merge_registers<T, const N: usize, V>(regs: &mut [V])
where
    T: SimdSortable,
    V: BitonicVector<T, N>,
{
    let k = regs.len();
    debug_assert!(k >= 2 && k.is_power_of_two());

    // 1) lane i of register r against lane N-1-i of register k-1-r
    for i in 0..k / 2 {
        let j = k - 1 - i;
        let mirrored = V::reverse(regs[j]);
        let lo = V::min(regs[i], mirrored);
        let hi = V::max(regs[i], mirrored);
        regs[i] = lo;
        regs[j] = V::reverse(hi);
    }

    // 2) both halves are bitonic now; half cleaners across registers
    let mut dist = k / 4;
    while dist > 0 {
        for group in (0..k).step_by(2 * dist) {
            for i in group..group + dist {
                let (lo, hi) = regs.split_at_mut(i + dist);
                coex::<T, N, V>(&mut lo[i], &mut hi[0]);
            }
        }
        dist /= 2;
    }

    // 3) every register holds a bitonic sequence
    for reg in regs.iter_mut() {
        *reg = V::merge_vector(*reg);
    }
}

#[inline(always)]
fn sort_01v<T: SimdSortable, const N: usize, V: BitonicVector<T, N>>(regs: &mut [V]) {
    regs[0] = V::sort_vector(regs[0]);
}

#[inline(always)]
fn sort_02v<T: SimdSortable, const N: usize, V: BitonicVector<T, N>>(regs: &mut [V]) {
    sort_01v::<T, N, V>(&mut regs[..1]);
    sort_01v::<T, N, V>(&mut regs[1..2]);
    merge_registers::<T, N, V>(&mut regs[..2]);
}

#[inline(always)]
fn sort_04v<T: SimdSortable, const N: usize, V: BitonicVector<T, N>>(regs: &mut [V]) {
    sort_02v::<T, N, V>(&mut regs[..2]);
    sort_02v::<T, N, V>(&mut regs[2..4]);
    merge_registers::<T, N, V>(&mut regs[..4]);
}

#[inline(always)]
fn sort_08v<T: SimdSortable, const N: usize, V: BitonicVector<T, N>>(regs: &mut [V]) {
    sort_04v::<T, N, V>(&mut regs[..4]);
    sort_04v::<T, N, V>(&mut regs[4..8]);
    merge_registers::<T, N, V>(&mut regs[..8]);
}

#[inline(always)]
fn sort_16v<T: SimdSortable, const N: usize, V: BitonicVector<T, N>>(regs: &mut [V]) {
    sort_08v::<T, N, V>(&mut regs[..8]);
    sort_08v::<T, N, V>(&mut regs[8..16]);
    merge_registers::<T, N, V>(&mut regs[..16]);
}

/// Sorts up to `16 * N` elements with one network.
///
/// A trailing partial block is loaded padded with `T::MAX_VALUE`, and block
/// counts between powers of two run the next larger network on registers
/// filled with `T::MAX_VALUE`. Only the `data.len()` real lanes are stored.
#[inline(always)]
pub(crate) fn sort_blocks<T, const N: usize, V>(data: &mut [T])
where
    T: SimdSortable,
    V: BitonicVector<T, N>,
{
    let len = data.len();
    if len == 0 {
        return;
    }
    let blocks = len.div_ceil(N);
    assert!(
        blocks <= SMALL_SORT_THRESHOLD_BLOCKS,
        "{len} elements exceed the largest network"
    );
    stat!(small_sorts += 1);
    stat!(vector_loads += blocks);
    stat!(vector_stores += blocks);

    let mut regs = [V::set(T::MAX_VALUE); SMALL_SORT_THRESHOLD_BLOCKS];
    for (reg, chunk) in regs.iter_mut().zip(data.chunks(N)) {
        *reg = if chunk.len() == N {
            V::loadu(chunk)
        } else {
            V::mask_loadu(chunk)
        };
    }

    match blocks.next_power_of_two() {
        1 => sort_01v::<T, N, V>(&mut regs[..1]),
        2 => sort_02v::<T, N, V>(&mut regs[..2]),
        4 => sort_04v::<T, N, V>(&mut regs[..4]),
        8 => sort_08v::<T, N, V>(&mut regs[..8]),
        _ => sort_16v::<T, N, V>(&mut regs),
    }

    for (reg, chunk) in regs.iter().zip(data.chunks_mut(N)) {
        if chunk.len() == N {
            V::storeu(*reg, chunk);
        } else {
            V::mask_storeu(*reg, chunk);
        }
    }
}
