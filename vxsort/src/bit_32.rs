use crate::{cmp_merge, BitonicVector, SimdCompare, SimdSortable};

/// Lane shuffles and blends of an 8 x 32-bit vector used by the bitonic core.
pub trait Bit32Simd<T: SimdSortable>: SimdCompare<T, 8> {
    /// Odd lanes from `b`, even lanes from `a`.
    fn swizzle2_0xaa(a: Self, b: Self) -> Self;
    /// Lanes 2, 3, 6, 7 from `b`.
    fn swizzle2_0xcc(a: Self, b: Self) -> Self;
    /// Upper four lanes from `b`.
    fn swizzle2_0xf0(a: Self, b: Self) -> Self;

    /// [1, 0, 3, 2, 5, 4, 7, 6]
    fn shuffle1_1_1_1(a: Self) -> Self;

    /// [3, 2, 1, 0, 7, 6, 5, 4]
    fn network32bit1(a: Self) -> Self;
    /// [2, 3, 0, 1, 6, 7, 4, 5]
    fn network32bit3(a: Self) -> Self;
    /// [4, 5, 6, 7, 0, 1, 2, 3]
    fn network32bit4(a: Self) -> Self;
}

/*
 * Assumes ymm is random and performs a full sorting network defined in
 * https://en.wikipedia.org/wiki/Bitonic_sorter#/media/File:BitonicSort.svg
 */
#[inline(always)]
pub(crate) fn sort_ymm_32bit<T, V>(mut ymm: V) -> V
where
    T: SimdSortable,
    V: Bit32Simd<T>,
{
    ymm = cmp_merge(ymm, V::shuffle1_1_1_1(ymm), V::swizzle2_0xaa);
    ymm = cmp_merge(ymm, V::network32bit1(ymm), V::swizzle2_0xcc);
    ymm = cmp_merge(ymm, V::shuffle1_1_1_1(ymm), V::swizzle2_0xaa);
    ymm = cmp_merge(ymm, V::reverse(ymm), V::swizzle2_0xf0);
    ymm = cmp_merge(ymm, V::network32bit3(ymm), V::swizzle2_0xcc);
    ymm = cmp_merge(ymm, V::shuffle1_1_1_1(ymm), V::swizzle2_0xaa);
    ymm
}

// Assumes ymm is bitonic and performs a recursive half cleaner
#[inline(always)]
pub(crate) fn bitonic_merge_ymm_32bit<T, V>(mut ymm: V) -> V
where
    T: SimdSortable,
    V: Bit32Simd<T>,
{
    // 1) half_cleaner[8]: compare 0-4, 1-5, 2-6, 3-7
    ymm = cmp_merge(ymm, V::network32bit4(ymm), V::swizzle2_0xf0);
    // 2) half_cleaner[4]
    ymm = cmp_merge(ymm, V::network32bit3(ymm), V::swizzle2_0xcc);
    // 3) half_cleaner[1]
    ymm = cmp_merge(ymm, V::shuffle1_1_1_1(ymm), V::swizzle2_0xaa);
    ymm
}

impl<T: SimdSortable, V: Bit32Simd<T>> BitonicVector<T, 8> for V {
    #[inline(always)]
    fn sort_vector(a: Self) -> Self {
        sort_ymm_32bit::<T, V>(a)
    }

    #[inline(always)]
    fn merge_vector(a: Self) -> Self {
        bitonic_merge_ymm_32bit::<T, V>(a)
    }
}
