use crate::{cmp_merge, BitonicVector, SimdCompare, SimdSortable};

/// Lane shuffles and blends of a 4 x 64-bit vector used by the bitonic core.
pub trait Bit64Simd<T: SimdSortable>: SimdCompare<T, 4> {
    /// Lanes 1 and 3 from `b`.
    fn swizzle2_0xa(a: Self, b: Self) -> Self;
    /// Lanes 2 and 3 from `b`.
    fn swizzle2_0xc(a: Self, b: Self) -> Self;

    /// [1, 0, 3, 2]
    fn shuffle1_1(a: Self) -> Self;
    /// [2, 3, 0, 1]
    fn network64bit3(a: Self) -> Self;
}

// Assumes ymm is random; 4-wide bitonic sorting network
#[inline(always)]
pub(crate) fn sort_ymm_64bit<T, V>(mut ymm: V) -> V
where
    T: SimdSortable,
    V: Bit64Simd<T>,
{
    ymm = cmp_merge(ymm, V::shuffle1_1(ymm), V::swizzle2_0xa);
    ymm = cmp_merge(ymm, V::reverse(ymm), V::swizzle2_0xc);
    ymm = cmp_merge(ymm, V::shuffle1_1(ymm), V::swizzle2_0xa);
    ymm
}

// Assumes ymm is bitonic and performs a recursive half cleaner
#[inline(always)]
pub(crate) fn bitonic_merge_ymm_64bit<T, V>(mut ymm: V) -> V
where
    T: SimdSortable,
    V: Bit64Simd<T>,
{
    // 1) half_cleaner[4]: compare 0-2, 1-3
    ymm = cmp_merge(ymm, V::network64bit3(ymm), V::swizzle2_0xc);
    // 2) half_cleaner[2]
    ymm = cmp_merge(ymm, V::shuffle1_1(ymm), V::swizzle2_0xa);
    ymm
}

impl<T: SimdSortable, V: Bit64Simd<T>> BitonicVector<T, 4> for V {
    #[inline(always)]
    fn sort_vector(a: Self) -> Self {
        sort_ymm_64bit::<T, V>(a)
    }

    #[inline(always)]
    fn merge_vector(a: Self) -> Self {
        bitonic_merge_ymm_64bit::<T, V>(a)
    }
}
