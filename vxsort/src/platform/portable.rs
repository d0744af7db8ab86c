//! Lane-array vectors that run the vectorized algorithms on any target.
//!
//! Lanes live in a plain array and every operation is a short fixed-length
//! loop, which the compiler is free to auto-vectorize. Results are identical
//! to the AVX2 backend.

use crate::{
    bit_32::Bit32Simd,
    bit_64::Bit64Simd,
    permutation::lane_order,
    quicksort,
    SimdCompare, SimdSortable,
};

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PortableVector<T, const N: usize>([T; N]);

/// 8 lanes of a 32-bit element type.
pub type Portable32x8<T> = PortableVector<T, 8>;
/// 4 lanes of a 64-bit element type.
pub type Portable64x4<T> = PortableVector<T, 4>;

impl<T: SimdSortable, const N: usize> PortableVector<T, N> {
    #[inline(always)]
    fn select<const MASK: u32>(a: Self, b: Self) -> Self {
        Self(std::array::from_fn(|i| if MASK & (1 << i) != 0 { b.0[i] } else { a.0[i] }))
    }

    #[inline(always)]
    fn shuffle(a: Self, idx: [usize; N]) -> Self {
        Self(idx.map(|i| a.0[i]))
    }
}

impl<T: SimdSortable, const N: usize> SimdCompare<T, N> for PortableVector<T, N> {
    #[inline(always)]
    fn min(a: Self, b: Self) -> Self {
        Self(std::array::from_fn(|i| if a.0[i] > b.0[i] { b.0[i] } else { a.0[i] }))
    }

    #[inline(always)]
    fn max(a: Self, b: Self) -> Self {
        Self(std::array::from_fn(|i| if a.0[i] > b.0[i] { a.0[i] } else { b.0[i] }))
    }

    #[inline(always)]
    fn set(value: T) -> Self {
        Self([value; N])
    }

    #[inline(always)]
    unsafe fn loadu_ptr(ptr: *const T) -> Self {
        Self(std::ptr::read_unaligned(ptr as *const [T; N]))
    }

    #[inline(always)]
    unsafe fn storeu_ptr(input: Self, ptr: *mut T) {
        std::ptr::write_unaligned(ptr as *mut [T; N], input.0)
    }

    #[inline(always)]
    fn mask_loadu(data: &[T]) -> Self {
        let mut lanes = [T::MAX_VALUE; N];
        lanes[..data.len()].copy_from_slice(data);
        Self(lanes)
    }

    #[inline(always)]
    fn mask_storeu(input: Self, data: &mut [T]) {
        let len = data.len();
        data.copy_from_slice(&input.0[..len]);
    }

    #[inline(always)]
    fn gt_mask(a: Self, b: Self) -> u32 {
        let mut mask = 0;
        for i in 0..N {
            mask |= ((a.0[i] > b.0[i]) as u32) << i;
        }
        mask
    }

    #[inline(always)]
    fn permute_by_mask(a: Self, mask: u32) -> Self {
        let order = lane_order(N, mask);
        Self(std::array::from_fn(|i| a.0[order[i] as usize]))
    }

    #[inline(always)]
    fn reverse(a: Self) -> Self {
        let mut lanes = a.0;
        lanes.reverse();
        Self(lanes)
    }

    #[inline(always)]
    fn to_array(a: Self) -> [T; N] {
        a.0
    }
}

impl<T: SimdSortable> Bit32Simd<T> for PortableVector<T, 8> {
    #[inline(always)]
    fn swizzle2_0xaa(a: Self, b: Self) -> Self {
        Self::select::<0xAA>(a, b)
    }

    #[inline(always)]
    fn swizzle2_0xcc(a: Self, b: Self) -> Self {
        Self::select::<0xCC>(a, b)
    }

    #[inline(always)]
    fn swizzle2_0xf0(a: Self, b: Self) -> Self {
        Self::select::<0xF0>(a, b)
    }

    #[inline(always)]
    fn shuffle1_1_1_1(a: Self) -> Self {
        Self::shuffle(a, [1, 0, 3, 2, 5, 4, 7, 6])
    }

    #[inline(always)]
    fn network32bit1(a: Self) -> Self {
        Self::shuffle(a, [3, 2, 1, 0, 7, 6, 5, 4])
    }

    #[inline(always)]
    fn network32bit3(a: Self) -> Self {
        Self::shuffle(a, [2, 3, 0, 1, 6, 7, 4, 5])
    }

    #[inline(always)]
    fn network32bit4(a: Self) -> Self {
        Self::shuffle(a, [4, 5, 6, 7, 0, 1, 2, 3])
    }
}

impl<T: SimdSortable> Bit64Simd<T> for PortableVector<T, 4> {
    #[inline(always)]
    fn swizzle2_0xa(a: Self, b: Self) -> Self {
        Self::select::<0xA>(a, b)
    }

    #[inline(always)]
    fn swizzle2_0xc(a: Self, b: Self) -> Self {
        Self::select::<0xC>(a, b)
    }

    #[inline(always)]
    fn shuffle1_1(a: Self) -> Self {
        Self::shuffle(a, [1, 0, 3, 2])
    }

    #[inline(always)]
    fn network64bit3(a: Self) -> Self {
        Self::shuffle(a, [2, 3, 0, 1])
    }
}

pub fn portable_sort_i32(data: &mut [i32]) {
    quicksort::sort::<i32, 8, Portable32x8<i32>>(data)
}

pub fn portable_sort_u32(data: &mut [u32]) {
    quicksort::sort::<u32, 8, Portable32x8<u32>>(data)
}

pub fn portable_sort_f32(data: &mut [f32]) {
    quicksort::sort::<f32, 8, Portable32x8<f32>>(data)
}

pub fn portable_sort_i64(data: &mut [i64]) {
    quicksort::sort::<i64, 4, Portable64x4<i64>>(data)
}

pub fn portable_sort_u64(data: &mut [u64]) {
    quicksort::sort::<u64, 4, Portable64x4<u64>>(data)
}

pub fn portable_sort_f64(data: &mut [f64]) {
    quicksort::sort::<f64, 4, Portable64x4<f64>>(data)
}
