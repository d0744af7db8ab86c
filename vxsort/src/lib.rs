//! In-place quicksort for primitive numeric slices, vectorized with AVX2.
//!
//! Partitioning consumes whole vector blocks from both ends of a range and
//! reorders each block through a precomputed permutation table; ranges of up
//! to 16 blocks are finished by bitonic sorting networks. When the CPU has no
//! AVX2 support the same algorithms run on a portable lane-array backend.
//!
//! ```
//! let mut data = vec![5, 3, 3, 3, 3, 3, 3, 5];
//! vxsort::sort(&mut data);
//! assert_eq!(data, [3, 3, 3, 3, 3, 3, 5, 5]);
//! ```

pub mod bit_32;
pub mod bit_64;
pub(crate) mod bitonic;
pub mod constants;
pub mod error;
pub(crate) mod partition;
pub mod permutation;
pub mod platform;
pub(crate) mod quicksort;
pub(crate) mod scalar;
pub mod stats;
#[cfg(test)]
pub(crate) mod test;

use std::{any::TypeId, fmt::Debug};

use log::trace;

use crate::constants::SMALL_SORT_THRESHOLD_BLOCKS;
pub use crate::error::{Result, VxSortError};

/// One hardware vector of `NUM_LANES` elements of type `T`.
///
/// Backends implement the primitive lane operations; the partitioner, the
/// bitonic networks and the driver are written once against this trait.
pub trait SimdCompare<T: SimdSortable, const NUM_LANES: usize>: Copy + Debug {
    /// Lane-wise `if a > b { b } else { a }`.
    fn min(a: Self, b: Self) -> Self;
    /// Lane-wise `if a > b { a } else { b }`.
    fn max(a: Self, b: Self) -> Self;
    #[inline(always)]
    fn mask_mov(a: Self, b: Self, mask: fn(Self, Self) -> Self) -> Self {
        mask(a, b)
    }

    fn set(value: T) -> Self;

    /// Reads `NUM_LANES` elements starting at `ptr`.
    ///
    /// # Safety
    /// `ptr..ptr + NUM_LANES` must be readable.
    unsafe fn loadu_ptr(ptr: *const T) -> Self;

    /// Writes all lanes starting at `ptr`.
    ///
    /// # Safety
    /// `ptr..ptr + NUM_LANES` must be writable.
    unsafe fn storeu_ptr(input: Self, ptr: *mut T);

    #[inline(always)]
    fn loadu(data: &[T]) -> Self {
        assert!(data.len() >= NUM_LANES);
        unsafe { Self::loadu_ptr(data.as_ptr()) }
    }

    #[inline(always)]
    fn storeu(input: Self, data: &mut [T]) {
        assert!(data.len() >= NUM_LANES);
        unsafe { Self::storeu_ptr(input, data.as_mut_ptr()) }
    }

    /// Loads `data.len() <= NUM_LANES` elements; missing lanes hold `T::MAX_VALUE`.
    fn mask_loadu(data: &[T]) -> Self;

    /// Stores the first `data.len() <= NUM_LANES` lanes.
    fn mask_storeu(input: Self, data: &mut [T]);

    /// Bit `i` is set when lane `i` of `a` is greater than lane `i` of `b`.
    fn gt_mask(a: Self, b: Self) -> u32;

    /// Reorders lanes so the clear-bit lanes of `mask` come first, in order,
    /// followed by the set-bit lanes, in order.
    fn permute_by_mask(a: Self, mask: u32) -> Self;

    /// Lane order reversed.
    fn reverse(a: Self) -> Self;

    fn to_array(a: Self) -> [T; NUM_LANES];

    /// Whether the running CPU can execute this vector type.
    #[inline(always)]
    fn is_supported() -> bool {
        true
    }
}

/// In-register bitonic steps available on every vector type the networks use.
pub trait BitonicVector<T: SimdSortable, const NUM_LANES: usize>:
    SimdCompare<T, NUM_LANES>
{
    /// Sorts the lanes of one vector.
    fn sort_vector(a: Self) -> Self;
    /// Sorts the lanes of one vector holding a bitonic sequence.
    fn merge_vector(a: Self) -> Self;
}

mod private {
    pub trait Sealed {}
}

/// Element types the sort supports.
///
/// Implemented for `i32`, `u32`, `f32` (8 lanes per block) and `i64`, `u64`,
/// `f64` (4 lanes per block). The trait is sealed.
pub trait SimdSortable: PartialOrd + Copy + Debug + private::Sealed + 'static {
    const MAX_VALUE: Self;
    const MIN_VALUE: Self;
    /// Elements per 256-bit vector block.
    const LANES: usize;

    #[doc(hidden)]
    fn sort_slice(data: &mut [Self]);
    #[doc(hidden)]
    fn small_sort_slice(data: &mut [Self]);
}

macro_rules! impl_sortable {
    ($ty:ident, $lanes:literal, $max:expr, $min:expr, $sort_fn:ident, $small_sort_fn:ident) => {
        impl private::Sealed for $ty {}

        impl SimdSortable for $ty {
            const MAX_VALUE: Self = $max;
            const MIN_VALUE: Self = $min;
            const LANES: usize = $lanes;

            #[inline]
            fn sort_slice(data: &mut [Self]) {
                platform::$sort_fn(data)
            }

            #[inline]
            fn small_sort_slice(data: &mut [Self]) {
                platform::$small_sort_fn(data)
            }
        }
    };
}

impl_sortable!(i32, 8, i32::MAX, i32::MIN, sort_i32, small_sort_i32);
impl_sortable!(u32, 8, u32::MAX, u32::MIN, sort_u32, small_sort_u32);
impl_sortable!(f32, 8, f32::INFINITY, f32::NEG_INFINITY, sort_f32, small_sort_f32);
impl_sortable!(i64, 4, i64::MAX, i64::MIN, sort_i64, small_sort_i64);
impl_sortable!(u64, 4, u64::MAX, u64::MIN, sort_u64, small_sort_u64);
impl_sortable!(f64, 4, f64::INFINITY, f64::NEG_INFINITY, sort_f64, small_sort_f64);

///
/// COEX == Compare and Exchange two registers by swapping min and max values
///
#[inline(always)]
pub(crate) fn coex<T: SimdSortable, const N: usize, U: SimdCompare<T, N>>(a: &mut U, b: &mut U) {
    let temp = *a;
    *a = U::min(*a, *b);
    *b = U::max(temp, *b);
}

/// Compare-exchange of `in1` with its shuffled copy `in2`; lanes selected by
/// `mask` keep the maximum. `min` and `max` see the lane pair in the same
/// order on both sides, so equal lanes are never duplicated.
#[inline(always)]
pub(crate) fn cmp_merge<T: SimdSortable, const N: usize, U: SimdCompare<T, N>>(
    in1: U,
    in2: U,
    mask: fn(U, U) -> U,
) -> U {
    let min_values = U::min(in1, in2);
    let max_values = U::max(in2, in1);
    U::mask_mov(min_values, max_values, mask) // 0 -> min, 1 -> max
}

/// Sorts `data` in ascending order.
///
/// Not stable. Floats are ordered numerically; `-0.0` and `0.0` compare equal
/// and NaN values leave the resulting order unspecified.
#[inline]
pub fn sort<T: SimdSortable>(data: &mut [T]) {
    T::sort_slice(data)
}

/// Sorts the inclusive range `data[left..=right]`.
pub fn sort_range<T: SimdSortable>(data: &mut [T], left: usize, right: usize) -> Result<()> {
    if left > right {
        return Err(VxSortError::InvalidArgument(format!(
            "left index {left} is greater than right index {right}"
        )));
    }
    if right >= data.len() {
        return Err(VxSortError::InvalidArgument(format!(
            "right index {right} is out of bounds for length {}",
            data.len()
        )));
    }
    sort(&mut data[left..=right]);
    Ok(())
}

/// Sorts the inclusive range `[left, right]` of the buffer starting at `ptr`.
///
/// # Safety
/// `ptr.add(left)..=ptr.add(right)` must be valid for reads and writes and not
/// aliased for the duration of the call.
pub unsafe fn sort_ptr<T: SimdSortable>(ptr: *mut T, left: usize, right: usize) -> Result<()> {
    if ptr.is_null() {
        return Err(VxSortError::InvalidArgument("null pointer".to_string()));
    }
    if left > right {
        return Err(VxSortError::InvalidArgument(format!(
            "left index {left} is greater than right index {right}"
        )));
    }
    let data = std::slice::from_raw_parts_mut(ptr.add(left), right - left + 1);
    sort(data);
    Ok(())
}

/// Sorts `data` when `T` is one of the supported element types.
///
/// Other types are rejected with [`VxSortError::UnsupportedType`] before the
/// slice is touched.
pub fn try_sort<T: Copy + 'static>(data: &mut [T]) -> Result<()> {
    macro_rules! sort_as {
        ($($ty:ty),*) => {
            $(
                if TypeId::of::<T>() == TypeId::of::<$ty>() {
                    // SAFETY: `T` and `$ty` are the same type.
                    let data = unsafe { &mut *(data as *mut [T] as *mut [$ty]) };
                    sort(data);
                    return Ok(());
                }
            )*
        };
    }
    sort_as!(i32, u32, f32, i64, u64, f64);

    trace!("TRY_SORT REJECTED: type={}", std::any::type_name::<T>());
    Err(VxSortError::UnsupportedType(std::any::type_name::<T>()))
}

/// Sorts `data` with a single bitonic network.
///
/// `data.len()` must be a non-zero multiple of `T::LANES` and at most 16
/// blocks long.
pub fn small_sort<T: SimdSortable>(data: &mut [T]) -> Result<()> {
    let len = data.len();
    if len == 0 || len % T::LANES != 0 || len / T::LANES > SMALL_SORT_THRESHOLD_BLOCKS {
        return Err(VxSortError::InvalidArgument(format!(
            "small sort needs 1 to {} blocks of {} elements, got {} elements",
            SMALL_SORT_THRESHOLD_BLOCKS,
            T::LANES,
            len
        )));
    }
    T::small_sort_slice(data);
    Ok(())
}

/// Method-call form of [`sort`].
pub trait VxSort {
    fn vxsort(&mut self);
}

impl<T: SimdSortable> VxSort for [T] {
    #[inline]
    fn vxsort(&mut self) {
        sort(self)
    }
}
