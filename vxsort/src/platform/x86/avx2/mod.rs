//! AVX2 vector types: 8 lanes for `i32`/`u32`/`f32`, 4 lanes for
//! `i64`/`u64`/`f64`.
//!
//! Every entry point is compiled with `avx2` enabled. The driver, the
//! partitioner, the networks and the lane operations are all
//! `#[inline(always)]`, so each entry point is one AVX2 function with the
//! intrinsics inlined. Callers must check
//! [`has_avx2`](crate::platform::has_avx2) first.

use paste::paste;

use crate::{bitonic, quicksort};

use self::{
    bit_32::{Avx2I32x8, Avx2U32x8},
    bit_64::{Avx2I64x4, Avx2U64x4},
    f32_impl::Avx2F32x8,
    f64_impl::Avx2F64x4,
};

pub mod bit_32;
pub mod bit_64;
pub mod f32_impl;
pub mod f64_impl;

// will be removed once [#27731](https://doc.rust-lang.org/core/arch/x86/fn._MM_SHUFFLE.html)
// is stabalised
#[allow(non_snake_case)]
pub(crate) const fn _MM_SHUFFLE(z: u32, y: u32, x: u32, w: u32) -> i32 {
    ((z << 6) | (y << 4) | (x << 2) | w) as i32
}

/// Row `n` enables the first `n` dword lanes.
pub(crate) const LOADU_MASK_32: [[i32; 8]; 9] = [
    [0, 0, 0, 0, 0, 0, 0, 0],
    [-1, 0, 0, 0, 0, 0, 0, 0],
    [-1, -1, 0, 0, 0, 0, 0, 0],
    [-1, -1, -1, 0, 0, 0, 0, 0],
    [-1, -1, -1, -1, 0, 0, 0, 0],
    [-1, -1, -1, -1, -1, 0, 0, 0],
    [-1, -1, -1, -1, -1, -1, 0, 0],
    [-1, -1, -1, -1, -1, -1, -1, 0],
    [-1, -1, -1, -1, -1, -1, -1, -1],
];

/// Row `n` enables the first `n` qword lanes.
pub(crate) const LOADU_MASK_64: [[i64; 4]; 5] = [
    [0, 0, 0, 0],
    [-1, 0, 0, 0],
    [-1, -1, 0, 0],
    [-1, -1, -1, 0],
    [-1, -1, -1, -1],
];

macro_rules! avx2_entry {
    ($ty:ident, $lanes:literal, $vec:ident) => {
        paste! {
            /// Sorts `data` with AVX2 vectors.
            ///
            /// # Safety
            /// The CPU must support AVX2.
            #[target_feature(enable = "avx2")]
            pub unsafe fn [<avx2_sort_ $ty>](data: &mut [$ty]) {
                quicksort::sort::<$ty, $lanes, $vec>(data)
            }

            /// # Safety
            /// The CPU must support AVX2.
            #[target_feature(enable = "avx2")]
            pub(crate) unsafe fn [<avx2_small_sort_ $ty>](data: &mut [$ty]) {
                bitonic::sort_blocks::<$ty, $lanes, $vec>(data)
            }
        }
    };
}

avx2_entry!(i32, 8, Avx2I32x8);
avx2_entry!(u32, 8, Avx2U32x8);
avx2_entry!(f32, 8, Avx2F32x8);
avx2_entry!(i64, 4, Avx2I64x4);
avx2_entry!(u64, 4, Avx2U64x4);
avx2_entry!(f64, 4, Avx2F64x4);

#[cfg(test)]
mod test {
    use super::*;
    use crate::{platform::has_avx2, test::test_sort_e2e};

    #[test]
    fn test_mm_shuffle() {
        assert_eq!(_MM_SHUFFLE(2, 3, 0, 1), 0xB1);
        assert_eq!(_MM_SHUFFLE(0, 1, 2, 3), 0x1B);
        assert_eq!(_MM_SHUFFLE(1, 0, 3, 2), 0x4E);
    }

    macro_rules! test_matches_portable {
        ($ty:ident) => {
            paste! {
                #[test]
                fn [<test_matches_portable_ $ty>]() {
                    use rand::Rng;
                    if !has_avx2() {
                        return;
                    }
                    let mut rng = crate::test::seeded_rng(7);
                    let data: Vec<$ty> = (0..300_000).map(|_| rng.gen::<$ty>()).collect();
                    let mut avx2 = data.clone();
                    let mut portable = data;
                    unsafe { [<avx2_sort_ $ty>](&mut avx2) };
                    crate::platform::portable::[<portable_sort_ $ty>](&mut portable);
                    assert!(avx2.windows(2).all(|w| w[0] <= w[1]));
                    assert_eq!(avx2, portable);
                }
            }
        };
    }

    test_matches_portable!(i32);
    test_matches_portable!(u64);
    test_matches_portable!(f64);

    test_sort_e2e!(i32, avx2_sort_i32, has_avx2());
    test_sort_e2e!(u32, avx2_sort_u32, has_avx2());
    test_sort_e2e!(f32, avx2_sort_f32, has_avx2());
    test_sort_e2e!(i64, avx2_sort_i64, has_avx2());
    test_sort_e2e!(u64, avx2_sort_u64, has_avx2());
    test_sort_e2e!(f64, avx2_sort_f64, has_avx2());
}
