//! Backend selection.
//!
//! Each public sort checks once per call whether the CPU supports AVX2 and
//! runs the AVX2 vector types if so, otherwise the portable ones.

use log::trace;

use crate::bitonic;

pub mod portable;

#[cfg(target_arch = "x86_64")]
pub(crate) mod x86;

/// Whether sorts on this thread will run the AVX2 backend.
#[inline]
pub fn has_avx2() -> bool {
    #[cfg(all(target_arch = "x86_64", not(feature = "portable-only")))]
    {
        is_x86_feature_detected!("avx2")
    }
    #[cfg(not(all(target_arch = "x86_64", not(feature = "portable-only"))))]
    {
        false
    }
}

fn backend_name() -> &'static str {
    if has_avx2() {
        "avx2"
    } else {
        "portable"
    }
}

macro_rules! dispatch {
    ($ty:ident, $lanes:literal, $portable:ident) => {
        paste::paste! {
            pub fn [<sort_ $ty>](data: &mut [$ty]) {
                trace!(
                    "SORT_{} DISPATCH: len={}, backend={}",
                    stringify!([<$ty:upper>]),
                    data.len(),
                    backend_name()
                );
                #[cfg(target_arch = "x86_64")]
                if has_avx2() {
                    // SAFETY: the CPU supports AVX2.
                    unsafe { x86::avx2::[<avx2_sort_ $ty>](data) };
                    return;
                }
                portable::[<portable_sort_ $ty>](data)
            }

            pub(crate) fn [<small_sort_ $ty>](data: &mut [$ty]) {
                trace!(
                    "SMALL_SORT_{} DISPATCH: len={}, backend={}",
                    stringify!([<$ty:upper>]),
                    data.len(),
                    backend_name()
                );
                #[cfg(target_arch = "x86_64")]
                if has_avx2() {
                    // SAFETY: the CPU supports AVX2.
                    unsafe { x86::avx2::[<avx2_small_sort_ $ty>](data) };
                    return;
                }
                bitonic::sort_blocks::<$ty, $lanes, portable::$portable<$ty>>(data)
            }
        }
    };
}

dispatch!(i32, 8, Portable32x8);
dispatch!(u32, 8, Portable32x8);
dispatch!(f32, 8, Portable32x8);
dispatch!(i64, 4, Portable64x4);
dispatch!(u64, 4, Portable64x4);
dispatch!(f64, 4, Portable64x4);
