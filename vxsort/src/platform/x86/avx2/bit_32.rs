use std::arch::x86_64::{
    __m256i, _mm256_blend_epi32, _mm256_blendv_epi8, _mm256_castsi256_ps, _mm256_cmpgt_epi32,
    _mm256_load_si256, _mm256_loadu_si256, _mm256_maskload_epi32, _mm256_maskstore_epi32,
    _mm256_max_epi32, _mm256_max_epu32, _mm256_min_epi32, _mm256_min_epu32, _mm256_movemask_ps,
    _mm256_permute2x128_si256, _mm256_permutevar8x32_epi32, _mm256_set1_epi32, _mm256_setr_epi32,
    _mm256_shuffle_epi32, _mm256_storeu_si256, _mm256_xor_si256,
};

use super::{LOADU_MASK_32, _MM_SHUFFLE};
use crate::{bit_32::Bit32Simd, permutation::PERM_8X32, platform::has_avx2, SimdCompare};

/// [1, 0, 3, 2, 5, 4, 7, 6]
const SHUFFLE1_1_1_1: i32 = _MM_SHUFFLE(2, 3, 0, 1);
/// [3, 2, 1, 0, 7, 6, 5, 4]
const NETWORK_32BIT_1: i32 = _MM_SHUFFLE(0, 1, 2, 3);
/// [2, 3, 0, 1, 6, 7, 4, 5]
const NETWORK_32BIT_3: i32 = _MM_SHUFFLE(1, 0, 3, 2);

#[derive(Debug, Copy, Clone)]
pub struct Avx2I32x8 {
    value: __m256i,
}

/// Unsigned lanes; comparisons flip the sign bit and compare signed.
#[derive(Debug, Copy, Clone)]
pub struct Avx2U32x8 {
    value: __m256i,
}

#[inline(always)]
fn gt_epu32(a: __m256i, b: __m256i) -> __m256i {
    // a >u b  <=>  (a ^ 0x8000_0000) >s (b ^ 0x8000_0000)
    unsafe {
        let sign = _mm256_set1_epi32(i32::MIN);
        _mm256_cmpgt_epi32(_mm256_xor_si256(a, sign), _mm256_xor_si256(b, sign))
    }
}

macro_rules! impl_avx2_32bit {
    ($vec:ident, $ty:ident, $min:ident, $max:ident, $gt:path) => {
        impl SimdCompare<$ty, 8> for $vec {
            #[inline(always)]
            fn min(a: Self, b: Self) -> Self {
                unsafe { Self { value: $min(a.value, b.value) } }
            }

            #[inline(always)]
            fn max(a: Self, b: Self) -> Self {
                unsafe { Self { value: $max(a.value, b.value) } }
            }

            #[inline(always)]
            fn set(value: $ty) -> Self {
                unsafe { Self { value: _mm256_set1_epi32(value as i32) } }
            }

            #[inline(always)]
            unsafe fn loadu_ptr(ptr: *const $ty) -> Self {
                Self { value: _mm256_loadu_si256(ptr as *const __m256i) }
            }

            #[inline(always)]
            unsafe fn storeu_ptr(input: Self, ptr: *mut $ty) {
                _mm256_storeu_si256(ptr as *mut __m256i, input.value)
            }

            #[inline(always)]
            fn mask_loadu(data: &[$ty]) -> Self {
                assert!(data.len() <= 8);
                unsafe {
                    let mask = _mm256_loadu_si256(LOADU_MASK_32[data.len()].as_ptr() as *const __m256i);
                    let loaded = _mm256_maskload_epi32(data.as_ptr() as *const i32, mask);
                    let padding = _mm256_set1_epi32($ty::MAX as i32);
                    Self { value: _mm256_blendv_epi8(padding, loaded, mask) }
                }
            }

            #[inline(always)]
            fn mask_storeu(input: Self, data: &mut [$ty]) {
                assert!(data.len() <= 8);
                unsafe {
                    let mask = _mm256_loadu_si256(LOADU_MASK_32[data.len()].as_ptr() as *const __m256i);
                    _mm256_maskstore_epi32(data.as_mut_ptr() as *mut i32, mask, input.value);
                }
            }

            #[inline(always)]
            fn gt_mask(a: Self, b: Self) -> u32 {
                unsafe { _mm256_movemask_ps(_mm256_castsi256_ps($gt(a.value, b.value))) as u32 }
            }

            #[inline(always)]
            fn permute_by_mask(a: Self, mask: u32) -> Self {
                unsafe {
                    let idx = _mm256_load_si256(PERM_8X32.aligned_row(mask).as_ptr() as *const __m256i);
                    Self { value: _mm256_permutevar8x32_epi32(a.value, idx) }
                }
            }

            #[inline(always)]
            fn reverse(a: Self) -> Self {
                unsafe {
                    let idx = _mm256_setr_epi32(7, 6, 5, 4, 3, 2, 1, 0);
                    Self { value: _mm256_permutevar8x32_epi32(a.value, idx) }
                }
            }

            #[inline(always)]
            fn to_array(a: Self) -> [$ty; 8] {
                let mut out = [0 as $ty; 8];
                unsafe { _mm256_storeu_si256(out.as_mut_ptr() as *mut __m256i, a.value) };
                out
            }

            #[inline(always)]
            fn is_supported() -> bool {
                has_avx2()
            }
        }

        impl Bit32Simd<$ty> for $vec {
            #[inline(always)]
            fn swizzle2_0xaa(a: Self, b: Self) -> Self {
                unsafe { Self { value: _mm256_blend_epi32(a.value, b.value, 0b10101010) } }
            }

            #[inline(always)]
            fn swizzle2_0xcc(a: Self, b: Self) -> Self {
                unsafe { Self { value: _mm256_blend_epi32(a.value, b.value, 0b11001100) } }
            }

            #[inline(always)]
            fn swizzle2_0xf0(a: Self, b: Self) -> Self {
                unsafe { Self { value: _mm256_blend_epi32(a.value, b.value, 0b11110000) } }
            }

            #[inline(always)]
            fn shuffle1_1_1_1(a: Self) -> Self {
                unsafe { Self { value: _mm256_shuffle_epi32(a.value, SHUFFLE1_1_1_1) } }
            }

            #[inline(always)]
            fn network32bit1(a: Self) -> Self {
                unsafe { Self { value: _mm256_shuffle_epi32(a.value, NETWORK_32BIT_1) } }
            }

            #[inline(always)]
            fn network32bit3(a: Self) -> Self {
                unsafe { Self { value: _mm256_shuffle_epi32(a.value, NETWORK_32BIT_3) } }
            }

            #[inline(always)]
            fn network32bit4(a: Self) -> Self {
                unsafe { Self { value: _mm256_permute2x128_si256(a.value, a.value, 0x01) } }
            }
        }
    };
}

impl_avx2_32bit!(Avx2I32x8, i32, _mm256_min_epi32, _mm256_max_epi32, _mm256_cmpgt_epi32);
impl_avx2_32bit!(Avx2U32x8, u32, _mm256_min_epu32, _mm256_max_epu32, gt_epu32);
