use std::arch::x86_64::{
    __m256i, _mm256_blend_epi32, _mm256_blendv_pd, _mm256_castpd_si256, _mm256_castsi256_pd,
    _mm256_cmpgt_epi64, _mm256_load_si256, _mm256_loadu_si256, _mm256_maskload_epi64,
    _mm256_maskstore_epi64, _mm256_movemask_pd, _mm256_permute4x64_epi64,
    _mm256_permutevar8x32_epi32, _mm256_set1_epi64x, _mm256_storeu_si256, _mm256_xor_si256,
};

use super::{LOADU_MASK_64, _MM_SHUFFLE};
use crate::{bit_64::Bit64Simd, permutation::PERM_4X64, platform::has_avx2, SimdCompare};

/// [1, 0, 3, 2]
const SHUFFLE1_1: i32 = _MM_SHUFFLE(2, 3, 0, 1);
/// [2, 3, 0, 1]
const NETWORK_64BIT_3: i32 = _MM_SHUFFLE(1, 0, 3, 2);
/// [3, 2, 1, 0]
const REVERSE_64BIT: i32 = _MM_SHUFFLE(0, 1, 2, 3);

#[inline(always)]
fn blend_256i(a: __m256i, b: __m256i, mask: __m256i) -> __m256i {
    unsafe {
        _mm256_castpd_si256(_mm256_blendv_pd(
            _mm256_castsi256_pd(a),
            _mm256_castsi256_pd(b),
            _mm256_castsi256_pd(mask),
        ))
    }
}

#[inline(always)]
fn gt_epi64(a: __m256i, b: __m256i) -> __m256i {
    unsafe { _mm256_cmpgt_epi64(a, b) }
}

#[inline(always)]
fn gt_epu64(a: __m256i, b: __m256i) -> __m256i {
    // a >u b  <=>  (a ^ 1 << 63) >s (b ^ 1 << 63)
    unsafe {
        let sign = _mm256_set1_epi64x(i64::MIN);
        _mm256_cmpgt_epi64(_mm256_xor_si256(a, sign), _mm256_xor_si256(b, sign))
    }
}

#[derive(Debug, Copy, Clone)]
pub struct Avx2I64x4 {
    value: __m256i,
}

/// Unsigned lanes; comparisons flip the sign bit and compare signed.
#[derive(Debug, Copy, Clone)]
pub struct Avx2U64x4 {
    value: __m256i,
}

// AVX2 has no 64-bit min/max, so both are compare + blend.
macro_rules! impl_avx2_64bit {
    ($vec:ident, $ty:ident, $gt:path) => {
        impl SimdCompare<$ty, 4> for $vec {
            #[inline(always)]
            fn min(a: Self, b: Self) -> Self {
                let mask = $gt(a.value, b.value);
                Self { value: blend_256i(a.value, b.value, mask) }
            }

            #[inline(always)]
            fn max(a: Self, b: Self) -> Self {
                let mask = $gt(a.value, b.value);
                Self { value: blend_256i(b.value, a.value, mask) }
            }

            #[inline(always)]
            fn set(value: $ty) -> Self {
                unsafe { Self { value: _mm256_set1_epi64x(value as i64) } }
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
                assert!(data.len() <= 4);
                unsafe {
                    let mask = _mm256_loadu_si256(LOADU_MASK_64[data.len()].as_ptr() as *const __m256i);
                    let loaded = _mm256_maskload_epi64(data.as_ptr() as *const i64, mask);
                    let padding = _mm256_set1_epi64x($ty::MAX as i64);
                    Self { value: blend_256i(padding, loaded, mask) }
                }
            }

            #[inline(always)]
            fn mask_storeu(input: Self, data: &mut [$ty]) {
                assert!(data.len() <= 4);
                unsafe {
                    let mask = _mm256_loadu_si256(LOADU_MASK_64[data.len()].as_ptr() as *const __m256i);
                    _mm256_maskstore_epi64(data.as_mut_ptr() as *mut i64, mask, input.value);
                }
            }

            #[inline(always)]
            fn gt_mask(a: Self, b: Self) -> u32 {
                unsafe { _mm256_movemask_pd(_mm256_castsi256_pd($gt(a.value, b.value))) as u32 }
            }

            #[inline(always)]
            fn permute_by_mask(a: Self, mask: u32) -> Self {
                // rows hold dword pairs, so a 32-bit lane permute moves whole qwords
                unsafe {
                    let idx = _mm256_load_si256(PERM_4X64.aligned_row(mask).as_ptr() as *const __m256i);
                    Self { value: _mm256_permutevar8x32_epi32(a.value, idx) }
                }
            }

            #[inline(always)]
            fn reverse(a: Self) -> Self {
                unsafe { Self { value: _mm256_permute4x64_epi64(a.value, REVERSE_64BIT) } }
            }

            #[inline(always)]
            fn to_array(a: Self) -> [$ty; 4] {
                let mut out = [0 as $ty; 4];
                unsafe { _mm256_storeu_si256(out.as_mut_ptr() as *mut __m256i, a.value) };
                out
            }

            #[inline(always)]
            fn is_supported() -> bool {
                has_avx2()
            }
        }

        impl Bit64Simd<$ty> for $vec {
            #[inline(always)]
            fn swizzle2_0xa(a: Self, b: Self) -> Self {
                unsafe { Self { value: _mm256_blend_epi32(a.value, b.value, 0b11001100) } }
            }

            #[inline(always)]
            fn swizzle2_0xc(a: Self, b: Self) -> Self {
                unsafe { Self { value: _mm256_blend_epi32(a.value, b.value, 0b11110000) } }
            }

            #[inline(always)]
            fn shuffle1_1(a: Self) -> Self {
                unsafe { Self { value: _mm256_permute4x64_epi64(a.value, SHUFFLE1_1) } }
            }

            #[inline(always)]
            fn network64bit3(a: Self) -> Self {
                unsafe { Self { value: _mm256_permute4x64_epi64(a.value, NETWORK_64BIT_3) } }
            }
        }
    };
}

impl_avx2_64bit!(Avx2I64x4, i64, gt_epi64);
impl_avx2_64bit!(Avx2U64x4, u64, gt_epu64);

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        bit_64::test::test_bit64_shuffles,
        test::{test_small_sort, test_vector_ops},
    };

    #[test]
    fn test_unsigned_compare_above_sign_bit() {
        if !has_avx2() {
            return;
        }
        let a = Avx2U64x4::loadu(&[u64::MAX, 1, 1 << 63, 9]);
        let b = Avx2U64x4::loadu(&[1 << 63, 1 << 63, (1 << 63) - 1, 9]);
        assert_eq!(Avx2U64x4::gt_mask(a, b), 0b0101);
        assert_eq!(Avx2U64x4::to_array(Avx2U64x4::min(a, b)), [1 << 63, 1, (1 << 63) - 1, 9]);
        assert_eq!(Avx2U64x4::to_array(Avx2U64x4::max(a, b)), [u64::MAX, 1 << 63, 1 << 63, 9]);
    }

    #[test]
    fn test_signed_blend_min_max() {
        if !has_avx2() {
            return;
        }
        let a = Avx2I64x4::loadu(&[i64::MIN, -1, 7, i64::MAX]);
        let b = Avx2I64x4::loadu(&[0, -2, 7, i64::MIN]);
        assert_eq!(Avx2I64x4::to_array(Avx2I64x4::min(a, b)), [i64::MIN, -2, 7, i64::MIN]);
        assert_eq!(Avx2I64x4::to_array(Avx2I64x4::max(a, b)), [0, -1, 7, i64::MAX]);
    }

    test_vector_ops!(i64, 4, Avx2I64x4);
    test_vector_ops!(u64, 4, Avx2U64x4);
    test_bit64_shuffles!(i64, Avx2I64x4);
    test_bit64_shuffles!(u64, Avx2U64x4);
    test_small_sort!(i64, 4, Avx2I64x4);
    test_small_sort!(u64, 4, Avx2U64x4);
}
