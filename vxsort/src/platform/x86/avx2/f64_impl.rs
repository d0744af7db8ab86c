use std::arch::x86_64::{
    __m256d, __m256i, _mm256_blend_pd, _mm256_blendv_pd, _mm256_castpd_si256,
    _mm256_castsi256_pd, _mm256_cmp_pd, _mm256_load_si256, _mm256_loadu_pd, _mm256_loadu_si256,
    _mm256_maskload_pd, _mm256_maskstore_pd, _mm256_movemask_pd, _mm256_permute2f128_pd,
    _mm256_permute4x64_pd, _mm256_permute_pd, _mm256_permutevar8x32_epi32, _mm256_set1_pd,
    _mm256_storeu_pd, _CMP_GT_OQ,
};

use super::{LOADU_MASK_64, _MM_SHUFFLE};
use crate::{bit_64::Bit64Simd, permutation::PERM_4X64, platform::has_avx2, SimdCompare};

/// [3, 2, 1, 0]
const REVERSE_64BIT: i32 = _MM_SHUFFLE(0, 1, 2, 3);

#[derive(Debug, Copy, Clone)]
pub struct Avx2F64x4 {
    value: __m256d,
}

#[inline(always)]
fn load_mask(len: usize) -> __m256i {
    unsafe { _mm256_loadu_si256(LOADU_MASK_64[len].as_ptr() as *const __m256i) }
}

impl SimdCompare<f64, 4> for Avx2F64x4 {
    #[inline(always)]
    fn min(a: Self, b: Self) -> Self {
        unsafe {
            let gt = _mm256_cmp_pd(a.value, b.value, _CMP_GT_OQ);
            Self { value: _mm256_blendv_pd(a.value, b.value, gt) }
        }
    }

    #[inline(always)]
    fn max(a: Self, b: Self) -> Self {
        unsafe {
            let gt = _mm256_cmp_pd(a.value, b.value, _CMP_GT_OQ);
            Self { value: _mm256_blendv_pd(b.value, a.value, gt) }
        }
    }

    #[inline(always)]
    fn set(value: f64) -> Self {
        unsafe { Self { value: _mm256_set1_pd(value) } }
    }

    #[inline(always)]
    unsafe fn loadu_ptr(ptr: *const f64) -> Self {
        Self { value: _mm256_loadu_pd(ptr) }
    }

    #[inline(always)]
    unsafe fn storeu_ptr(input: Self, ptr: *mut f64) {
        _mm256_storeu_pd(ptr, input.value)
    }

    #[inline(always)]
    fn mask_loadu(data: &[f64]) -> Self {
        assert!(data.len() <= 4);
        unsafe {
            let mask = load_mask(data.len());
            let loaded = _mm256_maskload_pd(data.as_ptr(), mask);
            let padding = _mm256_set1_pd(f64::INFINITY);
            Self { value: _mm256_blendv_pd(padding, loaded, _mm256_castsi256_pd(mask)) }
        }
    }

    #[inline(always)]
    fn mask_storeu(input: Self, data: &mut [f64]) {
        assert!(data.len() <= 4);
        unsafe { _mm256_maskstore_pd(data.as_mut_ptr(), load_mask(data.len()), input.value) }
    }

    #[inline(always)]
    fn gt_mask(a: Self, b: Self) -> u32 {
        unsafe { _mm256_movemask_pd(_mm256_cmp_pd(a.value, b.value, _CMP_GT_OQ)) as u32 }
    }

    #[inline(always)]
    fn permute_by_mask(a: Self, mask: u32) -> Self {
        unsafe {
            let idx = _mm256_load_si256(PERM_4X64.aligned_row(mask).as_ptr() as *const __m256i);
            let permuted = _mm256_permutevar8x32_epi32(_mm256_castpd_si256(a.value), idx);
            Self { value: _mm256_castsi256_pd(permuted) }
        }
    }

    #[inline(always)]
    fn reverse(a: Self) -> Self {
        unsafe { Self { value: _mm256_permute4x64_pd(a.value, REVERSE_64BIT) } }
    }

    #[inline(always)]
    fn to_array(a: Self) -> [f64; 4] {
        let mut out = [0f64; 4];
        unsafe { _mm256_storeu_pd(out.as_mut_ptr(), a.value) };
        out
    }

    #[inline(always)]
    fn is_supported() -> bool {
        has_avx2()
    }
}

impl Bit64Simd<f64> for Avx2F64x4 {
    #[inline(always)]
    fn swizzle2_0xa(a: Self, b: Self) -> Self {
        unsafe { Self { value: _mm256_blend_pd(a.value, b.value, 0b1010) } }
    }

    #[inline(always)]
    fn swizzle2_0xc(a: Self, b: Self) -> Self {
        unsafe { Self { value: _mm256_blend_pd(a.value, b.value, 0b1100) } }
    }

    #[inline(always)]
    fn shuffle1_1(a: Self) -> Self {
        unsafe { Self { value: _mm256_permute_pd(a.value, 0b0101) } }
    }

    #[inline(always)]
    fn network64bit3(a: Self) -> Self {
        unsafe { Self { value: _mm256_permute2f128_pd(a.value, a.value, 0x01) } }
    }
}
