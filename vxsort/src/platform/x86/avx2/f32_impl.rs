use std::arch::x86_64::{
    __m256, __m256i, _mm256_blend_ps, _mm256_blendv_ps, _mm256_castsi256_ps, _mm256_cmp_ps,
    _mm256_load_si256, _mm256_loadu_ps, _mm256_loadu_si256, _mm256_maskload_ps,
    _mm256_maskstore_ps, _mm256_movemask_ps, _mm256_permute2f128_ps, _mm256_permute_ps,
    _mm256_permutevar8x32_ps, _mm256_set1_ps, _mm256_setr_epi32, _mm256_storeu_ps, _CMP_GT_OQ,
};

use super::{LOADU_MASK_32, _MM_SHUFFLE};
use crate::{bit_32::Bit32Simd, permutation::PERM_8X32, platform::has_avx2, SimdCompare};

/// [1, 0, 3, 2, 5, 4, 7, 6]
const SHUFFLE1_1_1_1: i32 = _MM_SHUFFLE(2, 3, 0, 1);
/// [3, 2, 1, 0, 7, 6, 5, 4]
const NETWORK_32BIT_1: i32 = _MM_SHUFFLE(0, 1, 2, 3);
/// [2, 3, 0, 1, 6, 7, 4, 5]
const NETWORK_32BIT_3: i32 = _MM_SHUFFLE(1, 0, 3, 2);

/// `f32` lanes. Min and max are compare-and-blend, so they never merge
/// `-0.0` and `0.0` into two copies of one of them.
#[derive(Debug, Copy, Clone)]
pub struct Avx2F32x8 {
    value: __m256,
}

#[inline(always)]
fn load_mask(len: usize) -> __m256i {
    unsafe { _mm256_loadu_si256(LOADU_MASK_32[len].as_ptr() as *const __m256i) }
}

impl SimdCompare<f32, 8> for Avx2F32x8 {
    #[inline(always)]
    fn min(a: Self, b: Self) -> Self {
        unsafe {
            let gt = _mm256_cmp_ps(a.value, b.value, _CMP_GT_OQ);
            Self { value: _mm256_blendv_ps(a.value, b.value, gt) }
        }
    }

    #[inline(always)]
    fn max(a: Self, b: Self) -> Self {
        unsafe {
            let gt = _mm256_cmp_ps(a.value, b.value, _CMP_GT_OQ);
            Self { value: _mm256_blendv_ps(b.value, a.value, gt) }
        }
    }

    #[inline(always)]
    fn set(value: f32) -> Self {
        unsafe { Self { value: _mm256_set1_ps(value) } }
    }

    #[inline(always)]
    unsafe fn loadu_ptr(ptr: *const f32) -> Self {
        Self { value: _mm256_loadu_ps(ptr) }
    }

    #[inline(always)]
    unsafe fn storeu_ptr(input: Self, ptr: *mut f32) {
        _mm256_storeu_ps(ptr, input.value)
    }

    #[inline(always)]
    fn mask_loadu(data: &[f32]) -> Self {
        assert!(data.len() <= 8);
        unsafe {
            let mask = load_mask(data.len());
            let loaded = _mm256_maskload_ps(data.as_ptr(), mask);
            let padding = _mm256_set1_ps(f32::INFINITY);
            Self { value: _mm256_blendv_ps(padding, loaded, _mm256_castsi256_ps(mask)) }
        }
    }

    #[inline(always)]
    fn mask_storeu(input: Self, data: &mut [f32]) {
        assert!(data.len() <= 8);
        unsafe { _mm256_maskstore_ps(data.as_mut_ptr(), load_mask(data.len()), input.value) }
    }

    #[inline(always)]
    fn gt_mask(a: Self, b: Self) -> u32 {
        unsafe { _mm256_movemask_ps(_mm256_cmp_ps(a.value, b.value, _CMP_GT_OQ)) as u32 }
    }

    #[inline(always)]
    fn permute_by_mask(a: Self, mask: u32) -> Self {
        unsafe {
            let idx = _mm256_load_si256(PERM_8X32.aligned_row(mask).as_ptr() as *const __m256i);
            Self { value: _mm256_permutevar8x32_ps(a.value, idx) }
        }
    }

    #[inline(always)]
    fn reverse(a: Self) -> Self {
        unsafe {
            let idx = _mm256_setr_epi32(7, 6, 5, 4, 3, 2, 1, 0);
            Self { value: _mm256_permutevar8x32_ps(a.value, idx) }
        }
    }

    #[inline(always)]
    fn to_array(a: Self) -> [f32; 8] {
        let mut out = [0f32; 8];
        unsafe { _mm256_storeu_ps(out.as_mut_ptr(), a.value) };
        out
    }

    #[inline(always)]
    fn is_supported() -> bool {
        has_avx2()
    }
}

impl Bit32Simd<f32> for Avx2F32x8 {
    #[inline(always)]
    fn swizzle2_0xaa(a: Self, b: Self) -> Self {
        unsafe { Self { value: _mm256_blend_ps(a.value, b.value, 0b10101010) } }
    }

    #[inline(always)]
    fn swizzle2_0xcc(a: Self, b: Self) -> Self {
        unsafe { Self { value: _mm256_blend_ps(a.value, b.value, 0b11001100) } }
    }

    #[inline(always)]
    fn swizzle2_0xf0(a: Self, b: Self) -> Self {
        unsafe { Self { value: _mm256_blend_ps(a.value, b.value, 0b11110000) } }
    }

    #[inline(always)]
    fn shuffle1_1_1_1(a: Self) -> Self {
        unsafe { Self { value: _mm256_permute_ps(a.value, SHUFFLE1_1_1_1) } }
    }

    #[inline(always)]
    fn network32bit1(a: Self) -> Self {
        unsafe { Self { value: _mm256_permute_ps(a.value, NETWORK_32BIT_1) } }
    }

    #[inline(always)]
    fn network32bit3(a: Self) -> Self {
        unsafe { Self { value: _mm256_permute_ps(a.value, NETWORK_32BIT_3) } }
    }

    #[inline(always)]
    fn network32bit4(a: Self) -> Self {
        unsafe { Self { value: _mm256_permute2f128_ps(a.value, a.value, 0x01) } }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        bit_32::test::test_bit32_shuffles,
        test::{test_small_sort, test_vector_ops},
    };

    #[test]
    fn test_signed_zero_min_max() {
        if !has_avx2() {
            return;
        }
        let a = Avx2F32x8::loadu(&[-0.0, 0.0, -0.0, 1.0, -1.0, 0.0, 2.0, -2.0]);
        let b = Avx2F32x8::loadu(&[0.0, -0.0, -0.0, -1.0, 1.0, 0.0, 2.0, 2.0]);
        let min = Avx2F32x8::to_array(Avx2F32x8::min(a, b));
        let max = Avx2F32x8::to_array(Avx2F32x8::max(a, b));
        let a = Avx2F32x8::to_array(a);
        let b = Avx2F32x8::to_array(b);
        for i in 0..8 {
            let mut got = [min[i].to_bits(), max[i].to_bits()];
            let mut want = [a[i].to_bits(), b[i].to_bits()];
            got.sort_unstable();
            want.sort_unstable();
            assert_eq!(got, want, "lane {i}");
        }
    }

    test_vector_ops!(f32, 8, Avx2F32x8);
    test_bit32_shuffles!(f32, Avx2F32x8);
    test_small_sort!(f32, 8, Avx2F32x8);
}
