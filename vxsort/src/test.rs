//! Test macros shared by every backend.

use rand::{rngs::StdRng, SeedableRng};

use crate::SimdSortable;

pub(crate) fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

pub(crate) fn reference_sort<T: SimdSortable>(data: &[T]) -> Vec<T> {
    let mut expected = data.to_vec();
    expected.sort_by(|a, b| a.partial_cmp(b).unwrap());
    expected
}

/// Lane-level checks of a `SimdCompare` implementation.
macro_rules! test_vector_ops {
    ($ty:ident, $n:literal, $vec:ty) => {
        paste::paste! {
            #[test]
            fn [<test_min_max_ $ty>]() {
                type V = $vec;
                if !<V as crate::SimdCompare<$ty, $n>>::is_supported() {
                    return;
                }
                let a: [$ty; $n] = std::array::from_fn(|i| (i * 3 % 5) as $ty);
                let b: [$ty; $n] = std::array::from_fn(|i| (i * 2 % 3) as $ty);
                let va = <V as crate::SimdCompare<$ty, $n>>::loadu(&a);
                let vb = <V as crate::SimdCompare<$ty, $n>>::loadu(&b);
                let min = <V as crate::SimdCompare<$ty, $n>>::to_array(<V as crate::SimdCompare<$ty, $n>>::min(va, vb));
                let max = <V as crate::SimdCompare<$ty, $n>>::to_array(<V as crate::SimdCompare<$ty, $n>>::max(va, vb));
                for i in 0..$n {
                    assert_eq!(min[i], if a[i] > b[i] { b[i] } else { a[i] });
                    assert_eq!(max[i], if a[i] > b[i] { a[i] } else { b[i] });
                }
            }

            #[test]
            fn [<test_extreme_min_max_ $ty>]() {
                type V = $vec;
                if !<V as crate::SimdCompare<$ty, $n>>::is_supported() {
                    return;
                }
                let lo = <V as crate::SimdCompare<$ty, $n>>::set(<$ty as crate::SimdSortable>::MIN_VALUE);
                let hi = <V as crate::SimdCompare<$ty, $n>>::set(<$ty as crate::SimdSortable>::MAX_VALUE);
                let min = <V as crate::SimdCompare<$ty, $n>>::to_array(<V as crate::SimdCompare<$ty, $n>>::min(hi, lo));
                let max = <V as crate::SimdCompare<$ty, $n>>::to_array(<V as crate::SimdCompare<$ty, $n>>::max(lo, hi));
                assert_eq!(min, [<$ty as crate::SimdSortable>::MIN_VALUE; $n]);
                assert_eq!(max, [<$ty as crate::SimdSortable>::MAX_VALUE; $n]);
                let mask = <V as crate::SimdCompare<$ty, $n>>::gt_mask(hi, lo);
                assert_eq!(mask, (1u32 << $n) - 1);
                assert_eq!(<V as crate::SimdCompare<$ty, $n>>::gt_mask(lo, hi), 0);
            }

            #[test]
            fn [<test_loadu_storeu_ $ty>]() {
                type V = $vec;
                if !<V as crate::SimdCompare<$ty, $n>>::is_supported() {
                    return;
                }
                let data: Vec<$ty> = (0..2 * $n).map(|i| i as $ty).collect();
                let v = <V as crate::SimdCompare<$ty, $n>>::loadu(&data[1..]);
                let mut out = vec![0 as $ty; $n + 2];
                <V as crate::SimdCompare<$ty, $n>>::storeu(v, &mut out[1..]);
                assert_eq!(out[0], 0 as $ty);
                assert_eq!(&out[1..$n + 1], &data[1..$n + 1]);
                assert_eq!(out[$n + 1], 0 as $ty);
            }

            #[test]
            fn [<test_mask_loadu_storeu_ $ty>]() {
                type V = $vec;
                if !<V as crate::SimdCompare<$ty, $n>>::is_supported() {
                    return;
                }
                let data: [$ty; $n] = std::array::from_fn(|i| (i + 1) as $ty);
                for len in 0..=$n {
                    let v = <V as crate::SimdCompare<$ty, $n>>::mask_loadu(&data[..len]);
                    let lanes = <V as crate::SimdCompare<$ty, $n>>::to_array(v);
                    assert_eq!(&lanes[..len], &data[..len]);
                    assert!(lanes[len..].iter().all(|&x| x == <$ty as crate::SimdSortable>::MAX_VALUE));

                    let mut out = [0 as $ty; $n];
                    let full = <V as crate::SimdCompare<$ty, $n>>::loadu(&data);
                    <V as crate::SimdCompare<$ty, $n>>::mask_storeu(full, &mut out[..len]);
                    assert_eq!(&out[..len], &data[..len]);
                    assert!(out[len..].iter().all(|&x| x == 0 as $ty));
                }
            }

            #[test]
            fn [<test_gt_mask_permute_ $ty>]() {
                type V = $vec;
                if !<V as crate::SimdCompare<$ty, $n>>::is_supported() {
                    return;
                }
                let lanes: [$ty; $n] = std::array::from_fn(|i| (i + 1) as $ty);
                let v = <V as crate::SimdCompare<$ty, $n>>::loadu(&lanes);
                for mask in 0..(1u32 << $n) {
                    // equal lanes never count as greater
                    let below: [$ty; $n] = std::array::from_fn(|i| {
                        if mask & (1 << i) != 0 { 0 as $ty } else { lanes[i] }
                    });
                    let vb = <V as crate::SimdCompare<$ty, $n>>::loadu(&below);
                    assert_eq!(<V as crate::SimdCompare<$ty, $n>>::gt_mask(v, vb), mask);

                    let permuted = <V as crate::SimdCompare<$ty, $n>>::permute_by_mask(v, mask);
                    let expected = crate::permutation::lane_order($n, mask);
                    let got = <V as crate::SimdCompare<$ty, $n>>::to_array(permuted);
                    for i in 0..$n {
                        assert_eq!(got[i], lanes[expected[i] as usize], "mask {mask:#b}");
                    }
                }
            }

            #[test]
            fn [<test_reverse_set_ $ty>]() {
                type V = $vec;
                if !<V as crate::SimdCompare<$ty, $n>>::is_supported() {
                    return;
                }
                let lanes: [$ty; $n] = std::array::from_fn(|i| i as $ty);
                let v = <V as crate::SimdCompare<$ty, $n>>::loadu(&lanes);
                let mut reversed = lanes;
                reversed.reverse();
                assert_eq!(<V as crate::SimdCompare<$ty, $n>>::to_array(<V as crate::SimdCompare<$ty, $n>>::reverse(v)), reversed);
                let v = <V as crate::SimdCompare<$ty, $n>>::set(7 as $ty);
                assert_eq!(<V as crate::SimdCompare<$ty, $n>>::to_array(v), [7 as $ty; $n]);
            }
        }
    };
}

/// Bitonic networks and the partitioner driven through one vector type.
macro_rules! test_small_sort {
    ($ty:ident, $n:literal, $vec:ty) => {
        paste::paste! {
            #[test]
            fn [<test_sort_blocks_ $ty>]() {
                use rand::Rng;
                type V = $vec;
                if !<V as crate::SimdCompare<$ty, $n>>::is_supported() {
                    return;
                }
                let mut rng = crate::test::seeded_rng(7);
                for len in 1..=16 * $n {
                    let data: Vec<$ty> = (0..len).map(|_| rng.gen::<$ty>()).collect();
                    let expected = crate::test::reference_sort(&data);
                    let mut got = data.clone();
                    crate::bitonic::sort_blocks::<$ty, $n, V>(&mut got);
                    assert_eq!(got, expected, "len {len}");
                }
            }

            #[test]
            fn [<test_sort_vector_ $ty>]() {
                use rand::Rng;
                use crate::BitonicVector;
                type V = $vec;
                if !<V as crate::SimdCompare<$ty, $n>>::is_supported() {
                    return;
                }
                let mut rng = crate::test::seeded_rng(11);
                for _ in 0..200 {
                    let data: [$ty; $n] = std::array::from_fn(|_| rng.gen_range(0u8..6) as $ty);
                    let v = <V as crate::SimdCompare<$ty, $n>>::loadu(&data);
                    let sorted = <V as crate::SimdCompare<$ty, $n>>::to_array(<V as BitonicVector<$ty, $n>>::sort_vector(v));
                    assert_eq!(sorted.to_vec(), crate::test::reference_sort(&data));
                }
            }

            #[test]
            fn [<test_partition_ $ty>]() {
                use rand::Rng;
                type V = $vec;
                if !<V as crate::SimdCompare<$ty, $n>>::is_supported() {
                    return;
                }
                let mut rng = crate::test::seeded_rng(13);
                for len in (2 * $n + 1)..(2 * $n + 200) {
                    let mut data: Vec<$ty> = (0..len).map(|_| rng.gen_range(0u8..32) as $ty).collect();
                    let pivot = data[len - 1];
                    let before = crate::test::reference_sort(&data);
                    let boundary = crate::partition::vectorized_partition::<$ty, $n, V>(&mut data);
                    assert!(boundary < len);
                    assert!(data[boundary] == pivot);
                    assert!(data[..boundary].iter().all(|&x| !(x > pivot)), "len {len}");
                    assert!(data[boundary + 1..].iter().all(|&x| x > pivot), "len {len}");
                    assert_eq!(crate::test::reference_sort(&data), before);
                }
            }
        }
    };
}

/// Whole-sort checks of one entry point. An optional guard skips the tests
/// on CPUs that cannot run the backend.
macro_rules! test_sort_e2e {
    ($ty:ident, $sort_fn:path) => {
        test_sort_e2e!($ty, $sort_fn, true);
    };
    ($ty:ident, $sort_fn:path, $guard:expr) => {
        paste::paste! {
            #[allow(unused_unsafe)]
            fn [<run_ $ty>](data: &mut [$ty]) {
                unsafe { $sort_fn(data) }
            }

            #[test]
            fn [<test_e2e_sizes_ $ty>]() {
                use rand::Rng;
                if !$guard {
                    return;
                }
                let mut rng = crate::test::seeded_rng(42);
                for len in 0..=300 {
                    let data: Vec<$ty> = (0..len).map(|_| rng.gen::<$ty>()).collect();
                    let mut got = data.clone();
                    [<run_ $ty>](&mut got);
                    assert_eq!(got, crate::test::reference_sort(&data), "len {len}");
                }
            }

            #[test]
            fn [<test_e2e_patterns_ $ty>]() {
                use rand::Rng;
                if !$guard {
                    return;
                }
                let mut rng = crate::test::seeded_rng(43);
                let len = 10_000;
                let random: Vec<$ty> = (0..len).map(|_| rng.gen::<$ty>()).collect();
                let duplicates: Vec<$ty> = (0..len).map(|_| rng.gen_range(0u8..4) as $ty).collect();
                let extremes: Vec<$ty> = (0..len)
                    .map(|_| match rng.gen_range(0u8..4) {
                        0 => <$ty as crate::SimdSortable>::MIN_VALUE,
                        1 => <$ty as crate::SimdSortable>::MAX_VALUE,
                        _ => rng.gen::<$ty>(),
                    })
                    .collect();
                let sorted = crate::test::reference_sort(&random);
                let mut reversed = sorted.clone();
                reversed.reverse();
                let equal = vec![3 as $ty; len];

                for data in [random, duplicates, extremes, sorted, reversed, equal] {
                    let mut got = data.clone();
                    [<run_ $ty>](&mut got);
                    let expected = crate::test::reference_sort(&data);
                    assert_eq!(got, expected);
                    [<run_ $ty>](&mut got);
                    assert_eq!(got, expected);
                }
            }

            #[test]
            fn [<test_e2e_scenarios_ $ty>]() {
                if !$guard {
                    return;
                }
                let mut data: Vec<$ty> = [5, 3, 3, 3, 3, 3, 3, 5].iter().map(|&x| x as $ty).collect();
                [<run_ $ty>](&mut data);
                let expected: Vec<$ty> = [3, 3, 3, 3, 3, 3, 5, 5].iter().map(|&x| x as $ty).collect();
                assert_eq!(data, expected);

                let mut data: Vec<$ty> = (0..1000).rev().map(|x| x as $ty).collect();
                [<run_ $ty>](&mut data);
                let expected: Vec<$ty> = (0..1000).map(|x| x as $ty).collect();
                assert_eq!(data, expected);
            }
        }
    };
}

pub(crate) use test_small_sort;
pub(crate) use test_sort_e2e;
pub(crate) use test_vector_ops;
