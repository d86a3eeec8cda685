// ─────────────────────────────────────────────────────────────────────
// SCPN NUFFT Check — Property-Based Tests (proptest) for nufft-math
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for nufft-math using proptest.
//!
//! Covers: mode labels and layouts, explicit design matrices,
//! spreading vs direct transforms, dense operator adjoints.

use nufft_math::design::{design_matrix_as_is, engine_design_matrix, halved};
use nufft_math::linop::{dot_test, DenseOperator};
use nufft_math::modes::{
    argsort, centered_frequencies, frequencies, invert_permutation, mode_position,
    natural_index, natural_labels, natural_to_engine,
};
use nufft_math::plan::{Plan, TransformType};
use nufft_math::scalar::Scalar;
use nufft_types::config::{Backend, ModeOrder, NufftConfig};
use nufft_types::points::SamplePoints;
use ndarray::Array2;
use num_complex::Complex64;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn mode_order() -> impl Strategy<Value = ModeOrder> {
    prop_oneof![Just(ModeOrder::Centered), Just(ModeOrder::FftStyle)]
}

// ── Mode Labels ──────────────────────────────────────────────────────

proptest! {
    /// Odd P: labels are symmetric and sort to -P/2 ..= P/2.
    #[test]
    fn odd_labels_sort_symmetric(half in 0usize..40) {
        let p = 2 * half + 1;
        let labels = natural_labels(p);
        let sorted: Vec<i64> = argsort(&labels).into_iter().map(|i| labels[i]).collect();
        let expected: Vec<i64> = (-(half as i64)..=half as i64).collect();
        prop_assert_eq!(sorted, expected);
    }

    /// Natural labels and the engine layout carry the same label set.
    #[test]
    fn labels_match_engine_set(p in 1usize..80, order in mode_order()) {
        let mut natural = natural_labels(p);
        let mut engine = frequencies(p, order);
        natural.sort_unstable();
        engine.sort_unstable();
        prop_assert_eq!(&natural, &centered_frequencies(p));
        prop_assert_eq!(natural, engine);
    }

    /// natural_index inverts natural_labels.
    #[test]
    fn natural_index_inverts_labels(p in 1usize..80) {
        for (i, &k) in natural_labels(p).iter().enumerate() {
            prop_assert_eq!(natural_index(k), i);
        }
    }

    /// The engine gather is a permutation and agrees with mode_position.
    #[test]
    fn engine_gather_is_bijection(p in 1usize..80, order in mode_order()) {
        let perm = natural_to_engine(p, order);
        let inverse = invert_permutation(&perm);
        for (pos, &src) in perm.iter().enumerate() {
            prop_assert_eq!(inverse[src], pos);
        }
        for (i, &k) in natural_labels(p).iter().enumerate() {
            prop_assert_eq!(mode_position(k, p, order), Some(inverse[i]));
        }
    }
}

// ── Design Matrices ──────────────────────────────────────────────────

proptest! {
    /// Shape is N×P, column 0 is ones, columns alternate sin/cos of even multiples.
    #[test]
    fn design_columns(xs in prop::collection::vec(-10.0f64..10.0, 1..40), p in 1usize..12) {
        let d = design_matrix_as_is(&xs, p).unwrap();
        prop_assert_eq!(d.dim(), (xs.len(), p));
        for (i, &x) in xs.iter().enumerate() {
            prop_assert_eq!(d[[i, 0]], 1.0);
            for j in 1..p {
                let expected = if j % 2 == 0 {
                    (j as f64 * x).cos()
                } else {
                    ((j + 1) as f64 * x).sin()
                };
                prop_assert!((d[[i, j]] - expected).abs() < 1e-12);
            }
        }
    }

    /// Engine-layout column for frequency k is cos(kx) (k ≥ 0) or sin(|k|x).
    #[test]
    fn engine_design_columns_follow_frequencies(
        xs in prop::collection::vec(0.0f64..6.3, 1..20),
        p in 1usize..12,
        order in mode_order(),
    ) {
        let d = engine_design_matrix(&xs, p, order).unwrap();
        for (c, &k) in frequencies(p, order).iter().enumerate() {
            for (i, &x) in xs.iter().enumerate() {
                let expected = if k >= 0 {
                    (k as f64 * x).cos()
                } else {
                    (-k as f64 * x).sin()
                };
                prop_assert!((d[[i, c]] - expected).abs() < 1e-12);
            }
        }
    }

    /// Halving scales every coordinate by one half.
    #[test]
    fn halved_is_half(xs in prop::collection::vec(-100.0f64..100.0, 0..30)) {
        let h = halved(&xs);
        for (a, b) in xs.iter().zip(&h) {
            prop_assert_eq!(*a * 0.5, *b);
        }
    }
}

// ── Transforms ───────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// Spreading type 2 agrees with the exact sum to the requested tolerance.
    #[test]
    fn spreading_matches_direct(
        xs in prop::collection::vec(-10.0f64..10.0, 1..60),
        p in 1usize..40,
        order in mode_order(),
        seed in any::<u64>(),
    ) {
        let config = NufftConfig { mode_order: order, ..NufftConfig::default() };
        let direct = NufftConfig { backend: Backend::Direct, ..config.clone() };
        let pts = SamplePoints::one_d(xs);
        let mut rng = StdRng::seed_from_u64(seed);
        let c: Vec<Complex64> = (0..p).map(|_| Complex64::sample(&mut rng)).collect();

        let mut fast = Plan::<f64>::new(TransformType::Type2, &[p], &config).unwrap();
        fast.set_points(&pts).unwrap();
        let mut exact = Plan::<f64>::new(TransformType::Type2, &[p], &direct).unwrap();
        exact.set_points(&pts).unwrap();

        let a = fast.execute(&c).unwrap();
        let b = exact.execute(&c).unwrap();
        let num: f64 = a.iter().zip(&b).map(|(u, v)| (u - v).norm_sqr()).sum();
        let den: f64 = b.iter().map(|v| v.norm_sqr()).sum();
        prop_assert!(num.sqrt() <= 1e-5 * den.sqrt() + 1e-12,
            "rel err {}", (num / den).sqrt());
    }

    /// Dense operators pass the dot test.
    #[test]
    fn dense_dot_test(rows in 1usize..10, cols in 1usize..10, seed in any::<u64>()) {
        let m = Array2::from_shape_fn((rows, cols), |(r, c)| {
            Complex64::new((r as f64 + 1.0).sin(), (c as f64 - 2.0).cos())
        });
        let mut rng = StdRng::seed_from_u64(seed);
        prop_assert!(dot_test(&DenseOperator::new(m), &mut rng).unwrap() < 1e-12);
    }
}
