// ─────────────────────────────────────────────────────────────────────
// SCPN NUFFT Check — Property-Based Tests (proptest) for nufft-diagnostics
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for nufft-diagnostics using proptest.
//!
//! Covers: operator shapes and validation, design-matrix agreement,
//! adjoint consistency, real projection.

use nufft_diagnostics::compare::{max_abs_diff, real_projection};
use nufft_diagnostics::operator::{NufftOperator, RealFourierOperator};
use nufft_math::design::{engine_design_matrix, engine_design_matrix_2d};
use nufft_math::linop::{dot_test, LinearOperator};
use nufft_types::config::{ModeOrder, NufftConfig};
use nufft_types::error::NufftError;
use nufft_types::points::{meshgrid_ij, SamplePoints};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn mode_order() -> impl Strategy<Value = ModeOrder> {
    prop_oneof![Just(ModeOrder::Centered), Just(ModeOrder::FftStyle)]
}

fn config(order: ModeOrder) -> NufftConfig {
    NufftConfig {
        mode_order: order,
        ..NufftConfig::default()
    }
}

// ── Validation ───────────────────────────────────────────────────────

proptest! {
    /// Unequal coordinate lengths never produce an operator.
    #[test]
    fn unequal_lengths_rejected(nx in 1usize..30, extra in 1usize..5, p in 1usize..10) {
        let x = vec![0.5; nx];
        let y = vec![0.5; nx + extra];
        let result = NufftOperator::from_coords(vec![x, y], p, &NufftConfig::default());
        prop_assert!(
            matches!(result, Err(NufftError::MismatchedPoints { .. })),
            "expected MismatchedPoints"
        );
    }

    /// Shape is (N, ∏ modes) in 1D and 2D.
    #[test]
    fn operator_shape(n in 1usize..40, px in 1usize..9, py in 1usize..9) {
        let x: Vec<f64> = (0..n).map(|i| i as f64 * 0.1).collect();
        let cfg = NufftConfig::default();
        let op1 = NufftOperator::new(&SamplePoints::one_d(x.clone()), px, &cfg).unwrap();
        prop_assert_eq!(op1.shape(), (n, px));
        let pts = SamplePoints::two_d(x.clone(), x).unwrap();
        let op2 = NufftOperator::new(&pts, (px, py), &cfg).unwrap();
        prop_assert_eq!(op2.shape(), (n, px * py));
    }
}

// ── Design-Matrix Agreement ──────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// Projected complex operator and real operator both reproduce the
    /// reordered design matrix at arbitrary points.
    #[test]
    fn one_d_matches_design(
        xs in prop::collection::vec(0.0f64..6.3, 1..50),
        p in 1usize..16,
        order in mode_order(),
    ) {
        let pts = SamplePoints::one_d(xs.clone());
        let cfg = config(order);
        let exact = engine_design_matrix(&xs, p, order).unwrap();

        let op = NufftOperator::new(&pts, p, &cfg).unwrap();
        let projected = real_projection(&op.to_dense().unwrap(), op.frequencies(0)).unwrap();
        prop_assert!(max_abs_diff(&projected, &exact).unwrap() < 1e-5);

        let real = RealFourierOperator::new(&pts, p, &cfg).unwrap();
        prop_assert!(max_abs_diff(&real.to_dense().unwrap(), &exact).unwrap() < 1e-5);
    }

    /// The real 2D operator reproduces the reordered Kronecker design.
    #[test]
    fn two_d_matches_kronecker_design(
        x in prop::collection::vec(0.0f64..6.3, 1..7),
        y in prop::collection::vec(0.0f64..6.3, 1..7),
        px in 1usize..7,
        py in 1usize..7,
        order in mode_order(),
    ) {
        let (xg, yg) = meshgrid_ij(&x, &y);
        let pts = SamplePoints::two_d(xg, yg).unwrap();
        let real = RealFourierOperator::new(&pts, [px, py], &config(order)).unwrap();
        let exact = engine_design_matrix_2d(&x, &y, [px, py], order).unwrap();
        prop_assert!(max_abs_diff(&real.to_dense().unwrap(), &exact).unwrap() < 1e-5);
    }

    /// Forward and adjoint plans are consistent for every layout.
    #[test]
    fn operators_pass_dot_test(
        xs in prop::collection::vec(-10.0f64..10.0, 1..40),
        p in 1usize..20,
        order in mode_order(),
        seed in any::<u64>(),
    ) {
        let pts = SamplePoints::one_d(xs);
        let mut rng = StdRng::seed_from_u64(seed);
        let op = NufftOperator::new(&pts, p, &config(order)).unwrap();
        prop_assert!(dot_test(&op, &mut rng).unwrap() < 1e-8);
        let real = RealFourierOperator::new(&pts, p, &config(order)).unwrap();
        prop_assert!(dot_test(&real, &mut rng).unwrap() < 1e-8);
    }
}
