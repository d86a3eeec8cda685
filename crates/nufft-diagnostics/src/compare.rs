// ─────────────────────────────────────────────────────────────────────
// SCPN NUFFT Check — Comparison
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Matrix comparisons and the per-case JSON report.

use std::fs;
use std::path::Path;

use ndarray::Array2;
use nufft_math::scalar::{Real, Scalar};
use nufft_types::config::Precision;
use nufft_types::error::{NufftError, NufftResult};
use num_complex::Complex;
use serde::{Deserialize, Serialize};

/// What the as-is basis sees of each complex column: `Re` for `k ≥ 0`
/// (cosines), `Im` for `k < 0` (sines).
pub fn real_projection<T: Real>(
    dense: &Array2<Complex<T>>,
    freqs: &[i64],
) -> NufftResult<Array2<T>> {
    let (rows, cols) = dense.dim();
    if freqs.len() != cols {
        return Err(NufftError::DimensionMismatch {
            expected: cols,
            got: freqs.len(),
        });
    }
    Ok(Array2::from_shape_fn((rows, cols), |(r, c)| {
        let v = dense[[r, c]];
        if freqs[c] >= 0 {
            v.re
        } else {
            v.im
        }
    }))
}

pub fn real_part<T: Real>(dense: &Array2<Complex<T>>) -> Array2<T> {
    dense.mapv(|v| v.re)
}

pub fn imag_part<T: Real>(dense: &Array2<Complex<T>>) -> Array2<T> {
    dense.mapv(|v| v.im)
}

fn check_shapes<A>(a: &Array2<A>, b: &Array2<A>) -> NufftResult<()> {
    let (ra, ca) = a.dim();
    let (rb, cb) = b.dim();
    if ra != rb {
        return Err(NufftError::DimensionMismatch { expected: ra, got: rb });
    }
    if ca != cb {
        return Err(NufftError::DimensionMismatch { expected: ca, got: cb });
    }
    Ok(())
}

/// Largest entrywise `|a - b|`.
pub fn max_abs_diff<A: Scalar>(a: &Array2<A>, b: &Array2<A>) -> NufftResult<f64> {
    check_shapes(a, b)?;
    Ok(a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| (x - y).to_c64().norm())
        .fold(0.0, f64::max))
}

/// Frobenius `‖a - b‖ / ‖b‖`; zero when both vanish.
pub fn relative_error<A: Scalar>(a: &Array2<A>, b: &Array2<A>) -> NufftResult<f64> {
    check_shapes(a, b)?;
    let num: f64 = a
        .iter()
        .zip(b.iter())
        .map(|(&x, &y)| (x - y).to_c64().norm_sqr())
        .sum();
    let den: f64 = b.iter().map(|&y| y.to_c64().norm_sqr()).sum();
    if den == 0.0 {
        return Ok(if num == 0.0 { 0.0 } else { f64::INFINITY });
    }
    Ok((num / den).sqrt())
}

/// One matrix-vs-matrix check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub label: String,
    pub max_abs_diff: f64,
    pub relative_error: f64,
    pub passed: bool,
}

impl Comparison {
    pub fn evaluate<A: Scalar>(
        label: impl Into<String>,
        actual: &Array2<A>,
        expected: &Array2<A>,
        tolerance: f64,
    ) -> NufftResult<Self> {
        let max_abs_diff = max_abs_diff(actual, expected)?;
        Ok(Comparison {
            label: label.into(),
            max_abs_diff,
            relative_error: relative_error(actual, expected)?,
            passed: max_abs_diff <= tolerance,
        })
    }
}

/// Summary of one check case, written next to its figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseReport {
    pub name: String,
    pub precision: Precision,
    /// Operator shape `(N, M)`.
    pub shape: (usize, usize),
    pub modes: Vec<usize>,
    pub comparisons: Vec<Comparison>,
    /// Relative `⟨Ax, y⟩` vs `⟨x, Aᴴy⟩` mismatch of the complex operator.
    pub adjoint_mismatch: f64,
    pub image: String,
    /// Figure panels, left to right.
    pub panel_titles: Vec<String>,
}

impl CaseReport {
    pub fn passed(&self) -> bool {
        self.comparisons.iter().all(|c| c.passed)
    }

    /// Largest `max_abs_diff` over all comparisons.
    pub fn worst_error(&self) -> f64 {
        self.comparisons
            .iter()
            .map(|c| c.max_abs_diff)
            .fold(0.0, f64::max)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> NufftResult<()> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn from_file(path: impl AsRef<Path>) -> NufftResult<Self> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_real_projection_picks_re_or_im() {
        let dense = array![[Complex::new(1.0, 2.0), Complex::new(3.0, 4.0)]];
        let proj = real_projection(&dense, &[-1, 0]).unwrap();
        assert_eq!(proj, array![[2.0, 3.0]]);
        assert!(real_projection(&dense, &[0]).is_err());
    }

    #[test]
    fn test_diffs() {
        let a = array![[1.0, 2.0], [3.0, 4.0]];
        let b = array![[1.0, 2.5], [3.0, 4.0]];
        assert_eq!(max_abs_diff(&a, &b).unwrap(), 0.5);
        assert_eq!(relative_error(&a, &a).unwrap(), 0.0);
        let zero = Array2::<f64>::zeros((2, 2));
        assert_eq!(relative_error(&zero, &zero).unwrap(), 0.0);
        assert!(relative_error(&a, &zero).unwrap().is_infinite());
    }

    #[test]
    fn test_shape_mismatch() {
        let a = Array2::<f64>::zeros((2, 2));
        let b = Array2::<f64>::zeros((2, 3));
        assert!(matches!(
            max_abs_diff(&a, &b),
            Err(NufftError::DimensionMismatch { expected: 2, got: 3 })
        ));
    }

    #[test]
    fn test_complex_diff_uses_modulus() {
        let a = array![[Complex::new(0.0, 0.0)]];
        let b = array![[Complex::new(3.0, 4.0)]];
        assert_eq!(max_abs_diff(&a, &b).unwrap(), 5.0);
    }

    #[test]
    fn test_report_roundtrip() {
        let a = array![[1.0f64]];
        let report = CaseReport {
            name: "P_7".into(),
            precision: Precision::Double,
            shape: (100, 7),
            modes: vec![7],
            comparisons: vec![Comparison::evaluate("design", &a, &a, 1e-5).unwrap()],
            adjoint_mismatch: 1e-16,
            image: "check_design_matrix_P_7.png".into(),
            panel_titles: vec!["Real".into()],
        };
        assert!(report.passed());
        assert_eq!(report.worst_error(), 0.0);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        report.write_json(&path).unwrap();
        assert_eq!(CaseReport::from_file(&path).unwrap(), report);
    }

    #[test]
    fn test_report_floats_survive_json_exactly() {
        let report = CaseReport {
            name: "2d".into(),
            precision: Precision::Double,
            shape: (110, 56),
            modes: vec![7, 8],
            comparisons: vec![Comparison {
                label: "kron".into(),
                max_abs_diff: 5.551118465146127e-16,
                relative_error: 1.0000000000000002e-7,
                passed: true,
            }],
            adjoint_mismatch: 5.494404564204889e-16,
            image: "check_design_matrix_2d.png".into(),
            panel_titles: Vec::new(),
        };
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        report.write_json(&path).unwrap();
        let back = CaseReport::from_file(&path).unwrap();
        assert_eq!(
            back.comparisons[0].max_abs_diff.to_bits(),
            5.551118465146127e-16f64.to_bits()
        );
        assert_eq!(
            back.adjoint_mismatch.to_bits(),
            5.494404564204889e-16f64.to_bits()
        );
        assert_eq!(back, report);
    }
}
