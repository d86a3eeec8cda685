// ─────────────────────────────────────────────────────────────────────
// SCPN NUFFT Check — Check Runner
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Design-matrix check: materializes the transform operators, compares
//! them against the explicit trigonometric design matrices and writes one
//! PNG figure plus one JSON report per case.
//!
//! 1D, for each P: `check_design_matrix_P_{P}.png` with four line panels
//! (operator real part, imaginary part, reordered design matrix, real
//! operator). 2D: `check_design_matrix_2d.png` with five heatmaps
//! (Kronecker real/imag, 2D operator real/imag, explicit tensor basis).

use std::fs;
use std::path::{Path, PathBuf};

use ndarray::Array2;
use nufft_math::design::{engine_design_matrix, engine_design_matrix_2d, kron};
use nufft_math::linop::{dot_test, LinearOperator};
use nufft_math::scalar::{Real, Scalar};
use nufft_types::config::{CheckConfig, Precision};
use nufft_types::constants::FIGURE_STEM;
use nufft_types::error::NufftResult;
use nufft_types::points::{linspace, meshgrid_ij, SamplePoints};
use num_complex::Complex;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};

use crate::compare::{imag_part, real_part, real_projection, CaseReport, Comparison};
use crate::operator::{NufftOperator, RealFourierOperator};
use crate::plot::{Figure, HeatmapPanel, LinePanel};

const DOT_TEST_SEED: u64 = 0x5eed;

const LINE_TITLES: [&str; 4] = ["Real", "Imag", "Design matrix (reordered)", "Real operator"];
const HEATMAP_TITLES: [&str; 5] = ["Real", "Imag", "2D Real", "2D Imag", "Exact"];

/// Run every configured case at the configured precision.
pub fn run_check(config: &CheckConfig) -> NufftResult<Vec<CaseReport>> {
    config.validate()?;
    let output_dir = Path::new(&config.output_dir);
    fs::create_dir_all(output_dir)?;
    info!(
        precision = %config.precision,
        output_dir = %output_dir.display(),
        "starting design-matrix check"
    );

    let reports = match config.precision {
        Precision::Single => run_cases::<f32>(config, output_dir)?,
        Precision::Double => run_cases::<f64>(config, output_dir)?,
    };

    let failed = reports.iter().filter(|r| !r.passed()).count();
    info!(cases = reports.len(), failed, "design-matrix check finished");
    Ok(reports)
}

fn run_cases<T>(config: &CheckConfig, output_dir: &Path) -> NufftResult<Vec<CaseReport>>
where
    T: Real + Scalar,
    Complex<T>: Scalar,
{
    let mut rng = StdRng::seed_from_u64(DOT_TEST_SEED);
    let mut reports = Vec::with_capacity(config.one_d.mode_counts.len() + 1);
    for &p in &config.one_d.mode_counts {
        reports.push(one_d_case::<T>(config, p, output_dir, &mut rng)?);
    }
    reports.push(two_d_case::<T>(config, output_dir, &mut rng)?);
    Ok(reports)
}

fn narrowed<T: Real>(values: &[f64]) -> Vec<T> {
    values.iter().map(|&v| T::narrow(v)).collect()
}

fn widened<T: Real>(m: &Array2<T>) -> Array2<f64> {
    m.mapv(|v| v.widen())
}

fn one_d_case<T>(
    config: &CheckConfig,
    p: usize,
    output_dir: &Path,
    rng: &mut StdRng,
) -> NufftResult<CaseReport>
where
    T: Real + Scalar,
    Complex<T>: Scalar,
{
    let nufft = config.nufft_config();
    let x = linspace(0.0, std::f64::consts::TAU, config.one_d.n_points);
    let xs = narrowed::<T>(&x);
    let points = SamplePoints::one_d(xs.clone());

    let op = NufftOperator::new(&points, p, &nufft)?;
    let dense = op.to_dense()?;
    let exact = engine_design_matrix(&xs, p, nufft.mode_order)?;
    let real_op = RealFourierOperator::new(&points, p, &nufft)?;
    let real_dense = real_op.to_dense()?;

    let tol = config.comparison_tolerance;
    let comparisons = vec![
        Comparison::evaluate(
            "projected operator vs design matrix",
            &real_projection(&dense, op.frequencies(0))?,
            &exact,
            tol,
        )?,
        Comparison::evaluate("real operator vs design matrix", &real_dense, &exact, tol)?,
    ];

    let panels = [
        widened(&real_part(&dense)),
        widened(&imag_part(&dense)),
        widened(&exact),
        widened(&real_dense),
    ];
    let mut figure = Figure::from_config(&config.plot, panels.len())?;
    for (i, matrix) in panels.iter().enumerate() {
        figure.draw(i, &LinePanel::new(&x, matrix)?)?;
    }

    let name = format!("P_{p}");
    let image = output_dir.join(format!("{FIGURE_STEM}_{name}.png"));
    let report = CaseReport {
        name,
        precision: T::PRECISION,
        shape: op.shape(),
        modes: op.modes().to_vec(),
        comparisons,
        adjoint_mismatch: dot_test(&op, rng)?,
        image: image.display().to_string(),
        panel_titles: LINE_TITLES.iter().map(|t| t.to_string()).collect(),
    };
    finish_case(figure, report, &image)
}

fn two_d_case<T>(
    config: &CheckConfig,
    output_dir: &Path,
    rng: &mut StdRng,
) -> NufftResult<CaseReport>
where
    T: Real + Scalar,
    Complex<T>: Scalar,
{
    let nufft = config.nufft_config();
    let [px, py] = config.two_d.modes;
    let x = narrowed::<T>(&linspace(0.0, std::f64::consts::TAU, config.two_d.nx));
    let y = narrowed::<T>(&linspace(0.0, std::f64::consts::TAU, config.two_d.ny));

    let ax = NufftOperator::new(&SamplePoints::one_d(x.clone()), px, &nufft)?;
    let ay = NufftOperator::new(&SamplePoints::one_d(y.clone()), py, &nufft)?;
    let kronecker = kron(&ax.to_dense()?, &ay.to_dense()?);

    let (xg, yg) = meshgrid_ij(&x, &y);
    let grid = SamplePoints::two_d(xg, yg)?;
    let op = NufftOperator::new(&grid, [px, py], &nufft)?;
    let dense = op.to_dense()?;
    let real_dense = RealFourierOperator::new(&grid, [px, py], &nufft)?.to_dense()?;
    let exact = engine_design_matrix_2d(&x, &y, [px, py], nufft.mode_order)?;

    let tol = config.comparison_tolerance;
    let comparisons = vec![
        Comparison::evaluate(
            "2D operator vs Kronecker of 1D operators",
            &dense,
            &kronecker,
            tol,
        )?,
        Comparison::evaluate(
            "real 2D operator vs Kronecker design",
            &real_dense,
            &exact,
            tol,
        )?,
    ];

    let panels = [
        widened(&real_part(&kronecker)),
        widened(&imag_part(&kronecker)),
        widened(&real_part(&dense)),
        widened(&imag_part(&dense)),
        widened(&exact),
    ];
    let mut figure = Figure::from_config(&config.plot, panels.len())?;
    for (i, matrix) in panels.iter().enumerate() {
        figure.draw(i, &HeatmapPanel::new(matrix))?;
    }

    let image = output_dir.join(format!("{FIGURE_STEM}_2d.png"));
    let report = CaseReport {
        name: "2d".to_string(),
        precision: T::PRECISION,
        shape: op.shape(),
        modes: op.modes().to_vec(),
        comparisons,
        adjoint_mismatch: dot_test(&op, rng)?,
        image: image.display().to_string(),
        panel_titles: HEATMAP_TITLES.iter().map(|t| t.to_string()).collect(),
    };
    finish_case(figure, report, &image)
}

fn finish_case(figure: Figure, report: CaseReport, image: &Path) -> NufftResult<CaseReport> {
    figure.save(image)?;
    let sidecar: PathBuf = image.with_extension("json");
    report.write_json(&sidecar)?;

    for c in &report.comparisons {
        if c.passed {
            info!(
                case = %report.name,
                check = %c.label,
                max_abs_diff = c.max_abs_diff,
                relative_error = c.relative_error,
                "comparison within tolerance"
            );
        } else {
            warn!(
                case = %report.name,
                check = %c.label,
                max_abs_diff = c.max_abs_diff,
                relative_error = c.relative_error,
                "comparison exceeds tolerance"
            );
        }
    }
    info!(
        case = %report.name,
        worst_error = report.worst_error(),
        adjoint_mismatch = report.adjoint_mismatch,
        image = %image.display(),
        "wrote case"
    );
    Ok(report)
}
