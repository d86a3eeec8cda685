// ─────────────────────────────────────────────────────────────────────
// SCPN NUFFT Check — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_TOLERANCE, DEFAULT_UPSAMPLING, DOUBLE_MIN_TOLERANCE, SINGLE_MIN_TOLERANCE,
};
use crate::error::{NufftError, NufftResult};

/// Working floating-point precision of a transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Precision {
    Single,
    #[default]
    Double,
}

impl Precision {
    /// Smallest tolerance the spreading engine can honour at this precision.
    pub fn min_tolerance(self) -> f64 {
        match self {
            Precision::Single => SINGLE_MIN_TOLERANCE,
            Precision::Double => DOUBLE_MIN_TOLERANCE,
        }
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Precision::Single => f.write_str("single"),
            Precision::Double => f.write_str("double"),
        }
    }
}

/// Array layout of the Fourier modes.
///
/// `Centered` stores frequencies in ascending order (-P/2 first), `FftStyle`
/// starts at frequency zero and wraps the negative frequencies to the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeOrder {
    #[default]
    Centered,
    FftStyle,
}

/// Sign of the imaginary unit in the transform exponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sign {
    Negative,
    Positive,
}

impl Sign {
    pub fn value(self) -> f64 {
        match self {
            Sign::Negative => -1.0,
            Sign::Positive => 1.0,
        }
    }

    pub fn flipped(self) -> Sign {
        match self {
            Sign::Negative => Sign::Positive,
            Sign::Positive => Sign::Negative,
        }
    }
}

/// Which transform implementation a plan executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Kernel spreading onto an oversampled grid plus FFT.
    #[default]
    Spreading,
    /// Exact O(N·M) summation.
    Direct,
}

/// Plan options shared by the forward and adjoint transforms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NufftConfig {
    /// Requested relative accuracy (default: 1e-6).
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    /// Forward-transform sign override. `None` keeps the defaults:
    /// negative for the forward transform, positive for the adjoint.
    #[serde(default)]
    pub sign: Option<Sign>,
    #[serde(default)]
    pub mode_order: ModeOrder,
    /// Number of transforms executed per call (default: 1).
    #[serde(default = "default_n_trans")]
    pub n_trans: usize,
    /// Fine-grid oversampling factor (default: 2.0).
    #[serde(default = "default_upsampling")]
    pub upsampling: f64,
    #[serde(default)]
    pub backend: Backend,
    #[serde(default)]
    pub precision: Precision,
}

fn default_tolerance() -> f64 {
    DEFAULT_TOLERANCE
}
fn default_n_trans() -> usize {
    1
}
fn default_upsampling() -> f64 {
    DEFAULT_UPSAMPLING
}

impl Default for NufftConfig {
    fn default() -> Self {
        NufftConfig {
            tolerance: default_tolerance(),
            sign: None,
            mode_order: ModeOrder::default(),
            n_trans: default_n_trans(),
            upsampling: default_upsampling(),
            backend: Backend::default(),
            precision: Precision::default(),
        }
    }
}

impl NufftConfig {
    /// Same options, at the given precision.
    pub fn with_precision(mut self, precision: Precision) -> Self {
        self.precision = precision;
        self
    }

    pub fn validate(&self) -> NufftResult<()> {
        let minimum = self.precision.min_tolerance();
        if !self.tolerance.is_finite() || self.tolerance < minimum {
            return Err(NufftError::InvalidTolerance {
                tolerance: self.tolerance,
                precision: self.precision,
                minimum,
            });
        }
        if self.n_trans == 0 {
            return Err(NufftError::ConfigError(
                "n_trans must be at least 1".to_string(),
            ));
        }
        if !self.upsampling.is_finite() || self.upsampling <= 1.0 {
            return Err(NufftError::ConfigError(format!(
                "upsampling factor must be > 1, got {}",
                self.upsampling
            )));
        }
        Ok(())
    }
}

/// One-dimensional comparison cases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OneDCase {
    /// Samples in linspace(0, 2π, n_points) (default: 100).
    #[serde(default = "default_n_points")]
    pub n_points: usize,
    /// One figure per mode count (default: [6, 7]).
    #[serde(default = "default_mode_counts")]
    pub mode_counts: Vec<usize>,
}

fn default_n_points() -> usize {
    100
}
fn default_mode_counts() -> Vec<usize> {
    vec![6, 7]
}

impl Default for OneDCase {
    fn default() -> Self {
        OneDCase {
            n_points: default_n_points(),
            mode_counts: default_mode_counts(),
        }
    }
}

/// Tensor-product comparison case on an nx × ny grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TwoDCase {
    #[serde(default = "default_nx")]
    pub nx: usize,
    #[serde(default = "default_ny")]
    pub ny: usize,
    /// (Px, Py) (default: [7, 8]).
    #[serde(default = "default_modes_2d")]
    pub modes: [usize; 2],
}

fn default_nx() -> usize {
    10
}
fn default_ny() -> usize {
    11
}
fn default_modes_2d() -> [usize; 2] {
    [7, 8]
}

impl Default for TwoDCase {
    fn default() -> Self {
        TwoDCase {
            nx: default_nx(),
            ny: default_ny(),
            modes: default_modes_2d(),
        }
    }
}

/// Figure geometry in pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotConfig {
    #[serde(default = "default_panel_width")]
    pub panel_width: u32,
    #[serde(default = "default_panel_height")]
    pub panel_height: u32,
    #[serde(default = "default_margin")]
    pub margin: u32,
}

fn default_panel_width() -> u32 {
    250
}
fn default_panel_height() -> u32 {
    500
}
fn default_margin() -> u32 {
    12
}

impl Default for PlotConfig {
    fn default() -> Self {
        PlotConfig {
            panel_width: default_panel_width(),
            panel_height: default_panel_height(),
            margin: default_margin(),
        }
    }
}

/// Top-level configuration of a design-matrix check run.
/// Every field has a default, so `{}` is a valid config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    /// Working precision of the run. Overrides `nufft.precision`.
    #[serde(default)]
    pub precision: Precision,
    #[serde(default)]
    pub one_d: OneDCase,
    #[serde(default)]
    pub two_d: TwoDCase,
    /// Plan options. Its `precision` is replaced by the top-level one.
    #[serde(default)]
    pub nufft: NufftConfig,
    #[serde(default)]
    pub plot: PlotConfig,
    /// Largest acceptable column mismatch before a case is flagged (default: 1e-5).
    #[serde(default = "default_comparison_tolerance")]
    pub comparison_tolerance: f64,
}

fn default_output_dir() -> String {
    ".".to_string()
}
fn default_comparison_tolerance() -> f64 {
    1e-5
}

impl Default for CheckConfig {
    fn default() -> Self {
        CheckConfig {
            output_dir: default_output_dir(),
            precision: Precision::default(),
            one_d: OneDCase::default(),
            two_d: TwoDCase::default(),
            nufft: NufftConfig::default(),
            plot: PlotConfig::default(),
            comparison_tolerance: default_comparison_tolerance(),
        }
    }
}

impl CheckConfig {
    /// Load from a JSON file and validate.
    pub fn from_file(path: impl AsRef<Path>) -> NufftResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Plan options with the run's precision applied.
    pub fn nufft_config(&self) -> NufftConfig {
        self.nufft.clone().with_precision(self.precision)
    }

    pub fn validate(&self) -> NufftResult<()> {
        if self.one_d.n_points == 0 {
            return Err(NufftError::ConfigError(
                "one_d.n_points must be positive".to_string(),
            ));
        }
        if self.one_d.mode_counts.is_empty() || self.one_d.mode_counts.iter().any(|&p| p == 0) {
            return Err(NufftError::InvalidModes(self.one_d.mode_counts.clone()));
        }
        if self.two_d.nx == 0 || self.two_d.ny == 0 {
            return Err(NufftError::ConfigError(format!(
                "two_d grid must be non-empty, got {}x{}",
                self.two_d.nx, self.two_d.ny
            )));
        }
        if self.two_d.modes.iter().any(|&p| p == 0) {
            return Err(NufftError::InvalidModes(self.two_d.modes.to_vec()));
        }
        // Frame plus at least one pixel of drawing area inside the margins.
        let min_side = 2 * u64::from(self.plot.margin) + 3;
        if u64::from(self.plot.panel_width) < min_side
            || u64::from(self.plot.panel_height) < min_side
        {
            return Err(NufftError::ConfigError(
                "plot panels are smaller than their margins".to_string(),
            ));
        }
        if !(self.comparison_tolerance > 0.0) {
            return Err(NufftError::ConfigError(format!(
                "comparison_tolerance must be positive, got {}",
                self.comparison_tolerance
            )));
        }
        self.nufft_config().validate()
    }
}
