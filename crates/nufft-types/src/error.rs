use thiserror::Error;

use crate::config::Precision;

#[derive(Error, Debug)]
pub enum NufftError {
    #[error("All point arrays must have the same length, got lengths {lengths:?}")]
    MismatchedPoints { lengths: Vec<usize> },

    #[error("Unsupported dimensionality {0}: expected 1 or 2 coordinate arrays")]
    UnsupportedDimension(usize),

    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("Mode counts must be positive, got {0:?}")]
    InvalidModes(Vec<usize>),

    #[error("Tolerance {tolerance:e} is not usable at {precision} precision (minimum {minimum:e})")]
    InvalidTolerance {
        tolerance: f64,
        precision: Precision,
        minimum: f64,
    },

    #[error("Precision mismatch: configured {configured}, working type is {working}")]
    PrecisionMismatch {
        configured: Precision,
        working: Precision,
    },

    #[error("Non-finite sample coordinate at axis {axis}, index {index}")]
    NonFinitePoint { axis: usize, index: usize },

    #[error("Plan executed before sample points were registered")]
    PointsNotSet,

    #[error("Buffer length {got} does not match expected length {expected}")]
    BufferLength { expected: usize, got: usize },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Rendering error: {0}")]
    Render(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type NufftResult<T> = Result<T, NufftError>;
