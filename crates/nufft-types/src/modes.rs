//! Mode-count specification.
//!
//! A single count applies to every dimension; a list gives one count per
//! dimension and must match the dimensionality exactly.

use serde::{Deserialize, Serialize};

use crate::error::{NufftError, NufftResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ModeSpec {
    Uniform(usize),
    PerDim(Vec<usize>),
}

impl ModeSpec {
    /// Expand to exactly `dim` positive counts.
    pub fn expand_to_dim(&self, dim: usize) -> NufftResult<Vec<usize>> {
        let modes = match self {
            ModeSpec::Uniform(p) => vec![*p; dim],
            ModeSpec::PerDim(counts) => {
                if counts.len() != dim {
                    return Err(NufftError::DimensionMismatch {
                        expected: dim,
                        got: counts.len(),
                    });
                }
                counts.clone()
            }
        };
        if modes.is_empty() || modes.iter().any(|&p| p == 0) {
            return Err(NufftError::InvalidModes(modes));
        }
        Ok(modes)
    }
}

impl From<usize> for ModeSpec {
    fn from(p: usize) -> Self {
        ModeSpec::Uniform(p)
    }
}

impl From<(usize, usize)> for ModeSpec {
    fn from((px, py): (usize, usize)) -> Self {
        ModeSpec::PerDim(vec![px, py])
    }
}

impl From<[usize; 2]> for ModeSpec {
    fn from(modes: [usize; 2]) -> Self {
        ModeSpec::PerDim(modes.to_vec())
    }
}

impl From<Vec<usize>> for ModeSpec {
    fn from(modes: Vec<usize>) -> Self {
        ModeSpec::PerDim(modes)
    }
}
