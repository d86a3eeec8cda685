//! Fine-grid FFT wrappers around rustfft.
//!
//! Grids are row-major `n0 × n1` buffers; a 1-D grid is `n × 1`.
//! Both directions are unnormalized: a negative sign uses the forward
//! kernel `exp(-2πi kl/n)`, a positive sign the inverse kernel.

use std::fmt;
use std::sync::Arc;

use nufft_types::config::Sign;
use nufft_types::error::{NufftError, NufftResult};
use num_complex::Complex;
use rustfft::num_traits::Zero;
use rustfft::{Fft, FftPlanner};

use crate::scalar::Real;

pub struct GridFft<T: Real> {
    shape: (usize, usize),
    sign: Sign,
    axis0: Arc<dyn Fft<T>>,
    axis1: Arc<dyn Fft<T>>,
}

impl<T: Real> GridFft<T> {
    pub fn new(shape: (usize, usize), sign: Sign) -> Self {
        let mut planner = FftPlanner::new();
        let (axis0, axis1) = match sign {
            Sign::Negative => (
                planner.plan_fft_forward(shape.0),
                planner.plan_fft_forward(shape.1),
            ),
            Sign::Positive => (
                planner.plan_fft_inverse(shape.0),
                planner.plan_fft_inverse(shape.1),
            ),
        };
        GridFft {
            shape,
            sign,
            axis0,
            axis1,
        }
    }

    pub fn shape(&self) -> (usize, usize) {
        self.shape
    }

    pub fn sign(&self) -> Sign {
        self.sign
    }

    /// In-place 2D transform of a row-major grid.
    pub fn process(&self, data: &mut [Complex<T>]) -> NufftResult<()> {
        let (n0, n1) = self.shape;
        if data.len() != n0 * n1 {
            return Err(NufftError::BufferLength {
                expected: n0 * n1,
                got: data.len(),
            });
        }
        if data.is_empty() {
            return Ok(());
        }

        // Along each row (axis 1): rows are contiguous chunks of n1.
        if n1 > 1 {
            self.axis1.process(data);
        }

        // Along each column (axis 0) via transpose.
        if n0 > 1 {
            let mut transposed = vec![Complex::zero(); n0 * n1];
            for i in 0..n0 {
                for j in 0..n1 {
                    transposed[j * n0 + i] = data[i * n1 + j];
                }
            }
            self.axis0.process(&mut transposed);
            for i in 0..n0 {
                for j in 0..n1 {
                    data[i * n1 + j] = transposed[j * n0 + i];
                }
            }
        }
        Ok(())
    }
}

impl<T: Real> fmt::Debug for GridFft<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridFft")
            .field("shape", &self.shape)
            .field("sign", &self.sign)
            .finish_non_exhaustive()
    }
}
