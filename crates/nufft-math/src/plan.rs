// ─────────────────────────────────────────────────────────────────────
// SCPN NUFFT Check — NUFFT Plan
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Type-1 / type-2 non-uniform FFT plans in one and two dimensions.
//!
//! With frequencies `k` taken from the configured mode layout and sign `s`:
//!   type 2 (modes → samples):  f_j = Σ_k c_k exp(i s k·x_j)
//!   type 1 (samples → modes):  c_k = Σ_j f_j exp(i s k·x_j)
//!
//! Default signs are negative for type 2 and positive for type 1, which
//! makes type 1 the adjoint of type 2. A configured sign applies to type 2
//! and type 1 takes the opposite one, so the pair stays adjoint.
//!
//! The spreading backend follows the usual three steps: spread (type 1) or
//! interpolate (type 2) with an ES kernel on a `sigma`-oversampled grid, an
//! FFT on that grid, and division by the kernel's Fourier series. The direct
//! backend evaluates the sums exactly in double precision.
//!
//! A plan is built once, then points are registered, then it is executed
//! any number of times. Coefficient buffers of a 2D plan are row-major
//! `(M1, M2)` grids.

use std::f64::consts::TAU;

use nufft_types::config::{Backend, ModeOrder, NufftConfig, Sign};
use nufft_types::error::{NufftError, NufftResult};
use nufft_types::points::{SamplePoints, MAX_DIM};
use num_complex::{Complex, Complex64};
use rustfft::num_traits::Zero;
use tracing::debug;

use crate::fft::GridFft;
use crate::kernel::{fine_grid_size, EsKernel};
use crate::modes::frequencies;
use crate::scalar::{narrow_complex, widen_complex, Real};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransformType {
    /// Samples → modes (adjoint direction).
    Type1,
    /// Modes → samples (forward direction).
    Type2,
}

impl TransformType {
    pub fn default_sign(self) -> Sign {
        match self {
            TransformType::Type1 => Sign::Positive,
            TransformType::Type2 => Sign::Negative,
        }
    }
}

/// Per-dimension mode and fine-grid bookkeeping. A 1D plan carries a
/// trivial second axis (one mode, one fine cell) so both cases share code.
#[derive(Debug, Clone)]
struct Axis {
    modes: usize,
    n_fine: usize,
    freqs: Vec<i64>,
    /// 1 / p(k) per mode position.
    deconv: Vec<f64>,
    /// Fine-grid cell holding each mode position.
    fine_index: Vec<usize>,
}

impl Axis {
    fn new(modes: usize, order: ModeOrder, kernel: &EsKernel, upsampling: f64) -> Self {
        let n_fine = fine_grid_size(modes, upsampling, kernel.width);
        let freqs = frequencies(modes, order);
        let deconv = kernel
            .fourier_series(n_fine, &freqs)
            .into_iter()
            .map(|p| 1.0 / p)
            .collect();
        let fine_index = freqs.iter().map(|&k| wrap(k, n_fine)).collect();
        Axis {
            modes,
            n_fine,
            freqs,
            deconv,
            fine_index,
        }
    }

    fn trivial() -> Self {
        Axis {
            modes: 1,
            n_fine: 1,
            freqs: vec![0],
            deconv: vec![1.0],
            fine_index: vec![0],
        }
    }
}

#[inline]
fn wrap(l: i64, n: usize) -> usize {
    l.rem_euclid(n as i64) as usize
}

#[derive(Debug)]
pub struct Plan<T: Real> {
    kind: TransformType,
    modes: Vec<usize>,
    sign: Sign,
    n_trans: usize,
    kernel: EsKernel,
    axes: [Axis; 2],
    fft: Option<GridFft<T>>,
    /// Registered coordinates, one array per dimension.
    points: Option<Vec<Vec<f64>>>,
}

impl<T: Real> Plan<T> {
    pub fn new(kind: TransformType, modes: &[usize], config: &NufftConfig) -> NufftResult<Self> {
        if modes.is_empty() || modes.len() > MAX_DIM {
            return Err(NufftError::UnsupportedDimension(modes.len()));
        }
        if modes.iter().any(|&m| m == 0) {
            return Err(NufftError::InvalidModes(modes.to_vec()));
        }
        if config.precision != T::PRECISION {
            return Err(NufftError::PrecisionMismatch {
                configured: config.precision,
                working: T::PRECISION,
            });
        }
        config.validate()?;

        let sign = match (config.sign, kind) {
            (None, _) => kind.default_sign(),
            (Some(s), TransformType::Type2) => s,
            (Some(s), TransformType::Type1) => s.flipped(),
        };
        let kernel = EsKernel::for_tolerance(config.tolerance, config.upsampling);
        let axis = |d: usize| match modes.get(d) {
            Some(&m) => Axis::new(m, config.mode_order, &kernel, config.upsampling),
            None => Axis::trivial(),
        };
        let axes = [axis(0), axis(1)];
        let fft = match config.backend {
            Backend::Spreading => Some(GridFft::new((axes[0].n_fine, axes[1].n_fine), sign)),
            Backend::Direct => None,
        };

        debug!(
            ?kind,
            ?modes,
            ?sign,
            backend = ?config.backend,
            width = kernel.width,
            beta = kernel.beta,
            fine = ?(axes[0].n_fine, axes[1].n_fine),
            "created NUFFT plan"
        );

        Ok(Plan {
            kind,
            modes: modes.to_vec(),
            sign,
            n_trans: config.n_trans,
            kernel,
            axes,
            fft,
            points: None,
        })
    }

    /// Register the sample points used by every later `execute`.
    pub fn set_points(&mut self, points: &SamplePoints<T>) -> NufftResult<()> {
        if points.dim() != self.modes.len() {
            return Err(NufftError::DimensionMismatch {
                expected: self.modes.len(),
                got: points.dim(),
            });
        }
        let mut coords = Vec::with_capacity(points.dim());
        for (axis, values) in points.axes().iter().enumerate() {
            let widened: Vec<f64> = values.iter().map(|&v| v.widen()).collect();
            if let Some(index) = widened.iter().position(|v| !v.is_finite()) {
                return Err(NufftError::NonFinitePoint { axis, index });
            }
            coords.push(widened);
        }
        debug!(n_points = points.len(), kind = ?self.kind, "registered sample points");
        self.points = Some(coords);
        Ok(())
    }

    /// Run `n_trans` transforms stored back to back in `input`.
    pub fn execute(&self, input: &[Complex<T>]) -> NufftResult<Vec<Complex<T>>> {
        let pts = self.points.as_ref().ok_or(NufftError::PointsNotSet)?;
        let n_points = pts[0].len();
        let n_modes = self.n_modes();
        let (in_len, out_len) = match self.kind {
            TransformType::Type1 => (n_points, n_modes),
            TransformType::Type2 => (n_modes, n_points),
        };
        if input.len() != self.n_trans * in_len {
            return Err(NufftError::BufferLength {
                expected: self.n_trans * in_len,
                got: input.len(),
            });
        }

        let mut out = Vec::with_capacity(self.n_trans * out_len);
        for t in 0..self.n_trans {
            let chunk = &input[t * in_len..(t + 1) * in_len];
            let result = match (&self.fft, self.kind) {
                (Some(fft), TransformType::Type1) => self.spread(fft, pts, chunk)?,
                (Some(fft), TransformType::Type2) => self.interpolate(fft, pts, chunk)?,
                (None, _) => self.direct(pts, chunk),
            };
            out.extend(result);
        }
        Ok(out)
    }

    pub fn kind(&self) -> TransformType {
        self.kind
    }

    pub fn modes(&self) -> &[usize] {
        &self.modes
    }

    /// Total number of modes M.
    pub fn n_modes(&self) -> usize {
        self.modes.iter().product()
    }

    /// Number of registered points, if any.
    pub fn n_points(&self) -> Option<usize> {
        self.points.as_ref().map(|p| p[0].len())
    }

    pub fn sign(&self) -> Sign {
        self.sign
    }

    pub fn n_trans(&self) -> usize {
        self.n_trans
    }

    pub fn kernel(&self) -> &EsKernel {
        &self.kernel
    }

    /// Fine-grid size per dimension.
    pub fn fine_grid(&self) -> Vec<usize> {
        self.axes[..self.modes.len()]
            .iter()
            .map(|a| a.n_fine)
            .collect()
    }

    /// Frequency at each mode position along dimension `d`.
    pub fn frequencies(&self, d: usize) -> &[i64] {
        &self.axes[d].freqs
    }

    // ── spreading backend ────────────────────────────────────────────

    /// Kernel weights of point `j` along dimension `d`; returns the first cell.
    fn window(&self, pts: &[Vec<f64>], j: usize, d: usize, buf: &mut Vec<f64>) -> i64 {
        buf.clear();
        if d >= pts.len() {
            buf.push(1.0);
            return 0;
        }
        let n_fine = self.axes[d].n_fine as f64;
        let t = pts[d][j].rem_euclid(TAU) * n_fine / TAU;
        buf.resize(self.kernel.width, 0.0);
        self.kernel.weights(t, buf)
    }

    fn spread(
        &self,
        fft: &GridFft<T>,
        pts: &[Vec<f64>],
        f: &[Complex<T>],
    ) -> NufftResult<Vec<Complex<T>>> {
        let (n0, n1) = (self.axes[0].n_fine, self.axes[1].n_fine);
        let mut grid = vec![Complex::<T>::zero(); n0 * n1];
        let mut wx = Vec::with_capacity(self.kernel.width);
        let mut wy = Vec::with_capacity(self.kernel.width);

        for (j, &fj) in f.iter().enumerate() {
            let l0x = self.window(pts, j, 0, &mut wx);
            let l0y = self.window(pts, j, 1, &mut wy);
            for (a, &wa) in wx.iter().enumerate() {
                let row = wrap(l0x + a as i64, n0) * n1;
                for (b, &wb) in wy.iter().enumerate() {
                    let idx = row + wrap(l0y + b as i64, n1);
                    grid[idx] = grid[idx] + fj * T::narrow(wa * wb);
                }
            }
        }

        fft.process(&mut grid)?;

        let [ax, ay] = &self.axes;
        let mut out = Vec::with_capacity(ax.modes * ay.modes);
        for m0 in 0..ax.modes {
            for m1 in 0..ay.modes {
                let v = grid[ax.fine_index[m0] * n1 + ay.fine_index[m1]];
                out.push(v * T::narrow(ax.deconv[m0] * ay.deconv[m1]));
            }
        }
        Ok(out)
    }

    fn interpolate(
        &self,
        fft: &GridFft<T>,
        pts: &[Vec<f64>],
        c: &[Complex<T>],
    ) -> NufftResult<Vec<Complex<T>>> {
        let (n0, n1) = (self.axes[0].n_fine, self.axes[1].n_fine);
        let [ax, ay] = &self.axes;
        let mut grid = vec![Complex::<T>::zero(); n0 * n1];
        for m0 in 0..ax.modes {
            for m1 in 0..ay.modes {
                let idx = ax.fine_index[m0] * n1 + ay.fine_index[m1];
                grid[idx] = c[m0 * ay.modes + m1] * T::narrow(ax.deconv[m0] * ay.deconv[m1]);
            }
        }

        fft.process(&mut grid)?;

        let n_points = pts[0].len();
        let mut wx = Vec::with_capacity(self.kernel.width);
        let mut wy = Vec::with_capacity(self.kernel.width);
        let mut out = Vec::with_capacity(n_points);
        for j in 0..n_points {
            let l0x = self.window(pts, j, 0, &mut wx);
            let l0y = self.window(pts, j, 1, &mut wy);
            let mut acc = Complex::<T>::zero();
            for (a, &wa) in wx.iter().enumerate() {
                let row = wrap(l0x + a as i64, n0) * n1;
                for (b, &wb) in wy.iter().enumerate() {
                    acc = acc + grid[row + wrap(l0y + b as i64, n1)] * T::narrow(wa * wb);
                }
            }
            out.push(acc);
        }
        Ok(out)
    }

    // ── direct backend ───────────────────────────────────────────────

    fn direct(&self, pts: &[Vec<f64>], input: &[Complex<T>]) -> Vec<Complex<T>> {
        let input = widen_complex(input);
        let s = self.sign.value();
        let [ax, ay] = &self.axes;
        let n_points = pts[0].len();
        let coord = |d: usize, j: usize| pts.get(d).map_or(0.0, |axis| axis[j]);

        // exp(i s (k0 x + k1 y)) for mode (m0, m1) at point j.
        let phase = |m0: usize, m1: usize, j: usize| {
            let arg = ax.freqs[m0] as f64 * coord(0, j) + ay.freqs[m1] as f64 * coord(1, j);
            Complex64::from_polar(1.0, s * arg)
        };

        let out: Vec<Complex64> = match self.kind {
            TransformType::Type2 => (0..n_points)
                .map(|j| {
                    let mut acc = Complex64::zero();
                    for m0 in 0..ax.modes {
                        for m1 in 0..ay.modes {
                            acc += input[m0 * ay.modes + m1] * phase(m0, m1, j);
                        }
                    }
                    acc
                })
                .collect(),
            TransformType::Type1 => {
                let mut out = Vec::with_capacity(ax.modes * ay.modes);
                for m0 in 0..ax.modes {
                    for m1 in 0..ay.modes {
                        let mut acc = Complex64::zero();
                        for (j, &fj) in input.iter().enumerate() {
                            acc += fj * phase(m0, m1, j);
                        }
                        out.push(acc);
                    }
                }
                out
            }
        };
        narrow_complex(&out)
    }
}
