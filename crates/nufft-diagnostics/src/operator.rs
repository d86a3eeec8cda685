// ─────────────────────────────────────────────────────────────────────
// SCPN NUFFT Check — Operators
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Linear operators backed by a forward (type 2) and adjoint (type 1)
//! NUFFT plan pair.
//!
//! `NufftOperator` maps complex Fourier coefficients to samples at
//! non-uniform points. `RealFourierOperator` maps real coefficients of the
//! cosine/sine basis to real samples; its columns are `cos(k·x)` for
//! `k ≥ 0` and `sin(|k|·x)` for `k < 0`, in the engine mode layout.

use std::fmt::Debug;

use nufft_math::linop::LinearOperator;
use nufft_math::plan::{Plan, TransformType};
use nufft_math::scalar::{Real, Scalar};
use nufft_types::config::NufftConfig;
use nufft_types::error::{NufftError, NufftResult};
use nufft_types::modes::ModeSpec;
use nufft_types::points::SamplePoints;
use num_complex::Complex;
use tracing::debug;

/// Applied to every adjoint result before it is returned.
pub trait AdjointPostProcess<T: Real>: Debug {
    fn apply(&self, coeffs: Vec<Complex<T>>, modes: &[usize]) -> NufftResult<Vec<Complex<T>>>;
}

/// Returns the adjoint coefficients unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdentityPostProcess;

impl<T: Real> AdjointPostProcess<T> for IdentityPostProcess {
    fn apply(&self, coeffs: Vec<Complex<T>>, _modes: &[usize]) -> NufftResult<Vec<Complex<T>>> {
        Ok(coeffs)
    }
}

/// `A: C^M → C^N`, `(A c)_j = Σ_k c_k exp(i s k·x_j)`.
///
/// Coefficient vectors are row-major `(M1, M2)` grids in 2D. Plans run one
/// transform per call regardless of the configured `n_trans`.
#[derive(Debug)]
pub struct NufftOperator<T: Real, H = IdentityPostProcess> {
    n_points: usize,
    modes: Vec<usize>,
    forward: Plan<T>,
    adjoint: Plan<T>,
    post: H,
}

impl<T: Real> NufftOperator<T> {
    pub fn new(
        points: &SamplePoints<T>,
        modes: impl Into<ModeSpec>,
        config: &NufftConfig,
    ) -> NufftResult<Self> {
        Self::with_post_process(points, modes, config, IdentityPostProcess)
    }

    /// Build from raw coordinate arrays, one per dimension.
    pub fn from_coords(
        coords: Vec<Vec<T>>,
        modes: impl Into<ModeSpec>,
        config: &NufftConfig,
    ) -> NufftResult<Self> {
        let points = SamplePoints::new(coords)?;
        Self::new(&points, modes, config)
    }
}

impl<T: Real, H: AdjointPostProcess<T>> NufftOperator<T, H> {
    pub fn with_post_process(
        points: &SamplePoints<T>,
        modes: impl Into<ModeSpec>,
        config: &NufftConfig,
        post: H,
    ) -> NufftResult<Self> {
        let modes = modes.into().expand_to_dim(points.dim())?;
        let config = NufftConfig {
            n_trans: 1,
            ..config.clone()
        };

        let mut forward = Plan::new(TransformType::Type2, &modes, &config)?;
        forward.set_points(points)?;
        let mut adjoint = Plan::new(TransformType::Type1, &modes, &config)?;
        adjoint.set_points(points)?;

        debug!(n_points = points.len(), ?modes, "built NUFFT operator");
        Ok(NufftOperator {
            n_points: points.len(),
            modes,
            forward,
            adjoint,
            post,
        })
    }

    pub fn modes(&self) -> &[usize] {
        &self.modes
    }

    pub fn n_points(&self) -> usize {
        self.n_points
    }

    /// Frequency at each mode position along dimension `d`.
    pub fn frequencies(&self, d: usize) -> &[i64] {
        self.forward.frequencies(d)
    }

    pub fn forward_plan(&self) -> &Plan<T> {
        &self.forward
    }

    pub fn adjoint_plan(&self) -> &Plan<T> {
        &self.adjoint
    }
}

impl<T: Real, H: AdjointPostProcess<T>> LinearOperator for NufftOperator<T, H>
where
    Complex<T>: Scalar,
{
    type Elem = Complex<T>;

    fn shape(&self) -> (usize, usize) {
        (self.n_points, self.modes.iter().product())
    }

    fn matvec(&self, c: &[Complex<T>]) -> NufftResult<Vec<Complex<T>>> {
        self.forward.execute(c)
    }

    fn rmatvec(&self, f: &[Complex<T>]) -> NufftResult<Vec<Complex<T>>> {
        let coeffs = self.adjoint.execute(f)?;
        self.post.apply(coeffs, &self.modes)
    }
}

/// Per-mode phase taking a real cosine/sine coefficient to the complex
/// coefficient of the same basis function: `1` for `k ≥ 0`, `-i` for `k < 0`.
fn phase_diagonal<T: Real>(freqs: &[i64]) -> Vec<Complex<T>> {
    freqs
        .iter()
        .map(|&k| {
            if k >= 0 {
                Complex::new(T::one(), T::zero())
            } else {
                Complex::new(T::zero(), -T::one())
            }
        })
        .collect()
}

/// Row-major tensor product of two diagonals.
fn tensor_diagonal<T: Real>(d1: &[Complex<T>], d2: &[Complex<T>]) -> Vec<Complex<T>> {
    d1.iter()
        .flat_map(|&a| d2.iter().map(move |&b| a * b))
        .collect()
}

/// One term `w · Re(A · diag(d) · a)` of a real operator.
#[derive(Debug)]
struct RealTerm<T: Real> {
    operator: NufftOperator<T>,
    diagonal: Vec<Complex<T>>,
}

/// `R: R^M → R^N` over the cosine/sine basis.
///
/// 1D: `R = Re(A·D)`. 2D uses a second operator on the mirrored points
/// `(x, -y)`: `R = ½·Re(A(x, y)·(D1⊗D2) + A(x, -y)·(D1⊗conj D2))`, which
/// turns each product of exponentials into a product of cosines and sines.
/// With the default signs the dense form is the explicit design matrix in
/// the engine layout.
#[derive(Debug)]
pub struct RealFourierOperator<T: Real> {
    n_points: usize,
    modes: Vec<usize>,
    terms: Vec<RealTerm<T>>,
    weight: T,
}

impl<T: Real> RealFourierOperator<T> {
    pub fn new(
        points: &SamplePoints<T>,
        modes: impl Into<ModeSpec>,
        config: &NufftConfig,
    ) -> NufftResult<Self> {
        let modes = modes.into().expand_to_dim(points.dim())?;
        let direct = NufftOperator::new(points, modes.clone(), config)?;
        let d1 = phase_diagonal::<T>(direct.frequencies(0));

        let (terms, weight) = match points.dim() {
            1 => {
                let term = RealTerm {
                    operator: direct,
                    diagonal: d1,
                };
                (vec![term], T::one())
            }
            2 => {
                let d2 = phase_diagonal::<T>(direct.frequencies(1));
                let d2_conj: Vec<Complex<T>> = d2.iter().map(|v| v.conj()).collect();
                let mirrored_points = points.map_axis(1, |y| -y);
                let mirrored = NufftOperator::new(&mirrored_points, modes.clone(), config)?;
                let terms = vec![
                    RealTerm {
                        operator: direct,
                        diagonal: tensor_diagonal(&d1, &d2),
                    },
                    RealTerm {
                        operator: mirrored,
                        diagonal: tensor_diagonal(&d1, &d2_conj),
                    },
                ];
                (terms, T::narrow(0.5))
            }
            d => return Err(NufftError::UnsupportedDimension(d)),
        };

        Ok(RealFourierOperator {
            n_points: points.len(),
            modes,
            terms,
            weight,
        })
    }

    pub fn modes(&self) -> &[usize] {
        &self.modes
    }

    /// Frequency at each mode position along dimension `d`.
    pub fn frequencies(&self, d: usize) -> &[i64] {
        self.terms[0].operator.frequencies(d)
    }
}

impl<T: Real + Scalar> LinearOperator for RealFourierOperator<T>
where
    Complex<T>: Scalar,
{
    type Elem = T;

    fn shape(&self) -> (usize, usize) {
        (self.n_points, self.modes.iter().product())
    }

    fn matvec(&self, a: &[T]) -> NufftResult<Vec<T>> {
        let (rows, cols) = self.shape();
        if a.len() != cols {
            return Err(NufftError::BufferLength {
                expected: cols,
                got: a.len(),
            });
        }
        let mut out = vec![T::zero(); rows];
        for term in &self.terms {
            let c: Vec<Complex<T>> = term
                .diagonal
                .iter()
                .zip(a)
                .map(|(&d, &v)| d.scale(v))
                .collect();
            let f = term.operator.matvec(&c)?;
            for (o, v) in out.iter_mut().zip(&f) {
                *o = *o + self.weight * v.re;
            }
        }
        Ok(out)
    }

    fn rmatvec(&self, f: &[T]) -> NufftResult<Vec<T>> {
        let (rows, cols) = self.shape();
        if f.len() != rows {
            return Err(NufftError::BufferLength {
                expected: rows,
                got: f.len(),
            });
        }
        let fc: Vec<Complex<T>> = f.iter().map(|&v| Complex::new(v, T::zero())).collect();
        let mut out = vec![T::zero(); cols];
        for term in &self.terms {
            let g = term.operator.rmatvec(&fc)?;
            for ((o, &d), &gk) in out.iter_mut().zip(&term.diagonal).zip(&g) {
                *o = *o + self.weight * (d.conj() * gk).re;
            }
        }
        Ok(out)
    }
}
