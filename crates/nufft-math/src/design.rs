//! Explicit ("as-is") trigonometric design matrices.
//!
//! Brute-force evaluation of the basis `{1, sin 2x, cos 2x, sin 4x, cos 4x, ...}`
//! used as ground truth for the transform-based operators. Evaluated at `x/2`
//! (see [`halved`]) the columns become `{1, sin x, cos x, sin 2x, cos 2x, ...}`,
//! i.e. the natural order labelled by [`crate::modes::natural_labels`].

use std::ops::Mul;

use ndarray::Array2;
use nufft_types::config::ModeOrder;
use nufft_types::error::{NufftError, NufftResult};
use rustfft::num_traits::Zero;

use crate::modes::{natural_to_engine, permutation_2d};
use crate::scalar::Real;

/// N×P design matrix: column 0 is ones; column `j` is `cos(j·x)` for even
/// `j` and `sin((j+1)·x)` for odd `j`.
pub fn design_matrix_as_is<T: Real>(xs: &[T], p: usize) -> NufftResult<Array2<T>> {
    if p == 0 {
        return Err(NufftError::InvalidModes(vec![p]));
    }
    let mut x = Array2::zeros((xs.len(), p));
    for (i, &xi) in xs.iter().enumerate() {
        x[[i, 0]] = T::one();
        for j in 1..p {
            x[[i, j]] = if j % 2 == 0 {
                (T::narrow(j as f64) * xi).cos()
            } else {
                (T::narrow((j + 1) as f64) * xi).sin()
            };
        }
    }
    Ok(x)
}

pub fn halved<T: Real>(xs: &[T]) -> Vec<T> {
    let half = T::narrow(0.5);
    xs.iter().map(|&x| x * half).collect()
}

/// Gather columns: output column `c` is input column `perm[c]`.
pub fn reorder_columns<A: Copy + Zero>(m: &Array2<A>, perm: &[usize]) -> NufftResult<Array2<A>> {
    let (rows, cols) = m.dim();
    if perm.len() != cols {
        return Err(NufftError::DimensionMismatch {
            expected: cols,
            got: perm.len(),
        });
    }
    if let Some(&bad) = perm.iter().find(|&&p| p >= cols) {
        return Err(NufftError::DimensionMismatch {
            expected: cols,
            got: bad,
        });
    }
    let mut out = Array2::zeros((rows, cols));
    for (c, &src) in perm.iter().enumerate() {
        for r in 0..rows {
            out[[r, c]] = m[[r, src]];
        }
    }
    Ok(out)
}

/// Kronecker product: entry `[ia*nb + ib, ja*mb + jb] = a[ia, ja] * b[ib, jb]`.
pub fn kron<A: Copy + Zero + Mul<Output = A>>(a: &Array2<A>, b: &Array2<A>) -> Array2<A> {
    let (na, ma) = a.dim();
    let (nb, mb) = b.dim();
    let mut out = Array2::zeros((na * nb, ma * mb));
    for ia in 0..na {
        for ja in 0..ma {
            let av = a[[ia, ja]];
            for ib in 0..nb {
                for jb in 0..mb {
                    out[[ia * nb + ib, ja * mb + jb]] = av * b[[ib, jb]];
                }
            }
        }
    }
    out
}

/// `design_matrix_as_is(x/2, p)` with columns in the engine layout.
pub fn engine_design_matrix<T: Real>(
    xs: &[T],
    p: usize,
    order: ModeOrder,
) -> NufftResult<Array2<T>> {
    let natural = design_matrix_as_is(&halved(xs), p)?;
    reorder_columns(&natural, &natural_to_engine(p, order))
}

/// Tensor-product ground truth on the ij grid of `x` and `y`: the Kronecker
/// product of the two natural-order design matrices, columns gathered into
/// the row-major `(px, py)` engine layout.
pub fn engine_design_matrix_2d<T: Real>(
    x: &[T],
    y: &[T],
    modes: [usize; 2],
    order: ModeOrder,
) -> NufftResult<Array2<T>> {
    let dx = design_matrix_as_is(&halved(x), modes[0])?;
    let dy = design_matrix_as_is(&halved(y), modes[1])?;
    let perm = permutation_2d(
        &natural_to_engine(modes[0], order),
        &natural_to_engine(modes[1], order),
    );
    reorder_columns(&kron(&dx, &dy), &perm)
}
