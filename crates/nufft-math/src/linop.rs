// ─────────────────────────────────────────────────────────────────────
// SCPN NUFFT Check — Linear Operators
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Minimal linear-operator interface: forward and adjoint application,
//! plus dense materialization for small problems.

use ndarray::Array2;
use nufft_types::error::{NufftError, NufftResult};
use num_complex::Complex64;
use rand::Rng;

use crate::scalar::Scalar;

/// A linear map `A: Elem^cols → Elem^rows` with an adjoint.
pub trait LinearOperator {
    type Elem: Scalar;

    /// `(rows, cols)`.
    fn shape(&self) -> (usize, usize);

    /// True when the matrix is stored explicitly.
    fn is_explicit(&self) -> bool {
        false
    }

    /// `A x`.
    fn matvec(&self, x: &[Self::Elem]) -> NufftResult<Vec<Self::Elem>>;

    /// `Aᴴ y`.
    fn rmatvec(&self, y: &[Self::Elem]) -> NufftResult<Vec<Self::Elem>>;

    /// Materialize `A` column by column from basis vectors.
    fn to_dense(&self) -> NufftResult<Array2<Self::Elem>> {
        let (rows, cols) = self.shape();
        materialize(rows, cols, |e| self.matvec(e))
    }

    /// Materialize `Aᴴ`, shape `(cols, rows)`.
    fn to_dense_adjoint(&self) -> NufftResult<Array2<Self::Elem>> {
        let (rows, cols) = self.shape();
        materialize(cols, rows, |e| self.rmatvec(e))
    }
}

fn materialize<A: Scalar>(
    rows: usize,
    cols: usize,
    apply: impl Fn(&[A]) -> NufftResult<Vec<A>>,
) -> NufftResult<Array2<A>> {
    let mut dense = Array2::zeros((rows, cols));
    let mut basis = vec![A::zero(); cols];
    for j in 0..cols {
        basis[j] = A::one();
        let column = apply(&basis)?;
        check_length(rows, column.len())?;
        for (i, &v) in column.iter().enumerate() {
            dense[[i, j]] = v;
        }
        basis[j] = A::zero();
    }
    Ok(dense)
}

fn check_length(expected: usize, got: usize) -> NufftResult<()> {
    if expected != got {
        return Err(NufftError::BufferLength { expected, got });
    }
    Ok(())
}

/// Operator backed by an explicit matrix.
#[derive(Debug, Clone)]
pub struct DenseOperator<A: Scalar> {
    matrix: Array2<A>,
}

impl<A: Scalar> DenseOperator<A> {
    pub fn new(matrix: Array2<A>) -> Self {
        DenseOperator { matrix }
    }

    pub fn matrix(&self) -> &Array2<A> {
        &self.matrix
    }
}

impl<A: Scalar> LinearOperator for DenseOperator<A> {
    type Elem = A;

    fn shape(&self) -> (usize, usize) {
        self.matrix.dim()
    }

    fn is_explicit(&self) -> bool {
        true
    }

    fn matvec(&self, x: &[A]) -> NufftResult<Vec<A>> {
        check_length(self.matrix.ncols(), x.len())?;
        Ok(self
            .matrix
            .rows()
            .into_iter()
            .map(|row| row.iter().zip(x).fold(A::zero(), |acc, (&a, &b)| acc + a * b))
            .collect())
    }

    fn rmatvec(&self, y: &[A]) -> NufftResult<Vec<A>> {
        check_length(self.matrix.nrows(), y.len())?;
        Ok(self
            .matrix
            .columns()
            .into_iter()
            .map(|col| {
                col.iter()
                    .zip(y)
                    .fold(A::zero(), |acc, (&a, &b)| acc + a.conjugate() * b)
            })
            .collect())
    }

    fn to_dense(&self) -> NufftResult<Array2<A>> {
        Ok(self.matrix.clone())
    }
}

/// Relative mismatch between `⟨A x, y⟩` and `⟨x, Aᴴ y⟩` for random
/// standard-normal `x`, `y`. Zero (up to rounding) for a consistent pair.
pub fn dot_test<O, R>(op: &O, rng: &mut R) -> NufftResult<f64>
where
    O: LinearOperator + ?Sized,
    R: Rng + ?Sized,
{
    let (rows, cols) = op.shape();
    let x: Vec<O::Elem> = (0..cols).map(|_| O::Elem::sample(rng)).collect();
    let y: Vec<O::Elem> = (0..rows).map(|_| O::Elem::sample(rng)).collect();
    let ax = op.matvec(&x)?;
    let ahy = op.rmatvec(&y)?;
    check_length(rows, ax.len())?;
    check_length(cols, ahy.len())?;

    let inner = |a: &[O::Elem], b: &[O::Elem]| -> Complex64 {
        a.iter()
            .zip(b)
            .map(|(&u, &v)| u.to_c64().conj() * v.to_c64())
            .sum()
    };
    let lhs = inner(&ax, &y);
    let rhs = inner(&x, &ahy);
    let scale = lhs.norm().max(rhs.norm());
    if scale == 0.0 {
        return Ok(0.0);
    }
    Ok((lhs - rhs).norm() / scale)
}
