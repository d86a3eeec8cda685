// ─────────────────────────────────────────────────────────────────────
// SCPN NUFFT Check — Sample Points
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use crate::error::{NufftError, NufftResult};

/// Largest supported number of coordinate arrays.
pub const MAX_DIM: usize = 2;

/// Non-uniform sample locations: one coordinate array per dimension,
/// all of the same length N.
#[derive(Debug, Clone, PartialEq)]
pub struct SamplePoints<T> {
    coords: Vec<Vec<T>>,
}

impl<T: Copy> SamplePoints<T> {
    /// Validate and take ownership of the coordinate arrays.
    pub fn new(coords: Vec<Vec<T>>) -> NufftResult<Self> {
        if coords.is_empty() || coords.len() > MAX_DIM {
            return Err(NufftError::UnsupportedDimension(coords.len()));
        }
        let lengths: Vec<usize> = coords.iter().map(Vec::len).collect();
        if lengths.iter().any(|&n| n != lengths[0]) {
            return Err(NufftError::MismatchedPoints { lengths });
        }
        Ok(SamplePoints { coords })
    }

    pub fn from_slices(coords: &[&[T]]) -> NufftResult<Self> {
        Self::new(coords.iter().map(|c| c.to_vec()).collect())
    }

    pub fn one_d(x: Vec<T>) -> Self {
        SamplePoints { coords: vec![x] }
    }

    pub fn two_d(x: Vec<T>, y: Vec<T>) -> NufftResult<Self> {
        Self::new(vec![x, y])
    }

    pub fn dim(&self) -> usize {
        self.coords.len()
    }

    /// Number of points N.
    pub fn len(&self) -> usize {
        self.coords[0].len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn axis(&self, d: usize) -> &[T] {
        &self.coords[d]
    }

    pub fn axes(&self) -> &[Vec<T>] {
        &self.coords
    }

    /// Copy with one axis transformed pointwise.
    pub fn map_axis(&self, d: usize, f: impl Fn(T) -> T) -> Self {
        let mut coords = self.coords.clone();
        for v in coords[d].iter_mut() {
            *v = f(*v);
        }
        SamplePoints { coords }
    }
}

/// `n` evenly spaced values over [start, stop], endpoint included.
/// Matches `numpy.linspace(start, stop, n)`.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { stop } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// Flattened `numpy.meshgrid(x, y, indexing="ij")`: point `ix * ny + iy`
/// is `(x[ix], y[iy])`.
pub fn meshgrid_ij<T: Copy>(x: &[T], y: &[T]) -> (Vec<T>, Vec<T>) {
    let n = x.len() * y.len();
    let mut xg = Vec::with_capacity(n);
    let mut yg = Vec::with_capacity(n);
    for &xv in x {
        for &yv in y {
            xg.push(xv);
            yg.push(yv);
        }
    }
    (xg, yg)
}
