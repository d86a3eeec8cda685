//! Element traits for the transform engine and the operator layer.

use std::fmt::Debug;
use std::ops::{Add, Mul, Sub};

use nufft_types::config::Precision;
use num_complex::{Complex, Complex64};
use rand::Rng;
use rand_distr::StandardNormal;
use rustfft::num_traits::{Float, One, Zero};
use rustfft::FftNum;

/// Real working type of a transform (`f32` or `f64`).
pub trait Real: FftNum + Float {
    const PRECISION: Precision;

    /// Round an `f64` constant or weight into the working type.
    fn narrow(v: f64) -> Self;

    fn widen(self) -> f64;
}

impl Real for f32 {
    const PRECISION: Precision = Precision::Single;

    fn narrow(v: f64) -> Self {
        v as f32
    }

    fn widen(self) -> f64 {
        self as f64
    }
}

impl Real for f64 {
    const PRECISION: Precision = Precision::Double;

    fn narrow(v: f64) -> Self {
        v
    }

    fn widen(self) -> f64 {
        self
    }
}

/// Matrix element of a linear operator: real or complex.
pub trait Scalar:
    Copy
    + Zero
    + One
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Debug
    + Send
    + Sync
    + 'static
{
    fn conjugate(self) -> Self;

    fn to_c64(self) -> Complex64;

    /// Standard-normal draw (independent real and imaginary parts).
    fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self;
}

macro_rules! impl_scalar {
    ($($t:ty),*) => {
        $(
            impl Scalar for $t {
                fn conjugate(self) -> Self {
                    self
                }

                fn to_c64(self) -> Complex64 {
                    Complex64::new(self.widen(), 0.0)
                }

                fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
                    <$t>::narrow(rng.sample::<f64, _>(StandardNormal))
                }
            }

            impl Scalar for Complex<$t> {
                fn conjugate(self) -> Self {
                    self.conj()
                }

                fn to_c64(self) -> Complex64 {
                    Complex64::new(self.re.widen(), self.im.widen())
                }

                fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
                    Complex::new(
                        <$t>::narrow(rng.sample::<f64, _>(StandardNormal)),
                        <$t>::narrow(rng.sample::<f64, _>(StandardNormal)),
                    )
                }
            }
        )*
    };
}

impl_scalar!(f32, f64);

/// Widen a complex buffer to double precision.
pub fn widen_complex<T: Real>(values: &[Complex<T>]) -> Vec<Complex64> {
    values
        .iter()
        .map(|c| Complex64::new(c.re.widen(), c.im.widen()))
        .collect()
}

/// Round a double-precision complex buffer into the working type.
pub fn narrow_complex<T: Real>(values: &[Complex64]) -> Vec<Complex<T>> {
    values
        .iter()
        .map(|c| Complex::new(T::narrow(c.re), T::narrow(c.im)))
        .collect()
}
