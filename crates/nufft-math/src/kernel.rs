// ─────────────────────────────────────────────────────────────────────
// SCPN NUFFT Check — Spreading Kernel
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Exponential-of-semicircle spreading kernel.
//!
//!   phi(z) = exp(beta * (sqrt(1 - z^2) - 1)),   |z| <= 1
//!
//! supported on `width` fine-grid cells. Width and shape follow from the
//! requested tolerance and the oversampling factor sigma:
//!   sigma = 2:  width = ceil(log10(1/eps)) + 1,  beta = 2.30 * width
//!   otherwise:  width = ceil(-ln(eps) / (pi * sqrt(1 - 1/sigma))),
//!               beta  = 0.97 * pi * (1 - 1/(2 sigma)) * width
//!
//! The deconvolution factors are the kernel's Fourier series on the fine
//! grid, integrated with Gauss-Legendre quadrature.

use std::f64::consts::PI;

use nufft_types::constants::{ES_BETA_GAMMA, ES_BETA_PER_WIDTH, MAX_KERNEL_WIDTH, MIN_KERNEL_WIDTH};

const NEWTON_MAX_ITER: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EsKernel {
    /// Support in fine-grid cells.
    pub width: usize,
    pub beta: f64,
}

impl EsKernel {
    pub fn for_tolerance(tolerance: f64, upsampling: f64) -> Self {
        let sigma_is_two = (upsampling - 2.0).abs() < 1e-12;
        let raw = if sigma_is_two {
            // Decade tolerances (1e-6) must not round up to the next width.
            (-tolerance.log10() - 1e-9).ceil() + 1.0
        } else {
            (-tolerance.ln() / (PI * (1.0 - 1.0 / upsampling).sqrt())).ceil()
        };
        let width = (raw.max(0.0) as usize).clamp(MIN_KERNEL_WIDTH, MAX_KERNEL_WIDTH);
        let beta = if sigma_is_two {
            ES_BETA_PER_WIDTH * width as f64
        } else {
            ES_BETA_GAMMA * PI * (1.0 - 1.0 / (2.0 * upsampling)) * width as f64
        };
        EsKernel { width, beta }
    }

    pub fn half_width(&self) -> f64 {
        self.width as f64 / 2.0
    }

    pub fn eval(&self, z: f64) -> f64 {
        if z.abs() > 1.0 {
            return 0.0;
        }
        (self.beta * ((1.0 - z * z).sqrt() - 1.0)).exp()
    }

    /// Fill `out[..width]` with the weights of cells `l0 .. l0 + width`
    /// around fractional grid position `t`, and return `l0`.
    pub fn weights(&self, t: f64, out: &mut [f64]) -> i64 {
        let hw = self.half_width();
        let l0 = (t - hw).ceil();
        for (i, w) in out.iter_mut().take(self.width).enumerate() {
            *w = self.eval((l0 + i as f64 - t) / hw);
        }
        l0 as i64
    }

    /// Fourier series of the kernel on a fine grid of `n_fine` cells,
    /// evaluated at each integer frequency in `freqs`:
    ///   p(k) = (w/2) * integral_{-1}^{1} phi(z) cos(k w pi z / n_fine) dz
    pub fn fourier_series(&self, n_fine: usize, freqs: &[i64]) -> Vec<f64> {
        let (nodes, weights) = gauss_legendre(4 + 3 * self.width);
        let hw = self.half_width();
        let phi: Vec<f64> = nodes.iter().map(|&z| self.eval(z)).collect();
        let scale = 2.0 * PI * hw / n_fine as f64;
        freqs
            .iter()
            .map(|&k| {
                let arg = k as f64 * scale;
                let sum: f64 = nodes
                    .iter()
                    .zip(&weights)
                    .zip(&phi)
                    .map(|((&z, &w), &p)| w * p * (arg * z).cos())
                    .sum();
                hw * sum
            })
            .collect()
    }
}

/// Smallest even 2·3·5-smooth grid size holding `modes` at oversampling
/// `upsampling` and at least two kernel widths.
pub fn fine_grid_size(modes: usize, upsampling: f64, width: usize) -> usize {
    let target = ((upsampling * modes as f64).ceil() as usize).max(2 * width);
    let mut n = target + target % 2;
    while !is_smooth(n) {
        n += 2;
    }
    n
}

fn is_smooth(mut n: usize) -> bool {
    for f in [2, 3, 5] {
        while n % f == 0 {
            n /= f;
        }
    }
    n == 1
}

/// Gauss-Legendre nodes (ascending) and weights on [-1, 1].
pub fn gauss_legendre(n: usize) -> (Vec<f64>, Vec<f64>) {
    let mut nodes = vec![0.0; n];
    let mut weights = vec![0.0; n];
    for i in 0..(n + 1) / 2 {
        let mut z = (PI * (i as f64 + 0.75) / (n as f64 + 0.5)).cos();
        for _ in 0..NEWTON_MAX_ITER {
            let (p, dp) = legendre(n, z);
            let dz = p / dp;
            z -= dz;
            if dz.abs() < 1e-15 {
                break;
            }
        }
        let (_, dp) = legendre(n, z);
        let w = 2.0 / ((1.0 - z * z) * dp * dp);
        nodes[i] = -z;
        nodes[n - 1 - i] = z;
        weights[i] = w;
        weights[n - 1 - i] = w;
    }
    (nodes, weights)
}

/// P_n(z) and P_n'(z) by the three-term recurrence.
fn legendre(n: usize, z: f64) -> (f64, f64) {
    if n == 0 {
        return (1.0, 0.0);
    }
    let mut p_prev = 1.0;
    let mut p = z;
    for j in 2..=n {
        let jf = j as f64;
        let next = ((2.0 * jf - 1.0) * z * p - (jf - 1.0) * p_prev) / jf;
        p_prev = p;
        p = next;
    }
    let dp = n as f64 * (z * p - p_prev) / (z * z - 1.0);
    (p, dp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;

    #[test]
    fn test_width_from_tolerance() {
        assert_eq!(EsKernel::for_tolerance(1e-6, 2.0).width, 7);
        assert_eq!(EsKernel::for_tolerance(1e-3, 2.0).width, 4);
        assert_eq!(EsKernel::for_tolerance(1e-20, 2.0).width, MAX_KERNEL_WIDTH);
        assert_eq!(EsKernel::for_tolerance(0.5, 2.0).width, MIN_KERNEL_WIDTH);
        let k = EsKernel::for_tolerance(1e-6, 2.0);
        assert!((k.beta - 2.30 * 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_low_upsampling_needs_wider_kernel() {
        let narrow = EsKernel::for_tolerance(1e-6, 2.0);
        let wide = EsKernel::for_tolerance(1e-6, 1.25);
        assert!(wide.width > narrow.width);
    }

    #[test]
    fn test_kernel_shape() {
        let k = EsKernel::for_tolerance(1e-6, 2.0);
        assert!((k.eval(0.0) - 1.0).abs() < 1e-15);
        assert!((k.eval(0.4) - k.eval(-0.4)).abs() < 1e-15);
        assert!(k.eval(1.0) < 1e-6);
        assert_eq!(k.eval(1.5), 0.0);
    }

    #[test]
    fn test_weights_window_covers_point() {
        let k = EsKernel::for_tolerance(1e-6, 2.0);
        let mut w = vec![0.0; k.width];
        let t = 10.3;
        let l0 = k.weights(t, &mut w);
        assert!(l0 as f64 >= t - k.half_width());
        assert!((l0 + k.width as i64 - 1) as f64 <= t + k.half_width());
        let peak = w.iter().cloned().fold(0.0_f64, f64::max);
        assert!(peak > 0.9);
    }

    #[test]
    fn test_gauss_legendre_exact_for_polynomials() {
        let n = 8;
        let (x, w) = gauss_legendre(n);
        assert!((w.iter().sum::<f64>() - 2.0).abs() < 1e-13);
        for degree in 0..(2 * n) {
            let integral: f64 = x.iter().zip(&w).map(|(&xi, &wi)| wi * xi.powi(degree as i32)).sum();
            let exact = if degree % 2 == 1 { 0.0 } else { 2.0 / (degree as f64 + 1.0) };
            assert!((integral - exact).abs() < 1e-13, "degree {degree}: {integral} vs {exact}");
        }
        for pair in x.windows(2) {
            assert!(pair[1] > pair[0]);
        }
    }

    #[test]
    fn test_fourier_series_matches_grid_sum() {
        // sum_l psi(l h - x) e^{i k l h} = e^{i k x} p(k) for |k| well below n/2.
        let k = EsKernel::for_tolerance(1e-6, 2.0);
        let n = fine_grid_size(16, 2.0, k.width);
        let h = 2.0 * PI / n as f64;
        let x = 1.234;
        let freqs: Vec<i64> = (-8..8).collect();
        let p = k.fourier_series(n, &freqs);
        let mut w = vec![0.0; k.width];
        let l0 = k.weights(x / h, &mut w);
        for (idx, &freq) in freqs.iter().enumerate() {
            let mut sum = Complex64::new(0.0, 0.0);
            for (i, &wi) in w.iter().enumerate() {
                let l = (l0 + i as i64) as f64;
                sum += Complex64::from_polar(wi, freq as f64 * l * h);
            }
            let expected = Complex64::from_polar(p[idx], freq as f64 * x);
            assert!(
                (sum - expected).norm() < 1e-5 * p[idx],
                "k = {freq}: {sum} vs {expected}"
            );
        }
    }

    #[test]
    fn test_fine_grid_is_even_and_smooth() {
        for m in 1..200 {
            let n = fine_grid_size(m, 2.0, 7);
            assert_eq!(n % 2, 0);
            assert!(n >= 2 * m && n >= 14);
            assert!(is_smooth(n));
        }
        assert_eq!(fine_grid_size(7, 2.0, 7), 16);
    }
}
