// ─────────────────────────────────────────────────────────────────────
// SCPN NUFFT Check — Mode Ordering
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Reconciliation between the natural basis order and the engine's mode
//! layout.
//!
//! The natural order of the trigonometric basis is the constant term
//! followed by harmonic pairs, labelled with signed frequencies
//! `[0, -1, +1, -2, +2, ...]` (negative for sine, positive for cosine).
//! The engine stores frequencies either centered (`-P/2 .. ceil(P/2)-1`)
//! or FFT-style (non-negative first, negatives wrapped to the end).
//!
//! For even `P` the unpaired frequency is `-P/2` in both conventions, so
//! the label sets always coincide and every permutation here is a
//! bijection.

use nufft_types::config::ModeOrder;

/// Signed frequency labels of the natural basis order, truncated to `p`.
pub fn natural_labels(p: usize) -> Vec<i64> {
    let mut labels = Vec::with_capacity(p);
    if p == 0 {
        return labels;
    }
    labels.push(0);
    let mut k = 1i64;
    while labels.len() < p {
        labels.push(-k);
        if labels.len() < p {
            labels.push(k);
        }
        k += 1;
    }
    labels
}

/// Position of frequency `k` in the natural order.
pub fn natural_index(k: i64) -> usize {
    match k {
        0 => 0,
        k if k < 0 => (2 * -k - 1) as usize,
        k => (2 * k) as usize,
    }
}

/// Ascending frequencies `-floor(p/2) ..= ceil(p/2) - 1`.
pub fn centered_frequencies(p: usize) -> Vec<i64> {
    let lo = -((p / 2) as i64);
    (0..p as i64).map(|i| lo + i).collect()
}

/// `0 ..= ceil(p/2) - 1` followed by `-floor(p/2) ..= -1`.
pub fn fft_style_frequencies(p: usize) -> Vec<i64> {
    let n_pos = (p + 1) / 2;
    (0..p)
        .map(|i| {
            if i < n_pos {
                i as i64
            } else {
                i as i64 - p as i64
            }
        })
        .collect()
}

/// Frequency stored at each array position for the given layout.
pub fn frequencies(p: usize, order: ModeOrder) -> Vec<i64> {
    match order {
        ModeOrder::Centered => centered_frequencies(p),
        ModeOrder::FftStyle => fft_style_frequencies(p),
    }
}

/// Array position of frequency `k` among `p` modes, if present.
pub fn mode_position(k: i64, p: usize, order: ModeOrder) -> Option<usize> {
    let half = (p / 2) as i64;
    let n_pos = ((p + 1) / 2) as i64;
    if k < -half || k >= n_pos {
        return None;
    }
    let pos = match order {
        ModeOrder::Centered => k + half,
        ModeOrder::FftStyle if k >= 0 => k,
        ModeOrder::FftStyle => p as i64 + k,
    };
    Some(pos as usize)
}

/// Stable ascending argsort.
pub fn argsort(labels: &[i64]) -> Vec<usize> {
    let mut idx: Vec<usize> = (0..labels.len()).collect();
    idx.sort_by_key(|&i| labels[i]);
    idx
}

/// Column gather taking natural order to ascending frequency order.
pub fn natural_to_centered(p: usize) -> Vec<usize> {
    argsort(&natural_labels(p))
}

/// Column gather taking natural order to the engine layout: entry `i` is
/// the natural index of the frequency stored at engine position `i`.
pub fn natural_to_engine(p: usize, order: ModeOrder) -> Vec<usize> {
    frequencies(p, order)
        .into_iter()
        .map(natural_index)
        .collect()
}

pub fn invert_permutation(perm: &[usize]) -> Vec<usize> {
    let mut inverse = vec![0; perm.len()];
    for (i, &p) in perm.iter().enumerate() {
        inverse[p] = i;
    }
    inverse
}

/// Tensor-product gather for row-major `(px, py)` mode grids:
/// `perm[i * ny + j] = perm_x[i] * ny + perm_y[j]`.
pub fn permutation_2d(perm_x: &[usize], perm_y: &[usize]) -> Vec<usize> {
    let ny = perm_y.len();
    let mut perm = Vec::with_capacity(perm_x.len() * ny);
    for &i in perm_x {
        for &j in perm_y {
            perm.push(i * ny + j);
        }
    }
    perm
}
