// ─────────────────────────────────────────────────────────────────────
// SCPN NUFFT Check — Math
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Numerical primitives for the NUFFT design-matrix check.

pub mod design;
pub mod fft;
pub mod kernel;
pub mod linop;
pub mod modes;
pub mod plan;
pub mod scalar;
