// ─────────────────────────────────────────────────────────────────────
// SCPN NUFFT Check — Diagnostics
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! NUFFT-backed linear operators and their check against explicit
//! trigonometric design matrices.

pub mod check;
pub mod compare;
pub mod operator;
pub mod plot;
