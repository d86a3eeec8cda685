// ─────────────────────────────────────────────────────────────────────
// SCPN NUFFT Check — Constants
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
/// Requested relative accuracy of a transform when none is configured.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Fine-grid oversampling factor sigma.
pub const DEFAULT_UPSAMPLING: f64 = 2.0;

/// Spreading kernel width bounds, in fine-grid cells.
pub const MIN_KERNEL_WIDTH: usize = 2;
pub const MAX_KERNEL_WIDTH: usize = 16;

/// ES kernel shape parameter per unit width at sigma = 2.
pub const ES_BETA_PER_WIDTH: f64 = 2.30;

/// Shape-parameter safety factor for sigma != 2.
pub const ES_BETA_GAMMA: f64 = 0.97;

/// Smallest tolerance worth asking of a single-precision transform.
pub const SINGLE_MIN_TOLERANCE: f64 = f32::EPSILON as f64;

/// Smallest tolerance worth asking of a double-precision transform.
pub const DOUBLE_MIN_TOLERANCE: f64 = 1e-15;

/// Output file stem for the comparison figures.
pub const FIGURE_STEM: &str = "check_design_matrix";
