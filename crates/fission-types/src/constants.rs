// ─────────────────────────────────────────────────────────────────────
// SCPN Fission Kernels — Constants
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
/// Default material-property name of the nu-fission cross section.
pub const NSF_PROPERTY: &str = "nsf";

/// Default material-property name of d(nsf)/dT.
pub const D_NSF_D_TEMP_PROPERTY: &str = "d_nsf_d_temp";

/// Default material-property name of the fission spectrum.
pub const CHI_PROPERTY: &str = "chi";

/// Default material-property name of d(chi)/dT.
pub const D_CHI_D_TEMP_PROPERTY: &str = "d_chi_d_temp";

/// Default material-property name of the total delayed-neutron fraction.
/// Stored as a one-element array.
pub const BETA_PROPERTY: &str = "beta";

/// Default material-property name of d(beta)/dT.
pub const D_BETA_D_TEMP_PROPERTY: &str = "d_beta_d_temp";

/// Allowed deviation of sum(chi) from 1 before the library loader warns.
pub const SPECTRUM_NORMALIZATION_TOL: f64 = 1e-3;

/// Tolerance used to match branch keys ("900") against the `temp` list.
pub const BRANCH_TEMPERATURE_TOL: f64 = 1e-9;
