// ─────────────────────────────────────────────────────────────────────
// SCPN Fission Kernels — State
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use crate::error::{FissionError, FissionResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric identifier of a solution variable, as handed out by the assembler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariableId(pub u32);

impl fmt::Display for VariableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Borrowed view of everything the fission source reads at one quadrature point.
///
/// All per-group slices have the same length, checked once in [`FissionQpData::new`].
/// The view never owns field data; it lives for a single evaluation call.
#[derive(Debug, Clone, Copy)]
pub struct FissionQpData<'a> {
    nsf: &'a [f64],
    d_nsf_d_temp: &'a [f64],
    chi: &'a [f64],
    d_chi_d_temp: &'a [f64],
    flux: &'a [f64],
    temperature: f64,
    beta: f64,
    d_beta_d_temp: f64,
}

impl<'a> FissionQpData<'a> {
    /// Bundle per-group values for `num_groups` groups.
    ///
    /// Delayed-neutron data defaults to `beta = 0`, `d_beta_d_temp = 0`.
    pub fn new(
        num_groups: usize,
        nsf: &'a [f64],
        d_nsf_d_temp: &'a [f64],
        chi: &'a [f64],
        d_chi_d_temp: &'a [f64],
        flux: &'a [f64],
        temperature: f64,
    ) -> FissionResult<Self> {
        let tables: [(&str, usize); 5] = [
            ("nsf", nsf.len()),
            ("d_nsf_d_temp", d_nsf_d_temp.len()),
            ("chi", chi.len()),
            ("d_chi_d_temp", d_chi_d_temp.len()),
            ("flux", flux.len()),
        ];
        for (table, found) in tables {
            if found != num_groups {
                return Err(FissionError::TableSizeMismatch {
                    table: table.to_string(),
                    expected: num_groups,
                    found,
                });
            }
        }
        Ok(FissionQpData {
            nsf,
            d_nsf_d_temp,
            chi,
            d_chi_d_temp,
            flux,
            temperature,
            beta: 0.0,
            d_beta_d_temp: 0.0,
        })
    }

    /// Attach the total delayed-neutron fraction and its temperature derivative.
    pub fn with_delayed(mut self, beta: f64, d_beta_d_temp: f64) -> Self {
        self.beta = beta;
        self.d_beta_d_temp = d_beta_d_temp;
        self
    }

    pub fn num_groups(&self) -> usize {
        self.flux.len()
    }

    pub fn nsf(&self) -> &'a [f64] {
        self.nsf
    }

    pub fn d_nsf_d_temp(&self) -> &'a [f64] {
        self.d_nsf_d_temp
    }

    pub fn chi(&self) -> &'a [f64] {
        self.chi
    }

    pub fn d_chi_d_temp(&self) -> &'a [f64] {
        self.d_chi_d_temp
    }

    pub fn flux(&self) -> &'a [f64] {
        self.flux
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }

    pub fn d_beta_d_temp(&self) -> f64 {
        self.d_beta_d_temp
    }
}
