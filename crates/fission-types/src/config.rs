// ─────────────────────────────────────────────────────────────────────
// SCPN Fission Kernels — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use crate::constants::{
    BETA_PROPERTY, CHI_PROPERTY, D_BETA_D_TEMP_PROPERTY, D_CHI_D_TEMP_PROPERTY,
    D_NSF_D_TEMP_PROPERTY, NSF_PROPERTY,
};
use crate::state::VariableId;
use serde::{Deserialize, Serialize};

/// Construction parameters of one fission-source kernel instance.
/// Group indices are zero-based.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FissionKernelConfig {
    /// Group whose balance equation receives the source.
    pub group: usize,
    pub num_groups: usize,
    /// Flux variable of every group, indexed by group.
    pub group_fluxes: Vec<VariableId>,
    /// Temperature variable; when absent the temperature coupling is dropped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<VariableId>,
    #[serde(default)]
    pub sign: ResidualSign,
    /// Scale the source by the prompt fraction `1 - beta`.
    #[serde(default)]
    pub account_delayed: bool,
    #[serde(default)]
    pub properties: PropertyNames,
}

/// Sign applied uniformly to residual and Jacobian contributions.
///
/// `Negative` places the source on the left-hand side of the balance
/// equation (`R = ... - S`), which is the usual convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResidualSign {
    #[default]
    Negative,
    Positive,
}

impl ResidualSign {
    pub fn factor(self) -> f64 {
        match self {
            ResidualSign::Negative => -1.0,
            ResidualSign::Positive => 1.0,
        }
    }
}

/// Names under which the material system publishes the per-point arrays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyNames {
    #[serde(default = "default_nsf")]
    pub nsf: String,
    #[serde(default = "default_d_nsf_d_temp")]
    pub d_nsf_d_temp: String,
    #[serde(default = "default_chi")]
    pub chi: String,
    #[serde(default = "default_d_chi_d_temp")]
    pub d_chi_d_temp: String,
    #[serde(default = "default_beta")]
    pub beta: String,
    #[serde(default = "default_d_beta_d_temp")]
    pub d_beta_d_temp: String,
}

fn default_nsf() -> String {
    NSF_PROPERTY.to_string()
}
fn default_d_nsf_d_temp() -> String {
    D_NSF_D_TEMP_PROPERTY.to_string()
}
fn default_chi() -> String {
    CHI_PROPERTY.to_string()
}
fn default_d_chi_d_temp() -> String {
    D_CHI_D_TEMP_PROPERTY.to_string()
}
fn default_beta() -> String {
    BETA_PROPERTY.to_string()
}
fn default_d_beta_d_temp() -> String {
    D_BETA_D_TEMP_PROPERTY.to_string()
}

impl Default for PropertyNames {
    fn default() -> Self {
        PropertyNames {
            nsf: default_nsf(),
            d_nsf_d_temp: default_d_nsf_d_temp(),
            chi: default_chi(),
            d_chi_d_temp: default_d_chi_d_temp(),
            beta: default_beta(),
            d_beta_d_temp: default_d_beta_d_temp(),
        }
    }
}

impl PropertyNames {
    /// All names paired with their field label, in a fixed order.
    pub fn entries(&self) -> [(&'static str, &str); 6] {
        [
            ("nsf", &self.nsf),
            ("d_nsf_d_temp", &self.d_nsf_d_temp),
            ("chi", &self.chi),
            ("d_chi_d_temp", &self.d_chi_d_temp),
            ("beta", &self.beta),
            ("d_beta_d_temp", &self.d_beta_d_temp),
        ]
    }
}

impl FissionKernelConfig {
    /// Plain configuration: negative sign, default property names, no delayed accounting.
    pub fn new(group: usize, group_fluxes: Vec<VariableId>, temperature: Option<VariableId>) -> Self {
        FissionKernelConfig {
            group,
            num_groups: group_fluxes.len(),
            group_fluxes,
            temperature,
            sign: ResidualSign::default(),
            account_delayed: false,
            properties: PropertyNames::default(),
        }
    }

    /// Load from a JSON file.
    pub fn from_file(path: &str) -> crate::error::FissionResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn from_json_str(contents: &str) -> crate::error::FissionResult<Self> {
        let config: Self = serde_json::from_str(contents)?;
        Ok(config)
    }
}
