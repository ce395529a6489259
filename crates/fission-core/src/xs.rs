// ─────────────────────────────────────────────────────────────────────
// SCPN Fission Kernels — Group Constant Library
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Temperature-branched multigroup constants.
//!
//! Reads the JSON written by the cross-section extraction tooling:
//!
//! ```text
//! { "fuel": { "temp": [600, 900],
//!             "600": { "NSF": [...], "CHI_T": [...], "BETA_EFF": [...], ... },
//!             "900": { ... } } }
//! ```
//!
//! Only the fission quantities are kept; other entries (REMXS, DIFFCOEF, ...)
//! are ignored. Values and temperature derivatives at a point come from
//! piecewise-linear interpolation between branches.

use crate::properties::PropertyStore;
use fission_math::interp::{check_abscissae, linear_rows_with_slope, linear_with_slope};
use fission_types::config::PropertyNames;
use fission_types::constants::{BRANCH_TEMPERATURE_TOL, SPECTRUM_NORMALIZATION_TOL};
use fission_types::error::{FissionError, FissionResult};
use log::{debug, warn};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How branch data is sampled in temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interpolation {
    /// First branch only; all temperature derivatives are zero.
    None,
    #[default]
    Linear,
}

#[derive(Debug, Deserialize)]
struct RawMaterial {
    temp: Vec<f64>,
    #[serde(flatten)]
    branches: BTreeMap<String, RawBranch>,
}

#[derive(Debug, Deserialize)]
struct RawBranch {
    #[serde(rename = "NSF")]
    nsf: Vec<f64>,
    #[serde(rename = "CHI_T", alias = "CHI")]
    chi: Vec<f64>,
    /// Per precursor group; summed into the total delayed fraction.
    #[serde(rename = "BETA_EFF", default)]
    beta_eff: Vec<f64>,
}

/// Fission constants of one material, one row per temperature branch.
#[derive(Debug, Clone)]
pub struct MaterialXs {
    name: String,
    temperatures: Vec<f64>,
    nsf: Array2<f64>,
    chi: Array2<f64>,
    beta: Array1<f64>,
}

/// Fission constants and their temperature derivatives at one temperature.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluatedXs {
    pub nsf: Array1<f64>,
    pub d_nsf_d_temp: Array1<f64>,
    pub chi: Array1<f64>,
    pub d_chi_d_temp: Array1<f64>,
    pub beta: f64,
    pub d_beta_d_temp: f64,
}

impl MaterialXs {
    /// Build from tables shaped `[n_temperatures, n_groups]` and a total
    /// delayed fraction per branch.
    pub fn from_tables(
        name: &str,
        temperatures: Vec<f64>,
        nsf: Array2<f64>,
        chi: Array2<f64>,
        beta: Array1<f64>,
    ) -> FissionResult<Self> {
        check_abscissae(&temperatures)
            .map_err(|e| FissionError::InvalidLibrary(format!("material `{name}`: {e}")))?;
        let n_temps = temperatures.len();
        let n_groups = nsf.ncols();
        if n_groups == 0 {
            return Err(FissionError::InvalidLibrary(format!(
                "material `{name}` has no energy groups"
            )));
        }
        let shapes = [
            ("NSF", nsf.dim(), (n_temps, n_groups)),
            ("CHI_T", chi.dim(), (n_temps, n_groups)),
            ("BETA_EFF", (beta.len(), n_groups), (n_temps, n_groups)),
        ];
        for (table, found, expected) in shapes {
            if found != expected {
                return Err(FissionError::InvalidLibrary(format!(
                    "material `{name}`: {table} has shape {found:?}, expected {expected:?}"
                )));
            }
        }

        for (t, row) in temperatures.iter().zip(chi.rows()) {
            let total: f64 = row.sum();
            if total != 0.0 && (total - 1.0).abs() > SPECTRUM_NORMALIZATION_TOL {
                warn!(
                    "event=xs_spectrum_unnormalized module=xs material={name} temperature={t} sum_chi={total}"
                );
            }
        }

        Ok(MaterialXs {
            name: name.to_string(),
            temperatures,
            nsf,
            chi,
            beta,
        })
    }

    fn from_raw(name: &str, raw: RawMaterial) -> FissionResult<Self> {
        let mut keyed = Vec::with_capacity(raw.branches.len());
        for (key, branch) in raw.branches {
            let t: f64 = key.trim().parse().map_err(|_| {
                FissionError::InvalidLibrary(format!(
                    "material `{name}`: branch key `{key}` is not a temperature"
                ))
            })?;
            keyed.push((t, branch));
        }

        // Branches not listed in `temp` are ignored.
        let mut listed = Vec::with_capacity(raw.temp.len());
        for &t in &raw.temp {
            let (_, branch) = keyed
                .iter()
                .find(|(k, _)| (k - t).abs() <= BRANCH_TEMPERATURE_TOL * t.abs().max(1.0))
                .ok_or_else(|| {
                    FissionError::InvalidLibrary(format!(
                        "material `{name}`: no branch data for temperature {t}"
                    ))
                })?;
            listed.push((t, branch));
        }

        let n_temps = listed.len();
        let n_groups = listed.first().map(|(_, b)| b.nsf.len()).unwrap_or(0);
        let mut nsf = Array2::<f64>::zeros((n_temps, n_groups));
        let mut chi = Array2::<f64>::zeros((n_temps, n_groups));
        let mut beta = Array1::<f64>::zeros(n_temps);
        let mut with_delayed = 0usize;

        for (i, &(t, branch)) in listed.iter().enumerate() {
            for (table, len) in [("NSF", branch.nsf.len()), ("CHI_T", branch.chi.len())] {
                if len != n_groups {
                    return Err(FissionError::InvalidLibrary(format!(
                        "material `{name}` at {t}: {table} has {len} groups, expected {n_groups}"
                    )));
                }
            }
            nsf.row_mut(i).assign(&Array1::from(branch.nsf.clone()));
            chi.row_mut(i).assign(&Array1::from(branch.chi.clone()));
            beta[i] = branch.beta_eff.iter().sum::<f64>();
            if !branch.beta_eff.is_empty() {
                with_delayed += 1;
            }
        }
        if with_delayed != 0 && with_delayed != n_temps {
            return Err(FissionError::InvalidLibrary(format!(
                "material `{name}`: BETA_EFF given for {with_delayed} of {n_temps} branches"
            )));
        }

        Self::from_tables(name, raw.temp, nsf, chi, beta)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn temperatures(&self) -> &[f64] {
        &self.temperatures
    }

    pub fn num_groups(&self) -> usize {
        self.nsf.ncols()
    }

    /// Sample the fission constants at `temperature`.
    pub fn evaluate(&self, temperature: f64, interpolation: Interpolation) -> EvaluatedXs {
        match interpolation {
            Interpolation::None => {
                let zeros = Array1::<f64>::zeros(self.num_groups());
                EvaluatedXs {
                    nsf: self.nsf.row(0).to_owned(),
                    d_nsf_d_temp: zeros.clone(),
                    chi: self.chi.row(0).to_owned(),
                    d_chi_d_temp: zeros,
                    beta: self.beta[0],
                    d_beta_d_temp: 0.0,
                }
            }
            Interpolation::Linear => {
                let t = &self.temperatures;
                let (nsf, d_nsf_d_temp) = linear_rows_with_slope(t, self.nsf.view(), temperature);
                let (chi, d_chi_d_temp) = linear_rows_with_slope(t, self.chi.view(), temperature);
                let (beta, d_beta_d_temp) = linear_with_slope(t, self.beta.view(), temperature);
                EvaluatedXs {
                    nsf,
                    d_nsf_d_temp,
                    chi,
                    d_chi_d_temp,
                    beta,
                    d_beta_d_temp,
                }
            }
        }
    }

    /// Publish the sampled constants into `store` under `names`.
    pub fn write_properties(
        &self,
        store: &mut PropertyStore,
        names: &PropertyNames,
        temperature: f64,
        interpolation: Interpolation,
    ) {
        let xs = self.evaluate(temperature, interpolation);
        store.set_iter(&names.nsf, xs.nsf.iter().copied());
        store.set_iter(&names.d_nsf_d_temp, xs.d_nsf_d_temp.iter().copied());
        store.set_iter(&names.chi, xs.chi.iter().copied());
        store.set_iter(&names.d_chi_d_temp, xs.d_chi_d_temp.iter().copied());
        store.set_scalar(&names.beta, xs.beta);
        store.set_scalar(&names.d_beta_d_temp, xs.d_beta_d_temp);
    }
}

/// All materials of one group-constant file.
#[derive(Debug, Clone, Default)]
pub struct GroupConstantLibrary {
    materials: BTreeMap<String, MaterialXs>,
}

impl GroupConstantLibrary {
    /// Load from a JSON file.
    pub fn from_file(path: &str) -> FissionResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn from_json_str(contents: &str) -> FissionResult<Self> {
        let raw: BTreeMap<String, RawMaterial> = serde_json::from_str(contents)?;
        if raw.is_empty() {
            return Err(FissionError::InvalidLibrary(
                "library contains no materials".to_string(),
            ));
        }
        let mut materials = BTreeMap::new();
        for (name, material) in raw {
            let xs = MaterialXs::from_raw(&name, material)?;
            debug!(
                "event=xs_load module=xs material={} groups={} branches={}",
                name,
                xs.num_groups(),
                xs.temperatures.len()
            );
            materials.insert(name, xs);
        }
        Ok(GroupConstantLibrary { materials })
    }

    pub fn insert(&mut self, material: MaterialXs) {
        self.materials.insert(material.name.clone(), material);
    }

    pub fn material(&self, name: &str) -> FissionResult<&MaterialXs> {
        self.materials.get(name).ok_or_else(|| {
            FissionError::InvalidLibrary(format!("material `{name}` not found in library"))
        })
    }

    pub fn material_names(&self) -> impl Iterator<Item = &str> {
        self.materials.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}
