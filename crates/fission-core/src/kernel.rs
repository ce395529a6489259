// ─────────────────────────────────────────────────────────────────────
// SCPN Fission Kernels — Fission Source Kernel
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! FissionSourceKernel — fission coupling term of a multigroup diffusion equation.
//!
//! The source injected into group `g` at a quadrature point is
//!   S_g = P · χ_g · Σ_{g'} νΣf_{g'} · φ_{g'}
//! with prompt fraction P = 1 - β when delayed neutrons are accounted for and
//! P = 1 otherwise. The residual is `sign · test · S_g`; the Jacobian entries
//! are its exact partial derivatives with respect to every group flux and the
//! temperature (through χ, νΣf and β).

use crate::coupling::{Coupling, CouplingTable};
use crate::properties::PropertyProvider;
use crate::term::QpKernel;
use fission_types::config::{FissionKernelConfig, PropertyNames, ResidualSign};
use fission_types::error::{FissionError, FissionResult};
use fission_types::state::{FissionQpData, VariableId};
use log::debug;

const KERNEL_NAME: &str = "fission_source";

/// Fission source of one group's balance equation.
#[derive(Debug, Clone)]
pub struct FissionSourceKernel {
    group: usize,
    num_groups: usize,
    group_fluxes: Vec<VariableId>,
    temperature: Option<VariableId>,
    couplings: CouplingTable,
    sign: ResidualSign,
    /// 1.0 with delayed accounting, 0.0 without: P = 1 - w·β.
    delayed_weight: f64,
    properties: PropertyNames,
}

impl FissionSourceKernel {
    /// Validate the configuration and build the coupling table.
    pub fn new(config: FissionKernelConfig) -> FissionResult<Self> {
        if config.num_groups == 0 {
            return Err(FissionError::ConfigError(
                "num_groups must be at least 1".to_string(),
            ));
        }
        if config.group >= config.num_groups {
            return Err(FissionError::GroupOutOfRange {
                group: config.group,
                num_groups: config.num_groups,
            });
        }
        if config.group_fluxes.len() != config.num_groups {
            return Err(FissionError::TableSizeMismatch {
                table: "group_fluxes".to_string(),
                expected: config.num_groups,
                found: config.group_fluxes.len(),
            });
        }
        if let Some((label, _)) = config
            .properties
            .entries()
            .into_iter()
            .find(|(_, name)| name.trim().is_empty())
        {
            return Err(FissionError::ConfigError(format!(
                "property name for `{label}` must not be empty"
            )));
        }
        // Names the kernel reads must be distinct; beta names only count when used.
        let entries = config.properties.entries();
        let read = if config.account_delayed {
            &entries[..]
        } else {
            &entries[..4]
        };
        for (i, (label, name)) in read.iter().enumerate() {
            if let Some((other, _)) = read[..i].iter().find(|(_, n)| n == name) {
                return Err(FissionError::ConfigError(format!(
                    "properties `{other}` and `{label}` share the name `{name}`"
                )));
            }
        }

        let couplings =
            CouplingTable::new(config.group, &config.group_fluxes, config.temperature)?;

        debug!(
            "event=kernel_init module=fission_source group={} num_groups={} temperature_coupled={} delayed={} sign={:?}",
            config.group,
            config.num_groups,
            config.temperature.is_some(),
            config.account_delayed,
            config.sign
        );

        Ok(FissionSourceKernel {
            group: config.group,
            num_groups: config.num_groups,
            group_fluxes: config.group_fluxes,
            temperature: config.temperature,
            couplings,
            sign: config.sign,
            delayed_weight: if config.account_delayed { 1.0 } else { 0.0 },
            properties: config.properties,
        })
    }

    /// Create a kernel from a JSON config file.
    pub fn from_file(path: &str) -> FissionResult<Self> {
        let config = FissionKernelConfig::from_file(path)?;
        Self::new(config)
    }

    pub fn group(&self) -> usize {
        self.group
    }

    pub fn num_groups(&self) -> usize {
        self.num_groups
    }

    pub fn group_fluxes(&self) -> &[VariableId] {
        &self.group_fluxes
    }

    pub fn temperature_variable(&self) -> Option<VariableId> {
        self.temperature
    }

    pub fn couplings(&self) -> &CouplingTable {
        &self.couplings
    }

    pub fn sign(&self) -> ResidualSign {
        self.sign
    }

    pub fn accounts_delayed(&self) -> bool {
        self.delayed_weight != 0.0
    }

    pub fn property_names(&self) -> &PropertyNames {
        &self.properties
    }

    /// Gather this point's property arrays by the configured names.
    ///
    /// Missing properties and wrong lengths are reported here, before any
    /// residual or Jacobian evaluation.
    pub fn bind<'a, P>(
        &self,
        provider: &'a P,
        flux: &'a [f64],
        temperature: f64,
    ) -> FissionResult<FissionQpData<'a>>
    where
        P: PropertyProvider + ?Sized,
    {
        let fetch = |name: &str| {
            provider
                .property(name)
                .ok_or_else(|| FissionError::MissingProperty(name.to_string()))
        };
        let names = &self.properties;
        let point = FissionQpData::new(
            self.num_groups,
            fetch(names.nsf.as_str())?,
            fetch(names.d_nsf_d_temp.as_str())?,
            fetch(names.chi.as_str())?,
            fetch(names.d_chi_d_temp.as_str())?,
            flux,
            temperature,
        )?;
        if !self.accounts_delayed() {
            return Ok(point);
        }

        let scalar = |name: &str| -> FissionResult<f64> {
            let values = fetch(name)?;
            match values {
                [v] => Ok(*v),
                _ => Err(FissionError::TableSizeMismatch {
                    table: name.to_string(),
                    expected: 1,
                    found: values.len(),
                }),
            }
        };
        let beta = scalar(names.beta.as_str())?;
        let d_beta_d_temp = scalar(names.d_beta_d_temp.as_str())?;
        Ok(point.with_delayed(beta, d_beta_d_temp))
    }

    /// Fission source S_g at the point, without sign or test function.
    pub fn source(&self, point: &FissionQpData<'_>) -> f64 {
        self.prompt_fraction(point) * point.chi()[self.group] * total_production(point)
    }

    fn prompt_fraction(&self, point: &FissionQpData<'_>) -> f64 {
        1.0 - self.delayed_weight * point.beta()
    }

    /// Common factor of every flux derivative: sign · test · P · χ_g · trial.
    fn flux_prefactor(&self, point: &FissionQpData<'_>, test: f64, trial: f64) -> f64 {
        self.sign.factor() * test * self.prompt_fraction(point) * point.chi()[self.group] * trial
    }

    /// dS_g/dT by the product rule over P, χ_g and every νΣf_{g'}.
    fn d_source_d_temperature(&self, point: &FissionQpData<'_>) -> f64 {
        let g = self.group;
        let production = total_production(point);
        let d_production: f64 = point
            .d_nsf_d_temp()
            .iter()
            .zip(point.flux())
            .map(|(dn, phi)| dn * phi)
            .sum();
        let prompt = self.prompt_fraction(point);
        let d_prompt = -self.delayed_weight * point.d_beta_d_temp();

        prompt * (point.d_chi_d_temp()[g] * production + point.chi()[g] * d_production)
            + d_prompt * point.chi()[g] * production
    }
}

/// Σ_{g'} νΣf_{g'} · φ_{g'}.
fn total_production(point: &FissionQpData<'_>) -> f64 {
    point
        .nsf()
        .iter()
        .zip(point.flux())
        .map(|(nsf, phi)| nsf * phi)
        .sum()
}

impl QpKernel for FissionSourceKernel {
    type Point<'a> = FissionQpData<'a>;

    fn name(&self) -> &str {
        KERNEL_NAME
    }

    fn variable(&self) -> VariableId {
        self.group_fluxes[self.group]
    }

    fn residual(&self, point: &FissionQpData<'_>, test: f64) -> f64 {
        debug_assert_eq!(point.num_groups(), self.num_groups);
        self.sign.factor() * test * self.source(point)
    }

    fn own_jacobian(&self, point: &FissionQpData<'_>, test: f64, trial: f64) -> f64 {
        debug_assert_eq!(point.num_groups(), self.num_groups);
        self.flux_prefactor(point, test, trial) * point.nsf()[self.group]
    }

    fn off_diag_jacobian(
        &self,
        jvar: VariableId,
        point: &FissionQpData<'_>,
        test: f64,
        trial: f64,
    ) -> f64 {
        debug_assert_eq!(point.num_groups(), self.num_groups);
        match self.couplings.resolve(jvar) {
            Coupling::Flux(g) => self.flux_prefactor(point, test, trial) * point.nsf()[g],
            Coupling::Temperature => {
                self.sign.factor() * test * self.d_source_d_temperature(point) * trial
            }
            // The own flux belongs to own_jacobian; untracked variables do not enter S_g.
            Coupling::OwnFlux | Coupling::Unrecognized => 0.0,
        }
    }
}
