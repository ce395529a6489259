// ─────────────────────────────────────────────────────────────────────
// SCPN Fission Kernels — Jacobian Verification
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Analytic-vs-finite-difference checks of the fission-source Jacobian.
//!
//! Every tracked variable of a kernel is perturbed in turn and the central
//! difference of the residual is compared with the analytic entry. The
//! temperature column re-samples the material at T ± h, so χ, νΣf and β all
//! move with it.

use crate::coupling::Coupling;
use crate::kernel::FissionSourceKernel;
use crate::properties::PropertyStore;
use crate::term::QpKernel;
use crate::xs::{Interpolation, MaterialXs};
use fission_math::fd::{relative_step, try_central_difference};
use fission_types::error::{FissionError, FissionResult};
use fission_types::state::VariableId;
use log::debug;

/// One Jacobian column at the probe point.
#[derive(Debug, Clone, PartialEq)]
pub struct JacobianEntry {
    pub variable: VariableId,
    pub coupling: Coupling,
    pub analytic: f64,
    pub numeric: f64,
}

impl JacobianEntry {
    pub fn abs_error(&self) -> f64 {
        (self.analytic - self.numeric).abs()
    }

    /// Relative error with the denominator floored at `floor`.
    pub fn rel_error(&self, floor: f64) -> f64 {
        self.abs_error() / self.numeric.abs().max(floor)
    }
}

#[derive(Debug, Clone, Default)]
pub struct JacobianReport {
    pub residual: f64,
    pub entries: Vec<JacobianEntry>,
}

impl JacobianReport {
    pub fn entry(&self, variable: VariableId) -> Option<&JacobianEntry> {
        self.entries.iter().find(|e| e.variable == variable)
    }

    pub fn max_abs_error(&self) -> f64 {
        self.entries
            .iter()
            .map(JacobianEntry::abs_error)
            .fold(0.0, f64::max)
    }

    pub fn max_rel_error(&self, floor: f64) -> f64 {
        self.entries
            .iter()
            .map(|e| e.rel_error(floor))
            .fold(0.0, f64::max)
    }
}

/// State at which the Jacobian is checked.
#[derive(Debug, Clone, Copy)]
pub struct JacobianProbe<'a> {
    pub material: &'a MaterialXs,
    pub interpolation: Interpolation,
    pub flux: &'a [f64],
    pub temperature: f64,
    pub test: f64,
    pub trial: f64,
}

impl JacobianProbe<'_> {
    /// Residual with material properties sampled at `temperature`.
    fn residual(
        &self,
        kernel: &FissionSourceKernel,
        store: &mut PropertyStore,
        flux: &[f64],
        temperature: f64,
    ) -> FissionResult<f64> {
        self.material.write_properties(
            store,
            kernel.property_names(),
            temperature,
            self.interpolation,
        );
        let point = kernel.bind(store, flux, temperature)?;
        Ok(kernel.residual(&point, self.test))
    }
}

/// d(residual)/d(flux[g]) by central differences; `perturbed` is restored.
fn flux_column(
    kernel: &FissionSourceKernel,
    probe: &JacobianProbe<'_>,
    store: &mut PropertyStore,
    perturbed: &mut [f64],
    g: usize,
    rel_step: f64,
) -> FissionResult<f64> {
    let base = perturbed[g];
    let h = relative_step(base, rel_step);
    let derivative = try_central_difference(
        |x| {
            perturbed[g] = x;
            probe.residual(kernel, store, perturbed, probe.temperature)
        },
        base,
        h,
    );
    perturbed[g] = base;
    derivative
}

/// Compare analytic Jacobian entries of `kernel` with central differences.
///
/// `rel_step` sets the perturbation as `rel_step · max(|u|, 1)` per variable.
pub fn verify_jacobian(
    kernel: &FissionSourceKernel,
    probe: &JacobianProbe<'_>,
    rel_step: f64,
) -> FissionResult<JacobianReport> {
    if !rel_step.is_finite() || rel_step <= 0.0 {
        return Err(FissionError::ConfigError(
            "jacobian rel_step must be finite and > 0".to_string(),
        ));
    }
    if probe.material.num_groups() != kernel.num_groups() {
        return Err(FissionError::TableSizeMismatch {
            table: format!("material `{}` groups", probe.material.name()),
            expected: kernel.num_groups(),
            found: probe.material.num_groups(),
        });
    }

    let mut store = PropertyStore::new();
    let residual = probe.residual(kernel, &mut store, probe.flux, probe.temperature)?;
    let analytic_point_store = store.clone();
    let point = kernel.bind(&analytic_point_store, probe.flux, probe.temperature)?;

    let mut perturbed = probe.flux.to_vec();
    let mut entries = Vec::with_capacity(kernel.couplings().len());
    for (variable, coupling) in kernel.couplings().tracked() {
        let analytic = kernel.jacobian(variable, &point, probe.test, probe.trial);
        let derivative = match coupling {
            Coupling::OwnFlux => flux_column(
                kernel,
                probe,
                &mut store,
                &mut perturbed,
                kernel.group(),
                rel_step,
            )?,
            Coupling::Flux(g) => {
                flux_column(kernel, probe, &mut store, &mut perturbed, g, rel_step)?
            }
            Coupling::Temperature => {
                let h = relative_step(probe.temperature, rel_step);
                try_central_difference(
                    |t| probe.residual(kernel, &mut store, probe.flux, t),
                    probe.temperature,
                    h,
                )?
            }
            Coupling::Unrecognized => continue,
        };
        entries.push(JacobianEntry {
            variable,
            coupling,
            analytic,
            numeric: derivative * probe.trial,
        });
    }

    let report = JacobianReport { residual, entries };
    debug!(
        "event=jacobian_check module=jacobian group={} columns={} max_abs_error={:e}",
        kernel.group(),
        report.entries.len(),
        report.max_abs_error()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fission_types::config::FissionKernelConfig;
    use ndarray::array;

    fn material() -> MaterialXs {
        MaterialXs::from_tables(
            "fuel",
            vec![600.0, 900.0, 1200.0],
            array![[1.10, 0.80, 0.05], [1.00, 0.75, 0.06], [0.92, 0.70, 0.06]],
            array![[0.97, 0.03, 0.0], [0.96, 0.04, 0.0], [0.95, 0.05, 0.0]],
            array![0.0070, 0.0065, 0.0061],
        )
        .unwrap()
    }

    fn kernel(group: usize, delayed: bool) -> FissionSourceKernel {
        let mut cfg = FissionKernelConfig::new(
            group,
            vec![VariableId(0), VariableId(1), VariableId(2)],
            Some(VariableId(9)),
        );
        cfg.account_delayed = delayed;
        FissionSourceKernel::new(cfg).unwrap()
    }

    fn probe<'a>(material: &'a MaterialXs, flux: &'a [f64]) -> JacobianProbe<'a> {
        JacobianProbe {
            material,
            interpolation: Interpolation::Linear,
            flux,
            temperature: 750.0,
            test: 0.8,
            trial: 1.3,
        }
    }

    #[test]
    fn test_analytic_vs_fd_all_columns() {
        let mat = material();
        let flux = [2.0, 3.5, 0.4];
        for group in 0..3 {
            for delayed in [false, true] {
                let report = verify_jacobian(&kernel(group, delayed), &probe(&mat, &flux), 1e-6)
                    .expect("valid probe");
                assert_eq!(report.entries.len(), 4);
                for e in &report.entries {
                    assert!(
                        e.abs_error() < 1e-8 || e.rel_error(1e-12) < 1e-6,
                        "group {group} delayed {delayed} var {}: analytic={} fd={}",
                        e.variable,
                        e.analytic,
                        e.numeric
                    );
                }
            }
        }
    }

    #[test]
    fn test_temperature_column_sees_chi_and_nsf() {
        let mat = material();
        let flux = [2.0, 3.5, 0.4];
        let report = verify_jacobian(&kernel(0, false), &probe(&mat, &flux), 1e-6).unwrap();
        let t = report.entry(VariableId(9)).unwrap();
        assert_eq!(t.coupling, Coupling::Temperature);
        assert!(t.analytic != 0.0);
        assert!(t.abs_error() < 1e-9, "analytic={} fd={}", t.analytic, t.numeric);
    }

    #[test]
    fn test_temperature_column_vanishes_without_interpolation() {
        let mat = material();
        let flux = [2.0, 3.5, 0.4];
        let mut p = probe(&mat, &flux);
        p.interpolation = Interpolation::None;
        let report = verify_jacobian(&kernel(1, true), &p, 1e-6).unwrap();
        let t = report.entry(VariableId(9)).unwrap();
        assert_eq!(t.analytic, 0.0);
        assert_eq!(t.numeric, 0.0);
    }

    #[test]
    fn test_rejects_invalid_step() {
        let mat = material();
        let flux = [1.0, 1.0, 1.0];
        let k = kernel(0, false);
        assert!(verify_jacobian(&k, &probe(&mat, &flux), 0.0).is_err());
        assert!(verify_jacobian(&k, &probe(&mat, &flux), -1e-6).is_err());
        assert!(verify_jacobian(&k, &probe(&mat, &flux), f64::NAN).is_err());
    }

    #[test]
    fn test_rejects_group_count_mismatch() {
        let mat = material();
        let flux = [1.0, 1.0];
        let cfg = FissionKernelConfig::new(0, vec![VariableId(0), VariableId(1)], None);
        let k = FissionSourceKernel::new(cfg).unwrap();
        let err = verify_jacobian(&k, &probe(&mat, &flux), 1e-6).unwrap_err();
        assert!(matches!(err, FissionError::TableSizeMismatch { expected: 2, found: 3, .. }));
    }
}
