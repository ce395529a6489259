// ─────────────────────────────────────────────────────────────────────
// SCPN Fission Kernels — Property-Based Tests (proptest) for fission-core
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for the fission-source kernel using proptest.
//!
//! Covers: Jacobian consistency against finite differences (fluxes and
//! temperature), untracked variables, linearity, single-group reduction.

use fission_core::kernel::FissionSourceKernel;
use fission_core::term::QpKernel;
use fission_math::fd::central_difference;
use fission_types::config::{FissionKernelConfig, ResidualSign};
use fission_types::state::{FissionQpData, VariableId};
use proptest::prelude::*;

const TEMPERATURE_ID: u32 = 1000;
const T_REF: f64 = 900.0;

/// Group data with constants linear in temperature around `T_REF`, so the
/// finite-difference temperature derivative has an exact reference.
#[derive(Debug, Clone)]
struct Case {
    group: usize,
    nsf0: Vec<f64>,
    d_nsf: Vec<f64>,
    chi0: Vec<f64>,
    d_chi: Vec<f64>,
    flux: Vec<f64>,
    beta0: f64,
    d_beta: f64,
    test: f64,
    trial: f64,
}

impl Case {
    fn kernel(&self, sign: ResidualSign, delayed: bool) -> FissionSourceKernel {
        let ids = (0..self.flux.len() as u32).map(VariableId).collect();
        let mut cfg = FissionKernelConfig::new(self.group, ids, Some(VariableId(TEMPERATURE_ID)));
        cfg.sign = sign;
        cfg.account_delayed = delayed;
        FissionSourceKernel::new(cfg).unwrap()
    }

    fn at(v0: &[f64], dv: &[f64], t: f64) -> Vec<f64> {
        v0.iter().zip(dv).map(|(v, d)| v + d * (t - T_REF)).collect()
    }

    /// Residual with all temperature-dependent data sampled at `t`.
    fn residual(&self, kernel: &FissionSourceKernel, flux: &[f64], t: f64) -> f64 {
        let nsf = Self::at(&self.nsf0, &self.d_nsf, t);
        let chi = Self::at(&self.chi0, &self.d_chi, t);
        let point = FissionQpData::new(flux.len(), &nsf, &self.d_nsf, &chi, &self.d_chi, flux, t)
            .unwrap()
            .with_delayed(self.beta0 + self.d_beta * (t - T_REF), self.d_beta);
        kernel.residual(&point, self.test)
    }

    fn point(&self) -> FissionQpData<'_> {
        FissionQpData::new(
            self.flux.len(),
            &self.nsf0,
            &self.d_nsf,
            &self.chi0,
            &self.d_chi,
            &self.flux,
            T_REF,
        )
        .unwrap()
        .with_delayed(self.beta0, self.d_beta)
    }
}

fn case_strategy() -> impl Strategy<Value = Case> {
    (1usize..9).prop_flat_map(|n| {
        (
            0..n,
            prop::collection::vec(0.0f64..2.0, n),
            prop::collection::vec(-1e-3f64..1e-3, n),
            prop::collection::vec(0.0f64..1.0, n),
            prop::collection::vec(-1e-4f64..1e-4, n),
            prop::collection::vec(0.0f64..10.0, n),
            (0.0f64..0.01, -1e-5f64..1e-5),
            (-2.0f64..2.0, -2.0f64..2.0),
        )
            .prop_map(|(group, nsf0, d_nsf, chi0, d_chi, flux, (beta0, d_beta), (test, trial))| {
                Case {
                    group,
                    nsf0,
                    d_nsf,
                    chi0,
                    d_chi,
                    flux,
                    beta0,
                    d_beta,
                    test,
                    trial,
                }
            })
    })
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-7 * (1.0 + a.abs().max(b.abs()))
}

// ── Jacobian Consistency ─────────────────────────────────────────────

proptest! {
    /// Own Jacobian equals d(residual)/d(flux[group]) for any group count.
    #[test]
    fn own_jacobian_matches_fd(case in case_strategy(), delayed in any::<bool>()) {
        let kernel = case.kernel(ResidualSign::Negative, delayed);
        let g = case.group;
        let analytic = kernel.own_jacobian(&case.point(), case.test, case.trial);
        let mut flux = case.flux.clone();
        let fd = central_difference(
            |x| { flux[g] = x; case.residual(&kernel, &flux, T_REF) },
            case.flux[g],
            1e-4,
        ).unwrap() * case.trial;
        prop_assert!(close(analytic, fd), "analytic={}, fd={}", analytic, fd);
    }

    /// Off-diagonal entries at every other group's flux equal the FD derivative.
    #[test]
    fn off_diag_flux_matches_fd(case in case_strategy(), positive in any::<bool>()) {
        let sign = if positive { ResidualSign::Positive } else { ResidualSign::Negative };
        let kernel = case.kernel(sign, true);
        let point = case.point();
        for other in (0..case.flux.len()).filter(|&g| g != case.group) {
            let analytic =
                kernel.off_diag_jacobian(VariableId(other as u32), &point, case.test, case.trial);
            let mut flux = case.flux.clone();
            let fd = central_difference(
                |x| { flux[other] = x; case.residual(&kernel, &flux, T_REF) },
                case.flux[other],
                1e-4,
            ).unwrap() * case.trial;
            prop_assert!(close(analytic, fd), "group {}: analytic={}, fd={}", other, analytic, fd);
        }
    }

    /// Temperature entry equals the FD derivative with chi, nsf and beta all moving.
    #[test]
    fn off_diag_temperature_matches_fd(case in case_strategy(), delayed in any::<bool>()) {
        let kernel = case.kernel(ResidualSign::Negative, delayed);
        let analytic = kernel.off_diag_jacobian(
            VariableId(TEMPERATURE_ID),
            &case.point(),
            case.test,
            case.trial,
        );
        let fd = central_difference(|t| case.residual(&kernel, &case.flux, t), T_REF, 1e-2)
            .unwrap() * case.trial;
        prop_assert!(close(analytic, fd), "analytic={}, fd={}", analytic, fd);
    }

    /// Identifiers outside the tracked set give exactly zero.
    #[test]
    fn untracked_variable_is_zero(case in case_strategy(), id in 100u32..TEMPERATURE_ID) {
        let kernel = case.kernel(ResidualSign::Negative, true);
        let value = kernel.off_diag_jacobian(VariableId(id), &case.point(), case.test, case.trial);
        prop_assert_eq!(value, 0.0);
    }

    /// The own flux never contributes through the off-diagonal entry point.
    #[test]
    fn own_flux_excluded_from_off_diag(case in case_strategy()) {
        let kernel = case.kernel(ResidualSign::Negative, false);
        let own = VariableId(case.group as u32);
        prop_assert_eq!(kernel.off_diag_jacobian(own, &case.point(), case.test, case.trial), 0.0);
    }
}

// ── Linearity ────────────────────────────────────────────────────────

proptest! {
    /// Residual is linear in each flux: R(a·φ_g) - R(0) = a·(R(φ_g) - R(0)).
    #[test]
    fn residual_linear_in_each_flux(case in case_strategy(), scale in -3.0f64..3.0) {
        let kernel = case.kernel(ResidualSign::Negative, false);
        for g in 0..case.flux.len() {
            let mut flux = case.flux.clone();
            flux[g] = 0.0;
            let r0 = case.residual(&kernel, &flux, T_REF);
            flux[g] = case.flux[g];
            let r1 = case.residual(&kernel, &flux, T_REF);
            flux[g] = scale * case.flux[g];
            let rs = case.residual(&kernel, &flux, T_REF);
            prop_assert!(close(rs - r0, scale * (r1 - r0)), "group {}: {} vs {}", g, rs - r0, scale * (r1 - r0));
        }
    }

    /// Residual is proportional to chi[group].
    #[test]
    fn residual_linear_in_chi(case in case_strategy(), scale in 0.0f64..3.0) {
        let kernel = case.kernel(ResidualSign::Negative, false);
        let mut chi = case.chi0.clone();
        chi[case.group] *= scale;
        let scaled = FissionQpData::new(
            case.flux.len(), &case.nsf0, &case.d_nsf, &chi, &case.d_chi, &case.flux, T_REF,
        ).unwrap();
        let r = kernel.residual(&case.point(), case.test);
        let rs = kernel.residual(&scaled, case.test);
        prop_assert!(close(rs, scale * r), "{} vs {}", rs, scale * r);
    }
}

// ── Single-Group Reduction ───────────────────────────────────────────

proptest! {
    /// With one group the residual is sign · test · chi · nsf · flux.
    #[test]
    fn single_group_reduces_to_self_coupling(
        nsf in 0.0f64..3.0,
        chi in 0.0f64..1.0,
        flux in 0.0f64..10.0,
        test in -2.0f64..2.0,
        trial in -2.0f64..2.0,
    ) {
        let kernel = FissionSourceKernel::new(
            FissionKernelConfig::new(0, vec![VariableId(0)], None),
        ).unwrap();
        let (n, d, c, f) = ([nsf], [0.0], [chi], [flux]);
        let point = FissionQpData::new(1, &n, &d, &c, &d, &f, T_REF).unwrap();
        prop_assert!(close(kernel.residual(&point, test), -test * chi * nsf * flux));
        prop_assert!(close(kernel.own_jacobian(&point, test, trial), -test * chi * nsf * trial));
        // Without a temperature variable nothing else is coupled.
        prop_assert_eq!(kernel.off_diag_jacobian(VariableId(1), &point, test, trial), 0.0);
    }
}
