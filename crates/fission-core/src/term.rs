//! Residual terms evaluated at a single quadrature point.
//!
//! Each physical term of a group balance equation (diffusion, absorption,
//! scattering, fission, ...) implements [`QpKernel`]; the assembler composes
//! them and applies quadrature weights and mapping factors.

use fission_types::state::VariableId;

/// Residual and Jacobian contributions of one term at one quadrature point.
///
/// Implementations hold only construction-time configuration, so one instance
/// is shared read-only by every assembly thread.
pub trait QpKernel: Send + Sync {
    /// Per-point view of the fields and properties the term reads.
    type Point<'a>;

    fn name(&self) -> &str;

    /// Variable of the equation this term contributes to.
    fn variable(&self) -> VariableId;

    fn residual(&self, point: &Self::Point<'_>, test: f64) -> f64;

    /// Derivative of [`QpKernel::residual`] with respect to [`QpKernel::variable`].
    fn own_jacobian(&self, point: &Self::Point<'_>, test: f64, trial: f64) -> f64;

    /// Derivative with respect to any other variable. Untracked variables give zero.
    fn off_diag_jacobian(
        &self,
        jvar: VariableId,
        point: &Self::Point<'_>,
        test: f64,
        trial: f64,
    ) -> f64;

    /// Jacobian entry for `jvar`, routed the way an assembler sweeps columns.
    fn jacobian(&self, jvar: VariableId, point: &Self::Point<'_>, test: f64, trial: f64) -> f64 {
        if jvar == self.variable() {
            self.own_jacobian(point, test, trial)
        } else {
            self.off_diag_jacobian(jvar, point, test, trial)
        }
    }
}
