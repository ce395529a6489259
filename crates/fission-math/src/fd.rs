//! Finite-difference derivatives for checking analytic Jacobians.

use fission_types::error::{FissionError, FissionResult};

/// Step scaled to the magnitude of `x`: `rel * max(|x|, 1)`.
pub fn relative_step(x: f64, rel: f64) -> f64 {
    rel * x.abs().max(1.0)
}

/// Second-order central difference `(f(x + h) - f(x - h)) / 2h`.
pub fn central_difference<F>(mut f: F, x: f64, h: f64) -> FissionResult<f64>
where
    F: FnMut(f64) -> f64,
{
    try_central_difference(|v| Ok(f(v)), x, h)
}

/// Central difference of a fallible function; the first error is returned.
pub fn try_central_difference<F>(mut f: F, x: f64, h: f64) -> FissionResult<f64>
where
    F: FnMut(f64) -> FissionResult<f64>,
{
    if !h.is_finite() || h <= 0.0 {
        return Err(FissionError::ConfigError(
            "finite-difference step must be finite and > 0".to_string(),
        ));
    }
    let forward = f(x + h)?;
    let backward = f(x - h)?;
    Ok((forward - backward) / (2.0 * h))
}
