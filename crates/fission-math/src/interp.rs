//! Piecewise-linear interpolation of tabulated data with its first derivative.
//!
//! Used for temperature branches of group constants: the value and the slope
//! come from the same segment, so the derivative is exact for the interpolant.
//! Outside the table the value is clamped to the end point and the slope is zero.

use fission_types::error::{FissionError, FissionResult};
use ndarray::{Array1, ArrayView1, ArrayView2};

/// Location of a sample point inside a tabulated abscissa.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub lo: usize,
    pub hi: usize,
    /// Weight of `hi` in `[0, 1]`.
    pub weight: f64,
    /// `1 / (x[hi] - x[lo])`, zero when clamped or for a single-point table.
    pub inv_dx: f64,
}

/// Check that an abscissa is non-empty, finite and strictly increasing.
pub fn check_abscissae(x: &[f64]) -> FissionResult<()> {
    if x.is_empty() {
        return Err(FissionError::ConfigError(
            "interpolation table must have at least one point".to_string(),
        ));
    }
    if let Some(bad) = x.iter().find(|v| !v.is_finite()) {
        return Err(FissionError::ConfigError(format!(
            "interpolation abscissa must be finite, found {bad}"
        )));
    }
    for pair in x.windows(2) {
        if pair[1] <= pair[0] {
            return Err(FissionError::ConfigError(format!(
                "interpolation abscissa must be strictly increasing: {} then {}",
                pair[0], pair[1]
            )));
        }
    }
    Ok(())
}

/// Find the segment containing `at`. Interior breakpoints use the segment to
/// their right; the last point uses the last segment. NaN clamps to the first
/// point.
pub fn locate(x: &[f64], at: f64) -> Segment {
    let n = x.len();
    if n < 2 || at.is_nan() || at <= x[0] {
        let inside = n >= 2 && at == x[0];
        return Segment {
            lo: 0,
            hi: if inside { 1 } else { 0 },
            weight: 0.0,
            inv_dx: if inside { 1.0 / (x[1] - x[0]) } else { 0.0 },
        };
    }
    if at > x[n - 1] {
        return Segment {
            lo: n - 1,
            hi: n - 1,
            weight: 0.0,
            inv_dx: 0.0,
        };
    }
    // First index with x[i] > at, clamped so `hi` stays in range.
    let hi = x.partition_point(|&v| v <= at).min(n - 1);
    let lo = hi - 1;
    let inv_dx = 1.0 / (x[hi] - x[lo]);
    Segment {
        lo,
        hi,
        weight: (at - x[lo]) * inv_dx,
        inv_dx,
    }
}

/// Interpolated value and slope of a single tabulated column.
pub fn linear_with_slope(x: &[f64], y: ArrayView1<f64>, at: f64) -> (f64, f64) {
    let seg = locate(x, at);
    let (y0, y1) = (y[seg.lo], y[seg.hi]);
    ((1.0 - seg.weight) * y0 + seg.weight * y1, (y1 - y0) * seg.inv_dx)
}

/// Interpolate every column of `table` (`[n_points, n_columns]`) at `at`.
///
/// Returns `(values, slopes)`, each of length `n_columns`.
pub fn linear_rows_with_slope(
    x: &[f64],
    table: ArrayView2<f64>,
    at: f64,
) -> (Array1<f64>, Array1<f64>) {
    let seg = locate(x, at);
    let lo = table.row(seg.lo);
    let hi = table.row(seg.hi);
    let values = &lo * (1.0 - seg.weight) + &hi * seg.weight;
    let slopes = (&hi - &lo) * seg.inv_dx;
    (values, slopes)
}
