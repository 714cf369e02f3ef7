//! Ordinary least-squares trend estimation.

use crate::TrendError;
use statrs::statistics::Statistics;

/// Returns the least-squares slope of `y` on `x`.
///
/// `slope = Σ(xᵢ−x̄)(yᵢ−ȳ) / Σ(xᵢ−x̄)²`. Only the slope is computed; callers
/// never need the intercept.
///
/// # Errors
///
/// - [`TrendError::InputLengthMismatch`] if `x` and `y` differ in length
/// - [`TrendError::Empty`] if there are no samples
/// - [`TrendError::DegenerateInput`] if all `x` values are equal (this
///   includes a single sample)
///
/// # Example
///
/// ```
/// use marsh_accretion::linear_slope;
///
/// let years = [2020.0, 2021.0, 2022.0];
/// let values = [1.0, 0.9, 0.8];
/// let slope = linear_slope(&years, &values).unwrap();
/// assert!((slope + 0.1).abs() < 1e-12);
/// ```
pub fn linear_slope(x: &[f64], y: &[f64]) -> Result<f64, TrendError> {
    if x.len() != y.len() {
        return Err(TrendError::InputLengthMismatch {
            x: x.len(),
            y: y.len(),
        });
    }
    if x.is_empty() {
        return Err(TrendError::Empty);
    }

    let x_mean = x.iter().mean();
    let y_mean = y.iter().mean();

    let (cov_xy, var_x) = x
        .iter()
        .zip(y)
        .fold((0.0, 0.0), |(cov, var), (&xi, &yi)| {
            let dx = xi - x_mean;
            (cov + dx * (yi - y_mean), var + dx * dx)
        });

    if var_x == 0.0 {
        return Err(TrendError::DegenerateInput(x.len()));
    }
    Ok(cov_xy / var_x)
}

/// Slope of `y` against calendar years.
pub fn yearly_slope(years: &[i32], y: &[f64]) -> Result<f64, TrendError> {
    let x: Vec<f64> = years.iter().map(|&year| f64::from(year)).collect();
    linear_slope(&x, y)
}
