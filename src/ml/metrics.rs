//! Validation metrics for the prediction engine.

use crate::common::math::round_to;
use crate::models::prediction::ValidationMetrics;

/// Evaluate RMSE, MAPE (%) and R² between actual and predicted values,
/// both already inverse-scaled to original price units.
pub fn evaluate(actual: &[f64], predicted: &[f64]) -> ValidationMetrics {
    if actual.is_empty() || actual.len() != predicted.len() {
        return ValidationMetrics {
            rmse: 0.0,
            mape: 0.0,
            r2: 0.0,
        };
    }

    let n = actual.len() as f64;

    let mse = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).powi(2))
        .sum::<f64>()
        / n;

    let mape = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| {
            let denom = a.abs().max(f64::EPSILON);
            (a - p).abs() / denom
        })
        .sum::<f64>()
        / n
        * 100.0;

    let mean_actual = actual.iter().sum::<f64>() / n;
    let ss_tot = actual.iter().map(|a| (a - mean_actual).powi(2)).sum::<f64>();
    let ss_res = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).powi(2))
        .sum::<f64>();
    let r2 = if ss_tot > 0.0 { 1.0 - ss_res / ss_tot } else { 0.0 };

    ValidationMetrics {
        rmse: round_to(mse.sqrt(), 2),
        mape: round_to(mape, 2),
        r2: round_to(r2, 4),
    }
}
