//! Prediction result types.

use serde::{Deserialize, Serialize};

/// Validation metrics computed in original price units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationMetrics {
    pub rmse: f64,
    /// Mean absolute percentage error, in percent
    pub mape: f64,
    pub r2: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePrediction {
    pub next_close: f64,
}

/// Next-close forecast for one symbol. `metrics` is present only when a
/// fresh model was trained for this request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub symbol: String,
    pub lookback: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<ValidationMetrics>,
    pub prediction: PricePrediction,
    pub cached: bool,
}
