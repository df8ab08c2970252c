//! Request-local min-max feature scaling.

use ndarray::{Array2, Axis};
use serde::{Deserialize, Serialize};

/// Number of input features per bar: open, high, low, close, volume
pub const FEATURES: usize = 5;
/// Column index of the close price inside the feature matrix
pub const CLOSE_COLUMN: usize = 3;

/// Per-column min-max scaler fit on the full feature set of one request.
/// Scaler state is never persisted; only the trained model is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinMaxScaler {
    min: Vec<f64>,
    max: Vec<f64>,
}

impl MinMaxScaler {
    pub fn fit(data: &Array2<f64>) -> Self {
        let columns = data.ncols();
        let mut min = vec![f64::MAX; columns];
        let mut max = vec![f64::MIN; columns];
        for row in data.axis_iter(Axis(0)) {
            for (c, &value) in row.iter().enumerate() {
                min[c] = min[c].min(value);
                max[c] = max[c].max(value);
            }
        }
        Self { min, max }
    }

    /// Scale every column into [0, 1]. Constant columns map to 0.
    pub fn transform(&self, data: &Array2<f64>) -> Array2<f64> {
        let mut scaled = data.clone();
        for mut row in scaled.axis_iter_mut(Axis(0)) {
            for (c, value) in row.iter_mut().enumerate() {
                let range = self.max[c] - self.min[c];
                *value = if range > 0.0 {
                    (*value - self.min[c]) / range
                } else {
                    0.0
                };
            }
        }
        scaled
    }

    pub fn fit_transform(data: &Array2<f64>) -> (Self, Array2<f64>) {
        let scaler = Self::fit(data);
        let scaled = scaler.transform(data);
        (scaler, scaled)
    }

    /// Invert the scaling on the close dimension only
    pub fn invert_close(&self, value: f64) -> f64 {
        let range = self.max[CLOSE_COLUMN] - self.min[CLOSE_COLUMN];
        value * range + self.min[CLOSE_COLUMN]
    }
}
