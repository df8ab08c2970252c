//! Next-close price prediction backed by a recurrent sequence model.
//!
//! Training is per-request but the fitted model is persisted per symbol, so
//! later requests can reuse it on the cache path: scale the incoming series,
//! feed the last `lookback` bars through the cached model and skip both
//! training and validation metrics. Any cache problem silently falls back to
//! a full retrain.

use ndarray::{s, Array2};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::common::math::round_to;
use crate::config::Config;
use crate::error::{EngineError, EngineResult};
use crate::ml::scaler::{CLOSE_COLUMN, FEATURES};
use crate::ml::{metrics, MinMaxScaler, ModelStore, SequenceModel, TrainConfig};
use crate::models::prediction::{PricePrediction, PredictionResult};
use crate::models::price::PriceBar;

use super::AnalyticsStrategy;

/// Hidden width of both recurrent layers
const HIDDEN_UNITS: usize = 50;
/// Share of windows used for training; the rest validate
const TRAIN_SPLIT: f64 = 0.7;

#[derive(Debug, Clone)]
pub struct PredictionOptions {
    pub lookback: usize,
    pub epochs: usize,
    pub use_cache: bool,
}

impl Default for PredictionOptions {
    fn default() -> Self {
        Self {
            lookback: 30,
            epochs: 15,
            use_cache: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PredictionStrategy {
    model_runtime: bool,
    store: ModelStore,
    seed: u64,
}

impl PredictionStrategy {
    pub fn new(config: &Config) -> Self {
        Self {
            model_runtime: config.capabilities.model_runtime,
            store: ModelStore::new(&config.data_dir),
            seed: 7,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Forecast using a cached model; `None` means the model is unusable
    /// and the caller should retrain.
    fn cached_forecast(
        &self,
        model: &SequenceModel,
        scaled: &Array2<f64>,
        scaler: &MinMaxScaler,
        lookback: usize,
    ) -> Option<f64> {
        if model.input_size != FEATURES {
            warn!(
                input_size = model.input_size,
                "cached model has unexpected input width, retraining"
            );
            return None;
        }
        let last = scaled.slice(s![scaled.nrows() - lookback.., ..]);
        let predicted = model.predict(last);
        if !predicted.is_finite() {
            warn!("cached model produced a non-finite forecast, retraining");
            return None;
        }
        Some(scaler.invert_close(predicted))
    }

    fn train(
        &self,
        symbol: &str,
        series: &[PriceBar],
        options: &PredictionOptions,
    ) -> EngineResult<PredictionResult> {
        let lookback = options.lookback;
        if series.len() < lookback * 2 {
            return Err(EngineError::NotEnoughData {
                required: lookback * 2,
                available: series.len(),
            });
        }

        let features = feature_matrix(series);
        let (scaler, scaled) = MinMaxScaler::fit_transform(&features);

        // Rolling windows: each window of `lookback` rows is labelled with
        // the scaled close of the row right after it.
        let mut inputs: Vec<Array2<f64>> = Vec::new();
        let mut targets: Vec<f64> = Vec::new();
        for i in lookback..scaled.nrows() {
            inputs.push(scaled.slice(s![i - lookback..i, ..]).to_owned());
            targets.push(scaled[[i, CLOSE_COLUMN]]);
        }

        let pairs = inputs.len();
        let split = (((pairs as f64) * TRAIN_SPLIT) as usize)
            .clamp(1, pairs.saturating_sub(1).max(1));

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut model = SequenceModel::new(FEATURES, HIDDEN_UNITS, &mut rng);
        let train_config = TrainConfig {
            epochs: options.epochs,
            seed: self.seed,
            ..TrainConfig::default()
        };
        model.fit(&inputs[..split], &targets[..split], &train_config);

        let actual: Vec<f64> = targets[split.min(pairs)..]
            .iter()
            .map(|&t| scaler.invert_close(t))
            .collect();
        let predicted: Vec<f64> = inputs[split.min(pairs)..]
            .iter()
            .map(|window| scaler.invert_close(model.predict(window.view())))
            .collect();
        let validation = metrics::evaluate(&actual, &predicted);

        let last = scaled.slice(s![scaled.nrows() - lookback.., ..]);
        let next_close = scaler.invert_close(model.predict(last));

        if let Err(error) = self.store.save(symbol, &model) {
            warn!(symbol, %error, "failed to persist trained model");
        }
        info!(
            symbol,
            lookback,
            epochs = options.epochs,
            "trained fresh sequence model"
        );

        Ok(PredictionResult {
            symbol: symbol.to_string(),
            lookback,
            metrics: Some(validation),
            prediction: PricePrediction {
                next_close: round_to(next_close, 2),
            },
            cached: false,
        })
    }
}

impl AnalyticsStrategy for PredictionStrategy {
    type Options = PredictionOptions;
    type Report = PredictionResult;

    fn analyze(
        &self,
        symbol: &str,
        series: &[PriceBar],
        options: &Self::Options,
    ) -> EngineResult<Self::Report> {
        if !self.model_runtime {
            return Err(EngineError::TensorRuntimeUnavailable);
        }

        if options.use_cache {
            if let Some(model) = self.store.load(symbol) {
                if series.len() < options.lookback {
                    return Err(EngineError::NotEnoughData {
                        required: options.lookback,
                        available: series.len(),
                    });
                }
                let features = feature_matrix(series);
                let (scaler, scaled) = MinMaxScaler::fit_transform(&features);
                if let Some(next_close) =
                    self.cached_forecast(&model, &scaled, &scaler, options.lookback)
                {
                    debug!(symbol, "served forecast from cached model");
                    return Ok(PredictionResult {
                        symbol: symbol.to_string(),
                        lookback: options.lookback,
                        metrics: None,
                        prediction: PricePrediction {
                            next_close: round_to(next_close, 2),
                        },
                        cached: true,
                    });
                }
            }
        }

        self.train(symbol, series, options)
    }
}

/// Bars as a row-per-bar matrix of open, high, low, close, volume
fn feature_matrix(series: &[PriceBar]) -> Array2<f64> {
    let mut matrix = Array2::zeros((series.len(), FEATURES));
    for (i, bar) in series.iter().enumerate() {
        matrix[[i, 0]] = bar.open;
        matrix[[i, 1]] = bar.high;
        matrix[[i, 2]] = bar.low;
        matrix[[i, 3]] = bar.close;
        matrix[[i, 4]] = bar.volume;
    }
    matrix
}
