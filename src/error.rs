//! Structured errors crossing the engine boundary.
//!
//! Engines return these as values; nothing is panicked across the strategy
//! seam. The serialized form matches the stable error payload contract, e.g.
//! `{"error": "not_enough_data", "required": 50, "available": 12}`.

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "error", rename_all = "snake_case")]
pub enum EngineError {
    /// The series has fewer bars than the requested computation needs
    #[error("not enough data: need {required} bars, have {available}")]
    NotEnoughData { required: usize, available: usize },

    /// A derived metric could not produce a value despite sufficient data
    #[error("calculation failed: {reason}")]
    CalculationFailed { reason: String },

    /// Prediction was requested but the modeling runtime is disabled in
    /// this deployment
    #[error("model runtime unavailable in this deployment")]
    TensorRuntimeUnavailable,
}

pub type EngineResult<T> = Result<T, EngineError>;
