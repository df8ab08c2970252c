//! Pluggable analytics strategies behind a common interface.

use serde::Serialize;

use crate::error::EngineResult;
use crate::models::price::PriceBar;

pub mod onchain;
pub mod prediction;
pub mod technical;

pub use onchain::{OnchainReport, OnchainSentimentStrategy};
pub use prediction::{PredictionOptions, PredictionStrategy};
pub use technical::TechnicalAnalysisStrategy;

/// A self-contained analysis over one prepared price series.
///
/// Implementations never mutate the series and report every failure through
/// the engine error type so the facade can forward it unchanged.
pub trait AnalyticsStrategy {
    type Options;
    type Report: Serialize;

    fn analyze(
        &self,
        symbol: &str,
        series: &[PriceBar],
        options: &Self::Options,
    ) -> EngineResult<Self::Report>;
}
