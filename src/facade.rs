//! Single entry point over all analytics strategies.
//!
//! Callers hand the facade a raw OHLCV series; it normalizes the series
//! once (sort by date, drop duplicate dates keeping the latest bar) and
//! dispatches to the right strategy. Strategy errors pass through unchanged.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{EngineError, EngineResult};
use crate::models::indicators::IndicatorSet;
use crate::models::prediction::PredictionResult;
use crate::models::price::{prepare_series, PriceBar};
use crate::strategies::{
    AnalyticsStrategy, OnchainReport, OnchainSentimentStrategy, PredictionOptions,
    PredictionStrategy, TechnicalAnalysisStrategy,
};

/// Supported reporting timeframes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "1d")]
    Day,
    #[serde(rename = "1w")]
    Week,
    #[serde(rename = "1m")]
    Month,
}

impl Default for Timeframe {
    fn default() -> Self {
        Timeframe::Month
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Timeframe::Day => "1d",
            Timeframe::Week => "1w",
            Timeframe::Month => "1m",
        };
        f.write_str(label)
    }
}

impl FromStr for Timeframe {
    type Err = EngineError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "1d" => Ok(Timeframe::Day),
            "1w" => Ok(Timeframe::Week),
            "1m" => Ok(Timeframe::Month),
            other => Err(EngineError::CalculationFailed {
                reason: format!("unsupported timeframe: {other}"),
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TechnicalReport {
    pub symbol: String,
    pub timeframe: Timeframe,
    pub indicators: IndicatorSet,
}

pub struct AnalyticsFacade {
    technical: TechnicalAnalysisStrategy,
    prediction: PredictionStrategy,
    onchain: OnchainSentimentStrategy,
}

impl AnalyticsFacade {
    pub fn new(config: &Config) -> Self {
        Self {
            technical: TechnicalAnalysisStrategy,
            prediction: PredictionStrategy::new(config),
            onchain: OnchainSentimentStrategy::new(config.capabilities),
        }
    }

    /// Replace the on-chain strategy, e.g. to wire live sources
    pub fn with_onchain_strategy(mut self, strategy: OnchainSentimentStrategy) -> Self {
        self.onchain = strategy;
        self
    }

    pub fn technical(
        &self,
        symbol: &str,
        series: &[PriceBar],
        timeframe: Timeframe,
    ) -> EngineResult<TechnicalReport> {
        let prepared = prepare_series(series);
        let indicators = self.technical.analyze(symbol, &prepared, &())?;
        Ok(TechnicalReport {
            symbol: symbol.to_string(),
            timeframe,
            indicators,
        })
    }

    pub fn prediction(
        &self,
        symbol: &str,
        series: &[PriceBar],
        options: &PredictionOptions,
    ) -> EngineResult<PredictionResult> {
        let prepared = prepare_series(series);
        self.prediction.analyze(symbol, &prepared, options)
    }

    pub fn onchain_sentiment(
        &self,
        symbol: &str,
        series: &[PriceBar],
    ) -> EngineResult<OnchainReport> {
        let prepared = prepare_series(series);
        self.onchain.analyze(symbol, &prepared, &())
    }
}
