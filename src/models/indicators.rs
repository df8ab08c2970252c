//! Technical indicator snapshot types.

use serde::{Deserialize, Serialize};

/// Per-indicator trading signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeSignal {
    Buy,
    Sell,
    Neutral,
}

/// Moving averages for the latest bar. `None` means the look-back window is
/// not covered by the series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovingAverages {
    pub sma_20: Option<f64>,
    pub ema_20: Option<f64>,
    pub wma_20: Option<f64>,
    pub hma_20: Option<f64>,
    pub vwap: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacdIndicator {
    pub value: f64,
    pub signal: f64,
    pub histogram: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StochasticIndicator {
    pub k: f64,
    pub d: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Oscillators {
    pub rsi_14: Option<f64>,
    pub macd: Option<MacdIndicator>,
    pub stochastic: Option<StochasticIndicator>,
    pub cci_20: Option<f64>,
    pub mfi_14: Option<f64>,
}

/// Component signals plus the majority-vote overall signal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalSummary {
    pub rsi: TradeSignal,
    pub macd: TradeSignal,
    pub stochastic: TradeSignal,
    pub overall: TradeSignal,
}

/// Snapshot of all indicators for the most recent bar of a prepared series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSet {
    pub ma: MovingAverages,
    pub oscillators: Oscillators,
    pub signals: SignalSummary,
}
