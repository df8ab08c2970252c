//! Shared data models spanning the engine layers.

pub mod indicators;
pub mod onchain;
pub mod prediction;
pub mod price;

pub use indicators::{
    IndicatorSet, MacdIndicator, MovingAverages, Oscillators, SignalSummary,
    StochasticIndicator, TradeSignal,
};
pub use onchain::{
    ExchangeFlows, MarketSignal, OnchainMetrics, SentimentLabel, SentimentScore, WhaleActivity,
};
pub use prediction::{PredictionResult, PricePrediction, ValidationMetrics};
pub use price::{prepare_series, PriceBar};
