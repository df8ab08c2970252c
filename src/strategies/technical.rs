//! Technical indicator strategy: moving averages, oscillators and signals
//! for the latest bar of a series.

use crate::common::math::round_to;
use crate::error::{EngineError, EngineResult};
use crate::indicators::{momentum, trend, volume};
use crate::models::indicators::{
    IndicatorSet, MacdIndicator, MovingAverages, Oscillators, SignalSummary, StochasticIndicator,
    TradeSignal,
};
use crate::models::price::PriceBar;

use super::AnalyticsStrategy;

/// Minimum number of bars for a meaningful indicator set
pub const MIN_BARS: usize = 50;

const RSI_OVERSOLD: f64 = 30.0;
const RSI_OVERBOUGHT: f64 = 70.0;
const STOCH_OVERSOLD: f64 = 20.0;
const STOCH_OVERBOUGHT: f64 = 80.0;

#[derive(Debug, Default, Clone)]
pub struct TechnicalAnalysisStrategy;

impl AnalyticsStrategy for TechnicalAnalysisStrategy {
    type Options = ();
    type Report = IndicatorSet;

    fn analyze(
        &self,
        _symbol: &str,
        series: &[PriceBar],
        _options: &Self::Options,
    ) -> EngineResult<Self::Report> {
        if series.len() < MIN_BARS {
            return Err(EngineError::NotEnoughData {
                required: MIN_BARS,
                available: series.len(),
            });
        }

        let round2 = |value: Option<f64>| value.map(|v| round_to(v, 2));

        let ma = MovingAverages {
            sma_20: round2(trend::calculate_sma(series, 20)),
            ema_20: round2(trend::calculate_ema(series, 20)),
            wma_20: round2(trend::calculate_wma(series, 20)),
            hma_20: round2(trend::calculate_hma(series, 20)),
            vwap: round2(trend::calculate_vwap(series)),
        };

        let macd = momentum::calculate_macd(series, 12, 26, 9).map(|m| MacdIndicator {
            value: round_to(m.value, 2),
            signal: round_to(m.signal, 2),
            histogram: round_to(m.histogram, 2),
        });
        let stochastic =
            momentum::calculate_stochastic(series, 14, 3).map(|s| StochasticIndicator {
                k: round_to(s.k, 2),
                d: round_to(s.d, 2),
            });
        let oscillators = Oscillators {
            rsi_14: round2(momentum::calculate_rsi(series, 14)),
            macd,
            stochastic,
            cci_20: round2(volume::calculate_cci(series, 20)),
            mfi_14: round2(volume::calculate_mfi(series, 14)),
        };

        let signals = derive_signals(&oscillators);

        Ok(IndicatorSet {
            ma,
            oscillators,
            signals,
        })
    }
}

/// Per-oscillator signals plus a 2-of-3 overall vote, computed from the
/// rounded values so the summary matches what the report shows.
fn derive_signals(oscillators: &Oscillators) -> SignalSummary {
    let rsi = match oscillators.rsi_14 {
        Some(rsi) if rsi < RSI_OVERSOLD => TradeSignal::Buy,
        Some(rsi) if rsi > RSI_OVERBOUGHT => TradeSignal::Sell,
        _ => TradeSignal::Neutral,
    };

    let macd = match &oscillators.macd {
        Some(m) if m.value > m.signal => TradeSignal::Buy,
        Some(m) if m.value < m.signal => TradeSignal::Sell,
        _ => TradeSignal::Neutral,
    };

    let stochastic = match &oscillators.stochastic {
        Some(s) if s.k > STOCH_OVERBOUGHT => TradeSignal::Sell,
        Some(s) if s.k < STOCH_OVERSOLD => TradeSignal::Buy,
        _ => TradeSignal::Neutral,
    };

    let overall = majority_vote(rsi, macd, stochastic);
    SignalSummary {
        rsi,
        macd,
        stochastic,
        overall,
    }
}

/// Overall signal requires at least two oscillators to agree
pub fn majority_vote(rsi: TradeSignal, macd: TradeSignal, stochastic: TradeSignal) -> TradeSignal {
    let votes = [rsi, macd, stochastic];
    let buys = votes.iter().filter(|s| **s == TradeSignal::Buy).count();
    let sells = votes.iter().filter(|s| **s == TradeSignal::Sell).count();

    if buys >= 2 {
        TradeSignal::Buy
    } else if sells >= 2 {
        TradeSignal::Sell
    } else {
        TradeSignal::Neutral
    }
}
