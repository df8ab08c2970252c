//! Momentum oscillators: RSI, MACD and Stochastic

use crate::common::math;
use crate::models::indicators::{MacdIndicator, StochasticIndicator};
use crate::models::price::{closes, PriceBar};

/// Calculate RSI with Wilder smoothing
///
/// RSI = 100 - (100 / (1 + RS)), RS = smoothed gain / smoothed loss
pub fn calculate_rsi(bars: &[PriceBar], period: usize) -> Option<f64> {
    if period == 0 || bars.len() < period + 1 {
        return None;
    }

    let close_values = closes(bars);
    let mut gains = Vec::with_capacity(close_values.len() - 1);
    let mut losses = Vec::with_capacity(close_values.len() - 1);
    for pair in close_values.windows(2) {
        let change = pair[1] - pair[0];
        gains.push(change.max(0.0));
        losses.push((-change).max(0.0));
    }

    let mut avg_gain = gains[..period].iter().sum::<f64>() / period as f64;
    let mut avg_loss = losses[..period].iter().sum::<f64>() / period as f64;
    for i in period..gains.len() {
        avg_gain = (avg_gain * (period - 1) as f64 + gains[i]) / period as f64;
        avg_loss = (avg_loss * (period - 1) as f64 + losses[i]) / period as f64;
    }

    if avg_loss == 0.0 {
        return Some(100.0);
    }
    let rs = avg_gain / avg_loss;
    Some(100.0 - 100.0 / (1.0 + rs))
}

/// Calculate MACD value/signal/histogram for the latest bar
///
/// MACD = EMA(fast) - EMA(slow), Signal = EMA(signal_period) of MACD
pub fn calculate_macd(
    bars: &[PriceBar],
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
) -> Option<MacdIndicator> {
    if bars.len() < slow_period + signal_period - 1 {
        return None;
    }

    let close_values = closes(bars);
    let fast_series = math::ema_series(&close_values, fast_period);
    let slow_series = math::ema_series(&close_values, slow_period);

    // Align the fast series to the slow one; both end at the last bar.
    let offset = slow_period - fast_period;
    let macd_series: Vec<f64> = slow_series
        .iter()
        .enumerate()
        .map(|(i, &slow)| fast_series[i + offset] - slow)
        .collect();

    let value = *macd_series.last()?;
    let signal = math::ema(&macd_series, signal_period)?;

    Some(MacdIndicator {
        value,
        signal,
        histogram: value - signal,
    })
}

/// Calculate the Stochastic Oscillator
///
/// %K = 100 * (close - LL(period)) / (HH(period) - LL(period))
/// %D = SMA(smooth) of %K
pub fn calculate_stochastic(
    bars: &[PriceBar],
    period: usize,
    smooth: usize,
) -> Option<StochasticIndicator> {
    if period == 0 || smooth == 0 || bars.len() < period + smooth - 1 {
        return None;
    }

    let mut k_values = Vec::with_capacity(smooth);
    for end in (bars.len() - smooth + 1)..=bars.len() {
        let window = &bars[end - period..end];
        let highest = window.iter().map(|b| b.high).fold(f64::MIN, f64::max);
        let lowest = window.iter().map(|b| b.low).fold(f64::MAX, f64::min);
        let close = bars[end - 1].close;
        let range = highest - lowest;
        // A flat window has no defined position; treat it as the midpoint.
        let k = if range > 0.0 {
            100.0 * (close - lowest) / range
        } else {
            50.0
        };
        k_values.push(k);
    }

    let k = *k_values.last()?;
    let d = math::mean(&k_values)?;
    Some(StochasticIndicator { k, d })
}
