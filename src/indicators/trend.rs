//! Trend indicators: moving averages and VWAP

use crate::common::math;
use crate::models::price::{closes, PriceBar};

/// Simple moving average of close prices for the latest bar
pub fn calculate_sma(bars: &[PriceBar], period: usize) -> Option<f64> {
    math::sma(&closes(bars), period)
}

/// Exponential moving average of close prices for the latest bar
pub fn calculate_ema(bars: &[PriceBar], period: usize) -> Option<f64> {
    math::ema(&closes(bars), period)
}

/// Weighted moving average with linear weights 1..period (oldest to newest)
pub fn calculate_wma(bars: &[PriceBar], period: usize) -> Option<f64> {
    math::wma(&closes(bars), period)
}

/// Hull moving average
///
/// HMA(n) = WMA(sqrt(n)) over (2 * WMA(n/2) - WMA(n))
pub fn calculate_hma(bars: &[PriceBar], period: usize) -> Option<f64> {
    let half = period / 2;
    let sqrt_len = (period as f64).sqrt().floor() as usize;
    if half == 0 || sqrt_len == 0 || bars.len() < period + sqrt_len - 1 {
        return None;
    }

    let close_values = closes(bars);
    let wma_half = math::wma_series(&close_values, half);
    let wma_full = math::wma_series(&close_values, period);

    // Both series end at the last bar; wma_half starts earlier, so align by
    // the fixed offset between their first defined indices.
    let offset = period - half;
    let raw: Vec<f64> = wma_full
        .iter()
        .enumerate()
        .map(|(i, &full)| 2.0 * wma_half[i + offset] - full)
        .collect();

    math::wma(&raw, sqrt_len)
}

/// Volume-weighted average price, cumulative over the whole series
///
/// VWAP = cumsum(typical_price * volume) / cumsum(volume)
pub fn calculate_vwap(bars: &[PriceBar]) -> Option<f64> {
    if bars.is_empty() {
        return None;
    }
    let mut cum_volume = 0.0;
    let mut cum_tp_volume = 0.0;
    for bar in bars {
        cum_volume += bar.volume;
        cum_tp_volume += bar.typical_price() * bar.volume;
    }
    if cum_volume <= 0.0 {
        return None;
    }
    Some(cum_tp_volume / cum_volume)
}
