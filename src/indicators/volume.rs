//! Volume-weighted oscillators: CCI and MFI

use crate::common::math;
use crate::models::price::PriceBar;

/// Calculate the Commodity Channel Index
///
/// CCI = (TP - SMA(TP)) / (0.015 * mean deviation)
pub fn calculate_cci(bars: &[PriceBar], period: usize) -> Option<f64> {
    if period == 0 || bars.len() < period {
        return None;
    }

    let window = &bars[bars.len() - period..];
    let typical: Vec<f64> = window.iter().map(|b| b.typical_price()).collect();
    let sma_tp = math::mean(&typical)?;
    let mean_dev = typical.iter().map(|tp| (tp - sma_tp).abs()).sum::<f64>() / period as f64;

    if mean_dev == 0.0 {
        return None;
    }
    let last_tp = *typical.last()?;
    Some((last_tp - sma_tp) / (0.015 * mean_dev))
}

/// Calculate the Money Flow Index
///
/// MFI = 100 - 100 / (1 + positive flow / negative flow)
pub fn calculate_mfi(bars: &[PriceBar], period: usize) -> Option<f64> {
    if period == 0 || bars.len() < period + 1 {
        return None;
    }

    let start = bars.len() - period - 1;
    let mut positive_flow = 0.0;
    let mut negative_flow = 0.0;
    for pair in bars[start..].windows(2) {
        let prev_tp = pair[0].typical_price();
        let tp = pair[1].typical_price();
        let raw_flow = tp * pair[1].volume;
        if tp > prev_tp {
            positive_flow += raw_flow;
        } else if tp < prev_tp {
            negative_flow += raw_flow;
        }
    }

    if negative_flow == 0.0 {
        return Some(100.0);
    }
    let ratio = positive_flow / negative_flow;
    Some(100.0 - 100.0 / (1.0 + ratio))
}
