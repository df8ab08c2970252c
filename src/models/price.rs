//! OHLCV price bars and series preparation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One daily OHLCV observation for a symbol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl PriceBar {
    pub fn new(date: NaiveDate, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Typical price used by VWAP, CCI and MFI
    pub fn typical_price(&self) -> f64 {
        (self.high + self.low + self.close) / 3.0
    }
}

/// Normalize a raw price series before any strategy consumes it: stable
/// ascending sort by date, duplicate dates collapsed to the latest
/// observation.
pub fn prepare_series(bars: &[PriceBar]) -> Vec<PriceBar> {
    let mut sorted = bars.to_vec();
    sorted.sort_by_key(|bar| bar.date);

    let mut prepared: Vec<PriceBar> = Vec::with_capacity(sorted.len());
    for bar in sorted {
        if let Some(last) = prepared.last_mut() {
            if last.date == bar.date {
                *last = bar;
                continue;
            }
        }
        prepared.push(bar);
    }
    prepared
}

/// Close prices of a series
pub fn closes(bars: &[PriceBar]) -> Vec<f64> {
    bars.iter().map(|b| b.close).collect()
}

/// Traded volumes of a series
pub fn volumes(bars: &[PriceBar]) -> Vec<f64> {
    bars.iter().map(|b| b.volume).collect()
}
