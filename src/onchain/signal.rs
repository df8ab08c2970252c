//! Combined market signal from on-chain metrics and sentiment.

use crate::models::onchain::{MarketSignal, OnchainMetrics, SentimentLabel, SentimentScore, WhaleActivity};

const SIGNAL_THRESHOLD: f64 = 0.3;

/// Majority-lean vote across sentiment, whale flows, MVRV and NVT.
///
/// Sentiment always votes. Whale flows vote only when activity is elevated,
/// following the direction of the net flow. MVRV and NVT vote only outside
/// their neutral bands.
pub fn combined_signal(metrics: &OnchainMetrics, sentiment: &SentimentScore) -> MarketSignal {
    let mut votes: Vec<i32> = Vec::with_capacity(4);

    votes.push(match sentiment.label {
        SentimentLabel::Positive => 1,
        SentimentLabel::Negative => -1,
        SentimentLabel::Neutral => 0,
    });

    if matches!(
        metrics.whale_activity,
        WhaleActivity::High | WhaleActivity::VeryHigh
    ) {
        let net_flow = metrics.exchange_flows.net_flow;
        if net_flow > 0 {
            votes.push(1);
        } else if net_flow < 0 {
            votes.push(-1);
        }
    }

    if metrics.mvrv_ratio > 1.5 {
        votes.push(1);
    } else if metrics.mvrv_ratio < 0.8 {
        votes.push(-1);
    }

    if metrics.nvt_ratio > 0.0 && metrics.nvt_ratio < 40.0 {
        votes.push(1);
    } else if metrics.nvt_ratio > 80.0 {
        votes.push(-1);
    }

    if votes.is_empty() {
        return MarketSignal::Neutral;
    }

    let avg = votes.iter().sum::<i32>() as f64 / votes.len() as f64;
    if avg > SIGNAL_THRESHOLD {
        MarketSignal::Bullish
    } else if avg < -SIGNAL_THRESHOLD {
        MarketSignal::Bearish
    } else {
        MarketSignal::Neutral
    }
}
