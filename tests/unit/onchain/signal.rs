//! Unit tests for the combined market signal

use coinlytics::models::onchain::{
    ExchangeFlows, MarketSignal, OnchainMetrics, SentimentLabel, SentimentScore, WhaleActivity,
};
use coinlytics::onchain::combined_signal;

fn metrics_fixture(
    whale: WhaleActivity,
    net_flow: i64,
    mvrv: f64,
    nvt: f64,
) -> OnchainMetrics {
    OnchainMetrics {
        active_addresses: 900_000,
        transaction_count: 30,
        exchange_flows: ExchangeFlows {
            inflow: 600,
            outflow: 400,
            net_flow,
        },
        whale_activity: whale,
        hash_rate: 450.0,
        total_value_locked: 48_000_000_000,
        nvt_ratio: nvt,
        mvrv_ratio: mvrv,
    }
}

fn sentiment_fixture(label: SentimentLabel) -> SentimentScore {
    SentimentScore {
        positive_count: 5,
        neutral_count: 5,
        negative_count: 5,
        compound_score: 0.0,
        label,
        total_analyzed: 15,
        note: None,
    }
}

#[test]
fn test_all_factors_bullish() {
    let metrics = metrics_fixture(WhaleActivity::Normal, 0, 2.0, 20.0);
    let sentiment = sentiment_fixture(SentimentLabel::Positive);
    // Votes: sentiment +1, mvrv +1, nvt +1
    assert_eq!(combined_signal(&metrics, &sentiment), MarketSignal::Bullish);
}

#[test]
fn test_all_factors_bearish() {
    let metrics = metrics_fixture(WhaleActivity::High, -200, 0.5, 100.0);
    let sentiment = sentiment_fixture(SentimentLabel::Negative);
    // Votes: sentiment -1, whale flow -1, mvrv -1, nvt -1
    assert_eq!(combined_signal(&metrics, &sentiment), MarketSignal::Bearish);
}

#[test]
fn test_neutral_bands_yield_neutral() {
    let metrics = metrics_fixture(WhaleActivity::Normal, 0, 1.0, 50.0);
    let sentiment = sentiment_fixture(SentimentLabel::Neutral);
    // Only the sentiment vote, and it is zero
    assert_eq!(combined_signal(&metrics, &sentiment), MarketSignal::Neutral);
}

#[test]
fn test_bullish_with_elevated_whale_inflow() {
    let metrics = metrics_fixture(WhaleActivity::High, 100, 2.0, 20.0);
    let sentiment = sentiment_fixture(SentimentLabel::Positive);
    // Votes: +1, +1, +1, +1
    assert_eq!(combined_signal(&metrics, &sentiment), MarketSignal::Bullish);
}

#[test]
fn test_bearish_without_whale_vote() {
    let metrics = metrics_fixture(WhaleActivity::Normal, 100, 0.5, 90.0);
    let sentiment = sentiment_fixture(SentimentLabel::Negative);
    // Votes: -1, -1, -1
    assert_eq!(combined_signal(&metrics, &sentiment), MarketSignal::Bearish);
}

#[test]
fn test_neutral_with_only_zero_vote() {
    let metrics = metrics_fixture(WhaleActivity::Normal, 0, 1.0, 0.0);
    let sentiment = sentiment_fixture(SentimentLabel::Neutral);
    // NVT at zero contributes no vote, leaving just the zero sentiment vote
    assert_eq!(combined_signal(&metrics, &sentiment), MarketSignal::Neutral);
}

#[test]
fn test_whale_vote_skipped_on_zero_net_flow() {
    let metrics = metrics_fixture(WhaleActivity::VeryHigh, 0, 1.0, 50.0);
    let sentiment = sentiment_fixture(SentimentLabel::Positive);
    // Single +1 vote, average 1.0
    assert_eq!(combined_signal(&metrics, &sentiment), MarketSignal::Bullish);
}

#[test]
fn test_whale_vote_follows_flow_direction() {
    let metrics = metrics_fixture(WhaleActivity::High, 500, 1.0, 50.0);
    let sentiment = sentiment_fixture(SentimentLabel::Negative);
    // Votes: -1 and +1 average to zero
    assert_eq!(combined_signal(&metrics, &sentiment), MarketSignal::Neutral);
}

#[test]
fn test_normal_whale_activity_does_not_vote() {
    let metrics = metrics_fixture(WhaleActivity::Normal, 500, 1.0, 50.0);
    let sentiment = sentiment_fixture(SentimentLabel::Negative);
    // Only the sentiment vote remains
    assert_eq!(combined_signal(&metrics, &sentiment), MarketSignal::Bearish);
}

#[test]
fn test_nvt_zero_does_not_vote() {
    let metrics = metrics_fixture(WhaleActivity::Normal, 0, 1.0, 0.0);
    let sentiment = sentiment_fixture(SentimentLabel::Positive);
    assert_eq!(combined_signal(&metrics, &sentiment), MarketSignal::Bullish);
}

#[test]
fn test_mixed_votes_inside_threshold() {
    let metrics = metrics_fixture(WhaleActivity::Normal, 0, 2.0, 100.0);
    let sentiment = sentiment_fixture(SentimentLabel::Neutral);
    // Votes: 0, +1, -1 average to zero
    assert_eq!(combined_signal(&metrics, &sentiment), MarketSignal::Neutral);
}
