//! On-chain metrics, sentiment and combined-signal types.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WhaleActivity {
    Normal,
    High,
    VeryHigh,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeFlows {
    pub inflow: u64,
    pub outflow: u64,
    pub net_flow: i64,
}

/// On-chain style metrics derived from price/volume statistics rather than
/// fetched from a ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OnchainMetrics {
    pub active_addresses: u64,
    pub transaction_count: usize,
    pub exchange_flows: ExchangeFlows,
    pub whale_activity: WhaleActivity,
    pub hash_rate: f64,
    pub total_value_locked: u64,
    pub nvt_ratio: f64,
    pub mvrv_ratio: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

/// Aggregate sentiment over a set of text snippets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentScore {
    pub positive_count: usize,
    pub neutral_count: usize,
    pub negative_count: usize,
    /// Mean compound score in [-1, 1]
    pub compound_score: f64,
    pub label: SentimentLabel,
    pub total_analyzed: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Combined directional market signal, derived per request and never stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketSignal {
    Bullish,
    Bearish,
    Neutral,
}
