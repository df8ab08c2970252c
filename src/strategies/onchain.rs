//! Combined on-chain metrics and sentiment strategy.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::debug;

use crate::config::Capabilities;
use crate::error::{EngineError, EngineResult};
use crate::models::onchain::{MarketSignal, OnchainMetrics, SentimentScore};
use crate::models::price::PriceBar;
use crate::onchain::{self, metrics, sentiment, TextSource, TvlSource};

use super::AnalyticsStrategy;

/// Minimum number of bars for the on-chain metric proxies
pub const MIN_BARS: usize = 7;

#[derive(Debug, Clone, Serialize)]
pub struct OnchainReport {
    pub symbol: String,
    pub on_chain: OnchainMetrics,
    pub sentiment: SentimentScore,
    pub combined_signal: MarketSignal,
}

pub struct OnchainSentimentStrategy {
    capabilities: Capabilities,
    tvl_source: Option<Box<dyn TvlSource + Send + Sync>>,
    text_source: Option<Box<dyn TextSource + Send + Sync>>,
    rng_seed: Option<u64>,
}

impl OnchainSentimentStrategy {
    pub fn new(capabilities: Capabilities) -> Self {
        Self {
            capabilities,
            tvl_source: None,
            text_source: None,
            rng_seed: None,
        }
    }

    pub fn with_tvl_source(mut self, source: Box<dyn TvlSource + Send + Sync>) -> Self {
        self.tvl_source = Some(source);
        self
    }

    pub fn with_text_source(mut self, source: Box<dyn TextSource + Send + Sync>) -> Self {
        self.text_source = Some(source);
        self
    }

    /// Fix the rng used for shuffled mock texts and simulated fallbacks
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    fn rng(&self) -> StdRng {
        match self.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    fn live_tvl(&self, symbol: &str) -> Option<u64> {
        if !self.capabilities.external_feeds {
            return None;
        }
        let tvl = self.tvl_source.as_ref()?.fetch_tvl(symbol);
        if let Some(tvl) = tvl {
            debug!(symbol, tvl, "using live tvl override");
        }
        tvl
    }

    fn analyze_sentiment(&self, symbol: &str) -> SentimentScore {
        let mut rng = self.rng();
        if !self.capabilities.sentiment_lexicon {
            return sentiment::simulated_sentiment(&mut rng);
        }

        let mut texts: Vec<String> = Vec::new();
        if self.capabilities.external_feeds {
            if let Some(source) = &self.text_source {
                texts = source.fetch_texts(symbol);
            }
        }
        if texts.is_empty() {
            texts = sentiment::mock_text_pool(symbol, &mut rng);
        }
        sentiment::score_texts(&texts)
    }
}

impl AnalyticsStrategy for OnchainSentimentStrategy {
    type Options = ();
    type Report = OnchainReport;

    fn analyze(
        &self,
        symbol: &str,
        series: &[PriceBar],
        _options: &Self::Options,
    ) -> EngineResult<Self::Report> {
        if series.len() < MIN_BARS {
            return Err(EngineError::NotEnoughData {
                required: MIN_BARS,
                available: series.len(),
            });
        }

        let tvl_override = self.live_tvl(symbol);
        let on_chain = metrics::compute_metrics(series, symbol, tvl_override).ok_or_else(|| {
            EngineError::CalculationFailed {
                reason: "unable to compute on-chain metrics".to_string(),
            }
        })?;

        let sentiment = self.analyze_sentiment(symbol);
        let combined_signal = onchain::combined_signal(&on_chain, &sentiment);

        Ok(OnchainReport {
            symbol: symbol.to_string(),
            on_chain,
            sentiment,
            combined_signal,
        })
    }
}
