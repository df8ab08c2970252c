//! External data sources for the on-chain engine.
//!
//! Both traits are injection seams: production wires the DefiLlama TVL
//! feed and the Reddit text feed when external feeds are enabled, tests
//! substitute fixtures. Every source is best-effort and the caller always
//! has a curated fallback.

use std::time::Duration;

use serde::Deserialize;
use tracing::warn;

const DEFILLAMA_PROTOCOLS_URL: &str = "https://api.llama.fi/protocols";
const FETCH_TIMEOUT: Duration = Duration::from_secs(5);
const REDDIT_USER_AGENT: &str = "coinlytics/1.0";
const REDDIT_SUBREDDITS: &[&str] = &["cryptocurrency", "bitcoin", "ethereum", "cryptomarkets"];
/// Cap on texts handed to the sentiment scorer
const MAX_TEXTS: usize = 15;

/// Live total-value-locked lookup for one asset
pub trait TvlSource {
    fn fetch_tvl(&self, symbol: &str) -> Option<u64>;
}

/// Market commentary texts (news, social) mentioning one asset
pub trait TextSource {
    fn fetch_texts(&self, symbol: &str) -> Vec<String>;
}

#[derive(Debug, Deserialize)]
struct ProtocolEntry {
    #[serde(default)]
    chain: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    tvl: Option<f64>,
}

/// Aggregated per-chain TVL from the DefiLlama protocols listing
#[derive(Debug, Default, Clone)]
pub struct DefiLlamaTvl;

impl DefiLlamaTvl {
    fn chain_name(symbol: &str) -> String {
        match symbol {
            "BTC" => "bitcoin".to_string(),
            "ETH" => "ethereum".to_string(),
            "BNB" => "bsc".to_string(),
            "SOL" => "solana".to_string(),
            "AVAX" => "avalanche".to_string(),
            other => other.to_lowercase(),
        }
    }
}

impl TvlSource for DefiLlamaTvl {
    fn fetch_tvl(&self, symbol: &str) -> Option<u64> {
        let client = match reqwest::blocking::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
        {
            Ok(client) => client,
            Err(error) => {
                warn!(%error, "failed to build tvl client");
                return None;
            }
        };

        let response = match client.get(DEFILLAMA_PROTOCOLS_URL).send() {
            Ok(response) if response.status().is_success() => response,
            Ok(response) => {
                warn!(status = %response.status(), "tvl feed returned non-success");
                return None;
            }
            Err(error) => {
                warn!(%error, "tvl feed unreachable");
                return None;
            }
        };

        let protocols: Vec<ProtocolEntry> = match response.json() {
            Ok(protocols) => protocols,
            Err(error) => {
                warn!(%error, "tvl feed returned malformed payload");
                return None;
            }
        };

        let chain = Self::chain_name(symbol);
        let total: f64 = protocols
            .iter()
            .filter(|p| {
                p.chain.as_deref() == Some(chain.as_str())
                    || p.name.as_deref().map(str::to_lowercase) == Some(chain.clone())
            })
            .filter_map(|p| p.tvl)
            .sum();

        if total > 0.0 {
            Some(total as u64)
        } else {
            None
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct SubredditListing {
    #[serde(default)]
    data: ListingData,
}

#[derive(Debug, Default, Deserialize)]
struct ListingData {
    #[serde(default)]
    children: Vec<ListingChild>,
}

#[derive(Debug, Default, Deserialize)]
struct ListingChild {
    #[serde(default)]
    data: PostData,
}

#[derive(Debug, Default, Deserialize)]
struct PostData {
    #[serde(default)]
    title: String,
    #[serde(default)]
    selftext: String,
}

/// Hot posts from a fixed set of crypto subreddits
#[derive(Debug, Default, Clone)]
pub struct RedditTexts;

impl TextSource for RedditTexts {
    fn fetch_texts(&self, symbol: &str) -> Vec<String> {
        let client = match reqwest::blocking::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent(REDDIT_USER_AGENT)
            .build()
        {
            Ok(client) => client,
            Err(error) => {
                warn!(%error, "failed to build text feed client");
                return Vec::new();
            }
        };

        let mut posts: Vec<(String, String)> = Vec::new();
        for subreddit in REDDIT_SUBREDDITS {
            let url = format!("https://www.reddit.com/r/{subreddit}/hot.json?limit=25");
            let response = match client.get(&url).send() {
                Ok(response) if response.status().is_success() => response,
                Ok(response) => {
                    warn!(subreddit, status = %response.status(), "text feed returned non-success");
                    continue;
                }
                Err(error) => {
                    warn!(subreddit, %error, "text feed unreachable");
                    continue;
                }
            };

            let listing: SubredditListing = match response.json() {
                Ok(listing) => listing,
                Err(error) => {
                    warn!(subreddit, %error, "text feed returned malformed payload");
                    continue;
                }
            };

            posts.extend(
                listing
                    .data
                    .children
                    .into_iter()
                    .map(|child| (child.data.title, child.data.selftext)),
            );
        }

        symbol_texts(&posts, symbol)
    }
}

/// Posts whose title mentions the symbol, joined into scoreable snippets
pub fn symbol_texts(posts: &[(String, String)], symbol: &str) -> Vec<String> {
    let needle = symbol.to_lowercase();
    posts
        .iter()
        .filter(|(title, _)| title.to_lowercase().contains(&needle))
        .map(|(title, body)| format!("{title}. {body}"))
        .take(MAX_TEXTS)
        .collect()
}
