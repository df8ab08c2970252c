//! Process-wide configuration, resolved once at startup.

use std::env;
use std::path::PathBuf;

/// Deployment environment name, used to pick the log format
pub fn get_environment() -> String {
    env::var("COINLYTICS_ENV").unwrap_or_else(|_| "sandbox".to_string())
}

/// Optional-capability flags. Detected once at startup and immutable
/// afterwards; engines branch on these instead of probing at request time.
#[derive(Debug, Clone, Copy)]
pub struct Capabilities {
    /// Sequence-model training/inference is allowed in this deployment
    pub model_runtime: bool,
    /// The built-in sentiment lexicon may be used; when false, sentiment is
    /// synthesized and annotated as simulated
    pub sentiment_lexicon: bool,
    /// External data overrides (TVL lookup, text feeds) may be queried
    pub external_feeds: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            model_runtime: true,
            sentiment_lexicon: true,
            external_feeds: false,
        }
    }
}

impl Capabilities {
    pub fn detect() -> Self {
        Self {
            model_runtime: env_flag("COINLYTICS_MODEL_RUNTIME", true),
            sentiment_lexicon: env_flag("COINLYTICS_SENTIMENT_LEXICON", true),
            external_feeds: env_flag("COINLYTICS_EXTERNAL_FEEDS", false),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Root directory for durable state (the per-symbol model store)
    pub data_dir: PathBuf,
    pub capabilities: Capabilities,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            capabilities: Capabilities::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self {
            data_dir: env::var("COINLYTICS_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data")),
            capabilities: Capabilities::detect(),
        }
    }
}

fn env_flag(name: &str, default: bool) -> bool {
    match env::var(name) {
        Ok(value) => matches!(value.as_str(), "1" | "true" | "yes"),
        Err(_) => default,
    }
}
