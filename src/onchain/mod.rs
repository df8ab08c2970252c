//! On-chain metric simulation, sentiment scoring and the combined signal.

pub mod metrics;
pub mod sentiment;
pub mod signal;
pub mod sources;

pub use signal::combined_signal;
pub use sources::{DefiLlamaTvl, RedditTexts, TextSource, TvlSource};
