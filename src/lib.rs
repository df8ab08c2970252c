//! Crypto market analytics engine.
//!
//! Three strategies behind one facade: technical indicators for the latest
//! bar, recurrent-model next-close prediction with per-symbol model caching,
//! and simulated on-chain metrics combined with lexicon sentiment into a
//! single market signal.

pub mod common;
pub mod config;
pub mod error;
pub mod facade;
pub mod indicators;
pub mod logging;
pub mod ml;
pub mod models;
pub mod onchain;
pub mod strategies;

pub use error::{EngineError, EngineResult};
pub use facade::{AnalyticsFacade, TechnicalReport, Timeframe};
