//! Unit tests for the prediction strategy and its model cache

use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{Duration, NaiveDate};
use coinlytics::config::{Capabilities, Config};
use coinlytics::error::EngineError;
use coinlytics::models::price::PriceBar;
use coinlytics::strategies::{AnalyticsStrategy, PredictionOptions, PredictionStrategy};

fn temp_dir(tag: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("coinlytics-{tag}-{}-{nanos}", std::process::id()))
}

fn test_config(dir: &PathBuf, model_runtime: bool) -> Config {
    Config {
        data_dir: dir.clone(),
        capabilities: Capabilities {
            model_runtime,
            sentiment_lexicon: true,
            external_feeds: false,
        },
    }
}

fn create_test_bars(count: usize) -> Vec<PriceBar> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    (0..count)
        .map(|i| {
            let price = 100.0 + i as f64 + 4.0 * (i as f64 * 0.6).sin();
            PriceBar::new(
                start + Duration::days(i as i64),
                price - 0.5,
                price + 1.0,
                price - 1.0,
                price,
                1_000.0 + i as f64 * 5.0,
            )
        })
        .collect()
}

fn small_options(use_cache: bool) -> PredictionOptions {
    PredictionOptions {
        lookback: 5,
        epochs: 2,
        use_cache,
    }
}

#[test]
fn test_runtime_disabled() {
    let dir = temp_dir("pred-disabled");
    let strategy = PredictionStrategy::new(&test_config(&dir, false));
    let error = strategy
        .analyze("BTC", &create_test_bars(30), &small_options(true))
        .unwrap_err();
    assert_eq!(error, EngineError::TensorRuntimeUnavailable);
}

#[test]
fn test_training_needs_twice_the_lookback() {
    let dir = temp_dir("pred-short");
    let strategy = PredictionStrategy::new(&test_config(&dir, true));
    let error = strategy
        .analyze("BTC", &create_test_bars(9), &small_options(false))
        .unwrap_err();
    assert_eq!(
        error,
        EngineError::NotEnoughData {
            required: 10,
            available: 9,
        }
    );
}

#[test]
fn test_trains_at_exact_minimum() {
    let dir = temp_dir("pred-minimum");
    let strategy = PredictionStrategy::new(&test_config(&dir, true));
    let report = strategy
        .analyze("BTC", &create_test_bars(10), &small_options(false))
        .unwrap();

    assert_eq!(report.symbol, "BTC");
    assert_eq!(report.lookback, 5);
    assert!(!report.cached);
    assert!(report.metrics.is_some());
    assert!(report.prediction.next_close.is_finite());
    // Trained model was persisted for reuse
    assert!(dir.join("models").join("BTC.json").is_file());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_cache_hit_skips_training_and_metrics() {
    let dir = temp_dir("pred-cache-hit");
    let strategy = PredictionStrategy::new(&test_config(&dir, true));
    let series = create_test_bars(14);

    let trained = strategy
        .analyze("BTC", &series, &small_options(false))
        .unwrap();
    assert!(!trained.cached);

    let cached = strategy
        .analyze("BTC", &series, &small_options(true))
        .unwrap();
    assert!(cached.cached);
    assert!(cached.metrics.is_none());
    assert!(cached.prediction.next_close.is_finite());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_cache_path_needs_lookback_bars() {
    let dir = temp_dir("pred-cache-short");
    let strategy = PredictionStrategy::new(&test_config(&dir, true));

    strategy
        .analyze("BTC", &create_test_bars(12), &small_options(false))
        .unwrap();

    let error = strategy
        .analyze("BTC", &create_test_bars(4), &small_options(true))
        .unwrap_err();
    assert_eq!(
        error,
        EngineError::NotEnoughData {
            required: 5,
            available: 4,
        }
    );

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_corrupted_cache_falls_back_to_training() {
    let dir = temp_dir("pred-cache-corrupt");
    let models_dir = dir.join("models");
    fs::create_dir_all(&models_dir).unwrap();
    fs::write(models_dir.join("BTC.json"), "{broken").unwrap();

    let strategy = PredictionStrategy::new(&test_config(&dir, true));
    let report = strategy
        .analyze("BTC", &create_test_bars(12), &small_options(true))
        .unwrap();
    assert!(!report.cached);
    assert!(report.metrics.is_some());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_use_cache_false_always_retrains() {
    let dir = temp_dir("pred-no-cache");
    let strategy = PredictionStrategy::new(&test_config(&dir, true));
    let series = create_test_bars(12);

    strategy
        .analyze("BTC", &series, &small_options(false))
        .unwrap();
    let second = strategy
        .analyze("BTC", &series, &small_options(false))
        .unwrap();
    assert!(!second.cached);
    assert!(second.metrics.is_some());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_cached_result_serialization_omits_metrics() {
    let dir = temp_dir("pred-serialize");
    let strategy = PredictionStrategy::new(&test_config(&dir, true));
    let series = create_test_bars(14);

    strategy
        .analyze("BTC", &series, &small_options(false))
        .unwrap();
    let cached = strategy
        .analyze("BTC", &series, &small_options(true))
        .unwrap();

    let payload = serde_json::to_string(&cached).unwrap();
    assert!(!payload.contains("\"metrics\""));
    assert!(payload.contains("\"cached\":true"));

    let _ = fs::remove_dir_all(&dir);
}
