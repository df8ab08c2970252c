use chrono::{Duration, NaiveDate};
use coinlytics::config::Config;
use coinlytics::logging::init_logging;
use coinlytics::models::price::PriceBar;
use coinlytics::onchain::{DefiLlamaTvl, RedditTexts};
use coinlytics::strategies::{OnchainSentimentStrategy, PredictionOptions};
use coinlytics::{AnalyticsFacade, Timeframe};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let config = Config::from_env();
    let mut facade = AnalyticsFacade::new(&config);
    if config.capabilities.external_feeds {
        facade = facade.with_onchain_strategy(
            OnchainSentimentStrategy::new(config.capabilities)
                .with_tvl_source(Box::new(DefiLlamaTvl))
                .with_text_source(Box::new(RedditTexts)),
        );
    }
    let series = synthetic_series(120)?;

    println!("Technical indicators:");
    match facade.technical("BTC", &series, Timeframe::Month) {
        Ok(report) => println!("{}", serde_json::to_string_pretty(&report)?),
        Err(error) => println!("{}", serde_json::to_string_pretty(&error)?),
    }
    println!();

    println!("Price prediction:");
    let options = PredictionOptions {
        lookback: 30,
        epochs: 5,
        use_cache: true,
    };
    match facade.prediction("BTC", &series, &options) {
        Ok(report) => println!("{}", serde_json::to_string_pretty(&report)?),
        Err(error) => println!("{}", serde_json::to_string_pretty(&error)?),
    }
    println!();

    println!("On-chain and sentiment:");
    match facade.onchain_sentiment("BTC", &series) {
        Ok(report) => println!("{}", serde_json::to_string_pretty(&report)?),
        Err(error) => println!("{}", serde_json::to_string_pretty(&error)?),
    }

    Ok(())
}

/// Deterministic wavy OHLCV series for the demo
fn synthetic_series(count: usize) -> Result<Vec<PriceBar>, Box<dyn std::error::Error>> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).ok_or("invalid start date")?;
    let mut bars = Vec::with_capacity(count);
    for i in 0..count {
        let phase = i as f64 * 0.12;
        let close = 45_000.0 + 2_500.0 * phase.sin() + i as f64 * 12.0;
        let open = close - 80.0 * phase.cos();
        let high = open.max(close) + 150.0;
        let low = open.min(close) - 150.0;
        let volume = 1_000.0 + 400.0 * (phase * 1.7).cos().abs();
        bars.push(PriceBar::new(
            start + Duration::days(i as i64),
            open,
            high,
            low,
            close,
            volume,
        ));
    }
    Ok(bars)
}
