//! Unit tests for the external data source helpers

use coinlytics::onchain::sources::symbol_texts;
use coinlytics::onchain::{RedditTexts, TextSource};

fn post(title: &str, body: &str) -> (String, String) {
    (title.to_string(), body.to_string())
}

#[test]
fn test_symbol_match_is_case_insensitive() {
    let posts = vec![
        post("BTC breaks out", "strong volume"),
        post("btc dipped overnight", ""),
        post("Is Btc ready for a rally?", "maybe"),
    ];
    let texts = symbol_texts(&posts, "BTC");
    assert_eq!(texts.len(), 3);
}

#[test]
fn test_non_matching_titles_are_dropped() {
    let posts = vec![
        post("ETH merge anniversary", "recap"),
        post("Market roundup", "BTC mentioned only in the body"),
    ];
    assert!(symbol_texts(&posts, "BTC").is_empty());
}

#[test]
fn test_texts_join_title_and_body() {
    let posts = vec![post("BTC rally continues", "volume is up")];
    let texts = symbol_texts(&posts, "BTC");
    assert_eq!(texts, vec!["BTC rally continues. volume is up".to_string()]);
}

#[test]
fn test_texts_are_capped_at_fifteen() {
    let posts: Vec<(String, String)> = (0..40)
        .map(|i| post(&format!("BTC update {i}"), "details"))
        .collect();
    assert_eq!(symbol_texts(&posts, "BTC").len(), 15);
}

#[test]
fn test_reddit_feed_is_a_text_source() {
    // The strategy takes the feed through its boxed seam
    let _source: Box<dyn TextSource + Send + Sync> = Box::new(RedditTexts);
}
