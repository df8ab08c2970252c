//! Lexicon-based sentiment scoring over market commentary.
//!
//! Each text is cleaned, scored word by word against a small crypto-tuned
//! valence lexicon, and the summed valence is squashed into [-1, 1] with the
//! usual `s / sqrt(s^2 + 15)` normalization. When the lexicon runtime is
//! flagged off the engine falls back to a clearly-labelled simulated score.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::common::math::round_to;
use crate::models::onchain::{SentimentLabel, SentimentScore};

const NORMALIZATION_ALPHA: f64 = 15.0;
const LABEL_THRESHOLD: f64 = 0.05;
const MOCK_POOL_SIZE: usize = 15;

/// Word valences on the familiar -4..4 scale
const LEXICON: &[(&str, f64)] = &[
    ("adoption", 1.4),
    ("bullish", 2.5),
    ("breakout", 1.9),
    ("gain", 1.8),
    ("gains", 1.8),
    ("growth", 1.7),
    ("investment", 1.2),
    ("milestone", 1.4),
    ("momentum", 1.1),
    ("optimism", 2.4),
    ("partnership", 1.3),
    ("positive", 2.1),
    ("rally", 2.1),
    ("record", 1.5),
    ("soar", 2.6),
    ("strong", 2.0),
    ("surge", 2.3),
    ("upgrade", 1.5),
    ("upward", 1.6),
    ("ban", -2.4),
    ("bearish", -2.5),
    ("concern", -1.4),
    ("concerns", -1.4),
    ("correction", -1.3),
    ("crash", -3.1),
    ("decline", -1.6),
    ("dump", -2.2),
    ("fear", -2.2),
    ("hack", -2.9),
    ("issues", -1.0),
    ("lawsuit", -2.1),
    ("loss", -1.9),
    ("losses", -1.9),
    ("negative", -2.1),
    ("plunge", -2.7),
    ("risk", -1.1),
    ("scam", -3.2),
    ("scrutiny", -1.2),
    ("selloff", -2.3),
    ("warn", -1.9),
    ("warns", -1.9),
    ("weak", -1.8),
];

/// Lowercase, strip URLs, replace punctuation with spaces, collapse whitespace
pub fn clean_text(text: &str) -> String {
    let lowered = text.to_lowercase();
    let without_urls: Vec<&str> = lowered
        .split_whitespace()
        .filter(|word| {
            !word.starts_with("http") && !word.starts_with("www")
        })
        .collect();

    let mut cleaned = String::with_capacity(lowered.len());
    for ch in without_urls.join(" ").chars() {
        if ch.is_alphanumeric() || ch == '_' {
            cleaned.push(ch);
        } else {
            cleaned.push(' ');
        }
    }
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalized compound score for one cleaned text
pub fn compound_score(cleaned: &str) -> f64 {
    let sum: f64 = cleaned
        .split_whitespace()
        .filter_map(|word| {
            LEXICON
                .iter()
                .find(|(entry, _)| *entry == word)
                .map(|(_, valence)| *valence)
        })
        .sum();
    sum / (sum * sum + NORMALIZATION_ALPHA).sqrt()
}

/// Canned headlines used when no external texts are available. Weighted
/// towards the positive family and shuffled before sampling.
pub fn mock_text_pool<R: Rng>(symbol: &str, rng: &mut R) -> Vec<String> {
    let positive = [
        format!("{symbol} shows strong bullish momentum with increasing adoption"),
        format!("Major institutional investor announces {symbol} investment"),
        format!("{symbol} network activity reaches all-time high"),
        format!("Positive developments in {symbol} ecosystem drive optimism"),
        format!("{symbol} technical indicators suggest upward trend"),
    ];
    let neutral = [
        format!("{symbol} price consolidates in narrow range"),
        format!("Market observers watching {symbol} closely"),
        format!("{symbol} trading volume remains stable"),
    ];
    let negative = [
        format!("Concerns raised about {symbol} scalability issues"),
        format!("{symbol} faces regulatory scrutiny in key markets"),
        format!("Analysts warn of potential {symbol} correction"),
    ];

    let mut pool: Vec<String> = Vec::new();
    for _ in 0..3 {
        pool.extend(positive.iter().cloned());
    }
    for _ in 0..2 {
        pool.extend(neutral.iter().cloned());
    }
    pool.extend(negative.iter().cloned());

    pool.shuffle(rng);
    pool.truncate(MOCK_POOL_SIZE);
    pool
}

/// Fallback score when the lexicon runtime is unavailable
pub fn simulated_sentiment<R: Rng>(rng: &mut R) -> SentimentScore {
    let positive_count = rng.gen_range(8..=15);
    let neutral_count = rng.gen_range(3..=8);
    let negative_count = rng.gen_range(2..=6);
    let score = rng.gen_range(0.15..0.45);

    SentimentScore {
        positive_count,
        neutral_count,
        negative_count,
        compound_score: round_to(score, 3),
        label: SentimentLabel::Positive,
        total_analyzed: positive_count + neutral_count + negative_count,
        note: Some("simulated data, sentiment lexicon not available".to_string()),
    }
}

/// Score a batch of texts. Empty cleaned texts are skipped for counting but
/// still count towards `total_analyzed`.
pub fn score_texts(texts: &[String]) -> SentimentScore {
    let mut positive_count = 0;
    let mut neutral_count = 0;
    let mut negative_count = 0;
    let mut compounds: Vec<f64> = Vec::with_capacity(texts.len());

    for text in texts {
        let cleaned = clean_text(text);
        if cleaned.is_empty() {
            continue;
        }
        let compound = compound_score(&cleaned);
        compounds.push(compound);
        if compound >= LABEL_THRESHOLD {
            positive_count += 1;
        } else if compound <= -LABEL_THRESHOLD {
            negative_count += 1;
        } else {
            neutral_count += 1;
        }
    }

    let avg = if compounds.is_empty() {
        0.0
    } else {
        compounds.iter().sum::<f64>() / compounds.len() as f64
    };
    let label = if avg >= LABEL_THRESHOLD {
        SentimentLabel::Positive
    } else if avg <= -LABEL_THRESHOLD {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    };

    SentimentScore {
        positive_count,
        neutral_count,
        negative_count,
        compound_score: round_to(avg, 3),
        label,
        total_analyzed: texts.len(),
        note: None,
    }
}
