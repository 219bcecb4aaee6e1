//! Lexicon-based sentiment classification
//!
//! Polarity is the mean score of the opinion words found in the text, each
//! adjusted by a directly preceding intensifier and flipped/damped by a
//! nearby negation. The result lies in [-1.0, 1.0] and is bucketed into a
//! `Sentiment` label with fixed thresholds.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Polarity strictly above this is positive
pub const POSITIVE_THRESHOLD: f64 = 0.1;

/// Polarity strictly below this is negative
pub const NEGATIVE_THRESHOLD: f64 = -0.1;

/// Multiplier applied to a negated opinion word
const NEGATION_FACTOR: f64 = -0.5;

/// Coarse sentiment label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    pub fn from_polarity(score: f64) -> Self {
        if score > POSITIVE_THRESHOLD {
            Sentiment::Positive
        } else if score < NEGATIVE_THRESHOLD {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sentiment::Positive => write!(f, "positive"),
            Sentiment::Neutral => write!(f, "neutral"),
            Sentiment::Negative => write!(f, "negative"),
        }
    }
}

static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-z]+(?:'[a-z]+)?").expect("token pattern is valid"));

static LEXICON: LazyLock<HashMap<&'static str, f64>> = LazyLock::new(|| {
    [
        // positive
        ("amazing", 0.6),
        ("awesome", 1.0),
        ("beautiful", 0.85),
        ("best", 1.0),
        ("better", 0.5),
        ("brilliant", 0.9),
        ("clean", 0.37),
        ("comfortable", 0.4),
        ("cool", 0.35),
        ("cute", 0.5),
        ("delighted", 0.7),
        ("easy", 0.43),
        ("enjoy", 0.4),
        ("excellent", 1.0),
        ("excited", 0.4),
        ("fabulous", 0.4),
        ("fantastic", 0.4),
        ("fast", 0.2),
        ("fine", 0.42),
        ("fresh", 0.3),
        ("friendly", 0.38),
        ("fun", 0.3),
        ("glad", 0.5),
        ("good", 0.7),
        ("gorgeous", 0.7),
        ("great", 0.8),
        ("happy", 0.8),
        ("helpful", 0.5),
        ("impressive", 1.0),
        ("interesting", 0.5),
        ("like", 0.2),
        ("love", 0.5),
        ("lovely", 0.5),
        ("nice", 0.6),
        ("perfect", 1.0),
        ("pleased", 0.5),
        ("pretty", 0.25),
        ("recommend", 0.3),
        ("simple", 0.1),
        ("smooth", 0.4),
        ("soft", 0.1),
        ("stylish", 0.5),
        ("superb", 1.0),
        ("sustainable", 0.3),
        ("thank", 0.2),
        ("thanks", 0.2),
        ("useful", 0.3),
        ("welcome", 0.8),
        ("wonderful", 1.0),
        ("worth", 0.3),
        // negative
        ("angry", -0.5),
        ("annoyed", -0.4),
        ("annoying", -0.8),
        ("awful", -1.0),
        ("bad", -0.7),
        ("boring", -1.0),
        ("broken", -0.4),
        ("confusing", -0.3),
        ("crap", -0.8),
        ("damaged", -0.4),
        ("difficult", -0.5),
        ("dirty", -0.6),
        ("disappointed", -0.75),
        ("disappointing", -0.6),
        ("disgusting", -1.0),
        ("dislike", -0.4),
        ("expensive", -0.5),
        ("fail", -0.5),
        ("failed", -0.5),
        ("hard", -0.3),
        ("hate", -0.8),
        ("horrible", -1.0),
        ("lost", -0.4),
        ("mad", -0.6),
        ("poor", -0.4),
        ("ridiculous", -0.33),
        ("rude", -0.6),
        ("sad", -0.5),
        ("scam", -0.5),
        ("slow", -0.3),
        ("stupid", -0.8),
        ("terrible", -1.0),
        ("torn", -0.3),
        ("ugly", -0.7),
        ("unfair", -0.5),
        ("unhappy", -0.6),
        ("upset", -0.5),
        ("useless", -0.5),
        ("waste", -0.2),
        ("worse", -0.4),
        ("worst", -1.0),
        ("wrong", -0.5),
    ]
    .into_iter()
    .collect()
});

/// Multipliers for a word directly preceding an opinion word
fn intensity(token: &str) -> Option<f64> {
    match token {
        "extremely" | "incredibly" => Some(1.5),
        "very" | "super" | "totally" => Some(1.3),
        "really" | "so" | "too" => Some(1.2),
        "quite" => Some(1.1),
        "somewhat" | "fairly" => Some(0.8),
        "slightly" | "barely" => Some(0.6),
        _ => None,
    }
}

fn is_negation(token: &str) -> bool {
    matches!(token, "not" | "no" | "never" | "nor" | "neither" | "cannot")
        || token.ends_with("n't")
}

/// Continuous polarity of `text` in [-1.0, 1.0]; 0.0 when no opinion word is found
pub fn polarity(text: &str) -> f64 {
    let lowered = text.to_lowercase().replace('\u{2019}', "'");
    let tokens: Vec<&str> = TOKEN.find_iter(&lowered).map(|m| m.as_str()).collect();

    let scores: Vec<f64> = tokens
        .iter()
        .enumerate()
        .filter_map(|(i, token)| {
            let base = *LEXICON.get(*token)?;
            let previous = i.checked_sub(1).map(|p| tokens[p]);
            let before_previous = i.checked_sub(2).map(|p| tokens[p]);

            let mut score = base * previous.and_then(intensity).unwrap_or(1.0);
            score = score.clamp(-1.0, 1.0);

            let negated =
                previous.is_some_and(is_negation) || before_previous.is_some_and(is_negation);
            if negated {
                score *= NEGATION_FACTOR;
            }
            Some(score)
        })
        .collect();

    if scores.is_empty() {
        return 0.0;
    }
    (scores.iter().sum::<f64>() / scores.len() as f64).clamp(-1.0, 1.0)
}

/// Classify `text` as positive, neutral or negative
pub fn classify(text: &str) -> Sentiment {
    Sentiment::from_polarity(polarity(text))
}
