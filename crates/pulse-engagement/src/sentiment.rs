//! Lexicon-based sentiment polarity.
//!
//! The scoring function is pluggable: anything monotonic in valence that
//! returns a bounded float works. The default is a word-weight lexicon,
//! summed and clamped.

use serde::{Deserialize, Serialize};

/// General-valence word weights.
///
/// Keys are lowercase single words. Positive values lean positive,
/// negative values lean negative. The final score is clamped to
/// `[-1.0, 1.0]`.
const LEXICON: &[(&str, f64)] = &[
    // Positive signals
    ("amazing", 0.5),
    ("awesome", 0.5),
    ("beautiful", 0.4),
    ("best", 0.5),
    ("brilliant", 0.5),
    ("enjoy", 0.3),
    ("enjoyed", 0.3),
    ("excellent", 0.5),
    ("excited", 0.4),
    ("fantastic", 0.5),
    ("favorite", 0.4),
    ("fun", 0.3),
    ("good", 0.3),
    ("great", 0.4),
    ("happy", 0.4),
    ("helpful", 0.3),
    ("incredible", 0.5),
    ("inspiring", 0.4),
    ("love", 0.5),
    ("loved", 0.5),
    ("perfect", 0.5),
    ("recommend", 0.4),
    ("wonderful", 0.5),
    // Negative signals
    ("annoying", -0.4),
    ("awful", -0.6),
    ("bad", -0.4),
    ("boring", -0.4),
    ("broken", -0.4),
    ("disappointed", -0.5),
    ("disappointing", -0.5),
    ("dislike", -0.4),
    ("fail", -0.4),
    ("failed", -0.4),
    ("garbage", -0.6),
    ("hate", -0.6),
    ("hated", -0.6),
    ("horrible", -0.6),
    ("poor", -0.4),
    ("problem", -0.3),
    ("sad", -0.3),
    ("terrible", -0.6),
    ("ugly", -0.4),
    ("useless", -0.5),
    ("waste", -0.5),
    ("worst", -0.6),
];

/// A bounded text-valence estimator.
///
/// Implementations must return a polarity in `[-1.0, 1.0]`.
pub trait SentimentModel {
    fn polarity(&self, text: &str) -> f64;
}

/// The default lexicon scorer.
///
/// Splits text into lowercase words, sums matching lexicon weights, and
/// clamps the result to `[-1.0, 1.0]`. Empty or unknown text scores `0.0`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconModel;

impl SentimentModel for LexiconModel {
    fn polarity(&self, text: &str) -> f64 {
        let mut score = 0.0_f64;
        for word in text.split_whitespace() {
            let w = word
                .trim_matches(|c: char| !c.is_alphabetic())
                .to_lowercase();
            for &(lex_word, weight) in LEXICON {
                if w == lex_word {
                    score += weight;
                    break;
                }
            }
        }
        score.clamp(-1.0, 1.0)
    }
}

/// Sentiment bucket for a polarity score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentCategory {
    Negative,
    Neutral,
    Positive,
}

impl SentimentCategory {
    /// Buckets a polarity score.
    ///
    /// Boundaries are exact: strictly below `-0.1` is negative, strictly
    /// above `0.1` is positive, and both `-0.1` and `0.1` themselves are
    /// neutral.
    #[must_use]
    pub fn from_polarity(polarity: f64) -> Self {
        if polarity < -0.1 {
            SentimentCategory::Negative
        } else if polarity > 0.1 {
            SentimentCategory::Positive
        } else {
            SentimentCategory::Neutral
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SentimentCategory::Negative => "negative",
            SentimentCategory::Neutral => "neutral",
            SentimentCategory::Positive => "positive",
        }
    }
}
