//! Credence: News and Social Media Credibility Analyzer
//!
//! This library estimates how credible a piece of text is by combining a
//! deterministic lexical analyzer with an optional external classifier, and
//! explains the result with human-readable indicators and recommendations.

pub mod analyzer;
pub mod classifier;
pub mod config;
pub mod history;
pub mod recommend;
pub mod reporter;
pub mod session;

use serde::{Deserialize, Serialize};

/// Neutral starting point for every pattern-based score
pub const NEUTRAL_SCORE: i32 = 50;

/// Lower bound (inclusive) of the Reliable band
pub const RELIABLE_THRESHOLD: u8 = 70;

/// Lower bound (inclusive) of the Questionable band
pub const QUESTIONABLE_THRESHOLD: u8 = 40;

/// The main result of analyzing a piece of text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Credibility score (0-100)
    pub score: u8,
    /// Category derived from the score
    pub category: Category,
    /// Cues that raised the score, in catalog order
    pub positive_indicators: Vec<IndicatorMatch>,
    /// Cues that lowered the score, in catalog order
    pub negative_indicators: Vec<IndicatorMatch>,
    /// Classifier confidence (0-1), only when the classifier produced the score
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    /// Raw classifier label, only when the classifier produced the score
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_label: Option<String>,
}

impl AnalysisResult {
    /// Whether the score came from the external classifier
    pub fn is_classifier_backed(&self) -> bool {
        self.source_label.is_some()
    }
}

/// Three-tier credibility category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Reliable,
    Questionable,
    Unreliable,
}

impl Category {
    /// Map a score to its band. Total over 0..=255; anything above 100 is Reliable.
    pub fn from_score(score: u8) -> Self {
        match score {
            s if s >= RELIABLE_THRESHOLD => Category::Reliable,
            s if s >= QUESTIONABLE_THRESHOLD => Category::Questionable,
            _ => Category::Unreliable,
        }
    }

    /// Short label used in history listings and JSON consumers
    pub fn label(&self) -> &'static str {
        match self {
            Category::Reliable => "Likely Reliable",
            Category::Questionable => "Questionable - Verify",
            Category::Unreliable => "Likely Unreliable",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Whether an indicator raises or lowers credibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Positive,
    Negative,
}

impl std::fmt::Display for Polarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Polarity::Positive => write!(f, "positive"),
            Polarity::Negative => write!(f, "negative"),
        }
    }
}

/// A rule that fired on the analyzed text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorMatch {
    /// Human-readable reason (e.g. "Sensational language")
    pub label: String,
    /// Signed contribution to the score
    pub weight: i32,
}

impl IndicatorMatch {
    pub fn new(label: impl Into<String>, weight: i32) -> Self {
        Self {
            label: label.into(),
            weight,
        }
    }
}

/// Take the first `max_chars` characters of `text` (char boundaries, not bytes).
/// Returns the prefix and whether anything was cut.
pub fn truncate_chars(text: &str, max_chars: usize) -> (&str, bool) {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => (&text[..idx], true),
        None => (text, false),
    }
}
