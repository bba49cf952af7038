//! Score aggregation - resolves pattern and classifier outputs into one result

use super::scorer::PatternScore;
use crate::classifier::ClassifierOutcome;
use crate::{AnalysisResult, Category};
use serde::{Deserialize, Serialize};

/// Which scorer decides the final number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AnalysisMode {
    /// Use the classifier verdict when one is available, else fall back to patterns
    #[default]
    #[serde(rename = "classifier")]
    ClassifierPreferred,
    /// Never consult the classifier
    #[serde(rename = "pattern")]
    PatternOnly,
}

impl std::str::FromStr for AnalysisMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "classifier" | "ai" => Ok(AnalysisMode::ClassifierPreferred),
            "pattern" | "quick" => Ok(AnalysisMode::PatternOnly),
            other => Err(format!(
                "unknown mode '{}' (expected 'classifier' or 'pattern')",
                other
            )),
        }
    }
}

impl std::fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisMode::ClassifierPreferred => write!(f, "classifier"),
            AnalysisMode::PatternOnly => write!(f, "pattern"),
        }
    }
}

/// Merges a pattern pass and an optional classifier outcome
pub struct ScoreAggregator;

impl ScoreAggregator {
    /// Produce the final result. The classifier only decides the score when the
    /// mode prefers it and it returned a verdict; indicators always come from
    /// the pattern pass and never adjust a classifier score.
    pub fn aggregate(
        mode: AnalysisMode,
        pattern: PatternScore,
        classifier: Option<&ClassifierOutcome>,
    ) -> AnalysisResult {
        let verdict = match (mode, classifier) {
            (AnalysisMode::ClassifierPreferred, Some(ClassifierOutcome::Verdict(v))) => Some(v),
            (AnalysisMode::ClassifierPreferred, Some(ClassifierOutcome::Unavailable { .. }))
            | (AnalysisMode::ClassifierPreferred, None)
            | (AnalysisMode::PatternOnly, _) => None,
        };

        match verdict {
            Some(v) => AnalysisResult {
                score: v.credibility_score(),
                category: v.category(),
                positive_indicators: pattern.positive,
                negative_indicators: pattern.negative,
                confidence: Some(v.confidence),
                source_label: Some(v.label.to_uppercase()),
            },
            None => AnalysisResult {
                score: pattern.score,
                category: Category::from_score(pattern.score),
                positive_indicators: pattern.positive,
                negative_indicators: pattern.negative,
                confidence: None,
                source_label: None,
            },
        }
    }

    /// Get a description of the category
    pub fn category_description(category: Category) -> &'static str {
        match category {
            Category::Reliable => "Shows signs of careful, sourced reporting",
            Category::Questionable => "Mixed signals - verify before sharing",
            Category::Unreliable => "Multiple red flags typical of misinformation",
        }
    }
}
