//! Indicator catalog - the weighted lexical rules behind pattern scoring

use crate::Polarity;
use regex::{Regex, RegexBuilder};
use std::ops::Range;
use thiserror::Error;

/// Problems found while validating a catalog at startup
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("rule '{label}' has invalid pattern: {source}")]
    InvalidPattern {
        label: String,
        #[source]
        source: regex::Error,
    },

    #[error("rule '{label}' is declared {polarity} but has weight {weight}")]
    WeightSignMismatch {
        label: String,
        polarity: Polarity,
        weight: i32,
    },

    #[error("rule '{label}' is listed with {listed} rules but declared {declared}")]
    WrongRuleSet {
        label: String,
        listed: Polarity,
        declared: Polarity,
    },

    #[error("capitalization rule must have a negative penalty, got {0}")]
    CapitalizationPenalty(i32),
}

/// A single weighted lexical rule
#[derive(Debug, Clone)]
pub struct IndicatorRule {
    pattern: Regex,
    label: String,
    weight: i32,
    polarity: Polarity,
}

impl IndicatorRule {
    /// Compile a case-insensitive rule and check that the weight sign matches the polarity
    pub fn new(
        pattern: &str,
        label: impl Into<String>,
        weight: i32,
        polarity: Polarity,
    ) -> Result<Self, CatalogError> {
        let label = label.into();
        let sign_ok = match polarity {
            Polarity::Positive => weight > 0,
            Polarity::Negative => weight < 0,
        };
        if !sign_ok {
            return Err(CatalogError::WeightSignMismatch {
                label,
                polarity,
                weight,
            });
        }
        let pattern = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|source| CatalogError::InvalidPattern {
                label: label.clone(),
                source,
            })?;
        Ok(Self {
            pattern,
            label,
            weight,
            polarity,
        })
    }

    pub fn positive(pattern: &str, label: &str, weight: i32) -> Result<Self, CatalogError> {
        Self::new(pattern, label, weight, Polarity::Positive)
    }

    pub fn negative(pattern: &str, label: &str, weight: i32) -> Result<Self, CatalogError> {
        Self::new(pattern, label, weight, Polarity::Negative)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn weight(&self) -> i32 {
        self.weight
    }

    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    /// Whether the pattern occurs anywhere in `text`
    pub fn matches(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }

    /// Byte ranges of every occurrence in `text`
    pub fn match_spans<'a>(&'a self, text: &'a str) -> impl Iterator<Item = Range<usize>> + 'a {
        self.pattern.find_iter(text).map(|m| m.range())
    }
}

/// Derived rule: penalize text with too many distinct shouted words.
/// Evaluated after the declarative table, never as part of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapitalizationRule {
    /// Minimum length for an all-caps word to count
    pub min_word_len: usize,
    /// Fires when the distinct all-caps word count exceeds this
    pub max_words: usize,
    /// Negative adjustment applied once
    pub penalty: i32,
    pub label: String,
}

impl Default for CapitalizationRule {
    fn default() -> Self {
        Self {
            min_word_len: 3,
            max_words: 3,
            penalty: -12,
            label: "Excessive capitalization".to_string(),
        }
    }
}

/// Ordered positive and negative rule sets plus the capitalization post-pass
#[derive(Debug, Clone)]
pub struct IndicatorCatalog {
    positive: Vec<IndicatorRule>,
    negative: Vec<IndicatorRule>,
    capitalization: CapitalizationRule,
}

impl IndicatorCatalog {
    /// Build a catalog, rejecting rules filed under the wrong polarity
    pub fn new(
        positive: Vec<IndicatorRule>,
        negative: Vec<IndicatorRule>,
        capitalization: CapitalizationRule,
    ) -> Result<Self, CatalogError> {
        check_rule_set(&positive, Polarity::Positive)?;
        check_rule_set(&negative, Polarity::Negative)?;
        if capitalization.penalty >= 0 {
            return Err(CatalogError::CapitalizationPenalty(capitalization.penalty));
        }
        Ok(Self {
            positive,
            negative,
            capitalization,
        })
    }

    /// The built-in credibility rules
    pub fn standard() -> Result<Self, CatalogError> {
        let positive = vec![
            IndicatorRule::positive(
                r"according to|research shows|study found",
                "Uses authoritative sources",
                10,
            )?,
            IndicatorRule::positive(
                r"university|institute|journal|professor",
                "References academic sources",
                8,
            )?,
            IndicatorRule::positive(
                r"\d{4}|\d{1,2}/\d{1,2}/\d{2,4}",
                "Contains specific dates",
                5,
            )?,
            IndicatorRule::positive(r"however|although|despite", "Shows balanced perspective", 7)?,
            IndicatorRule::positive(r"reported by|published in", "Cites publications", 6)?,
            IndicatorRule::positive(
                r"\d+(\.\d+)? percent|statistic|survey of|data (shows|suggests)",
                "Mentions statistics",
                5,
            )?,
        ];

        let negative = vec![
            IndicatorRule::negative(
                r"shocking|unbelievable|miracle|secret",
                "Sensational language",
                -15,
            )?,
            IndicatorRule::negative(r"!!!+", "Excessive punctuation", -10)?,
            IndicatorRule::negative(r"click here|share now|viral", "Clickbait phrases", -12)?,
            IndicatorRule::negative(r"conspiracy|cover-up", "Conspiracy language", -15)?,
            IndicatorRule::negative(r"100%|absolutely|definitely", "Absolute claims", -10)?,
            IndicatorRule::negative(
                r"act now|before it['’]?s (too late|taken down|deleted|removed)|limited time|urgent",
                "Urgency markers",
                -8,
            )?,
        ];

        Self::new(positive, negative, CapitalizationRule::default())
    }

    pub fn positive_rules(&self) -> &[IndicatorRule] {
        &self.positive
    }

    pub fn negative_rules(&self) -> &[IndicatorRule] {
        &self.negative
    }

    pub fn capitalization(&self) -> &CapitalizationRule {
        &self.capitalization
    }

    /// Highest score the table can reach from neutral, before clamping
    pub fn max_positive_total(&self) -> i32 {
        self.positive.iter().map(IndicatorRule::weight).sum()
    }

    /// Lowest total the table can reach from neutral, before clamping
    pub fn max_negative_total(&self) -> i32 {
        self.negative.iter().map(IndicatorRule::weight).sum::<i32>() + self.capitalization.penalty
    }
}

fn check_rule_set(rules: &[IndicatorRule], listed: Polarity) -> Result<(), CatalogError> {
    for rule in rules {
        if rule.polarity != listed {
            return Err(CatalogError::WrongRuleSet {
                label: rule.label.clone(),
                listed,
                declared: rule.polarity,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_is_valid() {
        let catalog = IndicatorCatalog::standard().unwrap();
        assert_eq!(catalog.positive_rules().len(), 6);
        assert_eq!(catalog.negative_rules().len(), 6);
        assert!(catalog.positive_rules().iter().all(|r| r.weight() > 0));
        assert!(catalog.negative_rules().iter().all(|r| r.weight() < 0));
    }

    #[test]
    fn standard_catalog_keeps_declaration_order() {
        let catalog = IndicatorCatalog::standard().unwrap();
        let labels: Vec<&str> = catalog.positive_rules().iter().map(|r| r.label()).collect();
        assert_eq!(labels[0], "Uses authoritative sources");
        assert_eq!(labels[5], "Mentions statistics");
        assert_eq!(catalog.negative_rules()[0].label(), "Sensational language");
    }

    #[test]
    fn weights_stay_informative_before_clamping() {
        let catalog = IndicatorCatalog::standard().unwrap();
        // Both extremes should be able to leave the neutral band entirely
        assert!(crate::NEUTRAL_SCORE + catalog.max_positive_total() >= 70);
        assert!(crate::NEUTRAL_SCORE + catalog.max_negative_total() < 40);
    }

    #[test]
    fn rejects_positive_rule_with_negative_weight() {
        let err = IndicatorRule::positive("foo", "Bad rule", -3).unwrap_err();
        assert!(matches!(err, CatalogError::WeightSignMismatch { weight: -3, .. }));
    }

    #[test]
    fn rejects_zero_weight() {
        assert!(IndicatorRule::negative("foo", "Zero", 0).is_err());
        assert!(IndicatorRule::positive("foo", "Zero", 0).is_err());
    }

    #[test]
    fn rejects_invalid_pattern() {
        let err = IndicatorRule::positive("(unclosed", "Broken", 5).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidPattern { .. }));
        assert!(err.to_string().contains("Broken"));
    }

    #[test]
    fn rejects_rule_in_wrong_set() {
        let stray = IndicatorRule::negative("foo", "Stray", -5).unwrap();
        let err = IndicatorCatalog::new(vec![stray], vec![], CapitalizationRule::default())
            .unwrap_err();
        assert!(matches!(err, CatalogError::WrongRuleSet { .. }));
    }

    #[test]
    fn rejects_non_negative_capitalization_penalty() {
        let caps = CapitalizationRule {
            penalty: 4,
            ..CapitalizationRule::default()
        };
        let err = IndicatorCatalog::new(vec![], vec![], caps).unwrap_err();
        assert!(matches!(err, CatalogError::CapitalizationPenalty(4)));
    }

    #[test]
    fn rule_matching_is_case_insensitive() {
        let rule = IndicatorRule::negative("shocking", "Sensational", -15).unwrap();
        assert!(rule.matches("SHOCKING news"));
        assert!(rule.matches("Shocking"));
        assert!(!rule.matches("calm report"));
    }

    #[test]
    fn urgency_rule_accepts_typographic_apostrophe() {
        let catalog = IndicatorCatalog::standard().unwrap();
        let urgency = catalog
            .negative_rules()
            .iter()
            .find(|r| r.label() == "Urgency markers")
            .unwrap();
        assert!(urgency.matches("share before it's taken down"));
        assert!(urgency.matches("read before it’s too late"));
    }
}
