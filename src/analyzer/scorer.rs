//! Pattern scorer - applies the indicator catalog to a text

use super::catalog::{IndicatorCatalog, IndicatorRule};
use crate::{IndicatorMatch, NEUTRAL_SCORE};
use std::collections::HashSet;
use std::ops::Range;

/// Output of a pattern-only pass over a text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternScore {
    /// Clamped score (0-100)
    pub score: u8,
    /// Score before clamping
    pub raw_score: i32,
    pub positive: Vec<IndicatorMatch>,
    pub negative: Vec<IndicatorMatch>,
}

/// Scores text against an [`IndicatorCatalog`]
pub struct PatternScorer<'a> {
    catalog: &'a IndicatorCatalog,
}

impl<'a> PatternScorer<'a> {
    pub fn new(catalog: &'a IndicatorCatalog) -> Self {
        Self { catalog }
    }

    /// Score `text`. Each rule contributes at most once, in catalog order,
    /// then the capitalization post-pass runs, then the total is clamped.
    pub fn score(&self, text: &str) -> PatternScore {
        let mut raw = NEUTRAL_SCORE;
        let mut claimed = Vec::new();

        let positive = fire_rules(self.catalog.positive_rules(), text, &mut raw, &mut claimed);
        let mut negative = fire_rules(self.catalog.negative_rules(), text, &mut raw, &mut claimed);

        let caps = self.catalog.capitalization();
        if shouted_word_count(text, caps.min_word_len, &claimed) > caps.max_words {
            raw += caps.penalty;
            negative.push(IndicatorMatch::new(caps.label.clone(), caps.penalty));
        }

        PatternScore {
            score: raw.clamp(0, 100) as u8,
            raw_score: raw,
            positive,
            negative,
        }
    }
}

/// Apply `rules`, adding fired weights to `running` and their match spans to `claimed`
fn fire_rules(
    rules: &[IndicatorRule],
    text: &str,
    running: &mut i32,
    claimed: &mut Vec<Range<usize>>,
) -> Vec<IndicatorMatch> {
    let mut fired = Vec::new();
    for rule in rules {
        let before = claimed.len();
        claimed.extend(rule.match_spans(text));
        if claimed.len() > before {
            *running += rule.weight();
            fired.push(IndicatorMatch::new(rule.label(), rule.weight()));
        }
    }
    fired
}

/// Count distinct all-caps words of at least `min_len` letters, skipping
/// words that overlap a span already matched by a table rule
fn shouted_word_count(text: &str, min_len: usize, claimed: &[Range<usize>]) -> usize {
    let overlaps = |word: &Range<usize>| {
        claimed
            .iter()
            .any(|span| span.start < word.end && word.start < span.end)
    };
    words(text)
        .filter(|(span, word)| {
            word.chars().count() >= min_len && is_all_caps(word) && !overlaps(span)
        })
        .map(|(_, word)| word)
        .collect::<HashSet<_>>()
        .len()
}

/// Alphanumeric runs of `text` with their byte ranges
fn words(text: &str) -> impl Iterator<Item = (Range<usize>, &str)> {
    let mut start = None;
    text.char_indices()
        .chain(std::iter::once((text.len(), ' ')))
        .filter_map(move |(i, c)| {
            if c.is_alphanumeric() {
                start.get_or_insert(i);
                None
            } else {
                start.take().map(|s| (s..i, &text[s..i]))
            }
        })
}

fn is_all_caps(word: &str) -> bool {
    word.chars().all(|c| c.is_alphabetic() && c.is_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard() -> IndicatorCatalog {
        IndicatorCatalog::standard().unwrap()
    }

    fn labels(matches: &[IndicatorMatch]) -> Vec<&str> {
        matches.iter().map(|m| m.label.as_str()).collect()
    }

    #[test]
    fn plain_text_stays_neutral() {
        let catalog = standard();
        let result = PatternScorer::new(&catalog).score("The weather was mild today.");
        assert_eq!(result.score, 50);
        assert!(result.positive.is_empty());
        assert!(result.negative.is_empty());
    }

    #[test]
    fn rule_fires_once_regardless_of_repeats() {
        let catalog = standard();
        let scorer = PatternScorer::new(&catalog);
        let once = scorer.score("a shocking claim");
        let many = scorer.score("shocking shocking shocking claim, shocking");
        assert_eq!(once.score, many.score);
        assert_eq!(many.negative.len(), 1);
        assert_eq!(many.negative[0].weight, -15);
    }

    #[test]
    fn indicators_follow_catalog_order() {
        let catalog = standard();
        let result = PatternScorer::new(&catalog)
            .score("However, according to the journal, published in 2021, data shows growth.");
        assert_eq!(
            labels(&result.positive),
            vec![
                "Uses authoritative sources",
                "References academic sources",
                "Contains specific dates",
                "Shows balanced perspective",
                "Cites publications",
                "Mentions statistics",
            ]
        );
        // 50 + 10 + 8 + 5 + 7 + 6 + 5
        assert_eq!(result.score, 91);
    }

    #[test]
    fn clamps_at_zero() {
        let catalog = standard();
        let text = "SHOCKING CONSPIRACY COVER-UP!!! Click here, act now, 100% SECRET MIRACLE TRUTH";
        let result = PatternScorer::new(&catalog).score(text);
        assert!(result.raw_score < 0);
        assert_eq!(result.score, 0);
    }

    #[test]
    fn capitalization_needs_more_than_three_distinct_words() {
        let catalog = standard();
        let scorer = PatternScorer::new(&catalog);

        let three = scorer.score("THE FBI AND nothing else");
        assert!(!labels(&three.negative).contains(&"Excessive capitalization"));

        let four = scorer.score("THE FBI AND CIA met");
        assert!(labels(&four.negative).contains(&"Excessive capitalization"));
        assert_eq!(four.score, 38);
    }

    #[test]
    fn repeated_caps_word_counts_once() {
        assert_eq!(shouted_word_count("WOW WOW WOW WOW WOW", 3, &[]), 1);
        let catalog = standard();
        let result = PatternScorer::new(&catalog).score("WOW WOW WOW WOW WOW");
        assert!(result.negative.is_empty());
    }

    #[test]
    fn short_and_mixed_words_do_not_count() {
        assert_eq!(shouted_word_count("US UK EU OK", 3, &[]), 0);
        assert_eq!(shouted_word_count("NASA's COVID19 Report", 3, &[]), 1);
        assert_eq!(shouted_word_count("", 3, &[]), 0);
    }

    #[test]
    fn capitalization_is_applied_after_table() {
        let catalog = standard();
        let result = PatternScorer::new(&catalog).score("SHOCKING NEWS FROM THE CAPITAL");
        assert_eq!(
            labels(&result.negative),
            vec!["Sensational language", "Excessive capitalization"]
        );
        assert_eq!(result.raw_score, 50 - 15 - 12);
    }

    #[test]
    fn caps_words_matched_by_a_rule_are_not_counted_again() {
        let catalog = standard();
        let scorer = PatternScorer::new(&catalog);

        // SHOCKING, MIRACLE and SECRET already cost "Sensational language"
        let result = scorer.score("SHOCKING MIRACLE SECRET CURE");
        assert_eq!(labels(&result.negative), vec!["Sensational language"]);
        assert_eq!(result.score, 35);

        let result = scorer.score("SHOCKING NEWS: DOCTORS HATE THIS TRICK");
        assert_eq!(
            labels(&result.negative),
            vec!["Sensational language", "Excessive capitalization"]
        );
    }

    #[test]
    fn words_reports_byte_ranges() {
        let found: Vec<_> = words("héllo, WORLD!").collect();
        assert_eq!(found, vec![(0..6, "héllo"), (8..13, "WORLD")]);
    }
}
