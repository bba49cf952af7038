//! Analysis engine - orchestrates pattern scoring, the classifier and aggregation

use super::catalog::{CatalogError, IndicatorCatalog};
use super::scorer::PatternScorer;
use super::scoring::{AnalysisMode, ScoreAggregator};
use crate::classifier::{ClassifierAdapter, ClassifierOutcome};
use crate::history::SharedHistory;
use crate::AnalysisResult;
use thiserror::Error;

/// Input rejected before any scoring happens
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnalyzeError {
    #[error("Please enter some text to analyze.")]
    EmptyInput,
}

/// Main analysis engine
pub struct AnalysisEngine {
    catalog: IndicatorCatalog,
    classifier: Option<ClassifierAdapter>,
    mode: AnalysisMode,
}

impl AnalysisEngine {
    /// Create an engine with the built-in catalog and no classifier
    pub fn new() -> Result<Self, CatalogError> {
        Ok(Self::with_catalog(IndicatorCatalog::standard()?))
    }

    /// Create an engine around a custom catalog
    pub fn with_catalog(catalog: IndicatorCatalog) -> Self {
        Self {
            catalog,
            classifier: None,
            mode: AnalysisMode::default(),
        }
    }

    /// Attach an external classifier
    pub fn with_classifier(mut self, classifier: ClassifierAdapter) -> Self {
        self.classifier = Some(classifier);
        self
    }

    /// Select the analysis mode
    pub fn with_mode(mut self, mode: AnalysisMode) -> Self {
        self.mode = mode;
        self
    }

    /// The mode that will actually run: classifier-preferred degrades to
    /// pattern-only when no classifier is attached.
    pub fn effective_mode(&self) -> AnalysisMode {
        match (self.mode, &self.classifier) {
            (AnalysisMode::ClassifierPreferred, Some(_)) => AnalysisMode::ClassifierPreferred,
            _ => AnalysisMode::PatternOnly,
        }
    }

    /// Analyze a text and return the result
    pub fn analyze(&self, text: &str) -> Result<AnalysisResult, AnalyzeError> {
        if text.trim().is_empty() {
            return Err(AnalyzeError::EmptyInput);
        }

        let pattern = PatternScorer::new(&self.catalog).score(text);

        let mode = self.effective_mode();
        let outcome: Option<ClassifierOutcome> = match (mode, &self.classifier) {
            (AnalysisMode::ClassifierPreferred, Some(adapter)) => Some(adapter.classify(text)),
            _ => None,
        };
        tracing::debug!(%mode, pattern_score = pattern.score, "resolving analysis");

        Ok(ScoreAggregator::aggregate(mode, pattern, outcome.as_ref()))
    }

    /// Analyze a text and record the outcome in `history` once it completes.
    /// Rejected input leaves the history untouched.
    pub fn analyze_recorded(
        &self,
        text: &str,
        history: &SharedHistory,
    ) -> Result<AnalysisResult, AnalyzeError> {
        let result = self.analyze(text)?;
        history.record(&result, text);
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{ClassifierError, ClassifierVerdict, FnClassifier};
    use crate::Category;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    fn fixed(label: &'static str, confidence: f64) -> ClassifierAdapter {
        ClassifierAdapter::new(FnClassifier::new("fixed", move |_| {
            Ok(ClassifierVerdict::new(label, confidence))
        }))
    }

    #[test]
    fn rejects_empty_and_whitespace_input() {
        let engine = AnalysisEngine::new().unwrap();
        assert_eq!(engine.analyze(""), Err(AnalyzeError::EmptyInput));
        assert_eq!(engine.analyze("  \n\t "), Err(AnalyzeError::EmptyInput));
    }

    #[test]
    fn no_classifier_means_pattern_only() {
        let engine = AnalysisEngine::new().unwrap();
        assert_eq!(engine.effective_mode(), AnalysisMode::PatternOnly);
        let result = engine.analyze("A quiet day in town.").unwrap();
        assert_eq!(result.score, 50);
        assert!(result.confidence.is_none());
    }

    #[test]
    fn classifier_verdict_used_when_preferred() {
        let engine = AnalysisEngine::new().unwrap().with_classifier(fixed("TRUE", 0.83));
        let result = engine.analyze("Something SHOCKING happened!!!").unwrap();
        assert_eq!(result.score, 83);
        assert_eq!(result.category, Category::Reliable);
        assert_eq!(result.source_label.as_deref(), Some("TRUE"));
        assert!(!result.negative_indicators.is_empty());
    }

    #[test]
    fn pattern_mode_skips_classifier_call() {
        let called = Arc::new(AtomicBool::new(false));
        let called_in = Arc::clone(&called);
        let engine = AnalysisEngine::new()
            .unwrap()
            .with_classifier(ClassifierAdapter::new(FnClassifier::new("never", move |_| {
                called_in.store(true, Ordering::SeqCst);
                Ok(ClassifierVerdict::new("FAKE", 1.0))
            })))
            .with_mode(AnalysisMode::PatternOnly);
        let result = engine.analyze("plain text").unwrap();
        assert_eq!(result.score, 50);
        assert!(!called.load(Ordering::SeqCst));
    }

    #[test]
    fn panicking_classifier_does_not_crash_analysis() {
        let engine = AnalysisEngine::new().unwrap().with_classifier(ClassifierAdapter::new(
            FnClassifier::new("model", |_| panic!("inference backend crashed")),
        ));
        let result = engine.analyze("plain text, however").unwrap();
        assert_eq!(result.score, 57);
        assert!(!result.is_classifier_backed());
    }

    #[test]
    fn failing_classifier_degrades_to_patterns() {
        let engine = AnalysisEngine::new().unwrap().with_classifier(ClassifierAdapter::new(
            FnClassifier::new("down", |_| Err(ClassifierError::RequestFailed("503".into()))),
        ));
        let result = engine.analyze("Click here to share now!!!").unwrap();
        assert!(result.confidence.is_none());
        // 50 - 10 (punctuation) - 12 (clickbait)
        assert_eq!(result.score, 28);
        assert_eq!(result.category, Category::Unreliable);
    }

    #[test]
    fn recorded_analysis_appends_history() {
        let engine = AnalysisEngine::new().unwrap();
        let history = SharedHistory::default();
        engine.analyze_recorded("first text", &history).unwrap();
        assert!(engine.analyze_recorded("   ", &history).is_err());
        engine.analyze_recorded("second text", &history).unwrap();
        assert_eq!(history.trend_series(), vec![50, 50]);
    }
}
