//! External classifier integration
//!
//! The engine never talks to a model or an HTTP API directly. It consumes a
//! [`Classifier`] through a [`ClassifierAdapter`], which truncates the input,
//! enforces a deadline and turns every failure into
//! [`ClassifierOutcome::Unavailable`].

pub mod remote;

pub use remote::HttpClassifier;

use crate::{truncate_chars, Category};
use std::sync::mpsc;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Characters submitted to the classifier (model context-length policy)
pub const MAX_CLASSIFIER_CHARS: usize = 512;

/// Default deadline for a classifier call
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Label + confidence reported by an external classifier
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierVerdict {
    pub label: String,
    pub confidence: f64,
}

impl ClassifierVerdict {
    pub fn new(label: impl Into<String>, confidence: f64) -> Self {
        Self {
            label: label.into(),
            confidence,
        }
    }

    /// Whether the label belongs to the fake/false family
    pub fn claims_fake(&self) -> bool {
        let upper = self.label.to_uppercase();
        upper.contains("FAKE") || upper.contains("FALSE")
    }

    /// Credibility contribution (0-100) of this verdict
    pub fn credibility_score(&self) -> u8 {
        let credible = if self.claims_fake() {
            1.0 - self.confidence
        } else {
            self.confidence
        };
        (credible * 100.0).round().clamp(0.0, 100.0) as u8
    }

    /// Category for a classifier-derived score. Scores in the questionable
    /// band stay Questionable whichever label produced them.
    pub fn category(&self) -> Category {
        classifier_category(self.credibility_score())
    }

    fn validate(self) -> Result<Self, ClassifierError> {
        if self.label.trim().is_empty() {
            return Err(ClassifierError::InvalidResponse(
                "empty label".to_string(),
            ));
        }
        if !self.confidence.is_finite() || !(0.0..=1.0).contains(&self.confidence) {
            return Err(ClassifierError::InvalidResponse(format!(
                "confidence {} outside [0, 1]",
                self.confidence
            )));
        }
        Ok(self)
    }
}

/// Category policy for scores that came from a classifier
pub fn classifier_category(score: u8) -> Category {
    if (crate::QUESTIONABLE_THRESHOLD..crate::RELIABLE_THRESHOLD).contains(&score) {
        return Category::Questionable;
    }
    Category::from_score(score)
}

/// Failure reported by a classifier implementation
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("no classifier endpoint configured")]
    NotConfigured,

    #[error("request failed: {0}")]
    RequestFailed(String),

    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("API error: {status}: {body}")]
    ApiError { status: u16, body: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("remote classifier not enabled. Rebuild with: cargo build --features ai")]
    Disabled,
}

/// Contract for an external text classifier (local model or remote API)
pub trait Classifier: Send + Sync {
    /// Short identifier used in logs
    fn name(&self) -> &str;

    /// Classify already-truncated text
    fn classify(&self, text: &str) -> Result<ClassifierVerdict, ClassifierError>;
}

/// Classifier backed by a closure, for embedding an in-process model
type ClassifyFn = Box<dyn Fn(&str) -> Result<ClassifierVerdict, ClassifierError> + Send + Sync>;

pub struct FnClassifier {
    name: String,
    classify_fn: ClassifyFn,
}

impl FnClassifier {
    pub fn new(
        name: impl Into<String>,
        classify_fn: impl Fn(&str) -> Result<ClassifierVerdict, ClassifierError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            classify_fn: Box::new(classify_fn),
        }
    }
}

impl Classifier for FnClassifier {
    fn name(&self) -> &str {
        &self.name
    }

    fn classify(&self, text: &str) -> Result<ClassifierVerdict, ClassifierError> {
        (self.classify_fn)(text)
    }
}

/// What the aggregator sees from a classifier call
#[derive(Debug, Clone, PartialEq)]
pub enum ClassifierOutcome {
    Verdict(ClassifierVerdict),
    Unavailable { reason: String },
}

impl ClassifierOutcome {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        ClassifierOutcome::Unavailable {
            reason: reason.into(),
        }
    }

    pub fn verdict(&self) -> Option<&ClassifierVerdict> {
        match self {
            ClassifierOutcome::Verdict(v) => Some(v),
            ClassifierOutcome::Unavailable { .. } => None,
        }
    }
}

/// Boundary between the scoring engine and a [`Classifier`]
///
/// Every call runs on a worker thread bounded by a deadline
/// ([`DEFAULT_TIMEOUT`] unless overridden), so a hung or panicking
/// classifier degrades to [`ClassifierOutcome::Unavailable`].
pub struct ClassifierAdapter {
    inner: Arc<dyn Classifier>,
    timeout: Duration,
}

impl ClassifierAdapter {
    pub fn new(classifier: impl Classifier + 'static) -> Self {
        Self {
            inner: Arc::new(classifier),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Give up on a call after `timeout`
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn name(&self) -> &str {
        self.inner.name()
    }

    /// Classify `text`. Never fails: errors, timeouts and malformed verdicts
    /// all come back as [`ClassifierOutcome::Unavailable`].
    pub fn classify(&self, text: &str) -> ClassifierOutcome {
        let (input, truncated) = truncate_chars(text, MAX_CLASSIFIER_CHARS);
        if truncated {
            tracing::debug!(
                classifier = self.name(),
                "input truncated to {} characters",
                MAX_CLASSIFIER_CHARS
            );
        }

        let started = Instant::now();
        let result = self
            .classify_with_deadline(input, self.timeout)
            .and_then(ClassifierVerdict::validate);

        match result {
            Ok(verdict) => {
                tracing::debug!(
                    classifier = self.name(),
                    label = %verdict.label,
                    confidence = verdict.confidence,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "classifier verdict"
                );
                ClassifierOutcome::Verdict(verdict)
            }
            Err(e) => {
                tracing::warn!(
                    classifier = self.name(),
                    "classifier unavailable, falling back to pattern analysis: {}",
                    e
                );
                ClassifierOutcome::unavailable(e.to_string())
            }
        }
    }

    fn classify_with_deadline(
        &self,
        input: &str,
        timeout: Duration,
    ) -> Result<ClassifierVerdict, ClassifierError> {
        let (tx, rx) = mpsc::channel();
        let classifier = Arc::clone(&self.inner);
        let owned = input.to_string();
        std::thread::spawn(move || {
            // Receiver may be gone after a timeout; nothing left to report to
            let _ = tx.send(classifier.classify(&owned));
        });
        match rx.recv_timeout(timeout) {
            Ok(result) => result,
            Err(mpsc::RecvTimeoutError::Timeout) => Err(ClassifierError::Timeout(timeout)),
            // Sender dropped without sending: the classifier panicked
            Err(mpsc::RecvTimeoutError::Disconnected) => Err(ClassifierError::RequestFailed(
                "classifier worker exited without a result".to_string(),
            )),
        }
    }
}
