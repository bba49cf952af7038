//! Remote classifier over HTTPS (Hugging Face inference style API)
//!
//! Requires the `ai` feature to be enabled:
//! ```toml
//! credence = { version = "0.3", features = ["ai"] }
//! ```

use super::{Classifier, ClassifierError, ClassifierVerdict, DEFAULT_TIMEOUT};
use serde::Deserialize;
use std::time::Duration;

/// Environment variable holding the API token unless configured otherwise
pub const DEFAULT_TOKEN_ENV: &str = "HUGGINGFACE_TOKEN";

/// Client for a JSON text-classification endpoint
#[cfg_attr(not(feature = "ai"), allow(dead_code))]
pub struct HttpClassifier {
    endpoint: String,
    token: Option<String>,
    timeout: Duration,
}

impl HttpClassifier {
    /// Create a client for `endpoint` with no token and the default timeout
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            token: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Create a client reading its bearer token from `token_env` (absent is fine)
    pub fn from_env(endpoint: impl Into<String>, token_env: &str) -> Self {
        let token = std::env::var(token_env).ok().filter(|t| !t.trim().is_empty());
        Self {
            token,
            ..Self::new(endpoint)
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    #[cfg(feature = "ai")]
    fn send_request(&self, text: &str) -> Result<ClassifierVerdict, ClassifierError> {
        use serde_json::json;

        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| ClassifierError::RequestFailed(e.to_string()))?;

        let mut request = client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .json(&json!({ "inputs": text }));
        if let Some(ref token) = self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().map_err(|e| {
            if e.is_timeout() {
                ClassifierError::Timeout(self.timeout)
            } else {
                ClassifierError::RequestFailed(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ClassifierError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .map_err(|e| ClassifierError::InvalidResponse(e.to_string()))?;
        parse_response(&body)
    }

    #[cfg(not(feature = "ai"))]
    fn send_request(&self, _text: &str) -> Result<ClassifierVerdict, ClassifierError> {
        Err(ClassifierError::Disabled)
    }
}

impl Classifier for HttpClassifier {
    fn name(&self) -> &str {
        "remote"
    }

    fn classify(&self, text: &str) -> Result<ClassifierVerdict, ClassifierError> {
        if self.endpoint.trim().is_empty() {
            return Err(ClassifierError::NotConfigured);
        }
        self.send_request(text)
    }
}

/// Check if the remote classifier is compiled in
pub fn is_remote_available() -> bool {
    cfg!(feature = "ai")
}

#[derive(Debug, Deserialize)]
struct LabelScore {
    label: String,
    #[serde(alias = "confidence")]
    score: f64,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ClassificationResponse {
    Single(LabelScore),
    List(Vec<LabelScore>),
    Nested(Vec<Vec<LabelScore>>),
}

/// Parse a classification response body. Lists resolve to their highest-scoring entry.
pub fn parse_response(body: &str) -> Result<ClassifierVerdict, ClassifierError> {
    let parsed: ClassificationResponse = serde_json::from_str(body)
        .map_err(|e| ClassifierError::InvalidResponse(e.to_string()))?;

    let candidates = match parsed {
        ClassificationResponse::Single(one) => vec![one],
        ClassificationResponse::List(list) => list,
        ClassificationResponse::Nested(nested) => nested.into_iter().flatten().collect(),
    };

    candidates
        .into_iter()
        .max_by(|a, b| a.score.total_cmp(&b.score))
        .map(|best| ClassifierVerdict::new(best.label, best.score))
        .ok_or_else(|| ClassifierError::InvalidResponse("no labels in response".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_object() {
        let v = parse_response(r#"{"label": "FAKE", "score": 0.93}"#).unwrap();
        assert_eq!(v, ClassifierVerdict::new("FAKE", 0.93));
    }

    #[test]
    fn accepts_confidence_field_name() {
        let v = parse_response(r#"{"label": "TRUE", "confidence": 0.71}"#).unwrap();
        assert_eq!(v.confidence, 0.71);
    }

    #[test]
    fn tolerates_extra_fields() {
        let v = parse_response(r#"{"label": "TRUE", "score": 0.6, "model": "x", "latency": 12}"#)
            .unwrap();
        assert_eq!(v.label, "TRUE");
    }

    #[test]
    fn picks_highest_score_from_list() {
        let body = r#"[{"label": "FAKE", "score": 0.2}, {"label": "TRUE", "score": 0.8}]"#;
        assert_eq!(parse_response(body).unwrap().label, "TRUE");
    }

    #[test]
    fn flattens_nested_lists() {
        let body = r#"[[{"label": "FAKE", "score": 0.97}, {"label": "TRUE", "score": 0.03}]]"#;
        let v = parse_response(body).unwrap();
        assert_eq!(v, ClassifierVerdict::new("FAKE", 0.97));
    }

    #[test]
    fn rejects_missing_fields() {
        assert!(matches!(
            parse_response(r#"{"prediction": "FAKE"}"#),
            Err(ClassifierError::InvalidResponse(_))
        ));
        assert!(matches!(
            parse_response(r#"{"label": "FAKE", "score": "high"}"#),
            Err(ClassifierError::InvalidResponse(_))
        ));
    }

    #[test]
    fn rejects_empty_list_and_garbage() {
        assert!(parse_response("[]").is_err());
        assert!(parse_response("not json").is_err());
    }

    #[test]
    fn blank_endpoint_is_not_configured() {
        let client = HttpClassifier::new("  ");
        assert!(matches!(
            client.classify("text"),
            Err(ClassifierError::NotConfigured)
        ));
    }

    #[cfg(not(feature = "ai"))]
    #[test]
    fn disabled_without_feature() {
        let client = HttpClassifier::new("https://example.invalid/classify");
        assert!(matches!(client.classify("text"), Err(ClassifierError::Disabled)));
        assert!(!is_remote_available());
    }

    #[test]
    fn from_env_ignores_missing_token() {
        let client = HttpClassifier::from_env(
            "https://example.invalid/classify",
            "CREDENCE_TEST_TOKEN_THAT_IS_NEVER_SET",
        );
        assert!(client.token.is_none());
        assert_eq!(client.endpoint(), "https://example.invalid/classify");
    }
}
