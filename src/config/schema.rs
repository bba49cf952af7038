//! Config schema and deserialization

use crate::analyzer::AnalysisMode;
use crate::classifier::remote::DEFAULT_TOKEN_ENV;
use crate::history::{DEFAULT_CAPACITY, DEFAULT_RECENT};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Remote classifier settings. Unset fields fall back to the extended
/// config, then to the built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifierConfig {
    /// Classification endpoint (HTTPS). No endpoint means no classifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Environment variable holding the bearer token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_env: Option<String>,

    /// Deadline for one classifier call, in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

const DEFAULT_TIMEOUT_SECS: u64 = 30;

impl ClassifierConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS).max(1))
    }

    pub fn token_env(&self) -> &str {
        self.token_env.as_deref().unwrap_or(DEFAULT_TOKEN_ENV)
    }

    /// Endpoint, if one is set and not blank
    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
    }

    fn merge_from(&mut self, base: ClassifierConfig) {
        self.endpoint = self.endpoint.take().or(base.endpoint);
        self.token_env = self.token_env.take().or(base.token_env);
        self.timeout_secs = self.timeout_secs.or(base.timeout_secs);
    }
}

/// Session history settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryConfig {
    /// Entries kept for the trend series
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<usize>,

    /// Entries shown in the recent-analyses view
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recent: Option<usize>,
}

impl HistoryConfig {
    pub fn capacity(&self) -> usize {
        self.capacity.unwrap_or(DEFAULT_CAPACITY)
    }

    pub fn recent(&self) -> usize {
        self.recent.unwrap_or(DEFAULT_RECENT)
    }

    fn merge_from(&mut self, base: HistoryConfig) {
        self.capacity = self.capacity.or(base.capacity);
        self.recent = self.recent.or(base.recent);
    }
}

/// Root config structure for .credencerc.json
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Extend another config file (path relative to this config)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,

    /// Analysis mode. Default: classifier (falls back to patterns without an endpoint)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<AnalysisMode>,

    /// Minimum score (exit 1 if below)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<u8>,

    /// Remote classifier settings
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Session history settings
    #[serde(default)]
    pub history: HistoryConfig,
}

impl Config {
    /// Merge CLI overrides into config. CLI values take precedence.
    pub fn merge_with_cli(
        mut self,
        cli_mode: Option<AnalysisMode>,
        cli_threshold: Option<u8>,
        cli_endpoint: Option<String>,
    ) -> Self {
        if cli_mode.is_some() {
            self.mode = cli_mode;
        }
        if cli_threshold.is_some() {
            self.threshold = cli_threshold;
        }
        if cli_endpoint.is_some() {
            self.classifier.endpoint = cli_endpoint;
        }
        self
    }

    /// Mode after applying the default
    pub fn effective_mode(&self) -> AnalysisMode {
        self.mode.unwrap_or_default()
    }

    /// Merge another config into this one (for extends). Only fields this
    /// config leaves unset are taken from `base`.
    pub fn merge_from(&mut self, base: Config) {
        self.mode = self.mode.or(base.mode);
        self.threshold = self.threshold.or(base.threshold);
        self.classifier.merge_from(base.classifier);
        self.history.merge_from(base.history);
    }
}
