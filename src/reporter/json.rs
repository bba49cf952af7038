//! JSON reporter for machine-readable output

use crate::history::HistorySnapshot;
use crate::recommend;
use crate::AnalysisResult;
use serde::Serialize;

/// Reporter for JSON output
pub struct JsonReporter {
    /// Whether to pretty-print JSON
    pretty: bool,
    /// Whether to include the tips checklist
    include_tips: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    pub fn new() -> Self {
        Self {
            pretty: false,
            include_tips: true,
        }
    }

    /// Enable pretty-printing
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    /// Leave the tips out of the output
    pub fn without_tips(mut self) -> Self {
        self.include_tips = false;
        self
    }

    /// Report a single analysis result with its recommendations
    pub fn report(&self, result: &AnalysisResult) -> String {
        let output = JsonOutput {
            result,
            recommendations: recommend::recommendations_for(result.category),
            tips: self.include_tips.then(recommend::tips),
        };
        self.to_json(&output, "{}")
    }

    /// Report the session history
    pub fn report_history(&self, history: &HistorySnapshot) -> String {
        self.to_json(history, "{}")
    }

    fn to_json<T: Serialize>(&self, value: &T, fallback: &str) -> String {
        let encoded = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        encoded.unwrap_or_else(|_| fallback.to_string())
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonOutput<'a> {
    #[serde(flatten)]
    result: &'a AnalysisResult,
    recommendations: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tips: Option<&'static [&'static str]>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Category, IndicatorMatch};

    fn result() -> AnalysisResult {
        AnalysisResult {
            score: 23,
            category: Category::Unreliable,
            positive_indicators: vec![],
            negative_indicators: vec![IndicatorMatch::new("Sensational language", -15)],
            confidence: Some(0.77),
            source_label: Some("FAKE".to_string()),
        }
    }

    #[test]
    fn report_flattens_result_fields() {
        let json: serde_json::Value =
            serde_json::from_str(&JsonReporter::new().report(&result())).unwrap();
        assert_eq!(json["score"], 23);
        assert_eq!(json["category"], "unreliable");
        assert_eq!(json["negativeIndicators"][0]["weight"], -15);
        assert_eq!(json["sourceLabel"], "FAKE");
        assert_eq!(json["recommendations"].as_array().unwrap().len(), 3);
        assert_eq!(json["tips"].as_array().unwrap().len(), 8);
    }

    #[test]
    fn report_without_tips() {
        let json: serde_json::Value = serde_json::from_str(
            &JsonReporter::new().without_tips().pretty().report(&result()),
        )
        .unwrap();
        assert!(json.get("tips").is_none());
    }

    #[test]
    fn history_report_lists_trend() {
        let snapshot = HistorySnapshot {
            trend: vec![10, 90],
            recent: vec![],
            average: Some(50),
        };
        let json: serde_json::Value =
            serde_json::from_str(&JsonReporter::new().report_history(&snapshot)).unwrap();
        assert_eq!(json["trend"], serde_json::json!([10, 90]));
        assert!(json["recent"].as_array().unwrap().is_empty());
        assert_eq!(json["average"], 50);
    }
}
