//! Console reporter with colored output

use crate::analyzer::ScoreAggregator;
use crate::history::{format_delta, HistorySnapshot};
use crate::recommend;
use crate::{AnalysisResult, Category, IndicatorMatch, RELIABLE_THRESHOLD, QUESTIONABLE_THRESHOLD};
use colored::Colorize;
use std::fmt::Write;

/// Reporter for terminal output
pub struct ConsoleReporter {
    /// Whether to use colors
    use_colors: bool,
    /// Whether to show verbose output
    verbose: bool,
    /// Whether to append the media-literacy checklist
    show_tips: bool,
}

impl ConsoleReporter {
    /// Create a new console reporter
    pub fn new() -> Self {
        Self {
            use_colors: true,
            verbose: false,
            show_tips: true,
        }
    }

    /// Disable colors
    pub fn without_colors(mut self) -> Self {
        self.use_colors = false;
        self
    }

    /// Enable verbose output
    pub fn verbose(mut self) -> Self {
        self.verbose = true;
        self
    }

    /// Skip the tips section
    pub fn without_tips(mut self) -> Self {
        self.show_tips = false;
        self
    }

    /// Report a single analysis result
    pub fn report(&self, result: &AnalysisResult) {
        print!("{}", self.render(result, None));
    }

    /// Report in quiet mode (just score)
    pub fn report_quiet(&self, result: &AnalysisResult) {
        println!("{}", self.render_quiet(result));
    }

    pub fn render_quiet(&self, result: &AnalysisResult) -> String {
        format!(
            "{}/100 ({})",
            result.score,
            self.colorize_category(result.category)
        )
    }

    /// Full report as a string
    pub fn render(&self, result: &AnalysisResult, previous: Option<u8>) -> String {
        let mut out = String::new();
        self.write_header(&mut out, result);
        self.write_score(&mut out, result, previous);
        self.write_indicators(&mut out, result);
        self.write_recommendations(&mut out, result);
        if self.show_tips {
            self.write_tips(&mut out);
        }
        out
    }

    fn write_header(&self, out: &mut String, result: &AnalysisResult) {
        let source = if result.is_classifier_backed() {
            "classifier"
        } else {
            "pattern analysis"
        };
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", "🔍 Credibility Analysis".bold());
        let _ = writeln!(out, "   Scored by: {}", source);
        let _ = writeln!(out);
    }

    fn write_score(&self, out: &mut String, result: &AnalysisResult, previous: Option<u8>) {
        let bar = self.create_score_bar(result.score);
        let _ = writeln!(
            out,
            "   Score: {} {}{}",
            bar,
            self.colorize_category(result.category).bold(),
            format_delta(previous, result.score).dimmed()
        );
        let _ = writeln!(
            out,
            "   {}",
            ScoreAggregator::category_description(result.category).dimmed()
        );
        if let (Some(confidence), Some(label)) = (result.confidence, &result.source_label) {
            let _ = writeln!(
                out,
                "   Classifier: {} (confidence {:.1}%)",
                label,
                confidence * 100.0
            );
        }
        let _ = writeln!(out);
    }

    fn write_indicators(&self, out: &mut String, result: &AnalysisResult) {
        let _ = writeln!(out, "   {}", "Positive Indicators:".bold());
        if result.positive_indicators.is_empty() {
            let _ = writeln!(out, "   {}", "No positive indicators found".dimmed());
        }
        for indicator in &result.positive_indicators {
            let _ = writeln!(out, "   {} {}", "✓".green(), self.indicator_text(indicator));
        }
        let _ = writeln!(out);

        let _ = writeln!(out, "   {}", "Suspicious Indicators:".bold());
        if result.negative_indicators.is_empty() {
            let _ = writeln!(out, "   {}", "No suspicious indicators found".dimmed());
        }
        for indicator in &result.negative_indicators {
            let _ = writeln!(out, "   {} {}", "✗".red(), self.indicator_text(indicator));
        }
        if self.verbose && result.is_classifier_backed() {
            let _ = writeln!(
                out,
                "   {}",
                "(indicators are descriptive; the classifier decided the score)".dimmed()
            );
        }
        let _ = writeln!(out);
    }

    fn indicator_text(&self, indicator: &IndicatorMatch) -> String {
        if self.verbose {
            format!("{} ({:+})", indicator.label, indicator.weight)
        } else {
            indicator.label.clone()
        }
    }

    fn write_recommendations(&self, out: &mut String, result: &AnalysisResult) {
        let _ = writeln!(out, "   {}", "Recommendations:".bold());
        for rec in recommend::recommendations_for(result.category) {
            let _ = writeln!(out, "   {} {}", "→".cyan(), rec);
        }
        let _ = writeln!(out);
    }

    fn write_tips(&self, out: &mut String) {
        let _ = writeln!(out, "   {}", "How to Spot Fake News:".bold());
        for tip in recommend::tips() {
            let _ = writeln!(out, "   • {}", tip);
        }
        let _ = writeln!(out);
    }

    /// Trend line plus the recent-analyses view
    pub fn render_history(&self, history: &HistorySnapshot) -> String {
        let mut out = String::new();
        let series = &history.trend;
        if series.is_empty() {
            let _ = writeln!(out, "   No analyses yet. Try analyzing some content!");
            return out;
        }

        let _ = writeln!(out, "   {}", "Credibility Trend:".bold());
        let _ = writeln!(
            out,
            "   {}  {}",
            sparkline(series),
            series
                .iter()
                .map(u8::to_string)
                .collect::<Vec<_>>()
                .join(" → ")
                .dimmed()
        );
        let _ = writeln!(
            out,
            "   {}",
            format!(
                "reliable ≥ {}, questionable ≥ {}",
                RELIABLE_THRESHOLD, QUESTIONABLE_THRESHOLD
            )
            .dimmed()
        );
        if let Some(average) = history.average {
            let _ = writeln!(
                out,
                "   Average: {}/100 ({})",
                average,
                self.colorize_category(Category::from_score(average))
            );
        }
        let _ = writeln!(out);

        let _ = writeln!(out, "   {}", "Recent Analyses:".bold());
        for entry in &history.recent {
            let _ = writeln!(
                out,
                "   {} {:>3}/100 - {}",
                entry.timestamp.format("%H:%M:%S").to_string().dimmed(),
                entry.score,
                self.colorize_category(entry.category)
            );
            let _ = writeln!(out, "       {}", entry.text_preview.italic());
        }
        out
    }

    pub fn render_tips(&self) -> String {
        let mut out = String::new();
        self.write_tips(&mut out);
        let _ = writeln!(out, "   {}", "Fact-Check Resources:".bold());
        for (name, url) in recommend::fact_check_resources() {
            let _ = writeln!(out, "   • {} {}", name, url.dimmed());
        }
        out
    }

    fn colorize_category(&self, category: Category) -> colored::ColoredString {
        let s = category.to_string();
        if !self.use_colors {
            return s.normal();
        }
        match category {
            Category::Reliable => s.green(),
            Category::Questionable => s.yellow(),
            Category::Unreliable => s.red(),
        }
    }

    fn create_score_bar(&self, score: u8) -> String {
        let filled = (score.min(100) as usize * 20) / 100;
        let empty = 20 - filled;

        let bar = format!(
            "[{}{}] {:>3}/100",
            "█".repeat(filled),
            "░".repeat(empty),
            score
        );

        if self.use_colors {
            match Category::from_score(score) {
                Category::Reliable => bar.green().to_string(),
                Category::Questionable => bar.yellow().to_string(),
                Category::Unreliable => bar.red().to_string(),
            }
        } else {
            bar
        }
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

/// One block character per score, scaled to 0-100
fn sparkline(series: &[u8]) -> String {
    const BLOCKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
    series
        .iter()
        .map(|&s| BLOCKS[(s.min(100) as usize * (BLOCKS.len() - 1)) / 100])
        .collect()
}
