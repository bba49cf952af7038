//! Analyzer module - credibility scoring engine

pub mod catalog;
pub mod engine;
pub mod scorer;
pub mod scoring;

pub use catalog::{CapitalizationRule, CatalogError, IndicatorCatalog, IndicatorRule};
pub use engine::{AnalysisEngine, AnalyzeError};
pub use scorer::{PatternScore, PatternScorer};
pub use scoring::{AnalysisMode, ScoreAggregator};
