//! Configuration loading for Credence

mod schema;

pub use schema::{ClassifierConfig, Config, HistoryConfig};

use crate::analyzer::{AnalysisEngine, CatalogError};
use crate::classifier::{ClassifierAdapter, HttpClassifier};
use crate::history::{HistoryStore, SharedHistory};
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = ".credencerc.json";

/// Find and load config file with extends resolution. Searches current directory then parents.
pub fn load_config(work_dir: &Path, custom_path: Option<&Path>) -> Result<Config> {
    let path = if let Some(p) = custom_path {
        let path = if p.is_absolute() {
            p.to_path_buf()
        } else {
            work_dir.join(p)
        };
        if path.exists() {
            Some(path)
        } else {
            anyhow::bail!("Config file not found: {}", path.display());
        }
    } else {
        find_config_in_parents(work_dir)
    };

    match path {
        Some(path) => load_config_with_extends(&path, &mut HashSet::new()),
        None => Ok(Config::default()),
    }
}

/// Load a config file and resolve extends chain
fn load_config_with_extends(config_path: &Path, visited: &mut HashSet<PathBuf>) -> Result<Config> {
    let canonical = config_path
        .canonicalize()
        .unwrap_or_else(|_| config_path.to_path_buf());
    if !visited.insert(canonical) {
        anyhow::bail!(
            "Circular extends detected in config: {}",
            config_path.display()
        );
    }

    let content = fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config: {}", config_path.display()))?;
    let mut config: Config = serde_json::from_str(&content)
        .with_context(|| format!("Invalid JSON in config: {}", config_path.display()))?;

    if let Some(extends) = config.extends.take() {
        let config_dir = config_path.parent().unwrap_or(Path::new("."));
        let mut extends_path = config_dir.join(&extends);
        if extends_path.extension().is_none() {
            extends_path.set_extension("json");
        }
        if !extends_path.exists() {
            anyhow::bail!(
                "Extended config not found: {} (referenced from {})",
                extends_path.display(),
                config_path.display()
            );
        }
        let base_config = load_config_with_extends(&extends_path, visited)?;
        config.merge_from(base_config);
    }

    Ok(config)
}

/// Search for .credencerc.json in directory and its parents
fn find_config_in_parents(mut dir: &Path) -> Option<PathBuf> {
    loop {
        let candidate = dir.join(CONFIG_FILENAME);
        if candidate.exists() {
            return Some(candidate);
        }
        dir = dir.parent()?;
    }
}

/// Build the analysis engine described by a config. Fails only on catalog
/// misconfiguration; a missing endpoint simply means no classifier.
pub fn build_engine(config: &Config) -> std::result::Result<AnalysisEngine, CatalogError> {
    let mut engine = AnalysisEngine::new()?.with_mode(config.effective_mode());
    if let Some(endpoint) = config.classifier.endpoint() {
        let timeout = config.classifier.timeout();
        let client = HttpClassifier::from_env(endpoint, config.classifier.token_env()).timeout(timeout);
        engine = engine.with_classifier(ClassifierAdapter::new(client).with_timeout(timeout));
    }
    Ok(engine)
}

/// Empty session history sized by config
pub fn build_history(config: &Config) -> SharedHistory {
    SharedHistory::new(HistoryStore::new(
        config.history.capacity(),
        config.history.recent(),
    ))
}
