//! Analyzer configuration, loaded from an optional TOML file.

use crate::ports::dot_exporter::GraphConfig;
use crate::ports::pretty_printer::FormatConfig;
use crate::ports::tree_exporter::TreeConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Run exporters on the rayon pool.
    pub parallel: bool,
    /// Pool size; half the cores when unset.
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub format: FormatConfig,
    pub graph: GraphConfig,
    pub tree: TreeConfig,
    pub pipeline: PipelineConfig,
}

impl AnalyzerConfig {
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("Invalid analyzer configuration")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("In {}", path.display()))
    }

    /// The file's configuration, or defaults when no file is given.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}
