//! Report configuration.
//!
//! An optional TOML file overrides the directory layout and the report
//! heading; every field defaults to the upstream pipeline's own layout, so
//! running with no config at all reads the standard tree.

use serde::Deserialize;
use std::path::Path;

/// Top-level configuration, optionally loaded from TOML.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReportConfig {
    pub paths: PathsConfig,
    pub report: ReportOptions,
}

/// Directory layout, relative to the invocation root.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct PathsConfig {
    pub data_dir: String,
    pub assets_dir: String,
    pub reports_dir: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        PathsConfig {
            data_dir: "data/processed".to_string(),
            assets_dir: "assets".to_string(),
            reports_dir: "reports".to_string(),
        }
    }
}

/// Report heading text.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReportOptions {
    pub title: String,
    pub subtitle: String,
}

impl Default for ReportOptions {
    fn default() -> Self {
        ReportOptions {
            title: "OnePlan AI — Intelligent Media Budget Optimizer".to_string(),
            subtitle: "A concise executive story: what changed, why it changed, and the impact."
                .to_string(),
        }
    }
}

impl ReportConfig {
    /// Load configuration from a TOML file.
    ///
    /// Unlike artifact loads, config problems are operator errors and are
    /// reported, not swallowed.
    pub fn load(path: &Path) -> Result<ReportConfig, Box<dyn std::error::Error>> {
        let text = std::fs::read_to_string(path)?;
        let config = toml::from_str(&text)?;
        Ok(config)
    }
}
