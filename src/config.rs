//! TOML configuration for wiki-audit.
//!
//! A config file is optional. Every table has defaults matching the wiki's
//! editorial rules, so `wiki-audit report docs` works without one. When a
//! file is given with `--config`, any table or key it omits keeps its
//! default.
//!
//! ```toml
//! [scan]
//! include_globs = ["**/*.md"]
//! exclude_globs = ["drafts/**"]
//!
//! [thresholds]
//! min_content_length = 500
//! title_length = [10, 60]
//!
//! [report]
//! list_limit = 5
//! ```

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;

use wiki_audit_core::style::{default_categories, PatternCategory, StyleDetector};
use wiki_audit_core::thresholds::Thresholds;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub scan: ScanConfig,
    pub thresholds: Thresholds,
    pub report: ReportConfig,
    pub style: StyleConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ScanConfig {
    pub include_globs: Vec<String>,
    pub exclude_globs: Vec<String>,
    /// Exact file names that are never part of the corpus.
    pub excluded_names: Vec<String>,
    /// File names containing this marker are saved copies and skipped.
    pub backup_marker: String,
    pub follow_symlinks: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            include_globs: default_include_globs(),
            exclude_globs: Vec::new(),
            excluded_names: default_excluded_names(),
            backup_marker: ".backup.".to_string(),
            follow_symlinks: false,
        }
    }
}

fn default_include_globs() -> Vec<String> {
    vec!["**/*.md".to_string()]
}

fn default_excluded_names() -> Vec<String> {
    [
        "README.md",
        "SEO_IMPLEMENTATION_GUIDE.md",
        "PROFESSIONAL_DOCS_SYSTEM.md",
        "README_ENHANCE_TOOL.md",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct ReportConfig {
    /// Maximum per-document entries printed per section; 0 = no limit.
    pub list_limit: usize,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StyleConfig {
    /// Start from the built-in phrase list before adding `categories`.
    pub use_defaults: bool,
    pub categories: Vec<PatternCategory>,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            use_defaults: true,
            categories: Vec::new(),
        }
    }
}

impl StyleConfig {
    pub fn categories(&self) -> Vec<PatternCategory> {
        let mut all = if self.use_defaults {
            default_categories()
        } else {
            Vec::new()
        };
        all.extend(self.categories.iter().cloned());
        all
    }

    pub fn detector(&self) -> Result<StyleDetector> {
        StyleDetector::new(&self.categories())
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    validate(&config)?;
    Ok(config)
}

/// Load `path` when given, otherwise fall back to the built-in defaults.
pub fn load_or_default(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => load_config(path),
        None => Ok(Config::default()),
    }
}

fn validate(config: &Config) -> Result<()> {
    // Validate scan
    if config.scan.include_globs.is_empty() {
        bail!("scan.include_globs must not be empty");
    }
    for pattern in config
        .scan
        .include_globs
        .iter()
        .chain(&config.scan.exclude_globs)
    {
        globset::Glob::new(pattern)
            .with_context(|| format!("Invalid glob pattern in [scan]: '{}'", pattern))?;
    }

    // Validate thresholds
    let t = &config.thresholds;
    for (name, bounds) in [
        ("title_length", t.title_length),
        ("description_length", t.description_length),
        ("keyword_count", t.keyword_count),
    ] {
        if !bounds.is_valid() {
            bail!(
                "thresholds.{} must be [min, max] with min <= max (got [{}, {}])",
                name,
                bounds.min,
                bounds.max
            );
        }
    }
    if t.entry_document.trim().is_empty() {
        bail!("thresholds.entry_document must not be empty");
    }

    // Validate style
    config
        .style
        .detector()
        .context("Invalid [style] configuration")?;

    Ok(())
}
