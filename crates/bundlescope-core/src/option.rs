//! Replaceable constants and the options built from them.
//!
//! Compression ratios are estimates, not measurements: the totals they produce
//! are `round(total * ratio)`.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{Error, Result};

/// Basic gzip assumption.
pub const GZIP_RATIO: f64 = 0.38;

/// Brotli at a high static-asset compression level.
pub const BROTLI_RATIO: f64 = 0.3;

/// Module id fragments that are never part of the graph (bundler bootstrap code).
pub const IGNORED: &[&str] = &["vite/modulepreload-polyfill.js"];

/// A child becomes the main node when it is the only one above this share of
/// its siblings' combined total.
pub const MAIN_NODE_THRESHOLD: f64 = 0.01;

/// Options for building the module graph.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GraphOption {
    pub gzip_ratio: f64,
    pub brotli_ratio: f64,
    /// Substrings matched against normalized module ids.
    pub ignored: Vec<String>,
    /// Directory module names are made relative to. `None` keeps ids verbatim.
    pub base_dir: Option<PathBuf>,
}

impl Default for GraphOption {
    fn default() -> Self {
        Self {
            gzip_ratio: GZIP_RATIO,
            brotli_ratio: BROTLI_RATIO,
            ignored: IGNORED.iter().map(|s| s.to_string()).collect(),
            base_dir: None,
        }
    }
}

impl GraphOption {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_gzip_ratio(mut self, ratio: f64) -> Self {
        self.gzip_ratio = ratio;
        self
    }

    pub fn with_brotli_ratio(mut self, ratio: f64) -> Self {
        self.brotli_ratio = ratio;
        self
    }

    pub fn with_ignored<I, S>(mut self, ignored: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored = ignored.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(base_dir.into());
        self
    }

    /// Whether a normalized module id hits the ignore-list.
    pub fn is_ignored(&self, id: &str) -> bool {
        self.ignored
            .iter()
            .any(|pattern| !pattern.is_empty() && id.contains(pattern.as_str()))
    }

    pub fn validate(&self) -> Result<()> {
        for (key, ratio) in [
            ("gzip_ratio", self.gzip_ratio),
            ("brotli_ratio", self.brotli_ratio),
        ] {
            if !ratio.is_finite() || ratio < 0.0 {
                return Err(Error::config_invalid(format!(
                    "{key} must be a non-negative number, got {ratio}"
                ))
                .with_context("key", key));
            }
        }
        Ok(())
    }
}

/// Options for ring normalization.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RingOption {
    pub main_node_threshold: f64,
}

impl Default for RingOption {
    fn default() -> Self {
        Self {
            main_node_threshold: MAIN_NODE_THRESHOLD,
        }
    }
}

impl RingOption {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_main_node_threshold(mut self, threshold: f64) -> Self {
        self.main_node_threshold = threshold;
        self
    }

    pub fn validate(&self) -> Result<()> {
        let threshold = self.main_node_threshold;
        if !(0.0..1.0).contains(&threshold) {
            return Err(Error::config_invalid(format!(
                "main_node_threshold must be in [0, 1), got {threshold}"
            ))
            .with_context("key", "main_node_threshold"));
        }
        Ok(())
    }
}

/// File configuration (`bundlescope.toml`).
///
/// ```toml
/// [graph]
/// gzip_ratio = 0.35
/// ignored = ["vite/modulepreload-polyfill.js", "commonjsHelpers"]
///
/// [rings]
/// main_node_threshold = 0.02
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub graph: GraphOption,
    pub rings: RingOption,
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).map_err(|e| {
            Error::config_invalid(e.to_string())
                .with_operation("config::parse")
                .set_source(e)
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::from(e)
                .with_operation("config::load")
                .with_context("path", path.display().to_string())
        })?;
        Self::from_toml_str(&content).map_err(|e| {
            e.with_operation("config::load")
                .with_context("path", path.display().to_string())
        })
    }

    pub fn validate(&self) -> Result<()> {
        self.graph.validate()?;
        self.rings.validate()
    }
}
