//! Command-line options shared by the binary and the library entry point.

use std::path::PathBuf;

use clap::{Args, ValueEnum};

use bundlescope_core::{Config, GraphOption, Result};
use bundlescope_report::{ReportFormat, SizeKind};

/// Output format selectable on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatArg {
    /// Self-contained HTML report
    #[default]
    Html,
    /// Module tree as JSON
    Json,
    /// Ring snapshot as JSON
    Rings,
    /// Static chart
    Svg,
}

impl From<FormatArg> for ReportFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Html => ReportFormat::Html,
            FormatArg::Json => ReportFormat::Json,
            FormatArg::Rings => ReportFormat::Rings,
            FormatArg::Svg => ReportFormat::Svg,
        }
    }
}

/// Size shown in the chart centre.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SizeArg {
    Raw,
    #[default]
    Gzip,
    Brotli,
}

impl From<SizeArg> for SizeKind {
    fn from(size: SizeArg) -> Self {
        match size {
            SizeArg::Raw => SizeKind::Raw,
            SizeArg::Gzip => SizeKind::Gzip,
            SizeArg::Brotli => SizeKind::Brotli,
        }
    }
}

/// Overrides applied on top of the config file.
#[derive(Args, Debug, Clone, Default)]
pub struct GraphArgs {
    /// TOML config file with `[graph]` and `[rings]` tables
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Estimated gzip size as a fraction of the raw size
    #[arg(long = "gzip-ratio", value_name = "RATIO")]
    pub gzip_ratio: Option<f64>,

    /// Estimated brotli size as a fraction of the raw size
    #[arg(long = "brotli-ratio", value_name = "RATIO")]
    pub brotli_ratio: Option<f64>,

    /// Exclude modules whose id contains PATTERN (repeatable, replaces the default list)
    #[arg(long = "ignore", value_name = "PATTERN", action = clap::ArgAction::Append)]
    pub ignore: Vec<String>,

    /// Directory module names are shown relative to (default: current directory)
    #[arg(long = "base-dir", value_name = "DIR")]
    pub base_dir: Option<PathBuf>,

    /// Share a single child must exceed to replace its parent as the chart root
    #[arg(long = "main-node-threshold", value_name = "SHARE")]
    pub main_node_threshold: Option<f64>,
}

impl GraphArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: impl Into<PathBuf>) -> Self {
        self.config = Some(config.into());
        self
    }

    pub fn with_ignore<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore = patterns.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(base_dir.into());
        self
    }

    /// Load the config file, if any, and apply the flag overrides.
    pub fn resolve(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };

        let graph: &mut GraphOption = &mut config.graph;
        if let Some(ratio) = self.gzip_ratio {
            graph.gzip_ratio = ratio;
        }
        if let Some(ratio) = self.brotli_ratio {
            graph.brotli_ratio = ratio;
        }
        if !self.ignore.is_empty() {
            graph.ignored = self.ignore.clone();
        }
        if let Some(base_dir) = &self.base_dir {
            graph.base_dir = Some(base_dir.clone());
        }
        // relative bases (flag or file) resolve against the working directory
        let cwd = std::env::current_dir()?;
        graph.base_dir = Some(match graph.base_dir.take() {
            Some(base_dir) => cwd.join(base_dir),
            None => cwd,
        });
        if let Some(threshold) = self.main_node_threshold {
            config.rings.main_node_threshold = threshold;
        }

        config.validate()?;
        Ok(config)
    }
}
