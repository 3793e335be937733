//! YAML configuration for the `twinviz` binary.
//!
//! Precedence: CLI > file > defaults. Every field is optional in the file.
//!
//! ```yaml
//! version: 1
//! limit: 10000
//! max_limit: 500000000
//! plot:
//!   width: 1000
//!   height: 600
//!   format: png
//!   output_dir: plots
//!   spiral_max_points: 20000
//! analysis:
//!   window: 100
//!   theory_points: 20
//! ```

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::sieve::DEFAULT_MAX_LIMIT;
use crate::stats::density::DEFAULT_THEORY_POINTS;

/// Plot output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlotConfig {
    /// Image width in pixels.
    #[serde(default = "default_width")]
    pub width: u32,

    /// Image height in pixels.
    #[serde(default = "default_height")]
    pub height: u32,

    /// Output format (png, svg, terminal).
    #[serde(default = "default_format")]
    pub format: String,

    /// Directory plot files are written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Most integers drawn as background dots on the spiral.
    #[serde(default = "default_spiral_max_points")]
    pub spiral_max_points: usize,
}

fn default_width() -> u32 {
    1000
}
fn default_height() -> u32 {
    600
}
fn default_format() -> String {
    "png".to_string()
}
fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}
fn default_spiral_max_points() -> usize {
    20_000
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            format: default_format(),
            output_dir: default_output_dir(),
            spiral_max_points: default_spiral_max_points(),
        }
    }
}

/// Windowed analysis settings. `None` picks a width from the limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Density window width.
    #[serde(default)]
    pub window: Option<u64>,

    /// Number of proportion windows.
    #[serde(default)]
    pub proportion_windows: Option<usize>,

    /// Number of log-spaced theory comparison points.
    #[serde(default = "default_theory_points")]
    pub theory_points: usize,
}

fn default_theory_points() -> usize {
    DEFAULT_THEORY_POINTS
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            window: None,
            proportion_windows: None,
            theory_points: default_theory_points(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Configuration version.
    #[serde(default = "default_version")]
    pub version: u32,

    /// Limit used when the command line gives none.
    #[serde(default = "default_limit")]
    pub limit: u64,

    /// Largest limit the sieve accepts.
    #[serde(default = "default_max_limit")]
    pub max_limit: u64,

    /// Plot settings.
    #[serde(default)]
    pub plot: PlotConfig,

    /// Windowed analysis settings.
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

fn default_version() -> u32 {
    1
}
fn default_limit() -> u64 {
    10_000
}
fn default_max_limit() -> u64 {
    DEFAULT_MAX_LIMIT
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            limit: default_limit(),
            max_limit: default_max_limit(),
            plot: PlotConfig::default(),
            analysis: AnalysisConfig::default(),
        }
    }
}

impl Config {
    /// `<config dir>/twinviz/config.yaml`, if the platform has a config dir.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("twinviz").join("config.yaml"))
    }

    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigNotFound`] if the file does not exist,
    /// [`Error::Io`] if it cannot be read, and [`Error::Config`] if it cannot
    /// be parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => Error::ConfigNotFound(path.display().to_string()),
            _ => Error::Io(e),
        })?;

        let config = Self::parse(&content)?;
        tracing::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Parses configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error with line number if parsing fails.
    pub fn parse(yaml: &str) -> Result<Self> {
        serde_yaml_ng::from_str(yaml).map_err(|e| {
            let line = e.location().map_or(0, |l| l.line());
            Error::Config {
                line,
                message: e.to_string(),
            }
        })
    }

    /// Load `path` if given, else the default path if it exists, else defaults.
    ///
    /// # Errors
    ///
    /// An explicitly named file must exist and parse. A malformed file at the
    /// default path is an error too; a missing one is not.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(default) if default.exists() => Self::load(default),
            _ => {
                tracing::debug!("no config file, using defaults");
                Ok(Self::default())
            }
        }
    }
}
