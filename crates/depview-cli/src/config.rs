//! Optional `depview.toml` settings.
//!
//! The file is only read; command-line flags override whatever it sets.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use depview_error::{Error, Result};

/// File looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "depview.toml";

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DepviewConfig {
    pub renderer: RendererSection,
    pub report: ReportSection,
    pub graph: GraphSection,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RendererSection {
    pub tool: Option<PathBuf>,
    pub format: Option<String>,
    pub layout: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportSection {
    pub all: PathBuf,
    pub selected: PathBuf,
    pub spaced_summary: bool,
}

impl Default for ReportSection {
    fn default() -> Self {
        Self {
            all: PathBuf::from("all_dependencies.txt"),
            selected: PathBuf::from("selected_dependencies.txt"),
            spaced_summary: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GraphSection {
    pub rankdir: String,
    pub show_external: bool,
}

impl Default for GraphSection {
    fn default() -> Self {
        Self {
            rankdir: "TB".to_string(),
            show_external: false,
        }
    }
}

impl DepviewConfig {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            Error::from(e)
                .with_operation("config::read")
                .with_context("path", path.display().to_string())
        })?;
        Self::from_toml(&text).map_err(|e| e.with_context("path", path.display().to_string()))
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| {
            Error::config_invalid(format!("invalid TOML: {}", e.message()))
                .with_operation("config::parse")
                .set_source(e)
        })
    }

    /// Load `explicit` if given (it must exist), otherwise `depview.toml` in
    /// the working directory if present, otherwise the defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_path(path);
        }
        let fallback = Path::new(DEFAULT_CONFIG_FILE);
        if fallback.is_file() {
            debug!(path = DEFAULT_CONFIG_FILE, "using config file");
            return Self::from_path(fallback);
        }
        Ok(Self::default())
    }
}
