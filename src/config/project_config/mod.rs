//! Project-level configuration support
//!
//! Loads configuration from `placefreq.toml` or `.placefreqrc.json` in the
//! working directory.
//!
//! # Configuration Format
//!
//! ```toml
//! # placefreq.toml
//!
//! [source]
//! kind = "remote"                      # "local" (default), "xlsx" or "remote"
//! url = "https://example.com/places.csv"
//! timeout_secs = 30
//!
//! [report]
//! column = "Place"
//! format = "html"
//! output = "report.html"
//! charts_dir = "charts"
//! ```

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

pub const CONFIG_FILE_NAME: &str = "placefreq.toml";
pub const JSON_CONFIG_FILE_NAME: &str = ".placefreqrc.json";

/// Written by `placefreq init`
pub const EXAMPLE_CONFIG: &str = r#"# placefreq configuration

[source]
# Where the rows come from: "local", "xlsx" or "remote"
kind = "local"

# File read when kind = "local" (.xlsx/.xls/.ods paths are read as workbooks)
path = "places.csv"

# Workbook sheet to read (default: the first one)
# sheet = "Sheet1"

# CSV downloaded when kind = "remote"
# url = "https://example.com/places.csv"
# download_dir = "downloads"
timeout_secs = 30

# Field separator (single ASCII character)
delimiter = ","

[report]
# Column holding the category labels
column = "Place"

# Output format (text, json, html, markdown)
format = "text"

# Write the report to a file instead of stdout
# output = "report.html"

# Write one SVG file per chart into this directory
# charts_dir = "charts"
"#;

/// Top-level configuration file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub report: ReportConfig,
}

/// How rows are acquired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// CSV file on disk (default), or a workbook when the path says so
    #[default]
    Local,
    /// Spreadsheet workbook on disk, whatever the extension
    Xlsx,
    /// CSV downloaded over HTTP
    Remote,
}

/// `[source]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub kind: SourceKind,

    /// Local CSV or workbook path (default: places.csv)
    pub path: PathBuf,

    /// Workbook sheet name (default: first sheet)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sheet: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Where downloads are stored (default: user cache dir)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_dir: Option<PathBuf>,

    /// Download timeout in seconds (default: 30)
    pub timeout_secs: u64,

    pub delimiter: char,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            kind: SourceKind::Local,
            path: PathBuf::from("places.csv"),
            sheet: None,
            url: None,
            download_dir: None,
            timeout_secs: 30,
            delimiter: ',',
        }
    }
}

impl SourceConfig {
    /// Configured download directory, else `<cache dir>/placefreq`
    pub fn download_dir(&self) -> PathBuf {
        self.download_dir.clone().unwrap_or_else(|| {
            dirs::cache_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join("placefreq")
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The delimiter as the single byte the CSV reader expects
    pub fn delimiter_byte(&self) -> anyhow::Result<u8> {
        if !self.delimiter.is_ascii() {
            bail!(
                "Delimiter must be a single ASCII character, got '{}'",
                self.delimiter
            );
        }
        Ok(self.delimiter as u8)
    }
}

/// `[report]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Label column (default: Place)
    pub column: String,

    /// Output format name (default: text)
    pub format: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub charts_dir: Option<PathBuf>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            column: "Place".to_string(),
            format: "text".to_string(),
            output: None,
            charts_dir: None,
        }
    }
}

/// Load project configuration from `dir`.
///
/// Searches for configuration files in this order:
/// 1. `placefreq.toml`
/// 2. `.placefreqrc.json`
///
/// Returns default configuration if no usable config file is found.
pub fn load_project_config(dir: &Path) -> ProjectConfig {
    // Try TOML first (preferred format)
    let toml_path = dir.join(CONFIG_FILE_NAME);
    if toml_path.exists() {
        match load_toml_config(&toml_path) {
            Ok(config) => {
                debug!("Loaded project config from {}", toml_path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {}", toml_path.display(), e);
            }
        }
    }

    let json_path = dir.join(JSON_CONFIG_FILE_NAME);
    if json_path.exists() {
        match load_json_config(&json_path) {
            Ok(config) => {
                debug!("Loaded project config from {}", json_path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {}", json_path.display(), e);
            }
        }
    }

    debug!("No project config found, using defaults");
    ProjectConfig::default()
}

/// Load an explicitly named config file (`--config`).
///
/// Unlike [`load_project_config`] a missing or malformed file is an error.
/// `.json` files are parsed as JSON, everything else as TOML.
pub fn load_config_file(path: &Path) -> anyhow::Result<ProjectConfig> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let config = if is_json {
        load_json_config(path)
    } else {
        load_toml_config(path)
    };
    config.with_context(|| format!("Failed to load config file {}", path.display()))
}

fn load_toml_config(path: &Path) -> anyhow::Result<ProjectConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: ProjectConfig = toml::from_str(&content)?;
    Ok(config)
}

fn load_json_config(path: &Path) -> anyhow::Result<ProjectConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: ProjectConfig = serde_json::from_str(&content)?;
    Ok(config)
}
