//! Configuration module for placefreq
//!
//! This module handles:
//! - Project-level configuration (placefreq.toml / .placefreqrc.json)
//! - Row source selection (local CSV or workbook, or remote URL)
//! - Report defaults (column, format, output, charts)

mod project_config;

pub use project_config::{
    load_config_file,
    load_project_config,
    ProjectConfig,
    ReportConfig,
    SourceConfig,
    SourceKind,
    CONFIG_FILE_NAME,
    EXAMPLE_CONFIG,
    JSON_CONFIG_FILE_NAME,
};
