//! CLI command definitions and handlers

mod analyze;
mod init;

pub use analyze::AnalyzeOptions;

use crate::config::{load_config_file, load_project_config, ProjectConfig};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// placefreq - frequency statistics for categorical place data
///
/// Reads a labelled column from a CSV file (local or downloaded), counts
/// each normalized label and reports mean/median/std of the per-row
/// frequencies, quartiles, Tukey fences and outliers.
#[derive(Parser, Debug)]
#[command(name = "placefreq")]
#[command(
    version,
    about = "Frequency statistics and Tukey-fence outliers for categorical place data",
    after_help = "\
Examples:
  placefreq                                    Analyze ./places.csv (column \"Place\")
  placefreq analyze --file survey.csv          Analyze another file
  placefreq analyze --file places.xlsx         Analyze the first sheet of a workbook
  placefreq analyze --url https://host/x.csv   Download then analyze
  placefreq analyze -f json                    JSON bundle for scripting
  placefreq analyze -f html -o report.html     Standalone HTML dashboard
  placefreq analyze --charts-dir charts        Also write the SVG charts
  placefreq init                               Write an example placefreq.toml"
)]
pub struct Cli {
    /// Config file (default: ./placefreq.toml or ./.placefreqrc.json)
    #[arg(long, global = true, env = "PLACEFREQ_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write an example placefreq.toml in the current directory
    Init,

    /// Compute the frequency report (default command)
    #[command(after_help = "\
Examples:
  placefreq analyze --file places.csv --column Place
  placefreq analyze --url https://example.com/places.csv -f markdown
  placefreq analyze -f html -o report.html --charts-dir charts
  placefreq analyze --file export.csv --delimiter ';'")]
    Analyze {
        #[command(flatten)]
        options: AnalyzeOptions,
    },

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Show version info
    Version,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the effective configuration as TOML
    Show,
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Commands::Init) => {
            let cwd = std::env::current_dir().context("Cannot determine current directory")?;
            init::run(&cwd)
        }

        Some(Commands::Analyze { options }) => {
            let mut config = load_config(cli.config.as_deref())?;
            options.apply(&mut config);
            analyze::run(&config)
        }

        Some(Commands::Config {
            action: ConfigAction::Show,
        }) => {
            let config = load_config(cli.config.as_deref())?;
            print!("{}", toml::to_string_pretty(&config)?);
            Ok(())
        }

        Some(Commands::Version) => {
            println!("placefreq {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }

        None => {
            let config = load_config(cli.config.as_deref())?;
            analyze::run(&config)
        }
    }
}

/// An explicit `--config` must load; otherwise look in the working directory
fn load_config(explicit: Option<&Path>) -> Result<ProjectConfig> {
    match explicit {
        Some(path) => load_config_file(path),
        None => {
            let cwd = std::env::current_dir().context("Cannot determine current directory")?;
            Ok(load_project_config(&cwd))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_defaults_to_analyze() {
        let cli = Cli::try_parse_from(["placefreq"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.log_level, "info");
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["placefreq", "analyze", "--log-level", "debug", "--config", "x.toml"])
                .unwrap();
        assert_eq!(cli.log_level, "debug");
        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
    }

    #[test]
    fn test_file_and_url_conflict() {
        let result = Cli::try_parse_from([
            "placefreq",
            "analyze",
            "--file",
            "a.csv",
            "--url",
            "https://example.com/a.csv",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_format_rejected() {
        assert!(Cli::try_parse_from(["placefreq", "analyze", "-f", "sarif"]).is_err());
    }

    #[test]
    fn test_config_show_parses() {
        let cli = Cli::try_parse_from(["placefreq", "config", "show"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                action: ConfigAction::Show
            })
        ));
    }

    #[test]
    fn test_load_config_explicit_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(Some(&dir.path().join("nope.toml"))).is_err());
    }
}
