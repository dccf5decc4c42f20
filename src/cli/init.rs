//! Init command - write an example placefreq.toml

use crate::config::{CONFIG_FILE_NAME, EXAMPLE_CONFIG};
use anyhow::{bail, Context, Result};
use console::style;
use std::path::Path;

/// Run the init command in `dir`; an existing config is never overwritten
pub fn run(dir: &Path) -> Result<()> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        bail!(
            "{} already exists, not overwriting it",
            config_path.display()
        );
    }

    std::fs::write(&config_path, EXAMPLE_CONFIG)
        .with_context(|| format!("Failed to create {}", config_path.display()))?;
    println!(
        "{} Created {}",
        style("✓").green(),
        style(config_path.display()).cyan()
    );

    println!("\nNext steps:");
    println!("  {} Point [source] at your data", style("edit placefreq.toml").cyan());
    println!("  {} Run the analysis", style("placefreq analyze").cyan());

    Ok(())
}
