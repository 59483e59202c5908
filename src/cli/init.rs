//! Init command - write a default analysis-gate.toml

use analysis_gate::config::{CONFIG_FILE_NAMES, DEFAULT_CONFIG_TEMPLATE};
use anyhow::{Context, Result};
use console::style;
use std::path::Path;

/// Run the init command
pub fn run(path: &Path, force: bool) -> Result<()> {
    let dir = path
        .canonicalize()
        .with_context(|| format!("Path does not exist: {}", path.display()))?;

    if !dir.is_dir() {
        anyhow::bail!("Path is not a directory: {}", dir.display());
    }

    let config_path = dir.join(CONFIG_FILE_NAMES[0]);
    if config_path.exists() && !force {
        println!(
            "{} Config already exists at {} (use --force to overwrite)",
            style("✓").green(),
            style(config_path.display()).cyan()
        );
        return Ok(());
    }

    std::fs::write(&config_path, DEFAULT_CONFIG_TEMPLATE)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    println!(
        "{} Created {}",
        style("✓").green(),
        style(config_path.display()).cyan()
    );

    println!("\nNext steps:");
    println!(
        "  {} Validate an analysis",
        style("analysis-gate validate analysis.json").cyan()
    );
    println!(
        "  {} Show the threshold table",
        style("analysis-gate levels").cyan()
    );

    Ok(())
}
