//! @acp:module "Init Command"
//! @acp:summary "Write a starter configuration file"
//! @acp:domain cli
//! @acp:layer handler

use std::path::PathBuf;

use anyhow::{bail, Result};
use console::style;

use crate::config::Config;
use crate::visibility::{Preset, StabilityLevel};

/// Options for the init command
#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    /// Config file to write
    pub path: PathBuf,
    /// Force overwrite existing config
    pub force: bool,
    /// Preset to record
    pub preset: Option<Preset>,
    /// Stability threshold to record
    pub stability: Option<StabilityLevel>,
    /// Record strict mode
    pub treat_unannotated_types_as_private: bool,
}

/// Execute the init command
pub fn execute_init(options: InitOptions) -> Result<()> {
    if options.path.exists() && !options.force {
        bail!(
            "{} already exists. Use --force to overwrite.",
            options.path.display()
        );
    }

    let config = Config {
        preset: options.preset,
        stability: options.stability,
        treat_unannotated_types_as_private: options
            .treat_unannotated_types_as_private
            .then_some(true),
        ..Config::default()
    };

    config.save(&options.path)?;
    println!("{} Created {}", style("✓").green(), options.path.display());
    println!("  Policy: {}", config.policy());

    println!("\n{}", style("Next steps:").bold());
    println!(
        "  Run {} to project a manifest onto its public API",
        style("audience filter <manifest>").cyan()
    );

    Ok(())
}
