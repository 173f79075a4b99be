//! @acp:module "Options Command"
//! @acp:summary "List the policy switches and presets"
//! @acp:domain cli
//! @acp:layer handler

use anyhow::Result;
use console::style;

use crate::options::{StabilityOption, TREAT_UNANNOTATED_TYPES_AS_PRIVATE};
use crate::visibility::{Preset, VisibilityPolicy};

/// Execute the options command
pub fn execute_options() -> Result<()> {
    println!("{}", style("Stability thresholds (mutually exclusive):").bold());
    for option in StabilityOption::all() {
        println!(
            "  {:<12} {}",
            style(option.name()).cyan(),
            option.description()
        );
    }

    println!("\n{}", style("Strict mode:").bold());
    println!(
        "  {}  Exclude classes and interfaces without an audience marker",
        style(TREAT_UNANNOTATED_TYPES_AS_PRIVATE).cyan()
    );

    println!("\n{}", style("Presets:").bold());
    for preset in [Preset::ExcludePrivate, Preset::IncludePublic] {
        println!(
            "  {:<16} {} ({})",
            style(preset.as_str()).cyan(),
            preset.name(),
            VisibilityPolicy::from_preset(preset)
        );
    }

    Ok(())
}
