//! @acp:module "Commands"
//! @acp:summary "CLI command implementations"
//! @acp:domain cli
//! @acp:layer handler
//!
//! Provides implementations for all CLI commands.
//! Each command is in its own submodule for maintainability.

pub mod evaluate;
pub mod filter;
pub mod init;
pub mod options;

pub use evaluate::{execute_evaluate, EvaluateOptions};
pub use filter::{execute_filter, render_tree, FilterOptions};
pub use init::{execute_init, InitOptions};
pub use options::execute_options;

use crate::config::Config;
use crate::visibility::{Preset, StabilityLevel, VisibilityPolicy};

/// Policy switches given on the command line
#[derive(Debug, Clone, Copy, Default)]
pub struct PolicyArgs {
    /// Preset replacing the configured policy
    pub preset: Option<Preset>,
    /// Stability threshold override
    pub stability: Option<StabilityLevel>,
    /// Force strict mode on
    pub treat_unannotated_types_as_private: bool,
}

impl PolicyArgs {
    /// Resolve the effective policy: defaults < config < command line
    pub fn resolve(&self, config: &Config) -> VisibilityPolicy {
        let mut policy = match self.preset {
            Some(preset) => VisibilityPolicy::from_preset(preset),
            None => config.policy(),
        };

        if let Some(level) = self.stability {
            policy.set_stability_threshold(level);
        }
        if self.treat_unannotated_types_as_private {
            policy.treat_unannotated_types_as_private();
        }

        tracing::debug!("Effective policy: {}", policy);
        policy
    }
}
