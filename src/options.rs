//! @acp:module "Stability Options"
//! @acp:summary "Command-line switches that configure a visibility policy"
//! @acp:domain cli
//! @acp:layer config

use crate::visibility::{StabilityLevel, VisibilityPolicy};

/// Switch that turns on strict mode for unannotated types
pub const TREAT_UNANNOTATED_TYPES_AS_PRIVATE: &str = "--treat-unannotated-types-as-private";

/// @acp:summary "Mutually exclusive stability threshold switches"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StabilityOption {
    Stable,
    Evolving,
    Unstable,
}

impl StabilityOption {
    pub fn all() -> [StabilityOption; 3] {
        [
            StabilityOption::Stable,
            StabilityOption::Evolving,
            StabilityOption::Unstable,
        ]
    }

    /// Switch name, e.g. `-stable`
    pub fn name(&self) -> &'static str {
        match self {
            StabilityOption::Stable => "-stable",
            StabilityOption::Evolving => "-evolving",
            StabilityOption::Unstable => "-unstable",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().into_iter().find(|option| option.name() == name)
    }

    pub fn level(&self) -> StabilityLevel {
        match self {
            StabilityOption::Stable => StabilityLevel::Stable,
            StabilityOption::Evolving => StabilityLevel::Evolving,
            StabilityOption::Unstable => StabilityLevel::Unstable,
        }
    }

    pub fn description(&self) -> String {
        let suffix = if *self == StabilityOption::Stable {
            ""
        } else {
            " or stronger"
        };
        format!("Output only APIs annotated as {}{}", &self.name()[1..], suffix)
    }

    /// Record this switch on the policy
    pub fn apply(&self, policy: &mut VisibilityPolicy) {
        policy.set_stability_threshold(self.level());
    }
}

impl From<StabilityLevel> for StabilityOption {
    fn from(level: StabilityLevel) -> Self {
        match level {
            StabilityLevel::Stable => StabilityOption::Stable,
            StabilityLevel::Evolving => StabilityOption::Evolving,
            StabilityLevel::Unstable => StabilityOption::Unstable,
        }
    }
}
