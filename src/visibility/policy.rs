//! @acp:module "Visibility Policy"
//! @acp:summary "Stability threshold and strict-mode settings for a batch of evaluations"
//! @acp:domain visibility
//! @acp:layer model
//!
//! A policy is configured once, before any evaluation, and then shared
//! read-only. It is `Copy`, so callers can hand each worker its own snapshot.

use serde::{Deserialize, Serialize};

use super::markers::StabilityLevel;
use crate::error::AudienceError;

/// @acp:summary "Inclusion policy: minimum stability plus unannotated-type handling"
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibilityPolicy {
    /// Minimum stability an element must declare to be included
    #[serde(default)]
    stability_threshold: StabilityLevel,

    /// Treat type-like elements without an audience marker as private
    #[serde(default)]
    unannotated_types_are_private: bool,
}

impl VisibilityPolicy {
    /// Most permissive policy: threshold unstable, strict mode off
    pub fn new() -> Self {
        Self::default()
    }

    /// Policy matching one of the named filter variants
    pub fn from_preset(preset: Preset) -> Self {
        let mut policy = Self::new();
        if preset == Preset::IncludePublic {
            policy.treat_unannotated_types_as_private();
        }
        policy
    }

    pub fn set_stability_threshold(&mut self, level: StabilityLevel) {
        self.stability_threshold = level;
    }

    pub fn set_unannotated_types_are_private(&mut self, flag: bool) {
        self.unannotated_types_are_private = flag;
    }

    /// Switch on strict mode
    pub fn treat_unannotated_types_as_private(&mut self) {
        self.unannotated_types_are_private = true;
    }

    pub fn with_stability_threshold(mut self, level: StabilityLevel) -> Self {
        self.set_stability_threshold(level);
        self
    }

    pub fn with_unannotated_types_are_private(mut self, flag: bool) -> Self {
        self.set_unannotated_types_are_private(flag);
        self
    }

    pub fn stability_threshold(&self) -> StabilityLevel {
        self.stability_threshold
    }

    pub fn unannotated_types_are_private(&self) -> bool {
        self.unannotated_types_are_private
    }
}

impl std::fmt::Display for VisibilityPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "threshold={}, unannotated types {}",
            self.stability_threshold,
            if self.unannotated_types_are_private {
                "private"
            } else {
                "public"
            }
        )
    }
}

/// @acp:summary "Named policy presets"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    /// Drop Private and LimitedPrivate elements; unannotated types count as public
    ExcludePrivate,
    /// As ExcludePrivate, and also drop unannotated classes and interfaces
    IncludePublic,
}

impl Preset {
    /// Filter name this preset is published under
    pub fn name(&self) -> &'static str {
        match self {
            Preset::ExcludePrivate => "ExcludePrivateAnnotationsStandard",
            Preset::IncludePublic => "IncludePublicAnnotationsStandard",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::ExcludePrivate => "exclude-private",
            Preset::IncludePublic => "include-public",
        }
    }
}

impl std::str::FromStr for Preset {
    type Err = AudienceError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "exclude-private" | "excludeprivateannotationsstandard" => Ok(Preset::ExcludePrivate),
            "include-public" | "includepublicannotationsstandard" => Ok(Preset::IncludePublic),
            _ => Err(AudienceError::UnknownPreset(s.to_string())),
        }
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
