//! @acp:module "Configuration"
//! @acp:summary "Project configuration loading and defaults"
//! @acp:domain cli
//! @acp:layer config

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::visibility::{Preset, StabilityLevel, VisibilityPolicy};

/// Default config file name, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = ".audience.config.json";

fn default_config_schema() -> String {
    "https://audience-annotations.dev/schemas/v1/config.schema.json".to_string()
}

fn default_version() -> String {
    "1.0.0".to_string()
}

/// @acp:summary "Main configuration structure"
/// @acp:lock normal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// JSON Schema URL for validation
    #[serde(rename = "$schema", default = "default_config_schema")]
    pub schema: String,

    /// Config format version
    #[serde(default = "default_version")]
    pub version: String,

    /// Named filter variant to start from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<Preset>,

    /// Minimum stability threshold (unset = preset/default)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stability: Option<StabilityLevel>,

    /// Strict mode for unannotated classes and interfaces (unset = preset/default)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub treat_unannotated_types_as_private: Option<bool>,

    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema: default_config_schema(),
            version: default_version(),
            preset: None,
            stability: None,
            treat_unannotated_types_as_private: None,
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    /// @acp:summary "Load config from a JSON file"
    pub fn load<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content).map_err(|e| {
            crate::AudienceError::Config(format!("{}: {}", path.display(), e))
        })?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// @acp:summary "Save config to a file"
    pub fn save<P: AsRef<Path>>(&self, path: P) -> crate::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// @acp:summary "Load config if the file exists, defaults otherwise"
    ///
    /// A file that exists but cannot be read or parsed is an error.
    pub fn load_if_present<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Policy described by this config: preset first, explicit fields on top
    pub fn policy(&self) -> VisibilityPolicy {
        let mut policy = self
            .preset
            .map(VisibilityPolicy::from_preset)
            .unwrap_or_default();

        if let Some(level) = self.stability {
            policy.set_stability_threshold(level);
        }
        if let Some(flag) = self.treat_unannotated_types_as_private {
            policy.set_unannotated_types_are_private(flag);
        }
        policy
    }
}

/// @acp:summary "Output format for filtered surfaces"
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Tree,
    Json,
    Yaml,
}

impl std::str::FromStr for OutputFormat {
    type Err = crate::AudienceError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tree" => Ok(OutputFormat::Tree),
            "json" => Ok(OutputFormat::Json),
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            _ => Err(crate::AudienceError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// @acp:summary "Output configuration"
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputConfig {
    /// Default output format for the filter command
    #[serde(default)]
    pub format: OutputFormat,

    /// Include per-element decisions in machine-readable output
    #[serde(default)]
    pub explain: bool,
}
