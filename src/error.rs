//! @acp:module "Errors"
//! @acp:summary "Error types for configuration, manifests and marker parsing"
//! @acp:domain cli
//! @acp:layer model
//!
//! The inclusion evaluator itself is total and never fails; these errors
//! only come from the layers around it (reading config, loading manifests,
//! parsing switch values).

use thiserror::Error;

/// @acp:summary "Library error type"
#[derive(Debug, Error)]
pub enum AudienceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Unknown stability level '{0}' (expected stable, evolving or unstable)")]
    UnknownStability(String),

    #[error("Unknown audience '{0}' (expected public, limited-private or private)")]
    UnknownAudience(String),

    #[error("Unknown element kind '{0}'")]
    UnknownKind(String),

    #[error("Unknown preset '{0}' (expected exclude-private or include-public)")]
    UnknownPreset(String),

    #[error("Unsupported manifest format: {0}")]
    UnsupportedFormat(String),
}

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, AudienceError>;
