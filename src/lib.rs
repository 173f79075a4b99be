#![forbid(unsafe_code)]

//! @acp:module "Audience Annotations Library"
//! @acp:summary "Audience and stability filtering for generated API views"
//! @acp:domain visibility
//! @acp:layer api
//! @acp:stability evolving
//!
//! # Audience Annotations
//!
//! Decides which declared elements belong in an audience-filtered view of an
//! API (documentation, API listings, compatibility reports).
//!
//! ## Features
//!
//! - **Audience veto**: `Private` and `LimitedPrivate` elements never appear
//! - **Stability threshold**: only surface `stable`, `evolving+` or everything
//! - **Strict mode**: hide classes and interfaces nobody annotated
//! - **Manifests**: filter whole element trees from JSON or YAML
//!
//! ## Example
//!
//! ```rust
//! use audience::{should_include, Audience, ElementCategory, StabilityLevel, VisibilityPolicy};
//!
//! let mut policy = VisibilityPolicy::new();
//! policy.set_stability_threshold(StabilityLevel::Evolving);
//!
//! assert!(should_include(
//!     Some(Audience::Public),
//!     Some(StabilityLevel::Stable),
//!     ElementCategory::TypeLike,
//!     &policy,
//! ));
//! assert!(!should_include(
//!     Some(Audience::Public),
//!     Some(StabilityLevel::Unstable),
//!     ElementCategory::TypeLike,
//!     &policy,
//! ));
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod options;
pub mod surface;
pub mod visibility;

// Re-exports
pub use config::{Config, OutputFormat};
pub use error::{AudienceError, Result};
pub use options::StabilityOption;
pub use surface::{filter_surface, ElementNode, Manifest, Surface, SurfaceStats};
pub use visibility::{
    should_include, AcceptAll, Annotated, Audience, Decision, DecisionStage, ElementCategory,
    ElementFacts, ElementKind, FilteredEnvironment, InclusionEvaluator, InclusionSource, Preset,
    StabilityLevel, VisibilityPolicy,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
