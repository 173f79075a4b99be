//! @acp:module "Visibility"
//! @acp:summary "Audience/stability decision engine for generated API views"
//! @acp:domain visibility
//! @acp:layer model
//! @acp:stability stable
//!
//! Given the audience and stability markers of a declared element, its
//! category and a [`VisibilityPolicy`], decide whether the element is
//! part of the generated view. The caller is responsible for finding the
//! markers and for pruning children of excluded elements.

pub mod environment;
pub mod evaluator;
pub mod markers;
pub mod policy;

pub use environment::{AcceptAll, Annotated, FilteredEnvironment, InclusionSource};
pub use evaluator::{decide, should_include, Decision, DecisionStage, InclusionEvaluator};
pub use markers::{Audience, ElementCategory, ElementFacts, ElementKind, StabilityLevel};
pub use policy::{Preset, VisibilityPolicy};
