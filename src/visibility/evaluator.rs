//! @acp:module "Inclusion Evaluator"
//! @acp:summary "Decides whether an annotated element belongs in the generated API view"
//! @acp:domain visibility
//! @acp:layer logic
//! @acp:stability stable
//!
//! # Decision gates
//!
//! Each element passes through three gates in order. The first gate that
//! reaches a verdict ends evaluation:
//!
//! 1. **Audience**: `Private` and `LimitedPrivate` are always excluded.
//! 2. **Unannotated types**: with strict mode on, a class or interface
//!    without an audience marker is excluded.
//! 3. **Stability**: a missing stability marker excludes; otherwise the
//!    element is included iff its level ranks at or above the threshold.
//!
//! Evaluation is pure. The policy is read-only, so one evaluator can be
//! shared across threads.

use serde::{Deserialize, Serialize};

use super::markers::{Audience, ElementCategory, ElementFacts, StabilityLevel};
use super::policy::VisibilityPolicy;

/// @acp:summary "Gate that produced a verdict"
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DecisionStage {
    /// Excluded: audience is Private or LimitedPrivate
    AudienceVeto,
    /// Excluded: unannotated type-like element under strict mode
    UnannotatedType,
    /// Excluded: audience-eligible but no stability marker
    MissingStability,
    /// Excluded: stability ranks below the threshold
    BelowThreshold,
    /// Included
    Accepted,
}

impl DecisionStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionStage::AudienceVeto => "audience-veto",
            DecisionStage::UnannotatedType => "unannotated-type",
            DecisionStage::MissingStability => "missing-stability",
            DecisionStage::BelowThreshold => "below-threshold",
            DecisionStage::Accepted => "accepted",
        }
    }
}

impl std::fmt::Display for DecisionStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// @acp:summary "Verdict plus the gate that produced it"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub included: bool,
    pub stage: DecisionStage,
}

impl Decision {
    fn exclude(stage: DecisionStage) -> Self {
        Self {
            included: false,
            stage,
        }
    }

    fn accept() -> Self {
        Self {
            included: true,
            stage: DecisionStage::Accepted,
        }
    }

    /// Human-readable explanation of the verdict
    pub fn reason(&self) -> &'static str {
        match self.stage {
            DecisionStage::AudienceVeto => "audience is private or limited-private",
            DecisionStage::UnannotatedType => {
                "type has no audience marker and unannotated types are private"
            }
            DecisionStage::MissingStability => "visible element declares no stability",
            DecisionStage::BelowThreshold => "stability is below the configured threshold",
            DecisionStage::Accepted => "audience and stability satisfy the policy",
        }
    }
}

/// Run the three gates and report which one decided
pub fn decide(
    audience: Option<Audience>,
    stability: Option<StabilityLevel>,
    category: ElementCategory,
    policy: &VisibilityPolicy,
) -> Decision {
    if audience.is_some_and(Audience::is_restricted) {
        return Decision::exclude(DecisionStage::AudienceVeto);
    }

    if audience.is_none() && category.is_type_like() && policy.unannotated_types_are_private() {
        return Decision::exclude(DecisionStage::UnannotatedType);
    }

    // Public, or unannotated and treated as public: stability is required
    match stability {
        None => Decision::exclude(DecisionStage::MissingStability),
        Some(level) if level.satisfies(policy.stability_threshold()) => Decision::accept(),
        Some(_) => Decision::exclude(DecisionStage::BelowThreshold),
    }
}

/// @acp:summary "Boolean inclusion verdict for one element"
pub fn should_include(
    audience: Option<Audience>,
    stability: Option<StabilityLevel>,
    category: ElementCategory,
    policy: &VisibilityPolicy,
) -> bool {
    decide(audience, stability, category, policy).included
}

/// @acp:summary "Evaluator bound to a policy snapshot"
#[derive(Debug, Clone, Copy, Default)]
pub struct InclusionEvaluator {
    policy: VisibilityPolicy,
}

impl InclusionEvaluator {
    pub fn new(policy: VisibilityPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &VisibilityPolicy {
        &self.policy
    }

    pub fn evaluate(&self, facts: &ElementFacts) -> Decision {
        let decision = decide(facts.audience, facts.stability, facts.category, &self.policy);
        tracing::trace!(
            audience = ?facts.audience,
            stability = ?facts.stability,
            category = ?facts.category,
            included = decision.included,
            stage = %decision.stage,
            "Evaluated element"
        );
        decision
    }

    pub fn should_include(&self, facts: &ElementFacts) -> bool {
        self.evaluate(facts).included
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visibility::markers::Audience::*;
    use crate::visibility::markers::StabilityLevel::*;

    fn policy(threshold: StabilityLevel, strict: bool) -> VisibilityPolicy {
        VisibilityPolicy::new()
            .with_stability_threshold(threshold)
            .with_unannotated_types_are_private(strict)
    }

    #[test]
    fn test_audience_veto_beats_everything() {
        for audience in [Private, LimitedPrivate] {
            for stability in [None, Some(Unstable), Some(Evolving), Some(Stable)] {
                for category in [ElementCategory::TypeLike, ElementCategory::Other] {
                    for threshold in StabilityLevel::ALL {
                        for strict in [false, true] {
                            let p = policy(threshold, strict);
                            let decision = decide(Some(audience), stability, category, &p);
                            assert_eq!(decision.stage, DecisionStage::AudienceVeto);
                            assert!(!decision.included);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_evolving_threshold_scenarios() {
        let p = policy(Evolving, false);
        let t = ElementCategory::TypeLike;

        assert!(should_include(Some(Public), Some(Stable), t, &p));
        assert!(should_include(Some(Public), Some(Evolving), t, &p));
        assert!(!should_include(Some(Public), Some(Unstable), t, &p));
        assert!(!should_include(Some(Public), None, t, &p));
        assert!(!should_include(Some(Private), Some(Stable), t, &p));
        assert!(should_include(None, Some(Stable), t, &p));
        assert!(!should_include(Some(LimitedPrivate), Some(Unstable), t, &p));
    }

    #[test]
    fn test_strict_mode_scenarios() {
        let p = policy(Unstable, true);

        let decision = decide(None, None, ElementCategory::TypeLike, &p);
        assert_eq!(decision.stage, DecisionStage::UnannotatedType);
        assert!(!decision.included);

        assert!(should_include(None, Some(Stable), ElementCategory::Other, &p));
    }

    #[test]
    fn test_missing_stability_is_fail_closed() {
        for threshold in StabilityLevel::ALL {
            let p = policy(threshold, false);
            let decision = decide(Some(Public), None, ElementCategory::Other, &p);
            assert_eq!(decision.stage, DecisionStage::MissingStability);
            assert!(!decision.included);
        }
    }

    #[test]
    fn test_below_threshold_stage() {
        let p = policy(Stable, false);
        let decision = decide(Some(Public), Some(Evolving), ElementCategory::Other, &p);
        assert_eq!(decision.stage, DecisionStage::BelowThreshold);
        assert_eq!(decision.reason(), "stability is below the configured threshold");
    }

    #[test]
    fn test_evaluator_matches_free_function() {
        let p = policy(Evolving, true);
        let evaluator = InclusionEvaluator::new(p);
        let facts = ElementFacts::type_like().with_audience(Public).with_stability(Evolving);

        assert!(evaluator.should_include(&facts));
        assert_eq!(
            evaluator.evaluate(&facts),
            decide(facts.audience, facts.stability, facts.category, &p)
        );
        assert_eq!(evaluator.policy(), &p);
    }
}
