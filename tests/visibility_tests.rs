//! Visibility decision engine tests
//!
//! Property-style checks of the audience, strict-mode and stability gates.

use audience::visibility::decide;
use audience::{
    should_include, AcceptAll, Audience, DecisionStage, ElementCategory, ElementFacts,
    FilteredEnvironment, InclusionEvaluator, InclusionSource, Preset, StabilityLevel,
    StabilityOption, VisibilityPolicy,
};

const AUDIENCES: [Option<Audience>; 4] = [
    None,
    Some(Audience::Public),
    Some(Audience::LimitedPrivate),
    Some(Audience::Private),
];

const STABILITIES: [Option<StabilityLevel>; 4] = [
    None,
    Some(StabilityLevel::Unstable),
    Some(StabilityLevel::Evolving),
    Some(StabilityLevel::Stable),
];

const CATEGORIES: [ElementCategory; 2] = [ElementCategory::TypeLike, ElementCategory::Other];

fn policy(threshold: StabilityLevel, strict: bool) -> VisibilityPolicy {
    VisibilityPolicy::new()
        .with_stability_threshold(threshold)
        .with_unannotated_types_are_private(strict)
}

fn all_policies() -> Vec<VisibilityPolicy> {
    StabilityLevel::ALL
        .into_iter()
        .flat_map(|threshold| [false, true].map(|strict| policy(threshold, strict)))
        .collect()
}

// =============================================================================
// Gate properties
// =============================================================================

mod gate_tests {
    use super::*;

    #[test]
    fn test_restricted_audience_always_excluded() {
        for audience in [Audience::Private, Audience::LimitedPrivate] {
            for stability in STABILITIES {
                for category in CATEGORIES {
                    for p in all_policies() {
                        assert!(!should_include(Some(audience), stability, category, &p));
                    }
                }
            }
        }
    }

    #[test]
    fn test_public_stable_always_included() {
        for category in CATEGORIES {
            for p in all_policies() {
                assert!(should_include(
                    Some(Audience::Public),
                    Some(StabilityLevel::Stable),
                    category,
                    &p
                ));
            }
        }
    }

    #[test]
    fn test_public_unstable_only_at_unstable_threshold() {
        for p in all_policies() {
            let included = should_include(
                Some(Audience::Public),
                Some(StabilityLevel::Unstable),
                ElementCategory::TypeLike,
                &p,
            );
            assert_eq!(included, p.stability_threshold() == StabilityLevel::Unstable);
        }
    }

    #[test]
    fn test_public_evolving_below_stable_threshold() {
        for p in all_policies() {
            let included = should_include(
                Some(Audience::Public),
                Some(StabilityLevel::Evolving),
                ElementCategory::Other,
                &p,
            );
            assert_eq!(included, p.stability_threshold() != StabilityLevel::Stable);
        }
    }

    #[test]
    fn test_public_without_stability_never_included() {
        for category in CATEGORIES {
            for p in all_policies() {
                assert!(!should_include(Some(Audience::Public), None, category, &p));
            }
        }
    }

    #[test]
    fn test_unannotated_type_under_strict_mode() {
        for stability in STABILITIES {
            for threshold in StabilityLevel::ALL {
                let strict = policy(threshold, true);
                assert!(!should_include(None, stability, ElementCategory::TypeLike, &strict));

                // Without strict mode the element behaves as if it were public
                let lenient = policy(threshold, false);
                let public = Some(Audience::Public);
                assert_eq!(
                    should_include(None, stability, ElementCategory::TypeLike, &lenient),
                    should_include(public, stability, ElementCategory::TypeLike, &lenient)
                );
            }
        }
    }

    #[test]
    fn test_strict_mode_ignores_members() {
        for stability in STABILITIES {
            for threshold in StabilityLevel::ALL {
                let member = ElementCategory::Other;
                let strict = should_include(None, stability, member, &policy(threshold, true));
                let lenient = should_include(None, stability, member, &policy(threshold, false));
                let public = should_include(
                    Some(Audience::Public),
                    stability,
                    ElementCategory::Other,
                    &policy(threshold, false),
                );
                assert_eq!(strict, lenient);
                assert_eq!(strict, public);
            }
        }
    }

    #[test]
    fn test_raising_threshold_never_adds_elements() {
        for audience in AUDIENCES {
            for stability in STABILITIES {
                for category in CATEGORIES {
                    for strict in [false, true] {
                        let verdicts: Vec<bool> = StabilityLevel::ALL
                            .into_iter()
                            .map(|t| {
                                should_include(audience, stability, category, &policy(t, strict))
                            })
                            .collect();
                        for pair in verdicts.windows(2) {
                            assert!(pair[0] || !pair[1], "{audience:?} {stability:?} {category:?}");
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_decide_agrees_with_should_include() {
        for audience in AUDIENCES {
            for stability in STABILITIES {
                for category in CATEGORIES {
                    for p in all_policies() {
                        let decision = decide(audience, stability, category, &p);
                        let included = should_include(audience, stability, category, &p);
                        assert_eq!(decision.included, included);
                        assert_eq!(decision.included, decision.stage == DecisionStage::Accepted);
                    }
                }
            }
        }
    }
}

// =============================================================================
// Concrete scenarios
// =============================================================================

mod scenario_tests {
    use super::*;

    #[test]
    fn test_evolving_threshold_lenient() {
        let p = policy(StabilityLevel::Evolving, false);
        let cases = [
            (Some(Audience::Public), Some(StabilityLevel::Stable), true),
            (Some(Audience::Public), Some(StabilityLevel::Evolving), true),
            (Some(Audience::Public), Some(StabilityLevel::Unstable), false),
            (Some(Audience::Public), None, false),
            (Some(Audience::Private), Some(StabilityLevel::Stable), false),
            (None, Some(StabilityLevel::Stable), true),
            (Some(Audience::LimitedPrivate), Some(StabilityLevel::Unstable), false),
        ];

        for (audience, stability, expected) in cases {
            assert_eq!(
                should_include(audience, stability, ElementCategory::TypeLike, &p),
                expected,
                "{audience:?} {stability:?}"
            );
        }
    }

    #[test]
    fn test_unstable_threshold_strict() {
        let p = policy(StabilityLevel::Unstable, true);
        assert!(!should_include(None, None, ElementCategory::TypeLike, &p));
        assert!(should_include(None, Some(StabilityLevel::Stable), ElementCategory::Other, &p));
    }

    #[test]
    fn test_include_public_preset() {
        let evaluator =
            InclusionEvaluator::new(VisibilityPolicy::from_preset(Preset::IncludePublic));

        let unannotated = ElementFacts::type_like().with_stability(StabilityLevel::Stable);
        assert!(!evaluator.should_include(&unannotated));
        assert!(evaluator.should_include(
            &ElementFacts::type_like()
                .with_audience(Audience::Public)
                .with_stability(StabilityLevel::Unstable)
        ));
    }

    #[test]
    fn test_stability_option_configures_policy() {
        let mut p = VisibilityPolicy::new();
        StabilityOption::from_name("-stable").unwrap().apply(&mut p);

        let evolving = ElementFacts::member()
            .with_audience(Audience::Public)
            .with_stability(StabilityLevel::Evolving);
        assert!(!InclusionEvaluator::new(p).should_include(&evolving));
    }
}

// =============================================================================
// Shared policy across threads
// =============================================================================

mod concurrency_tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_evaluator_shared_across_threads() {
        let env = Arc::new(FilteredEnvironment::wrap(
            AcceptAll,
            policy(StabilityLevel::Evolving, true),
        ));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let env = Arc::clone(&env);
                thread::spawn(move || {
                    let mut included = 0;
                    for audience in AUDIENCES {
                        for stability in STABILITIES {
                            for category in CATEGORIES {
                                let facts = ElementFacts::new(audience, stability, category);
                                if env.is_included(&facts) {
                                    included += 1;
                                }
                            }
                        }
                    }
                    included
                })
            })
            .collect();

        let counts: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        // Public or unannotated members at evolving/stable (4), public types at evolving/stable (2)
        assert!(counts.iter().all(|&c| c == 6), "{counts:?}");
    }
}
