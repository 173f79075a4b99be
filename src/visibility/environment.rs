//! @acp:module "Filtered Environment"
//! @acp:summary "Wraps an upstream inclusion source with the annotation rules"
//! @acp:domain visibility
//! @acp:layer service
//!
//! A documentation generator usually already has its own notion of which
//! elements are included (access modifiers, package selection, ...). The
//! wrapper narrows that set: an element is included only when the annotation
//! rules accept it and the upstream source includes it.

use super::evaluator::InclusionEvaluator;
use super::markers::ElementFacts;
use super::policy::VisibilityPolicy;

/// Anything that can report the annotation facts of an element
pub trait Annotated {
    fn facts(&self) -> ElementFacts;
}

impl Annotated for ElementFacts {
    fn facts(&self) -> ElementFacts {
        *self
    }
}

/// @acp:summary "Upstream notion of element inclusion"
pub trait InclusionSource<E: ?Sized> {
    fn is_included(&self, element: &E) -> bool;
}

impl<E: ?Sized, F> InclusionSource<E> for F
where
    F: Fn(&E) -> bool,
{
    fn is_included(&self, element: &E) -> bool {
        self(element)
    }
}

/// Upstream source that includes every element
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl<E: ?Sized> InclusionSource<E> for AcceptAll {
    fn is_included(&self, _element: &E) -> bool {
        true
    }
}

/// @acp:summary "Upstream source narrowed by the audience/stability rules"
#[derive(Debug, Clone)]
pub struct FilteredEnvironment<S> {
    upstream: S,
    evaluator: InclusionEvaluator,
}

impl<S> FilteredEnvironment<S> {
    pub fn wrap(upstream: S, policy: VisibilityPolicy) -> Self {
        Self {
            upstream,
            evaluator: InclusionEvaluator::new(policy),
        }
    }

    pub fn evaluator(&self) -> &InclusionEvaluator {
        &self.evaluator
    }

    pub fn upstream(&self) -> &S {
        &self.upstream
    }
}

impl<E, S> InclusionSource<E> for FilteredEnvironment<S>
where
    E: Annotated + ?Sized,
    S: InclusionSource<E>,
{
    fn is_included(&self, element: &E) -> bool {
        // Upstream is only consulted for elements the rules accept
        self.evaluator.should_include(&element.facts()) && self.upstream.is_included(element)
    }
}
