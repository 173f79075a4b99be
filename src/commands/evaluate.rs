//! @acp:module "Evaluate Command"
//! @acp:summary "Report the inclusion verdict for a single element"
//! @acp:domain cli
//! @acp:layer handler

use anyhow::Result;
use console::style;
use serde::Serialize;

use crate::visibility::{
    Audience, Decision, ElementFacts, ElementKind, InclusionEvaluator, StabilityLevel,
    VisibilityPolicy,
};

/// Options for the evaluate command
#[derive(Debug, Clone)]
pub struct EvaluateOptions {
    /// Audience marker, if any
    pub audience: Option<Audience>,
    /// Stability marker, if any
    pub stability: Option<StabilityLevel>,
    /// Declaration kind
    pub kind: ElementKind,
    /// Output as JSON
    pub json: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EvaluateReport<'a> {
    facts: ElementFacts,
    policy: &'a VisibilityPolicy,
    decision: Decision,
    reason: &'static str,
}

/// Execute the evaluate command
pub fn execute_evaluate(options: EvaluateOptions, policy: VisibilityPolicy) -> Result<Decision> {
    let facts = ElementFacts::new(options.audience, options.stability, options.kind.category());
    let decision = InclusionEvaluator::new(policy).evaluate(&facts);

    if options.json {
        let report = EvaluateReport {
            facts,
            policy: &policy,
            decision,
            reason: decision.reason(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(decision);
    }

    let marker = |value: Option<String>| value.unwrap_or_else(|| "(none)".to_string());
    println!("  Kind: {} ({:?})", options.kind, facts.category);
    println!("  Audience: {}", marker(options.audience.map(|a| a.to_string())));
    println!("  Stability: {}", marker(options.stability.map(|s| s.to_string())));
    println!("  Policy: {}", policy);

    if decision.included {
        println!("{} Included: {}", style("✓").green(), decision.reason());
    } else {
        println!(
            "{} Excluded [{}]: {}",
            style("✗").red(),
            decision.stage,
            decision.reason()
        );
    }

    Ok(decision)
}
