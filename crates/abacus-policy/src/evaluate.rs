//! Single-policy evaluation.
//!
//! A policy matches when all four matchers match.  They run in the fixed
//! order Subject → Resource → Action → Environment and evaluation stops at
//! the first failure, whose reason becomes the policy's mismatch reason.

use tracing::debug;

use abacus_contracts::{context::EvaluationContext, decision::MatchResult, policy::Policy};

use crate::matchers::{action, environment, resource, subject};

/// Evaluate one policy against `ctx`.
///
/// The `is_active` flag is not consulted here; the aggregator filters
/// inactive policies before calling this.
pub fn evaluate_policy(policy: &Policy, ctx: &EvaluationContext) -> MatchResult {
    let checks: [(&str, fn(&Policy, &EvaluationContext) -> MatchResult); 4] = [
        ("subject", |p, c| subject::matches(&p.subject_condition, &c.subject)),
        ("resource", |p, c| resource::matches(&p.resource_condition, &c.resource)),
        ("action", |p, c| action::matches(&p.action_condition, &c.action)),
        ("environment", |p, c| {
            environment::matches(p.environment_condition.as_ref(), c.environment.as_ref())
        }),
    ];

    for (dimension, check) in checks {
        let result = check(policy, ctx);
        if !result.matched {
            debug!(
                policy = %policy.name,
                dimension,
                reason = result.reason.as_deref().unwrap_or(""),
                "policy did not match"
            );
            return result;
        }
    }

    debug!(policy = %policy.name, effect = %policy.effect, "policy matched");
    MatchResult::matched()
}
