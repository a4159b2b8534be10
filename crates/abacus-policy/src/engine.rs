//! Policy-set evaluation: the precedence algorithm.
//!
//! `evaluate_policies` combines every active policy into one decision:
//!
//! 1. Drop inactive policies.
//! 2. Evaluate the rest with `evaluate_policy`; keep the matches.
//! 3. Split the matches by effect.
//! 4. Any deny → `Deny`, `denied_by_policy`.  Priority plays no part here:
//!    a priority-1 deny beats a priority-1000 allow.
//! 5. Otherwise any allow → `Allow`.
//! 6. Otherwise → `Deny`, `default_deny` (fail closed).
//!
//! In cases 4 and 5 `matched_policies` holds the winning effect's policies,
//! highest priority first, ties in declaration order.

use std::cmp::Reverse;

use tracing::{debug, warn};

use abacus_contracts::{
    context::EvaluationContext,
    decision::{Decision, PolicyMatch},
    policy::{Effect, Policy},
};
use abacus_core::traits::PolicyEngine;

use crate::evaluate::evaluate_policy;

/// Evaluate a whole policy set against `ctx`.
pub fn evaluate_policies(policies: &[Policy], ctx: &EvaluationContext) -> Decision {
    debug!(
        user_id = %ctx.subject.user_id,
        action = %ctx.action,
        resource_type = %ctx.resource.resource_type(),
        candidates = policies.len(),
        "evaluating policies"
    );

    let mut deny_set: Vec<&Policy> = Vec::new();
    let mut allow_set: Vec<&Policy> = Vec::new();

    for policy in policies.iter().filter(|p| p.is_active) {
        if !evaluate_policy(policy, ctx).matched {
            continue;
        }
        match policy.effect {
            Effect::Deny => deny_set.push(policy),
            Effect::Allow => allow_set.push(policy),
        }
    }

    if !deny_set.is_empty() {
        let matched_policies = by_priority(deny_set);
        warn!(
            user_id = %ctx.subject.user_id,
            action = %ctx.action,
            policy = %matched_policies[0].name,
            "denied by policy"
        );
        return Decision {
            decision: Effect::Deny,
            default_deny: false,
            denied_by_policy: true,
            matched_policies,
        };
    }

    if !allow_set.is_empty() {
        let matched_policies = by_priority(allow_set);
        debug!(
            action = %ctx.action,
            policy = %matched_policies[0].name,
            "allowed by policy"
        );
        return Decision {
            decision: Effect::Allow,
            default_deny: false,
            denied_by_policy: false,
            matched_policies,
        };
    }

    warn!(
        user_id = %ctx.subject.user_id,
        action = %ctx.action,
        resource_type = %ctx.resource.resource_type(),
        "no policy matched; denying by default"
    );
    Decision::default_deny()
}

/// Sort by priority descending.  `sort_by_key` is stable, so equal
/// priorities keep declaration order.
fn by_priority(mut set: Vec<&Policy>) -> Vec<Policy> {
    set.sort_by_key(|p| Reverse(p.priority));
    set.into_iter().cloned().collect()
}

/// Return true if any active deny policy matches `ctx`.
pub fn would_deny(policies: &[Policy], ctx: &EvaluationContext) -> bool {
    policies
        .iter()
        .filter(|p| p.is_active && p.effect == Effect::Deny)
        .any(|p| evaluate_policy(p, ctx).matched)
}

/// Return every active matching policy, either effect, in declaration order.
pub fn find_matching_policies<'a>(policies: &'a [Policy], ctx: &EvaluationContext) -> Vec<PolicyMatch<'a>> {
    policies
        .iter()
        .filter(|p| p.is_active)
        .filter_map(|policy| {
            let result = evaluate_policy(policy, ctx);
            if result.matched {
                Some(PolicyMatch { policy, result })
            } else {
                None
            }
        })
        .collect()
}

/// The `PolicyEngine` implementation backed by the functions above.
///
/// Stateless; construct it freely and share it across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct AbacEngine;

impl AbacEngine {
    pub fn new() -> Self {
        Self
    }
}

impl PolicyEngine for AbacEngine {
    fn evaluate(&self, policies: &[Policy], ctx: &EvaluationContext) -> Decision {
        evaluate_policies(policies, ctx)
    }

    fn would_deny(&self, policies: &[Policy], ctx: &EvaluationContext) -> bool {
        would_deny(policies, ctx)
    }

    fn find_matching<'a>(&self, policies: &'a [Policy], ctx: &EvaluationContext) -> Vec<PolicyMatch<'a>> {
        find_matching_policies(policies, ctx)
    }
}

// ── Property tests ───────────────────────────────────────────────────────────
