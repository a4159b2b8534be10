//! Evaluation outputs: per-policy match results, the final decision, and the
//! record written to the decision audit trail.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    context::{Action, EvaluationContext},
    policy::{Effect, Policy},
    resource::ResourceType,
    subject::{PolicyId, TenantId, UserId},
};

/// Whether one condition dimension (or a whole policy) matched.
///
/// `reason` is advisory text for audit and explain views.  It never affects
/// the decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub matched: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl MatchResult {
    pub fn matched() -> Self {
        Self {
            matched: true,
            reason: None,
        }
    }

    pub fn mismatch(reason: impl Into<String>) -> Self {
        Self {
            matched: false,
            reason: Some(reason.into()),
        }
    }

    pub fn is_match(&self) -> bool {
        self.matched
    }
}

/// The final answer for one authorization check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub decision: Effect,
    /// True when nothing matched and the engine fell back to deny.
    pub default_deny: bool,
    /// True when at least one deny policy matched.
    pub denied_by_policy: bool,
    /// The policies of the winning effect, highest priority first.
    pub matched_policies: Vec<Policy>,
}

impl Decision {
    /// The fail-closed outcome when no policy matched.
    pub fn default_deny() -> Self {
        Self {
            decision: Effect::Deny,
            default_deny: true,
            denied_by_policy: false,
            matched_policies: Vec::new(),
        }
    }

    pub fn is_allowed(&self) -> bool {
        self.decision == Effect::Allow
    }

    /// The highest-precedence policy behind this decision, if any.
    pub fn winning_policy(&self) -> Option<&Policy> {
        self.matched_policies.first()
    }
}

/// One active policy that matched, paired with its match result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PolicyMatch<'a> {
    pub policy: &'a Policy,
    pub result: MatchResult,
}

/// An immutable record of one authorization decision.
///
/// Written by the authorizer to its `DecisionRecorder` for every check,
/// allowed or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionRecord {
    pub tenant_id: TenantId,
    pub user_id: UserId,
    pub action: Action,
    pub resource_type: ResourceType,
    pub decision: Effect,
    pub default_deny: bool,
    pub denied_by_policy: bool,
    /// IDs of `Decision::matched_policies`, in the same order.
    pub matched_policy_ids: Vec<PolicyId>,
    pub timestamp: DateTime<Utc>,
}

impl DecisionRecord {
    pub fn new(
        tenant_id: TenantId,
        ctx: &EvaluationContext,
        decision: &Decision,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            tenant_id,
            user_id: ctx.subject.user_id.clone(),
            action: ctx.action.clone(),
            resource_type: ctx.resource.resource_type(),
            decision: decision.decision,
            default_deny: decision.default_deny,
            denied_by_policy: decision.denied_by_policy,
            matched_policy_ids: decision.matched_policies.iter().map(|p| p.id).collect(),
            timestamp,
        }
    }
}
