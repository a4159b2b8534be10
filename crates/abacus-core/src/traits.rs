//! Core trait definitions for the ABACUS authorization boundary.
//!
//! These three traits define who does what around an access check:
//!
//! - `PolicyEngine`: pure evaluation of a policy set against a context
//! - `PolicyStore`: supplies the candidate policies for one tenant
//! - `DecisionRecorder`: appends every decision to an audit trail
//!
//! The `Authorizer` wires them together.  The engine never sees the store or
//! the recorder: it receives the full candidate set and returns a value.

use abacus_contracts::{
    context::EvaluationContext,
    decision::{Decision, DecisionRecord, PolicyMatch},
    error::AbacResult,
    policy::Policy,
    subject::TenantId,
};

/// The policy engine: deterministic, side-effect free, and infallible.
///
/// Evaluation should be fast (microseconds per policy) and must never mutate
/// the policies it is given.
pub trait PolicyEngine: Send + Sync {
    /// Combine every active policy into one allow/deny decision.
    fn evaluate(&self, policies: &[Policy], ctx: &EvaluationContext) -> Decision;

    /// Return true if any active deny policy matches `ctx`.
    ///
    /// Cheaper than `evaluate` for callers that only need a pre-check.
    fn would_deny(&self, policies: &[Policy], ctx: &EvaluationContext) -> bool;

    /// Return every active policy that matches, of either effect, in
    /// declaration order.  For explain views, not for access decisions.
    fn find_matching<'a>(&self, policies: &'a [Policy], ctx: &EvaluationContext) -> Vec<PolicyMatch<'a>>;
}

/// The policy store: owner of every tenant's policy set.
///
/// Implementations decide how policies are persisted and queried.  They must
/// return the complete set for the tenant, system policies included.
pub trait PolicyStore: Send + Sync {
    fn policies_for(&self, tenant: &TenantId) -> AbacResult<Vec<Policy>>;
}

/// The decision recorder: the append-only trail of authorization decisions.
///
/// A failed write is fatal to the check: the authorizer returns
/// `AbacError::AuditWriteFailed` instead of a decision.
pub trait DecisionRecorder: Send + Sync {
    fn record(&self, record: &DecisionRecord) -> AbacResult<()>;
}
