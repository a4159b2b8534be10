//! The ABACUS authorizer: one recorded access check per call.
//!
//! The authorizer enforces the order of an access check:
//!
//!   Store → Engine → Record → Verdict
//!
//! Every decision reaches the recorder before it reaches the caller.  If the
//! record cannot be written the caller gets an error, never a decision, so
//! there is no unaudited allow.

use chrono::Utc;
use tracing::{debug, warn};

use abacus_contracts::{
    context::EvaluationContext,
    decision::{Decision, DecisionRecord, MatchResult},
    error::{AbacError, AbacResult},
    policy::Policy,
    subject::TenantId,
};

use crate::traits::{DecisionRecorder, PolicyEngine, PolicyStore};

/// Wires a policy store, an engine, and a decision recorder together.
///
/// One authorizer serves any number of tenants and threads; it holds no
/// per-request state.
pub struct Authorizer {
    engine: Box<dyn PolicyEngine>,
    store: Box<dyn PolicyStore>,
    recorder: Box<dyn DecisionRecorder>,
}

impl Authorizer {
    pub fn new(
        engine: Box<dyn PolicyEngine>,
        store: Box<dyn PolicyStore>,
        recorder: Box<dyn DecisionRecorder>,
    ) -> Self {
        Self { engine, store, recorder }
    }

    /// Evaluate `ctx` against the tenant's policies and record the decision.
    ///
    /// # Pipeline
    ///
    /// 1. Fetch the tenant's full policy set from the store
    /// 2. Evaluate it with the engine
    /// 3. Write one `DecisionRecord`
    /// 4. Return the decision
    ///
    /// # Errors
    ///
    /// Returns `Err` only for store and recorder failures.  A deny is a valid
    /// `Decision`, not an error; use [`Authorizer::require`] for that.
    pub fn authorize(&self, tenant: &TenantId, ctx: &EvaluationContext) -> AbacResult<Decision> {
        debug!(
            tenant_id = %tenant,
            user_id = %ctx.subject.user_id,
            action = %ctx.action,
            resource_type = %ctx.resource.resource_type(),
            "authorizing request"
        );

        let policies = self.store.policies_for(tenant)?;
        let decision = self.engine.evaluate(&policies, ctx);

        if decision.is_allowed() {
            debug!(
                tenant_id = %tenant,
                action = %ctx.action,
                policy = decision.winning_policy().map(|p| p.name.as_str()).unwrap_or(""),
                "request allowed"
            );
        } else {
            warn!(
                tenant_id = %tenant,
                user_id = %ctx.subject.user_id,
                action = %ctx.action,
                default_deny = decision.default_deny,
                "request denied"
            );
        }

        let record = DecisionRecord::new(*tenant, ctx, &decision, Utc::now());
        self.recorder.record(&record)?;

        Ok(decision)
    }

    /// Like `authorize`, but turn a deny into `AbacError::AccessDenied`.
    ///
    /// The error reason names the deny policy that won, or says the request
    /// was denied by default.
    pub fn require(&self, tenant: &TenantId, ctx: &EvaluationContext) -> AbacResult<()> {
        let decision = self.authorize(tenant, ctx)?;
        if decision.is_allowed() {
            return Ok(());
        }

        let reason = match decision.winning_policy() {
            Some(policy) => format!(
                "policy '{}' denies '{}' on {}",
                policy.name,
                ctx.action,
                ctx.resource.resource_type()
            ),
            None => format!(
                "default deny: no policy allows '{}' on {}",
                ctx.action,
                ctx.resource.resource_type()
            ),
        };
        Err(AbacError::AccessDenied { reason })
    }

    /// Unrecorded pre-check: would any active deny policy match?
    pub fn would_deny(&self, tenant: &TenantId, ctx: &EvaluationContext) -> AbacResult<bool> {
        let policies = self.store.policies_for(tenant)?;
        Ok(self.engine.would_deny(&policies, ctx))
    }

    /// Every active policy matching `ctx`, for explain and audit views.
    /// Nothing is recorded.
    pub fn explain(
        &self,
        tenant: &TenantId,
        ctx: &EvaluationContext,
    ) -> AbacResult<Vec<(Policy, MatchResult)>> {
        let policies = self.store.policies_for(tenant)?;
        Ok(self
            .engine
            .find_matching(&policies, ctx)
            .into_iter()
            .map(|m| (m.policy.clone(), m.result))
            .collect())
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
