//! Ledger reference scenarios.
//!
//! Each scenario wires the real ABACUS components (in-memory policy store,
//! `AbacEngine`, hash-chained decision log) to the fixtures in
//! [`crate::fixtures`] and prints every decision it makes.

use std::sync::Arc;

use tracing::{debug, info};

use abacus_audit::InMemoryDecisionLog;
use abacus_contracts::{
    context::EvaluationContext,
    decision::Decision,
    error::{AbacError, AbacResult},
    policy::Policy,
    subject::TenantId,
};
use abacus_core::{traits::PolicyStore, Authorizer};
use abacus_policy::{AbacEngine, InMemoryPolicyStore, PolicyDocument};

pub mod period_close;
pub mod period_management;
pub mod segregation;
pub mod treasury_hours;

/// A runnable scenario: its command-line name and entry point.
pub type Scenario = (&'static str, fn() -> AbacResult<()>);

/// Every scenario, in presentation order.
pub const ALL: [Scenario; 4] = [
    ("period-close", period_close::run_scenario),
    ("segregation", segregation::run_scenario),
    ("period-management", period_management::run_scenario),
    ("treasury-hours", treasury_hours::run_scenario),
];

/// Run the scenario called `name`.
pub fn run(name: &str) -> AbacResult<()> {
    let scenario = ALL
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|&(_, run)| run)
        .ok_or_else(|| AbacError::ConfigError {
            reason: format!(
                "unknown scenario '{}'; expected one of: {}",
                name,
                ALL.map(|(n, _)| n).join(", ")
            ),
        })?;
    debug!(scenario = name, "running scenario");
    scenario()
}

// ── Arc-wrapped store helper ──────────────────────────────────────────────────

struct SharedStore(Arc<InMemoryPolicyStore>);

impl PolicyStore for SharedStore {
    fn policies_for(&self, tenant: &TenantId) -> AbacResult<Vec<Policy>> {
        self.0.policies_for(tenant)
    }
}

// ── Harness ───────────────────────────────────────────────────────────────────

/// One provisioned tenant with an authorizer and its decision log.
pub struct LedgerHarness {
    pub tenant: TenantId,
    pub store: Arc<InMemoryPolicyStore>,
    pub log: InMemoryDecisionLog,
    pub authorizer: Authorizer,
}

impl LedgerHarness {
    /// Provision `tenant` with the system catalog plus every document in
    /// `documents`.
    pub fn new(tenant: TenantId, log_id: &str, documents: &[&str]) -> AbacResult<Self> {
        let store = Arc::new(InMemoryPolicyStore::new());
        let provisioned = store.provision_tenant(tenant)?;
        let mut loaded = 0;
        for document in documents {
            loaded += store.load_document(PolicyDocument::from_toml_str(document)?)?;
        }
        info!(tenant_id = %tenant, log_id, provisioned, loaded, "ledger harness ready");

        let log = InMemoryDecisionLog::new(log_id);
        let authorizer = Authorizer::new(
            Box::new(AbacEngine::new()),
            Box::new(SharedStore(Arc::clone(&store))),
            Box::new(log.clone()),
        );

        Ok(Self { tenant, store, log, authorizer })
    }

    /// Authorize `ctx`, print one line describing the outcome, and return
    /// the decision.
    pub fn check(&self, label: &str, ctx: &EvaluationContext) -> AbacResult<Decision> {
        let decision = self.authorizer.authorize(&self.tenant, ctx)?;
        debug!(label, action = %ctx.action, allowed = decision.is_allowed(), "scenario check");
        println!("  {:<44} {}", label, describe(&decision));
        Ok(decision)
    }

    /// Print the decision log summary.
    pub fn print_audit(&self) -> AbacResult<()> {
        let exported = self.log.export_log();
        println!(
            "  Audit chain integrity:  {} ({} decision(s), {} denial(s))",
            if self.log.verify_integrity() { "VERIFIED" } else { "FAILED" },
            exported.events.len(),
            exported.denials()
        );
        let terminal = self.log.finalize()?;
        println!("  Terminal hash:          {}", short_hash(&terminal));
        Ok(())
    }
}

/// `ALLOW (Owner Full Access)`, `DENY (Locked Period Protection)`, or
/// `DENY (default)`.
pub fn describe(decision: &Decision) -> String {
    match (decision.is_allowed(), decision.winning_policy()) {
        (true, Some(policy)) => format!("ALLOW ({})", policy.name),
        (false, Some(policy)) => format!("DENY  ({})", policy.name),
        (_, None) => "DENY  (default)".to_string(),
    }
}

fn short_hash(hash: &str) -> &str {
    hash.get(..16).unwrap_or(hash)
}
