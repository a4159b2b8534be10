//! Scenario 2: Segregation of Duties
//!
//! Sub-case A: controller approves a colleague's entry → Allow (custom)
//! Sub-case B: controller approves their own entry     → Deny (Segregation of Duties)
//! Sub-case C: owner approves their own entry          → Deny (Segregation of Duties)
//!
//! Sub-case B also prints the explain view: both the custom allow and the
//! system deny match, and the deny wins.

use abacus_contracts::{context::EvaluationContext, error::AbacResult, resource::PeriodStatus};

use crate::{
    fixtures::{self, NORTHWIND},
    scenarios::LedgerHarness,
};

/// Run Scenario 2: Segregation of Duties.
pub fn run_scenario() -> AbacResult<()> {
    println!("=== Scenario 2: Segregation of Duties ===");
    println!();

    let harness = LedgerHarness::new(NORTHWIND, "segregation", &[fixtures::LEDGER_TEAM_POLICIES])?;

    harness.check(
        "A. controller approves colleague's entry",
        &EvaluationContext::new(
            fixtures::controller(),
            fixtures::sales_entry(PeriodStatus::Open, false),
            "journal_entry:approve",
        ),
    )?;

    let self_approval = EvaluationContext::new(
        fixtures::controller(),
        fixtures::sales_entry(PeriodStatus::Open, true),
        "journal_entry:approve",
    );
    harness.check("B. controller approves own entry", &self_approval)?;

    harness.check(
        "C. owner approves own entry",
        &EvaluationContext::new(
            fixtures::owner(),
            fixtures::sales_entry(PeriodStatus::Open, true),
            "journal_entry:approve",
        ),
    )?;

    println!();
    println!("  Explain B (matching policies, declaration order):");
    for (policy, _) in harness.authorizer.explain(&harness.tenant, &self_approval)? {
        println!("    - [{:<5}] {:>4}  {}", policy.effect.to_string(), policy.priority, policy.name);
    }

    println!();
    harness.print_audit()?;
    println!();
    println!("  Scenario 2 complete.");
    println!();

    Ok(())
}
