//! Scenario 1: Period Close
//!
//! Journal entry changes across the period lifecycle:
//!
//! Sub-case A: accountant posts into an open period       → Allow (custom)
//! Sub-case B: accountant posts into a locked period      → Deny (Locked Period Protection)
//! Sub-case C: owner edits an entry in a closed period    → Deny (Closed Period Protection)
//! Sub-case D: platform operator writes to a locked period → Deny
//! Sub-case E: auditor reads a locked entry               → Allow (Auditor Read Access)
//!
//! Sub-case D shows that the platform-admin override at priority 1000 still
//! loses to a period-protection deny at 999: deny beats allow at any
//! priority.

use abacus_contracts::{
    context::EvaluationContext,
    error::{AbacError, AbacResult},
    resource::PeriodStatus,
};

use crate::{
    fixtures::{self, NORTHWIND},
    scenarios::LedgerHarness,
};

/// Run Scenario 1: Period Close.
pub fn run_scenario() -> AbacResult<()> {
    println!("=== Scenario 1: Period Close ===");
    println!();

    let harness = LedgerHarness::new(NORTHWIND, "period-close", &[fixtures::LEDGER_TEAM_POLICIES])?;

    harness.check(
        "A. accountant posts (open period)",
        &EvaluationContext::new(
            fixtures::accountant(),
            fixtures::sales_entry(PeriodStatus::Open, true),
            "journal_entry:post",
        ),
    )?;

    let locked_post = EvaluationContext::new(
        fixtures::accountant(),
        fixtures::sales_entry(PeriodStatus::Locked, true),
        "journal_entry:post",
    );
    harness.check("B. accountant posts (locked period)", &locked_post)?;

    harness.check(
        "C. owner updates (closed period)",
        &EvaluationContext::new(
            fixtures::owner(),
            fixtures::sales_entry(PeriodStatus::Closed, false),
            "journal_entry:update",
        ),
    )?;

    harness.check(
        "D. platform operator creates (locked period)",
        &EvaluationContext::new(
            fixtures::platform_operator(),
            fixtures::sales_entry(PeriodStatus::Locked, false),
            "journal_entry:create",
        ),
    )?;

    harness.check(
        "E. auditor reads (locked period)",
        &EvaluationContext::new(
            fixtures::auditor(),
            fixtures::sales_entry(PeriodStatus::Locked, false),
            "journal_entry:read",
        ),
    )?;

    // `require` turns the same deny into an error a service would return.
    println!();
    match harness.authorizer.require(&harness.tenant, &locked_post) {
        Err(AbacError::AccessDenied { reason }) => println!("  require(B):             {}", reason),
        Err(e) => return Err(e),
        Ok(()) => println!("  require(B):             unexpectedly allowed"),
    }

    println!();
    harness.print_audit()?;
    println!();
    println!("  Scenario 1 complete.");
    println!();

    Ok(())
}
