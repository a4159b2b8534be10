//! Scenario 4: Treasury Office Hours
//!
//! A tenant-authored policy lets treasurers post cash entries only on
//! weekdays between 08:00 and 18:00 from the office network.  A second
//! custom policy keeps intercompany entries inside the office network.
//!
//! Sub-case A: treasurer, Tuesday 10:30, office network   → Allow (custom)
//! Sub-case B: treasurer, Saturday                        → Deny (default)
//! Sub-case C: treasurer, no environment supplied         → Deny (default, fail closed)
//! Sub-case D: owner, intercompany entry from partner VPN → Deny (custom)
//! Sub-case E: owner, intercompany entry from the office  → Allow (Owner Full Access)

use abacus_contracts::{context::EvaluationContext, error::AbacResult};

use crate::{
    fixtures::{self, NORTHWIND},
    scenarios::LedgerHarness,
};

/// Run Scenario 4: Treasury Office Hours.
pub fn run_scenario() -> AbacResult<()> {
    println!("=== Scenario 4: Treasury Office Hours ===");
    println!();

    let harness = LedgerHarness::new(NORTHWIND, "treasury-hours", &[fixtures::TREASURY_POLICIES])?;

    let post_cash = || EvaluationContext::new(fixtures::treasurer(), fixtures::cash_entry(false), "journal_entry:post");

    harness.check(
        "A. treasurer posts, Tue 10:30, office",
        &post_cash().with_environment(fixtures::office_tuesday_morning()),
    )?;
    harness.check(
        "B. treasurer posts, Saturday",
        &post_cash().with_environment(fixtures::office_saturday()),
    )?;
    harness.check("C. treasurer posts, no environment", &post_cash())?;

    let intercompany = || EvaluationContext::new(fixtures::owner(), fixtures::cash_entry(true), "journal_entry:update");

    let from_vpn = intercompany().with_environment(fixtures::partner_vpn_tuesday());
    println!(
        "  pre-check D would deny:                      {}",
        harness.authorizer.would_deny(&harness.tenant, &from_vpn)?
    );
    harness.check("D. owner edits intercompany, partner VPN", &from_vpn)?;
    harness.check(
        "E. owner edits intercompany, office",
        &intercompany().with_environment(fixtures::office_tuesday_morning()),
    )?;

    println!();
    harness.print_audit()?;
    println!();
    println!("  Scenario 4 complete.");
    println!();

    Ok(())
}
