//! # abacus-ref-ledger
//!
//! Ledger reference runtime for the ABACUS access-control engine.
//!
//! Demonstrates four accounting-control scenarios against a fictional
//! tenant:
//!
//! 1. **Period Close**: period-protection denies beat every allow,
//!    including the platform-admin override.
//! 2. **Segregation of Duties**: nobody approves their own entry.
//! 3. **Fiscal Period Management**: only controllers and owners manage
//!    periods; viewers only read.
//! 4. **Treasury Office Hours**: a tenant-authored policy gated on time,
//!    weekday, and network.
//!
//! All data is hardcoded and fictional.

pub mod fixtures;
pub mod scenarios;

// ── Tests ─────────────────────────────────────────────────────────────────────
