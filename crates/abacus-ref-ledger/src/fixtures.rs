//! Fictional tenant, staff, and ledger objects for the reference scenarios.
//!
//! Everything here is hardcoded.  The tenant ID matches the
//! `organization_id` in the bundled policy documents under `policies/`.

use uuid::Uuid;

use abacus_contracts::{
    context::EnvironmentContext,
    resource::{
        AccountType, EntryType, FiscalPeriodAttributes, JournalEntryAttributes, PeriodStatus,
        ResourceContext,
    },
    subject::{BaseRole, FunctionalRole, SubjectContext, TenantId},
};

/// The "Northwind Books" reference tenant.
pub const NORTHWIND: TenantId = TenantId(Uuid::from_u128(0x9a1d6c4e_3b0f_4e43_9d4c_0c3b8f5f2a10));

/// Tenant-authored policies for the accounting team.
pub const LEDGER_TEAM_POLICIES: &str = include_str!("../policies/ledger_team.toml");

/// Office-hours and network controls for treasury.
pub const TREASURY_POLICIES: &str = include_str!("../policies/treasury.toml");

// ── Staff ─────────────────────────────────────────────────────────────────────

pub fn owner() -> SubjectContext {
    SubjectContext::new("margaret.owner", BaseRole::Owner)
}

pub fn accountant() -> SubjectContext {
    SubjectContext::new("andrew.accountant", BaseRole::Member).with_functional_role(FunctionalRole::Accountant)
}

pub fn controller() -> SubjectContext {
    SubjectContext::new("nancy.controller", BaseRole::Admin).with_functional_role(FunctionalRole::Controller)
}

pub fn treasurer() -> SubjectContext {
    SubjectContext::new("janet.treasurer", BaseRole::Member).with_functional_role(FunctionalRole::Treasurer)
}

pub fn auditor() -> SubjectContext {
    SubjectContext::new("steven.auditor", BaseRole::Viewer).with_functional_role(FunctionalRole::Auditor)
}

pub fn viewer() -> SubjectContext {
    SubjectContext::new("laura.viewer", BaseRole::Viewer)
}

/// A platform operator with no role in the tenant beyond membership.
pub fn platform_operator() -> SubjectContext {
    SubjectContext::new("ops.oncall", BaseRole::Member).platform_admin()
}

// ── Ledger objects ────────────────────────────────────────────────────────────

/// A standard revenue entry in a period with the given status.
pub fn sales_entry(status: PeriodStatus, own_entry: bool) -> ResourceContext {
    ResourceContext::JournalEntry(JournalEntryAttributes {
        account_number: Some(4000),
        account_type: Some(AccountType::Revenue),
        period_status: Some(status),
        entry_type: Some(EntryType::Standard),
        is_intercompany: Some(false),
        is_own_entry: Some(own_entry),
        is_adjustment_period: Some(false),
    })
}

/// A standard entry against the operating cash account (1010).
pub fn cash_entry(intercompany: bool) -> ResourceContext {
    ResourceContext::JournalEntry(JournalEntryAttributes {
        account_number: Some(1010),
        account_type: Some(AccountType::Asset),
        period_status: Some(PeriodStatus::Open),
        entry_type: Some(EntryType::Standard),
        is_intercompany: Some(intercompany),
        is_own_entry: Some(true),
        is_adjustment_period: Some(false),
    })
}

pub fn fiscal_period(status: PeriodStatus) -> ResourceContext {
    ResourceContext::FiscalPeriod(FiscalPeriodAttributes {
        period_status: Some(status),
        is_adjustment_period: Some(false),
    })
}

// ── Environments ──────────────────────────────────────────────────────────────

/// Tuesday mid-morning from the office network.
pub fn office_tuesday_morning() -> EnvironmentContext {
    environment("10:30", 2, "10.20.4.7")
}

/// Saturday from the office network.
pub fn office_saturday() -> EnvironmentContext {
    environment("10:30", 6, "10.20.4.7")
}

/// Tuesday mid-morning from the partner VPN range.
pub fn partner_vpn_tuesday() -> EnvironmentContext {
    environment("10:30", 2, "203.0.113.50")
}

fn environment(time: &str, day: u8, ip: &str) -> EnvironmentContext {
    EnvironmentContext {
        current_time: time.to_string(),
        current_day_of_week: day,
        ip_address: Some(ip.to_string()),
    }
}
