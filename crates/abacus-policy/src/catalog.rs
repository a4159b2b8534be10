//! The system policy catalog.
//!
//! Every tenant is provisioned with the same eight baseline policies in the
//! reserved priority band 900–1000.  They are ordinary `Policy` values: the
//! engine gives them no special treatment beyond their priority.
//!
//! IDs are derived from the tenant and the policy name, so generating the
//! catalog twice for one tenant yields identical records.
//!
//! Note on the platform-admin override: it sits at the top of the band, but
//! deny-overrides-allow is independent of priority.  A platform admin is
//! still refused writes into locked or closed periods and self-approval.

use abacus_contracts::{
    pattern::Pattern,
    policy::{AttributeConstraints, Effect, Policy, ResourceCondition, SubjectCondition},
    resource::{PeriodStatus, ResourceType},
    subject::{BaseRole, FunctionalRole, PolicyId, TenantId},
};

/// Lowest priority reserved for system policies.
pub const SYSTEM_PRIORITY_MIN: i32 = 900;
/// Highest priority any policy may carry.
pub const SYSTEM_PRIORITY_MAX: i32 = 1000;
/// Highest priority a tenant-authored policy may carry.
pub const CUSTOM_PRIORITY_MAX: i32 = SYSTEM_PRIORITY_MIN - 1;

pub const PLATFORM_ADMIN_OVERRIDE: &str = "Platform Admin Override";
pub const LOCKED_PERIOD_PROTECTION: &str = "Locked Period Protection";
pub const CLOSED_PERIOD_PROTECTION: &str = "Closed Period Protection";
pub const SEGREGATION_OF_DUTIES: &str = "Segregation of Duties";
pub const OWNER_FULL_ACCESS: &str = "Owner Full Access";
pub const CONTROLLER_PERIOD_MANAGEMENT: &str = "Controller Period Management";
pub const AUDITOR_READ_ACCESS: &str = "Auditor Read Access";
pub const VIEWER_READ_ONLY: &str = "Viewer Read-Only";

/// Actions that change a journal entry.
pub const JOURNAL_WRITE_ACTIONS: [&str; 5] = [
    "journal_entry:create",
    "journal_entry:update",
    "journal_entry:delete",
    "journal_entry:post",
    "journal_entry:reverse",
];

/// Actions that only read.
pub const READ_ACTIONS: [&str; 6] = [
    "journal_entry:read",
    "account:read",
    "fiscal_period:read",
    "report:read",
    "organization:read",
    "member:read",
];

pub const PERIOD_MANAGEMENT_ACTIONS: [&str; 4] = [
    "fiscal_period:lock",
    "fiscal_period:unlock",
    "fiscal_period:close",
    "fiscal_period:reopen",
];

/// Generate the eight system policies for `tenant`, highest priority first.
pub fn system_policies_for(tenant: TenantId) -> Vec<Policy> {
    let any_role = || SubjectCondition::any().with_roles([Pattern::any()]);
    let entries_in = |status: PeriodStatus| {
        ResourceCondition::of(ResourceType::JournalEntry).with_attributes(AttributeConstraints {
            period_status: Some(vec![status]),
            ..AttributeConstraints::default()
        })
    };

    vec![
        system(tenant, PLATFORM_ADMIN_OVERRIDE, Effect::Allow, 1000)
            .with_description("Platform administrators may perform any action")
            .with_subject(SubjectCondition::any().platform_admin())
            .with_any_action(),
        system(tenant, LOCKED_PERIOD_PROTECTION, Effect::Deny, 999)
            .with_description("No journal entry changes in a locked fiscal period")
            .with_subject(any_role())
            .with_resource(entries_in(PeriodStatus::Locked))
            .with_actions(JOURNAL_WRITE_ACTIONS),
        system(tenant, CLOSED_PERIOD_PROTECTION, Effect::Deny, 998)
            .with_description("No journal entry changes in a closed fiscal period")
            .with_subject(any_role())
            .with_resource(entries_in(PeriodStatus::Closed))
            .with_actions(JOURNAL_WRITE_ACTIONS),
        system(tenant, SEGREGATION_OF_DUTIES, Effect::Deny, 990)
            .with_description("Nobody approves a journal entry they authored")
            .with_subject(any_role())
            .with_resource(ResourceCondition::of(ResourceType::JournalEntry).with_attributes(
                AttributeConstraints {
                    is_own_entry: Some(true),
                    ..AttributeConstraints::default()
                },
            ))
            .with_actions(["journal_entry:approve"]),
        system(tenant, OWNER_FULL_ACCESS, Effect::Allow, 950)
            .with_description("Organization owners may perform any action")
            .with_subject(SubjectCondition::any().with_roles([Pattern::Is(BaseRole::Owner)]))
            .with_any_action(),
        system(tenant, CONTROLLER_PERIOD_MANAGEMENT, Effect::Allow, 940)
            .with_description("Controllers lock, unlock, close, and reopen fiscal periods")
            .with_subject(SubjectCondition::any().with_functional_roles([FunctionalRole::Controller]))
            .with_resource(ResourceCondition::of(ResourceType::FiscalPeriod))
            .with_actions(PERIOD_MANAGEMENT_ACTIONS),
        system(tenant, AUDITOR_READ_ACCESS, Effect::Allow, 920)
            .with_description("Auditors may read everything")
            .with_subject(SubjectCondition::any().with_functional_roles([FunctionalRole::Auditor]))
            .with_actions(READ_ACTIONS),
        system(tenant, VIEWER_READ_ONLY, Effect::Allow, 900)
            .with_description("Viewers may read but never change anything")
            .with_subject(SubjectCondition::any().with_roles([Pattern::Is(BaseRole::Viewer)]))
            .with_actions(READ_ACTIONS),
    ]
}

fn system(tenant: TenantId, name: &str, effect: Effect, priority: i32) -> Policy {
    Policy::new(tenant, name, effect)
        .with_id(PolicyId::derived(tenant, name))
        .with_priority(priority)
        .system()
}

/// The catalog entries not yet present in `existing`, matched by name among
/// system policies.  Provisioning inserts exactly these.
pub fn missing_system_policies(tenant: TenantId, existing: &[Policy]) -> Vec<Policy> {
    system_policies_for(tenant)
        .into_iter()
        .filter(|candidate| {
            !existing
                .iter()
                .any(|p| p.is_system_policy && p.name == candidate.name)
        })
        .collect()
}
