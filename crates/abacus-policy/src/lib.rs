//! # abacus-policy
//!
//! The ABACUS attribute-based access-control engine.
//!
//! ## Overview
//!
//! This crate provides the evaluation functions and [`AbacEngine`], which
//! implements the [`PolicyEngine`](abacus_core::traits::PolicyEngine) trait.
//! A decision is reached in three layers:
//!
//! - **matchers**: one pure predicate per condition dimension
//!   (subject, resource, action, environment)
//! - **evaluate**: a policy matches when all four matchers match
//! - **engine**: deny-overrides-allow, then priority order, then default deny
//!
//! Around the engine sit the [`catalog`] of per-tenant system policies, TOML
//! and JSON [`document`] loading, storage-boundary [`validate`]ion, and the
//! reference [`InMemoryPolicyStore`].
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use abacus_policy::{evaluate_policies, system_policies_for};
//!
//! let policies = system_policies_for(tenant);
//! let decision = evaluate_policies(&policies, &ctx);
//! if decision.is_allowed() { /* proceed */ }
//! ```

pub mod catalog;
pub mod document;
pub mod engine;
pub mod evaluate;
pub mod matchers;
pub mod store;
pub mod validate;

pub use catalog::system_policies_for;
pub use document::PolicyDocument;
pub use engine::{evaluate_policies, find_matching_policies, would_deny, AbacEngine};
pub use evaluate::evaluate_policy;
pub use store::InMemoryPolicyStore;
pub use validate::validate_policy;

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use abacus_contracts::{
        context::{Action, EnvironmentContext, EvaluationContext},
        error::AbacError,
        pattern::Pattern,
        policy::{
            AttributeConstraints, EnvironmentCondition, Effect, NumberRange, Policy,
            ResourceCondition, SubjectCondition, TimeWindow,
        },
        resource::{
            AccountAttributes, FiscalPeriodAttributes, JournalEntryAttributes, PeriodStatus,
            ResourceContext, ResourceType,
        },
        subject::{BaseRole, FunctionalRole, PolicyId, SubjectContext, TenantId},
    };
    use abacus_core::traits::PolicyStore;

    use crate::{
        catalog::{self, system_policies_for},
        document::{policies_to_toml, PolicyDocument},
        evaluate_policies, evaluate_policy, find_matching_policies, would_deny,
        InMemoryPolicyStore, validate_policy,
    };

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn ctx(subject: SubjectContext, resource: ResourceContext, action: &str) -> EvaluationContext {
        EvaluationContext::new(subject, resource, action)
    }

    fn owner() -> SubjectContext {
        SubjectContext::new("owner-1", BaseRole::Owner)
    }

    fn member() -> SubjectContext {
        SubjectContext::new("member-1", BaseRole::Member)
    }

    fn entry_in(status: PeriodStatus) -> ResourceContext {
        ResourceContext::JournalEntry(JournalEntryAttributes {
            period_status: Some(status),
            ..JournalEntryAttributes::default()
        })
    }

    fn account(number: u32) -> ResourceContext {
        ResourceContext::Account(AccountAttributes {
            account_number: Some(number),
            ..AccountAttributes::default()
        })
    }

    fn allow_all(tenant: TenantId, name: &str) -> Policy {
        Policy::new(tenant, name, Effect::Allow).with_any_action()
    }

    // ── 1. default deny ───────────────────────────────────────────────────────

    /// With no policies at all, every request is denied by default.
    #[test]
    fn test_default_deny_on_empty_set() {
        let decision = evaluate_policies(&[], &ctx(owner(), ResourceContext::Report, "report:read"));

        assert_eq!(decision.decision, Effect::Deny);
        assert!(decision.default_deny);
        assert!(!decision.denied_by_policy);
        assert!(decision.matched_policies.is_empty());
    }

    /// Policies that exist but do not match also end in default deny.
    #[test]
    fn test_default_deny_when_nothing_matches() {
        let tenant = TenantId::new();
        let owners_only = allow_all(tenant, "owners")
            .with_subject(SubjectCondition::any().with_roles([Pattern::Is(BaseRole::Owner)]));

        let decision = evaluate_policies(&[owners_only], &ctx(member(), ResourceContext::Report, "report:read"));
        assert!(decision.default_deny);
        assert!(!decision.is_allowed());
    }

    // ── 2. wildcard allow ─────────────────────────────────────────────────────

    /// Empty subject constraints, type `*`, actions `*`: matches every context.
    #[test]
    fn test_wildcard_allow_matches_everything() {
        let tenant = TenantId::new();
        let policies = [allow_all(tenant, "allow everything")];

        let contexts = [
            ctx(member(), ResourceContext::Report, "report:read"),
            ctx(owner(), entry_in(PeriodStatus::Closed), "journal_entry:delete"),
            ctx(
                SubjectContext::new("v", BaseRole::Viewer),
                ResourceContext::Invitation,
                "invitation:send",
            )
            .with_environment(EnvironmentContext {
                current_time: "23:59".to_string(),
                current_day_of_week: 6,
                ip_address: None,
            }),
        ];

        for c in &contexts {
            let decision = evaluate_policies(&policies, c);
            assert!(decision.is_allowed(), "wildcard allow must match {:?}", c.action);
            assert_eq!(decision.matched_policies[0].name, "allow everything");
        }
    }

    // ── 3. deny overrides allow ───────────────────────────────────────────────

    /// A low-priority deny beats a high-priority allow.
    #[test]
    fn test_deny_overrides_allow_regardless_of_priority() {
        let tenant = TenantId::new();
        let owner_allow = allow_all(tenant, "Owner allow")
            .with_priority(900)
            .with_subject(SubjectCondition::any().with_roles([Pattern::Is(BaseRole::Owner)]));
        let locked_deny = Policy::new(tenant, "Locked deny", Effect::Deny)
            .with_priority(100)
            .with_any_action()
            .with_resource(ResourceCondition::of(ResourceType::JournalEntry).with_attributes(
                AttributeConstraints {
                    period_status: Some(vec![PeriodStatus::Locked]),
                    ..AttributeConstraints::default()
                },
            ));

        let c = ctx(owner(), entry_in(PeriodStatus::Locked), "journal_entry:create");
        let decision = evaluate_policies(&[owner_allow, locked_deny], &c);

        assert_eq!(decision.decision, Effect::Deny);
        assert!(decision.denied_by_policy);
        assert!(!decision.default_deny);
        assert_eq!(decision.matched_policies.len(), 1);
        assert_eq!(decision.matched_policies[0].name, "Locked deny");
    }

    // ── 4. priority ordering ──────────────────────────────────────────────────

    /// Within one effect, the highest priority comes first.
    #[test]
    fn test_priority_ordering_within_effect() {
        let tenant = TenantId::new();
        let low = allow_all(tenant, "low").with_priority(100);
        let high = allow_all(tenant, "high").with_priority(900);

        let decision = evaluate_policies(&[low, high], &ctx(member(), ResourceContext::Report, "report:read"));

        assert!(decision.is_allowed());
        let names: Vec<_> = decision.matched_policies.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["high", "low"]);
    }

    /// Equal priorities keep declaration order.
    #[test]
    fn test_priority_ties_keep_declaration_order() {
        let tenant = TenantId::new();
        let policies = [
            allow_all(tenant, "first").with_priority(500),
            allow_all(tenant, "top").with_priority(800),
            allow_all(tenant, "second").with_priority(500),
        ];

        let decision = evaluate_policies(&policies, &ctx(member(), ResourceContext::Report, "report:read"));
        let names: Vec<_> = decision.matched_policies.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["top", "first", "second"]);
    }

    // ── 5. inactive policies ──────────────────────────────────────────────────

    #[test]
    fn test_inactive_policies_are_invisible() {
        let tenant = TenantId::new();
        let c = ctx(owner(), ResourceContext::Report, "report:read");

        let decision = evaluate_policies(&[allow_all(tenant, "disabled").inactive()], &c);
        assert!(decision.default_deny);

        let inactive_deny = Policy::new(tenant, "disabled deny", Effect::Deny)
            .with_any_action()
            .inactive();
        assert!(!would_deny(&[inactive_deny.clone()], &c));
        assert!(find_matching_policies(&[inactive_deny], &c).is_empty());
    }

    // ── 6. environment fail-closed ────────────────────────────────────────────

    #[test]
    fn test_environment_condition_without_context_fails_closed() {
        let tenant = TenantId::new();
        let weekdays = allow_all(tenant, "weekdays").with_environment(EnvironmentCondition {
            days_of_week: Some(vec![1, 2, 3, 4, 5]),
            ..EnvironmentCondition::default()
        });

        let result = evaluate_policy(&weekdays, &ctx(member(), ResourceContext::Report, "report:read"));
        assert!(!result.matched);
        let reason = result.reason.unwrap_or_default();
        assert!(reason.contains("environment"), "reason should mention environment: {reason}");
    }

    /// An environment-scoped policy matches once the context supplies one.
    #[test]
    fn test_environment_condition_with_context() {
        let tenant = TenantId::new();
        let office = allow_all(tenant, "office hours").with_environment(EnvironmentCondition {
            time_of_day: Some(TimeWindow::new("08:00", "18:00")),
            days_of_week: Some(vec![1, 2, 3, 4, 5]),
            ip_allow_list: Some(vec!["192.168.10.0/24".to_string()]),
            ip_deny_list: None,
        });

        let at_desk = ctx(member(), ResourceContext::Report, "report:read").with_environment(EnvironmentContext {
            current_time: "10:30".to_string(),
            current_day_of_week: 2,
            ip_address: Some("192.168.10.44".to_string()),
        });
        assert!(evaluate_policies(&[office.clone()], &at_desk).is_allowed());

        let from_home = ctx(member(), ResourceContext::Report, "report:read").with_environment(EnvironmentContext {
            current_time: "10:30".to_string(),
            current_day_of_week: 2,
            ip_address: Some("81.2.69.160".to_string()),
        });
        assert!(evaluate_policies(&[office], &from_home).default_deny);
    }

    // ── 7. range attribute ────────────────────────────────────────────────────

    #[test]
    fn test_account_number_range() {
        let tenant = TenantId::new();
        let cash_accounts = allow_all(tenant, "cash accounts").with_resource(
            ResourceCondition::of(ResourceType::Account).with_attributes(AttributeConstraints {
                account_number: Some(NumberRange::new(1000, 1999)),
                ..AttributeConstraints::default()
            }),
        );

        let inside = evaluate_policy(&cash_accounts, &ctx(member(), account(1500), "account:read"));
        assert!(inside.matched);

        let outside = evaluate_policy(&cash_accounts, &ctx(member(), account(2500), "account:read"));
        assert!(!outside.matched);
        let reason = outside.reason.unwrap_or_default();
        assert!(reason.contains("Account number"), "unexpected reason: {reason}");
    }

    // ── 8. evaluation order ───────────────────────────────────────────────────

    /// The first failing dimension supplies the reason: subject before action.
    #[test]
    fn test_mismatch_reason_follows_matcher_order() {
        let tenant = TenantId::new();
        let policy = Policy::new(tenant, "owners create", Effect::Allow)
            .with_subject(SubjectCondition::any().with_roles([Pattern::Is(BaseRole::Owner)]))
            .with_actions(["journal_entry:create"]);

        let result = evaluate_policy(&policy, &ctx(member(), ResourceContext::Report, "report:read"));
        assert_eq!(result.reason.as_deref(), Some("role mismatch"));

        let result = evaluate_policy(&policy, &ctx(owner(), ResourceContext::Report, "report:read"));
        assert_eq!(result.reason.as_deref(), Some("action not permitted"));
    }

    /// A policy with an empty action set matches nothing.
    #[test]
    fn test_empty_action_set_matches_nothing() {
        let tenant = TenantId::new();
        let policy = Policy::new(tenant, "no actions", Effect::Deny);
        assert!(!evaluate_policy(&policy, &ctx(owner(), ResourceContext::Report, "report:read")).matched);
    }

    // ── 9. would_deny / find_matching_policies ────────────────────────────────

    #[test]
    fn test_would_deny_and_find_matching() {
        let tenant = TenantId::new();
        let policies = [
            allow_all(tenant, "allow"),
            Policy::new(tenant, "deny deletes", Effect::Deny).with_actions(["report:delete"]),
            Policy::new(tenant, "deny exports", Effect::Deny).with_actions(["report:export"]),
        ];

        let read = ctx(member(), ResourceContext::Report, "report:read");
        let delete = ctx(member(), ResourceContext::Report, "report:delete");

        assert!(!would_deny(&policies, &read));
        assert!(would_deny(&policies, &delete));

        let matching = find_matching_policies(&policies, &delete);
        let names: Vec<_> = matching.iter().map(|m| m.policy.name.as_str()).collect();
        assert_eq!(names, ["allow", "deny deletes"], "both effects, declaration order");
        assert!(matching.iter().all(|m| m.result.matched));
    }

    /// Inputs are never mutated by evaluation.
    #[test]
    fn test_evaluation_leaves_policies_untouched() {
        let tenant = TenantId::new();
        let policies = system_policies_for(tenant);
        let before = policies.clone();

        let _ = evaluate_policies(&policies, &ctx(owner(), entry_in(PeriodStatus::Locked), "journal_entry:post"));
        assert_eq!(policies, before);
    }

    // ── 10. system catalog ────────────────────────────────────────────────────

    #[test]
    fn test_catalog_shape() {
        let tenant = TenantId::new();
        let policies = system_policies_for(tenant);

        assert_eq!(policies.len(), 8);
        assert_eq!(policies[0].name, catalog::PLATFORM_ADMIN_OVERRIDE);
        assert_eq!(policies[0].priority, 1000);

        for policy in &policies {
            assert!(policy.is_system_policy);
            assert!(policy.is_active);
            assert_eq!(policy.organization_id, tenant);
            assert!((900..=1000).contains(&policy.priority), "{} out of band", policy.name);
            validate_policy(policy).unwrap();
        }

        let max = policies.iter().map(|p| p.priority).max().unwrap();
        assert_eq!(max, policies[0].priority, "platform admin override tops the band");
    }

    #[test]
    fn test_catalog_is_idempotent() {
        let tenant = TenantId::new();
        let first = system_policies_for(tenant);
        let second = system_policies_for(tenant);

        assert_eq!(first.len(), 8);
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.name, b.name);
            assert_eq!(a.effect, b.effect);
            assert_eq!(a.priority, b.priority);
            assert_eq!(a.id, b.id);
        }

        // Different tenants get different IDs for the same names.
        let other = system_policies_for(TenantId::new());
        assert_ne!(first[0].id, other[0].id);
        assert_eq!(first[0].name, other[0].name);
    }

    #[test]
    fn test_catalog_owner_and_period_protection() {
        let policies = system_policies_for(TenantId::new());

        let open = evaluate_policies(&policies, &ctx(owner(), entry_in(PeriodStatus::Open), "journal_entry:post"));
        assert!(open.is_allowed());
        assert_eq!(open.matched_policies[0].name, catalog::OWNER_FULL_ACCESS);

        let locked = evaluate_policies(&policies, &ctx(owner(), entry_in(PeriodStatus::Locked), "journal_entry:post"));
        assert!(locked.denied_by_policy);
        assert_eq!(locked.matched_policies[0].name, catalog::LOCKED_PERIOD_PROTECTION);

        let closed = evaluate_policies(&policies, &ctx(owner(), entry_in(PeriodStatus::Closed), "journal_entry:update"));
        assert_eq!(closed.matched_policies[0].name, catalog::CLOSED_PERIOD_PROTECTION);

        // Reading a locked entry is not a write.
        let read = evaluate_policies(&policies, &ctx(owner(), entry_in(PeriodStatus::Locked), "journal_entry:read"));
        assert!(read.is_allowed());
    }

    /// Deny-first applies to platform admins too: the override allow does
    /// not beat a period protection deny.
    #[test]
    fn test_platform_admin_does_not_override_period_protection() {
        let policies = system_policies_for(TenantId::new());
        let admin = SubjectContext::new("ops-1", BaseRole::Member).platform_admin();

        let anything = evaluate_policies(&policies, &ctx(admin.clone(), ResourceContext::Organization, "organization:delete"));
        assert!(anything.is_allowed());
        assert_eq!(anything.matched_policies[0].name, catalog::PLATFORM_ADMIN_OVERRIDE);

        let locked = evaluate_policies(&policies, &ctx(admin, entry_in(PeriodStatus::Locked), "journal_entry:create"));
        assert_eq!(locked.decision, Effect::Deny);
        assert_eq!(locked.matched_policies[0].name, catalog::LOCKED_PERIOD_PROTECTION);
    }

    #[test]
    fn test_catalog_viewer_and_auditor_are_read_only() {
        let policies = system_policies_for(TenantId::new());
        let viewer = SubjectContext::new("viewer-1", BaseRole::Viewer);
        let auditor = member().with_functional_role(FunctionalRole::Auditor);

        for subject in [viewer, auditor] {
            let read = evaluate_policies(&policies, &ctx(subject.clone(), ResourceContext::Report, "report:read"));
            assert!(read.is_allowed());

            let write = evaluate_policies(&policies, &ctx(subject, entry_in(PeriodStatus::Open), "journal_entry:create"));
            assert!(write.default_deny, "read-only subjects fall through to default deny");
        }
    }

    #[test]
    fn test_catalog_controller_manages_periods() {
        let policies = system_policies_for(TenantId::new());
        let period = ResourceContext::FiscalPeriod(FiscalPeriodAttributes {
            period_status: Some(PeriodStatus::Open),
            is_adjustment_period: Some(false),
        });

        let controller = member().with_functional_role(FunctionalRole::Controller);
        let decision = evaluate_policies(&policies, &ctx(controller, period.clone(), "fiscal_period:lock"));
        assert!(decision.is_allowed());
        assert_eq!(decision.matched_policies[0].name, catalog::CONTROLLER_PERIOD_MANAGEMENT);

        assert!(evaluate_policies(&policies, &ctx(member(), period, "fiscal_period:lock")).default_deny);
    }

    #[test]
    fn test_catalog_segregation_of_duties() {
        let policies = system_policies_for(TenantId::new());
        let own = ResourceContext::JournalEntry(JournalEntryAttributes {
            is_own_entry: Some(true),
            period_status: Some(PeriodStatus::Open),
            ..JournalEntryAttributes::default()
        });
        let theirs = ResourceContext::JournalEntry(JournalEntryAttributes {
            is_own_entry: Some(false),
            period_status: Some(PeriodStatus::Open),
            ..JournalEntryAttributes::default()
        });

        let decision = evaluate_policies(&policies, &ctx(owner(), own, "journal_entry:approve"));
        assert_eq!(decision.matched_policies[0].name, catalog::SEGREGATION_OF_DUTIES);

        assert!(evaluate_policies(&policies, &ctx(owner(), theirs, "journal_entry:approve")).is_allowed());
    }

    // ── 11. documents ─────────────────────────────────────────────────────────

    const AP_DOCUMENT: &str = r#"
        organization_id = "9a1d6c4e-3b0f-4e43-9d4c-0c3b8f5f2a10"

        [[policies]]
        name = "AP clerks post payables"
        effect = "allow"
        priority = 200

        [policies.subject_condition]
        functional_roles = ["ap_clerk"]

        [policies.resource_condition]
        type = "journal_entry"
        attributes = { account_number = { range = [2000, 2099] } }

        [policies.action_condition]
        actions = ["journal_entry:create", "journal_entry:post"]

        [[policies]]
        name = "No intercompany after hours"
        effect = "deny"
        priority = 300

        [policies.resource_condition]
        type = "*"
        attributes = { is_intercompany = true }

        [policies.action_condition]
        actions = ["*"]

        [policies.environment_condition]
        time_of_day = { start = "18:00", end = "23:59" }
    "#;

    #[test]
    fn test_document_from_toml() {
        let document = PolicyDocument::from_toml_str(AP_DOCUMENT).unwrap();
        let tenant = document.organization_id;
        let policies = document.into_policies().unwrap();

        assert_eq!(policies.len(), 2);
        assert!(policies.iter().all(|p| p.organization_id == tenant && !p.is_system_policy));
        assert!(policies[1].resource_condition.resource_type.is_any());
        assert!(policies[1].action_condition.actions[0].is_any());

        // IDs are derived, so a re-import yields the same records.
        let again = PolicyDocument::from_toml_str(AP_DOCUMENT).unwrap().into_policies().unwrap();
        assert_eq!(policies, again);

        let clerk = member().with_functional_role(FunctionalRole::ApClerk);
        let payable = ResourceContext::JournalEntry(JournalEntryAttributes {
            account_number: Some(2010),
            ..JournalEntryAttributes::default()
        });
        assert!(evaluate_policies(&policies, &ctx(clerk, payable, "journal_entry:post")).is_allowed());
    }

    #[test]
    fn test_document_parse_error() {
        match PolicyDocument::from_toml_str("this is not valid toml ][[[") {
            Err(AbacError::ConfigError { reason }) => {
                assert!(reason.contains("failed to parse policy TOML"), "got: {reason}");
            }
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }

    /// Documents cannot smuggle in system policies.
    #[test]
    fn test_document_rejects_system_flag() {
        let toml = r#"
            organization_id = "9a1d6c4e-3b0f-4e43-9d4c-0c3b8f5f2a10"

            [[policies]]
            name = "sneaky"
            effect = "allow"
            is_system_policy = true
            action_condition = { actions = ["*"] }
        "#;
        assert!(matches!(
            PolicyDocument::from_toml_str(toml),
            Err(AbacError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_document_rejects_invalid_entries() {
        let toml = r#"
            organization_id = "9a1d6c4e-3b0f-4e43-9d4c-0c3b8f5f2a10"

            [[policies]]
            name = "too important"
            effect = "allow"
            priority = 950
            action_condition = { actions = ["*"] }
        "#;
        let result = PolicyDocument::from_toml_str(toml).unwrap().into_policies();
        match result {
            Err(AbacError::InvalidPolicy { policy, reason }) => {
                assert_eq!(policy, "too important");
                assert!(reason.contains("priority 950"), "got: {reason}");
            }
            other => panic!("expected InvalidPolicy, got {:?}", other),
        }
    }

    #[test]
    fn test_catalog_renders_as_toml() {
        let rendered = policies_to_toml(&system_policies_for(TenantId::new())).unwrap();
        assert!(rendered.contains("Platform Admin Override"));
        assert!(rendered.contains("journal_entry:approve"));
    }

    // ── 12. validation ────────────────────────────────────────────────────────

    fn reason_of(policy: &Policy) -> String {
        match validate_policy(policy) {
            Err(AbacError::InvalidPolicy { reason, .. }) => reason,
            other => panic!("expected InvalidPolicy, got {:?}", other),
        }
    }

    #[test]
    fn test_validation_rules() {
        let tenant = TenantId::new();

        assert!(reason_of(&Policy::new(tenant, "empty", Effect::Allow)).contains("action set is empty"));

        let low_system = allow_all(tenant, "low system").with_priority(500).system();
        assert!(reason_of(&low_system).contains("outside the allowed range"));

        let wraps = allow_all(tenant, "night").with_environment(EnvironmentCondition {
            time_of_day: Some(TimeWindow::new("22:00", "06:00")),
            ..EnvironmentCondition::default()
        });
        assert!(reason_of(&wraps).contains("wraps midnight"));

        let unpadded = allow_all(tenant, "unpadded").with_environment(EnvironmentCondition {
            time_of_day: Some(TimeWindow::new("9:00", "17:00")),
            ..EnvironmentCondition::default()
        });
        assert!(reason_of(&unpadded).contains("HH:MM"));

        let bad_day = allow_all(tenant, "day seven").with_environment(EnvironmentCondition {
            days_of_week: Some(vec![7]),
            ..EnvironmentCondition::default()
        });
        assert!(reason_of(&bad_day).contains("outside 0..=6"));

        let bad_cidr = allow_all(tenant, "bad cidr").with_environment(EnvironmentCondition {
            ip_deny_list: Some(vec!["10.0.0.0/40".to_string()]),
            ..EnvironmentCondition::default()
        });
        assert!(reason_of(&bad_cidr).contains("CIDR"));

        let inverted = allow_all(tenant, "inverted").with_resource(ResourceCondition::any().with_attributes(
            AttributeConstraints {
                account_number: Some(NumberRange::new(2000, 1000)),
                ..AttributeConstraints::default()
            },
        ));
        assert!(reason_of(&inverted).contains("range"));

        assert!(validate_policy(&allow_all(tenant, "fine").with_priority(899)).is_ok());
    }

    #[test]
    fn test_star_action_is_the_wildcard() {
        let tenant = TenantId::new();
        let policy = Policy::new(tenant, "owners do anything", Effect::Allow)
            .with_priority(100)
            .with_subject(SubjectCondition::any().with_roles([Pattern::Is(BaseRole::Owner)]))
            .with_actions(["*"]);

        assert!(policy.action_condition.actions[0].is_any());
        assert!(validate_policy(&policy).is_ok());
        let c = ctx(owner(), ResourceContext::Report, "report:read");
        assert!(evaluate_policy(&policy, &c).matched);

        // Built by hand, a literal "*" never matches anything, so it is refused.
        let mut literal = allow_all(tenant, "literal star");
        literal.action_condition.actions = vec![Pattern::Is(Action::from("*"))];
        assert!(reason_of(&literal).contains("literal"));
    }

    // ── 13. in-memory store ───────────────────────────────────────────────────

    #[test]
    fn test_store_provisioning_is_idempotent() {
        let store = InMemoryPolicyStore::new();
        let tenant = TenantId::new();

        assert_eq!(store.provision_tenant(tenant).unwrap(), 8);
        assert_eq!(store.provision_tenant(tenant).unwrap(), 0);

        let policies = store.policies_for(&tenant).unwrap();
        assert_eq!(policies.len(), 8);
        assert!(store.policies_for(&TenantId::new()).unwrap().is_empty());
    }

    #[test]
    fn test_store_protects_system_policies() {
        let store = InMemoryPolicyStore::new();
        let tenant = TenantId::new();
        store.provision_tenant(tenant).unwrap();
        let admin_override = store.policies_for(&tenant).unwrap()[0].clone();

        assert!(store.insert(admin_override.clone()).is_err());
        assert!(store.set_active(tenant, admin_override.id, false).is_err());
        assert!(store.remove(tenant, admin_override.id).is_err());

        // Reusing a system policy ID for a custom policy is refused as well.
        let mut impostor = admin_override.clone();
        impostor.is_system_policy = false;
        impostor.priority = 10;
        assert!(matches!(store.insert(impostor), Err(AbacError::StoreError { .. })));
    }

    #[test]
    fn test_store_custom_policy_lifecycle() {
        let store = InMemoryPolicyStore::new();
        let tenant = TenantId::new();
        store.provision_tenant(tenant).unwrap();

        let reports = Policy::new(tenant, "members read reports", Effect::Allow)
            .with_priority(100)
            .with_subject(SubjectCondition::any().with_roles([Pattern::Is(BaseRole::Member)]))
            .with_resource(ResourceCondition::of(ResourceType::Report))
            .with_actions(["report:read"]);
        let id = reports.id;
        store.insert(reports).unwrap();

        let c = ctx(member(), ResourceContext::Report, "report:read");
        assert!(evaluate_policies(&store.policies_for(&tenant).unwrap(), &c).is_allowed());

        store.set_active(tenant, id, false).unwrap();
        assert!(evaluate_policies(&store.policies_for(&tenant).unwrap(), &c).default_deny);

        let removed = store.remove(tenant, id).unwrap();
        assert_eq!(removed.name, "members read reports");
        assert_eq!(store.policies_for(&tenant).unwrap().len(), 8);
    }

    #[test]
    fn test_store_loads_documents() {
        let store = InMemoryPolicyStore::new();
        let document = PolicyDocument::from_toml_str(AP_DOCUMENT).unwrap();
        let tenant = document.organization_id;

        store.provision_tenant(tenant).unwrap();
        assert_eq!(store.load_document(document).unwrap(), 2);
        assert_eq!(store.policies_for(&tenant).unwrap().len(), 10);
    }

    #[test]
    fn test_store_document_load_is_all_or_nothing() {
        let store = InMemoryPolicyStore::new();
        let tenant = TenantId::new();
        store.provision_tenant(tenant).unwrap();
        let system_id = PolicyId::derived(tenant, catalog::OWNER_FULL_ACCESS);

        // The second entry reuses a system policy ID, so nothing is loaded.
        let source = format!(
            r#"
            organization_id = "{tenant}"

            [[policies]]
            name = "Members read reports"
            effect = "allow"
            priority = 100
            resource_condition = {{ type = "report" }}
            action_condition = {{ actions = ["report:read"] }}

            [[policies]]
            id = "{system_id}"
            name = "Owner takeover"
            effect = "allow"
            priority = 100
            action_condition = {{ actions = ["*"] }}
            "#
        );
        let document = PolicyDocument::from_toml_str(&source).unwrap();

        assert!(matches!(store.load_document(document), Err(AbacError::StoreError { .. })));
        let policies = store.policies_for(&tenant).unwrap();
        assert_eq!(policies.len(), 8);
        assert!(policies.iter().all(|p| p.name != "Members read reports"));
    }

    #[test]
    fn test_store_document_names_never_shadow_the_catalog() {
        let store = InMemoryPolicyStore::new();
        let tenant = TenantId::new();

        let source = format!(
            r#"
            organization_id = "{tenant}"

            [[policies]]
            name = "{name}"
            effect = "allow"
            priority = 100
            resource_condition = {{ type = "report" }}
            action_condition = {{ actions = ["report:read"] }}
            "#,
            name = catalog::OWNER_FULL_ACCESS,
        );
        store.load_document(PolicyDocument::from_toml_str(&source).unwrap()).unwrap();
        assert_eq!(store.provision_tenant(tenant).unwrap(), 8);

        let policies = store.policies_for(&tenant).unwrap();
        assert_eq!(policies.len(), 9);
        let ids: HashSet<PolicyId> = policies.iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), 9);
        assert_eq!(
            policies.iter().filter(|p| p.name == catalog::OWNER_FULL_ACCESS).count(),
            2
        );
    }

    #[test]
    fn test_store_refuses_to_provision_over_a_taken_id() {
        let store = InMemoryPolicyStore::new();
        let tenant = TenantId::new();
        let squatter = allow_all(tenant, "squatter")
            .with_id(PolicyId::derived(tenant, catalog::OWNER_FULL_ACCESS));
        store.insert(squatter).unwrap();

        assert!(matches!(store.provision_tenant(tenant), Err(AbacError::StoreError { .. })));
        assert_eq!(store.policies_for(&tenant).unwrap().len(), 1);
    }
}
