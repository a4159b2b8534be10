//! Storage-boundary validation.
//!
//! The engine evaluates whatever it is given.  These checks run where
//! policies enter storage (document import, `InMemoryPolicyStore::insert`)
//! so that malformed policies never reach it.

use chrono::NaiveTime;

use abacus_contracts::{
    error::{AbacError, AbacResult},
    pattern::{Pattern, WILDCARD},
    policy::{AttributeConstraints, EnvironmentCondition, Policy},
};

use crate::{
    catalog::{CUSTOM_PRIORITY_MAX, SYSTEM_PRIORITY_MAX, SYSTEM_PRIORITY_MIN},
    matchers::environment::is_well_formed_entry,
};

/// Check every storage invariant of `policy`.
///
/// Returns the first violation as `AbacError::InvalidPolicy`.
pub fn validate_policy(policy: &Policy) -> AbacResult<()> {
    let invalid = |reason: String| AbacError::invalid_policy(policy.name.clone(), reason);

    if policy.name.trim().is_empty() {
        return Err(invalid("name is empty".to_string()));
    }

    if policy.action_condition.actions.is_empty() {
        return Err(invalid("action set is empty".to_string()));
    }
    let literal_wildcard = policy
        .action_condition
        .actions
        .iter()
        .any(|a| matches!(a, Pattern::Is(action) if action.as_str() == WILDCARD));
    if literal_wildcard {
        return Err(invalid("action '*' is a literal, not the wildcard".to_string()));
    }

    let (lo, hi) = if policy.is_system_policy {
        (SYSTEM_PRIORITY_MIN, SYSTEM_PRIORITY_MAX)
    } else {
        (0, CUSTOM_PRIORITY_MAX)
    };
    if !(lo..=hi).contains(&policy.priority) {
        return Err(invalid(format!(
            "priority {} is outside the allowed range {}..={}",
            policy.priority, lo, hi
        )));
    }

    if let Some(attributes) = &policy.resource_condition.attributes {
        validate_attributes(attributes).map_err(invalid)?;
    }

    if let Some(environment) = &policy.environment_condition {
        validate_environment(environment).map_err(invalid)?;
    }

    Ok(())
}

fn validate_attributes(attributes: &AttributeConstraints) -> Result<(), String> {
    if let Some(range) = &attributes.account_number {
        if range.lo() > range.hi() {
            return Err(format!(
                "account number range [{}, {}] is empty",
                range.lo(),
                range.hi()
            ));
        }
    }

    let empty_sets = [
        ("account_type", attributes.account_type.as_ref().is_some_and(Vec::is_empty)),
        ("period_status", attributes.period_status.as_ref().is_some_and(Vec::is_empty)),
        ("entry_type", attributes.entry_type.as_ref().is_some_and(Vec::is_empty)),
    ];
    if let Some((name, _)) = empty_sets.iter().find(|(_, empty)| *empty) {
        return Err(format!("{name} constraint lists no values"));
    }

    Ok(())
}

fn validate_environment(environment: &EnvironmentCondition) -> Result<(), String> {
    if let Some(window) = &environment.time_of_day {
        for value in [&window.start, &window.end] {
            if !is_clock_time(value) {
                return Err(format!("'{value}' is not a valid HH:MM time"));
            }
        }
        if window.start > window.end {
            return Err(format!(
                "time window {}-{} wraps midnight; split it into two policies",
                window.start, window.end
            ));
        }
    }

    if let Some(days) = &environment.days_of_week {
        if days.is_empty() {
            return Err("days_of_week lists no days".to_string());
        }
        if let Some(day) = days.iter().find(|d| **d > 6) {
            return Err(format!("day of week {day} is outside 0..=6"));
        }
    }

    let lists = [&environment.ip_allow_list, &environment.ip_deny_list];
    for entry in lists.into_iter().flatten().flatten() {
        if !is_well_formed_entry(entry) {
            return Err(format!("'{entry}' is neither an IP address nor a CIDR block"));
        }
    }

    Ok(())
}

/// Zero-padded 24-hour `HH:MM`, the only form that compares correctly as a
/// string.
fn is_clock_time(value: &str) -> bool {
    value.len() == 5 && NaiveTime::parse_from_str(value, "%H:%M").is_ok()
}
