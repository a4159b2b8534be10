//! Resource matcher: what is being accessed.
//!
//! The resource kind is compared first, then every declared attribute
//! constraint.  A constraint on an attribute the resource does not carry
//! fails closed with the same reason as a violated constraint.

use abacus_contracts::{
    decision::MatchResult,
    policy::{AttributeConstraints, ResourceCondition},
    resource::ResourceContext,
};

pub fn matches(condition: &ResourceCondition, resource: &ResourceContext) -> MatchResult {
    if !condition.resource_type.admits(&resource.resource_type()) {
        return MatchResult::mismatch("resource type mismatch");
    }

    match &condition.attributes {
        Some(constraints) => attributes_match(constraints, resource),
        None => MatchResult::matched(),
    }
}

fn attributes_match(constraints: &AttributeConstraints, resource: &ResourceContext) -> MatchResult {
    // Destructured so that a new constraint field cannot be left unchecked.
    let AttributeConstraints {
        account_number,
        account_type,
        period_status,
        entry_type,
        is_intercompany,
        is_own_entry,
        is_adjustment_period,
    } = constraints;

    if let Some(range) = account_number {
        if !resource.account_number().is_some_and(|n| range.contains(n)) {
            return MatchResult::mismatch("Account number out of range");
        }
    }

    if let Some(allowed) = account_type {
        if !is_member(allowed, resource.account_type()) {
            return MatchResult::mismatch("Account type not allowed");
        }
    }

    if let Some(allowed) = period_status {
        if !is_member(allowed, resource.period_status()) {
            return MatchResult::mismatch("Period status not allowed");
        }
    }

    if let Some(allowed) = entry_type {
        if !is_member(allowed, resource.entry_type()) {
            return MatchResult::mismatch("Entry type not allowed");
        }
    }

    if let Some(expected) = is_intercompany {
        if resource.is_intercompany() != Some(*expected) {
            return MatchResult::mismatch("Intercompany flag mismatch");
        }
    }

    if let Some(expected) = is_own_entry {
        if resource.is_own_entry() != Some(*expected) {
            return MatchResult::mismatch("Own entry flag mismatch");
        }
    }

    if let Some(expected) = is_adjustment_period {
        if resource.is_adjustment_period() != Some(*expected) {
            return MatchResult::mismatch("Adjustment period flag mismatch");
        }
    }

    MatchResult::matched()
}

fn is_member<T: PartialEq>(allowed: &[T], value: Option<T>) -> bool {
    value.is_some_and(|v| allowed.contains(&v))
}
