//! Subject matcher: who is asking.

use abacus_contracts::{
    decision::MatchResult,
    policy::SubjectCondition,
    subject::SubjectContext,
};

/// Return whether `subject` satisfies every sub-condition of `condition`.
///
/// - `is_platform_admin = true` requires a platform administrator.
/// - `roles` (non-empty) requires the subject's base role, or `*`.
/// - `functional_roles` (non-empty) requires at least one in common.
/// - `user_ids` (non-empty) requires the subject's user ID.
pub fn matches(condition: &SubjectCondition, subject: &SubjectContext) -> MatchResult {
    let SubjectCondition {
        roles,
        functional_roles,
        user_ids,
        is_platform_admin,
    } = condition;

    if *is_platform_admin == Some(true) && !subject.is_platform_admin {
        return MatchResult::mismatch("platform admin required");
    }

    if let Some(roles) = roles.as_deref().filter(|r| !r.is_empty()) {
        if !roles.iter().any(|pattern| pattern.admits(&subject.role)) {
            return MatchResult::mismatch("role mismatch");
        }
    }

    if let Some(required) = functional_roles.as_deref().filter(|r| !r.is_empty()) {
        if !required.iter().any(|role| subject.functional_roles.contains(role)) {
            return MatchResult::mismatch("functional role mismatch");
        }
    }

    if let Some(ids) = user_ids.as_deref().filter(|ids| !ids.is_empty()) {
        if !ids.contains(&subject.user_id) {
            return MatchResult::mismatch("user mismatch");
        }
    }

    MatchResult::matched()
}
