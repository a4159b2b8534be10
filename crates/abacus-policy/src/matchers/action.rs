//! Action matcher: `*` or exact membership.  No partial wildcards.

use abacus_contracts::{context::Action, decision::MatchResult, policy::ActionCondition};

pub fn matches(condition: &ActionCondition, action: &Action) -> MatchResult {
    if condition.actions.iter().any(|pattern| pattern.admits(action)) {
        MatchResult::matched()
    } else {
        MatchResult::mismatch("action not permitted")
    }
}
