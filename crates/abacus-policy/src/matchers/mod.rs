//! The four attribute matchers.
//!
//! Each matcher is a pure predicate over one dimension of a policy condition
//! and the matching part of the evaluation context.  An unspecified
//! sub-condition is vacuously true.  On failure the returned `MatchResult`
//! carries a reason naming the dimension that failed.

pub mod action;
pub mod environment;
pub mod resource;
pub mod subject;
