//! Error types for the fallible edges of ABACUS.
//!
//! Policy evaluation itself never fails.  Errors come from loading and
//! validating policies, from the policy store, from the decision recorder,
//! and from callers that turn a deny into an error with `Authorizer::require`.

use thiserror::Error;

/// The unified error type for the ABACUS crates.
#[derive(Debug, Error)]
pub enum AbacError {
    /// The request was denied, by a policy or by default.
    #[error("access denied: {reason}")]
    AccessDenied { reason: String },

    /// A policy violates a storage-boundary invariant.
    #[error("invalid policy '{policy}': {reason}")]
    InvalidPolicy { policy: String, reason: String },

    /// A policy document or context file could not be read or parsed.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// The policy store could not serve or accept policies.
    #[error("policy store error: {reason}")]
    StoreError { reason: String },

    /// The decision recorder could not persist a record.
    ///
    /// A check whose decision cannot be recorded is treated as failed.
    #[error("audit write failed: {reason}")]
    AuditWriteFailed { reason: String },
}

impl AbacError {
    pub fn invalid_policy(policy: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPolicy {
            policy: policy.into(),
            reason: reason.into(),
        }
    }
}

/// Convenience alias used throughout the ABACUS crates.
pub type AbacResult<T> = Result<T, AbacError>;
