//! # abacus-audit
//!
//! Append-only, SHA-256 hash-chained log of authorization decisions.
//!
//! ## Overview
//!
//! Every `DecisionRecord` the authorizer writes is wrapped in an
//! `AuditEvent` that links to the previous event through its hash.  Editing
//! any recorded decision breaks the chain, and `verify_chain` detects it.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use abacus_audit::InMemoryDecisionLog;
//!
//! let log = InMemoryDecisionLog::new("ledger-2024");
//! let authorizer = Authorizer::new(Box::new(engine), Box::new(store), Box::new(log.clone()));
//! authorizer.authorize(&tenant, &ctx)?;
//!
//! assert!(log.verify_integrity());
//! let exported = log.export_log();
//! ```

pub mod chain;
pub mod event;
pub mod memory;

pub use chain::{hash_event, verify_chain};
pub use event::{AuditEvent, DecisionLog};
pub use memory::InMemoryDecisionLog;

// ── Tests ─────────────────────────────────────────────────────────────────────
