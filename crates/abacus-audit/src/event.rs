//! Decision log entry types.
//!
//! `AuditEvent` wraps one `DecisionRecord` with its position in the chain and
//! the hashes that link it to its neighbours.  `DecisionLog` is the exported
//! snapshot of a whole chain.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use abacus_contracts::{decision::DecisionRecord, policy::Effect};

/// One link in a decision log's SHA-256 chain.
///
/// Changing any field, or any field of the embedded record, invalidates
/// `this_hash` and every later `prev_hash`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEvent {
    /// Position in the chain, starting at 0.
    pub sequence: u64,

    /// The log this event belongs to.
    pub log_id: String,

    pub record: DecisionRecord,

    /// Hex hash of the previous event, or `GENESIS_HASH` for the first one.
    pub prev_hash: String,

    /// Hex hash over (log_id, sequence, prev_hash, record JSON).
    pub this_hash: String,
}

impl AuditEvent {
    /// The `prev_hash` of the first event in every chain: 64 hex zeros.
    pub const GENESIS_HASH: &'static str =
        "0000000000000000000000000000000000000000000000000000000000000000";
}

/// An exported decision log.
///
/// `terminal_hash` is the `this_hash` of the last event and commits to the
/// entire log; it is empty when no decision has been recorded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionLog {
    pub log_id: String,
    pub events: Vec<AuditEvent>,
    pub exported_at: DateTime<Utc>,
    pub terminal_hash: String,
}

impl DecisionLog {
    /// Number of recorded denials, by policy or by default.
    pub fn denials(&self) -> usize {
        self.events
            .iter()
            .filter(|e| e.record.decision == Effect::Deny)
            .count()
    }
}
