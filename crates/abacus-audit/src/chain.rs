//! Hash-chain primitives.
//!
//! Hash input layout (bytes, in order):
//!   1. log_id as UTF-8
//!   2. sequence as 8-byte little-endian
//!   3. prev_hash as UTF-8 (64 ASCII hex chars)
//!   4. compact JSON of the decision record

use sha2::{Digest, Sha256};

use abacus_contracts::{
    decision::DecisionRecord,
    error::{AbacError, AbacResult},
};

use crate::event::AuditEvent;

/// Compute the lowercase hex SHA-256 of one event.
///
/// Fails only if `record` cannot be serialized, which a well-formed
/// `DecisionRecord` never does.
pub fn hash_event(
    log_id: &str,
    sequence: u64,
    record: &DecisionRecord,
    prev_hash: &str,
) -> AbacResult<String> {
    let record_json = serde_json::to_vec(record).map_err(|e| AbacError::AuditWriteFailed {
        reason: format!("decision record is not serializable: {}", e),
    })?;

    let mut hasher = Sha256::new();
    hasher.update(log_id.as_bytes());
    hasher.update(sequence.to_le_bytes());
    hasher.update(prev_hash.as_bytes());
    hasher.update(&record_json);

    Ok(hex::encode(hasher.finalize()))
}

/// Verify a chain.
///
/// Valid when every `prev_hash` equals the previous event's `this_hash`
/// (`GENESIS_HASH` for the first), every `this_hash` recomputes, and the
/// sequence numbers run 0, 1, 2 without gaps.  An empty chain is valid.
pub fn verify_chain(events: &[AuditEvent]) -> bool {
    let mut expected_prev = AuditEvent::GENESIS_HASH;

    for (position, event) in events.iter().enumerate() {
        if event.sequence != position as u64 || event.prev_hash != expected_prev {
            return false;
        }

        match hash_event(&event.log_id, event.sequence, &event.record, &event.prev_hash) {
            Ok(recomputed) if recomputed == event.this_hash => {}
            _ => return false,
        }

        expected_prev = event.this_hash.as_str();
    }

    true
}
