//! In-memory implementation of `DecisionRecorder`.
//!
//! `InMemoryDecisionLog` keeps its chain in a `Vec` behind an
//! `Arc<Mutex<_>>`.  Clones share the same chain, so a caller can hand one
//! clone to an `Authorizer` and keep another to export or verify the log.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use tracing::{debug, info};

use abacus_contracts::{
    decision::DecisionRecord,
    error::{AbacError, AbacResult},
};
use abacus_core::traits::DecisionRecorder;

use crate::{
    chain::{hash_event, verify_chain},
    event::{AuditEvent, DecisionLog},
};

// ── Internal mutable state ────────────────────────────────────────────────────

pub(crate) struct InMemoryState {
    pub(crate) events: Vec<AuditEvent>,
    pub(crate) sequence: u64,
    /// `this_hash` of the last event, or `GENESIS_HASH`.
    pub(crate) last_hash: String,
}

// ── Public log ────────────────────────────────────────────────────────────────

/// An append-only decision log backed by a SHA-256 hash chain.
#[derive(Clone)]
pub struct InMemoryDecisionLog {
    log_id: String,
    pub(crate) state: Arc<Mutex<InMemoryState>>,
}

impl InMemoryDecisionLog {
    pub fn new(log_id: impl Into<String>) -> Self {
        let state = InMemoryState {
            events: Vec::new(),
            sequence: 0,
            last_hash: AuditEvent::GENESIS_HASH.to_string(),
        };
        Self {
            log_id: log_id.into(),
            state: Arc::new(Mutex::new(state)),
        }
    }

    pub fn log_id(&self) -> &str {
        &self.log_id
    }

    fn lock_for_write(&self) -> AbacResult<MutexGuard<'_, InMemoryState>> {
        self.state.lock().map_err(|e| AbacError::AuditWriteFailed {
            reason: format!("decision log lock poisoned: {}", e),
        })
    }

    /// Readers tolerate a poisoned lock: a panic elsewhere leaves the chain
    /// in a state `verify_integrity` can still judge.
    fn lock_for_read(&self) -> MutexGuard<'_, InMemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn len(&self) -> usize {
        self.lock_for_read().events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot every event recorded so far.
    pub fn export_log(&self) -> DecisionLog {
        let state = self.lock_for_read();
        let terminal_hash = state
            .events
            .last()
            .map(|e| e.this_hash.clone())
            .unwrap_or_default();

        DecisionLog {
            log_id: self.log_id.clone(),
            events: state.events.clone(),
            exported_at: Utc::now(),
            terminal_hash,
        }
    }

    /// True if the in-memory chain still verifies.
    pub fn verify_integrity(&self) -> bool {
        verify_chain(&self.lock_for_read().events)
    }

    /// Seal the log for this session and report its terminal hash.
    ///
    /// The in-memory log has nothing to flush; a persistent recorder would
    /// sync here.  Recording may continue afterwards.
    pub fn finalize(&self) -> AbacResult<String> {
        let state = self.lock_for_write()?;

        info!(
            log_id = %self.log_id,
            event_count = state.events.len(),
            terminal_hash = %state.last_hash,
            "decision log finalized"
        );

        Ok(state.last_hash.clone())
    }
}

// ── DecisionRecorder impl ─────────────────────────────────────────────────────

impl DecisionRecorder for InMemoryDecisionLog {
    /// Append `record` to the chain.
    fn record(&self, record: &DecisionRecord) -> AbacResult<()> {
        let mut state = self.lock_for_write()?;

        let prev_hash = state.last_hash.clone();
        let sequence = state.sequence;
        let this_hash = hash_event(&self.log_id, sequence, record, &prev_hash)?;

        debug!(log_id = %self.log_id, sequence, decision = %record.decision, "decision recorded");

        state.events.push(AuditEvent {
            sequence,
            log_id: self.log_id.clone(),
            record: record.clone(),
            prev_hash,
            this_hash: this_hash.clone(),
        });
        state.sequence += 1;
        state.last_hash = this_hash;

        Ok(())
    }
}
