//! In-process remote adapter.
//!
//! Backs tests and the CLI probe with a deterministic remote: fixtures can
//! be seeded, change events queued, and the next upsert forced to fail.

use crate::identity::RecordId;
use crate::model::record::Payload;
use crate::remote::{RemoteBackend, RemoteChange, RemoteError, RemoteResult};
use std::cell::RefCell;
use std::collections::BTreeMap;

/// Deterministic, single-process [`RemoteBackend`] implementation.
#[derive(Default)]
pub struct MemoryRemote {
    records: RefCell<BTreeMap<(String, String), Payload>>,
    pending_changes: RefCell<BTreeMap<String, Vec<RemoteChange>>>,
    next_upsert_failure: RefCell<Option<RemoteError>>,
    upsert_log: RefCell<Vec<(String, String, Payload)>>,
}

impl MemoryRemote {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a record fixture as if another device had written it.
    pub fn seed_record(&self, table: &str, id: &RecordId, payload: Payload) {
        self.records
            .borrow_mut()
            .insert((table.to_string(), id.to_string()), payload);
    }

    /// Queues a change event for the next `drain_changes` call.
    pub fn queue_change(&self, table: &str, change: RemoteChange) {
        self.pending_changes
            .borrow_mut()
            .entry(table.to_string())
            .or_default()
            .push(change);
    }

    /// Makes the next `upsert_record` call fail with `error`.
    pub fn fail_next_upsert(&self, error: RemoteError) {
        *self.next_upsert_failure.borrow_mut() = Some(error);
    }

    /// Returns every accepted upsert in arrival order.
    pub fn accepted_upserts(&self) -> Vec<(String, String, Payload)> {
        self.upsert_log.borrow().clone()
    }

    /// Returns the payload currently held remotely, if any.
    pub fn record(&self, table: &str, id: &RecordId) -> Option<Payload> {
        self.records
            .borrow()
            .get(&(table.to_string(), id.to_string()))
            .cloned()
    }
}

impl RemoteBackend for MemoryRemote {
    fn fetch_record(&self, table: &str, id: &RecordId) -> RemoteResult<Option<Payload>> {
        Ok(self.record(table, id))
    }

    fn upsert_record(&self, table: &str, id: &RecordId, payload: &Payload) -> RemoteResult<()> {
        if let Some(error) = self.next_upsert_failure.borrow_mut().take() {
            return Err(error);
        }
        self.seed_record(table, id, payload.clone());
        self.upsert_log
            .borrow_mut()
            .push((table.to_string(), id.to_string(), payload.clone()));
        Ok(())
    }

    fn drain_changes(&self, table: &str) -> RemoteResult<Vec<RemoteChange>> {
        Ok(self
            .pending_changes
            .borrow_mut()
            .remove(table)
            .unwrap_or_default())
    }
}
