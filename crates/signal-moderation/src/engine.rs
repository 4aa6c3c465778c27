//! The moderation engine: identity assignment, intake, and the
//! pending → approved / pending → discarded transitions.

use crate::domain::errors::ModerationError;
use crate::domain::record::SignalRecord;
use crate::domain::validator::validate_submission;
use chrono::Utc;
use parking_lot::Mutex;
use serde_json::Value;
use signal_store::{Collection, FileStore};
use tracing::{info, warn};

/// Owns collection membership: no other component mutates the pending or
/// approved collections.
///
/// A single lock serializes every read-modify-write cycle, so concurrent
/// submit/approve/reject calls cannot lose each other's full-file writes.
/// Listing stays lock-free and re-reads the store on each call so
/// out-of-process changes are reflected.
pub struct ModerationEngine {
    store: FileStore,
    write_lock: Mutex<()>,
}

impl ModerationEngine {
    pub fn new(store: FileStore) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// Admit a submission into the pending collection.
    ///
    /// Runs the validator, assigns an id (a caller-supplied `id` is kept
    /// only if it is a non-empty string that collides with nothing already
    /// stored), stamps `submittedAt`, and persists. Returns the assigned id.
    pub fn submit(&self, payload: &Value) -> Result<String, ModerationError> {
        let obj = validate_submission(payload)?;

        let _guard = self.write_lock.lock();

        let mut pending: Vec<SignalRecord> = self.store.read_collection(Collection::Pending);

        let id = match obj.get("id").and_then(Value::as_str) {
            Some(client_id) if !client_id.is_empty() && !self.id_in_use(&pending, client_id) => {
                client_id.to_string()
            }
            _ => mint_signal_id(),
        };

        let record = SignalRecord::from_submission(obj.clone(), id.clone(), Utc::now());
        pending.push(record);
        self.store.write_collection(Collection::Pending, &pending)?;

        info!(id = %id, "Signal admitted to pending");
        Ok(id)
    }

    /// Approve the pending signal with the given id, publishing it.
    ///
    /// The record moves from `pending` to `approved` with `approvedAt`
    /// stamped. Both collections are persisted; if either write fails the
    /// move is reported as a persistence failure, not as durable.
    pub fn approve(&self, id: &str) -> Result<(), ModerationError> {
        let _guard = self.write_lock.lock();

        let mut pending: Vec<SignalRecord> = self.store.read_collection(Collection::Pending);
        let pos = pending
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| ModerationError::NotFound(id.to_string()))?;
        let record = pending.remove(pos).into_approved(Utc::now());

        let mut approved: Vec<SignalRecord> = self.store.read_collection(Collection::Approved);
        // A retry after a half-applied approve must not duplicate the record.
        if approved.iter().any(|r| r.id == record.id) {
            warn!(id = %id, "Approved collection already holds this id, completing the move");
        } else {
            approved.push(record);
        }

        self.store.write_collection(Collection::Approved, &approved)?;
        self.store.write_collection(Collection::Pending, &pending)?;

        info!(id = %id, "Signal approved");
        Ok(())
    }

    /// Reject the pending signal with the given id, discarding it.
    ///
    /// The record is deleted, not archived.
    pub fn reject(&self, id: &str) -> Result<(), ModerationError> {
        let _guard = self.write_lock.lock();

        let mut pending: Vec<SignalRecord> = self.store.read_collection(Collection::Pending);
        let pos = pending
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| ModerationError::NotFound(id.to_string()))?;
        pending.remove(pos);

        self.store.write_collection(Collection::Pending, &pending)?;

        info!(id = %id, "Signal rejected and discarded");
        Ok(())
    }

    /// Snapshot of the pending collection, re-read from the store.
    pub fn list_pending(&self) -> Vec<SignalRecord> {
        self.store.read_collection(Collection::Pending)
    }

    /// Snapshot of the approved collection, re-read from the store.
    pub fn list_approved(&self) -> Vec<SignalRecord> {
        self.store.read_collection(Collection::Approved)
    }

    /// Id uniqueness holds across the union of both collections.
    fn id_in_use(&self, pending: &[SignalRecord], id: &str) -> bool {
        if pending.iter().any(|r| r.id == id) {
            return true;
        }
        let approved: Vec<SignalRecord> = self.store.read_collection(Collection::Approved);
        approved.iter().any(|r| r.id == id)
    }
}

/// Mint a process-unique signal id from the current time plus a random
/// component, so rapid concurrent submissions cannot collide.
pub fn mint_signal_id() -> String {
    let millis = Utc::now().timestamp_millis();
    let nonce: u32 = rand::random();
    format!("sig-{millis}-{nonce:08x}")
}
