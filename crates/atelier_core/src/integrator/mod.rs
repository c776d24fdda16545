//! Entity integrators: selection pointer + local table + remote
//! reconciliation.
//!
//! # Responsibility
//! - Bind one entity kind to its table manager and a "current selection"
//!   pointer.
//! - Decide local/remote fallback so callers never see raw storage errors.
//!
//! # Invariants
//! - Local writes are optimistic: they succeed before any network round
//!   trip, and rejected pushes stay queued rather than rolling back.
//! - Remote changes overwrite the local record outright (last-writer-wins
//!   by remote authority), never a field-level merge.
//! - Every load carries a monotonically increasing generation; a
//!   completion superseded by a newer load is reported stale so callers
//!   drop it instead of applying it to the UI mirror.

use crate::identity::RecordId;
use crate::model::record::{Payload, Record};
use crate::remote::{RemoteBackend, RemoteChange, RemoteError};
use crate::store::StoreEngine;
use crate::table::{TableEntity, TableError, TableManager};
use log::{info, warn};
use std::collections::VecDeque;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod project_props;
mod tags;

pub use project_props::ProjectPropsIntegrator;
pub use tags::TagsIntegrator;

pub type IntegratorResult<T> = Result<T, IntegratorError>;

#[derive(Debug)]
pub enum IntegratorError {
    Table(TableError),
    Remote(RemoteError),
    /// A `save_current` was issued with no active selection pointer.
    NoCurrentSelection,
}

impl Display for IntegratorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Table(err) => write!(f, "{err}"),
            Self::Remote(err) => write!(f, "{err}"),
            Self::NoCurrentSelection => write!(f, "no record is currently selected"),
        }
    }
}

impl Error for IntegratorError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Table(err) => Some(err),
            Self::Remote(err) => Some(err),
            Self::NoCurrentSelection => None,
        }
    }
}

impl From<TableError> for IntegratorError {
    fn from(value: TableError) -> Self {
        Self::Table(value)
    }
}

impl From<RemoteError> for IntegratorError {
    fn from(value: RemoteError) -> Self {
        Self::Remote(value)
    }
}

/// Where a completed load found its entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    LocalHit,
    RemoteSeeded,
    /// The remote supplied the entity but the local cache write failed;
    /// the load still succeeds and the next one re-fetches.
    RemoteUncached,
}

/// Result of one `load_current` call, tagged with its load generation.
#[derive(Debug, Clone)]
pub struct LoadCompletion<E> {
    pub entity: E,
    pub source: LoadSource,
    generation: u64,
}

/// Result of an optimistic write: the local entity plus what happened to
/// the remote push.
#[derive(Debug, Clone)]
pub struct SaveOutcome<E> {
    pub entity: E,
    pub remote: RemoteWriteStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteWriteStatus {
    Acked,
    /// The push was rejected or the remote was unreachable; the write sits
    /// in the outbox and the local record keeps the optimistic state.
    Deferred(RemoteError),
}

struct PendingPush {
    id: RecordId,
    payload: Payload,
}

/// Generic integrator core; domain wrappers specialize it per entity kind.
pub struct Integrator<'eng, E: TableEntity> {
    manager: TableManager<'eng, E>,
    current_id: Option<RecordId>,
    load_seq: u64,
    outbox: VecDeque<PendingPush>,
}

impl<'eng, E: TableEntity> Integrator<'eng, E> {
    pub fn new(engine: &'eng StoreEngine) -> Self {
        Self {
            manager: TableManager::new(engine),
            current_id: None,
            load_seq: 0,
            outbox: VecDeque::new(),
        }
    }

    pub fn manager(&self) -> &TableManager<'eng, E> {
        &self.manager
    }

    pub fn current_id(&self) -> Option<&RecordId> {
        self.current_id.as_ref()
    }

    pub fn outbox_len(&self) -> usize {
        self.outbox.len()
    }

    /// Points the selection at `id` and materializes the entity.
    ///
    /// Read-through: on a local miss or a store fault the record is fetched
    /// from the remote and seeded into the local table before returning.
    /// After a store fault the cache fill is best effort; the load succeeds
    /// on remote data alone. A miss on both sides is `NotFound`.
    pub fn load_current(
        &mut self,
        id: RecordId,
        remote: &dyn RemoteBackend,
    ) -> IntegratorResult<LoadCompletion<E>> {
        let generation = self.bump_generation();
        self.current_id = Some(id.clone());

        match self.manager.read(&id) {
            Ok(entity) => {
                info!(
                    "event=load_current module=integrator status=local_hit table={} id={id}",
                    E::TABLE
                );
                Ok(LoadCompletion {
                    entity,
                    source: LoadSource::LocalHit,
                    generation,
                })
            }
            Err(TableError::NotFound(_)) => self.load_from_remote(id, generation, remote, false),
            Err(TableError::Store(err)) => {
                warn!(
                    "event=load_current module=integrator status=store_fallback table={} id={id} error={err}",
                    E::TABLE
                );
                self.load_from_remote(id, generation, remote, true)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Whether a newer load (or selection change) superseded this
    /// completion. Stale completions must not reach the UI mirror.
    pub fn is_stale(&self, completion: &LoadCompletion<E>) -> bool {
        completion.generation != self.load_seq
    }

    /// Applies a partial update to the current selection.
    ///
    /// The local write settles first; one push attempt follows, and a
    /// rejected push is deferred to the outbox without rolling back.
    pub fn save_current(
        &mut self,
        partial: &Payload,
        remote: &dyn RemoteBackend,
    ) -> IntegratorResult<SaveOutcome<E>> {
        let id = self
            .current_id
            .clone()
            .ok_or(IntegratorError::NoCurrentSelection)?;
        let entity = self.manager.update(&id, partial)?;
        let remote_status = self.push(id, entity.to_payload(), remote);
        Ok(SaveOutcome {
            entity,
            remote: remote_status,
        })
    }

    /// Authors a new record locally, selects it, and pushes it.
    pub fn create(
        &mut self,
        payload: Payload,
        remote: &dyn RemoteBackend,
    ) -> IntegratorResult<SaveOutcome<E>> {
        let entity = self.manager.create(payload)?;
        self.bump_generation();
        self.current_id = Some(entity.id().clone());
        let remote_status = self.push(entity.id().clone(), entity.to_payload(), remote);
        Ok(SaveOutcome {
            entity,
            remote: remote_status,
        })
    }

    /// Detaches the selection pointer; the underlying record is untouched.
    /// Pending load completions for the old selection become stale.
    pub fn clear_current(&mut self) {
        self.current_id = None;
        self.bump_generation();
    }

    /// Applies one remote change, overwriting local state outright.
    ///
    /// Returns the refreshed entity when the change touches the current
    /// selection, so the caller can update the UI mirror.
    pub fn apply_remote_change(
        &mut self,
        change: RemoteChange,
    ) -> IntegratorResult<Option<E>> {
        match change {
            RemoteChange::Upserted { id, payload } => {
                // Remote authority replaces queued local pushes for this id.
                self.outbox.retain(|push| push.id != id);
                let entity = self.manager.seed(&id, payload)?;
                info!(
                    "event=remote_change module=integrator status=overwrote_local table={} id={id}",
                    E::TABLE
                );
                if self.current_id.as_ref() == Some(&id) {
                    Ok(Some(entity))
                } else {
                    Ok(None)
                }
            }
            RemoteChange::Deleted { id } => {
                self.outbox.retain(|push| push.id != id);
                self.manager.remove(&id)?;
                info!(
                    "event=remote_change module=integrator status=deleted_local table={} id={id}",
                    E::TABLE
                );
                if self.current_id.as_ref() == Some(&id) {
                    self.clear_current();
                }
                Ok(None)
            }
        }
    }

    /// Replays deferred pushes in issuance order, stopping at the first
    /// failure; unflushed entries stay queued.
    pub fn flush_outbox(&mut self, remote: &dyn RemoteBackend) -> Result<(), RemoteError> {
        while let Some(push) = self.outbox.front() {
            match remote.upsert_record(E::TABLE, &push.id, &push.payload) {
                Ok(()) => {
                    self.outbox.pop_front();
                }
                Err(err) => {
                    warn!(
                        "event=flush_outbox module=integrator status=stopped table={} id={} remaining={} error={err}",
                        E::TABLE,
                        push.id,
                        self.outbox.len()
                    );
                    return Err(err);
                }
            }
        }
        Ok(())
    }

    fn load_from_remote(
        &mut self,
        id: RecordId,
        generation: u64,
        remote: &dyn RemoteBackend,
        after_store_fault: bool,
    ) -> IntegratorResult<LoadCompletion<E>> {
        match remote.fetch_record(E::TABLE, &id)? {
            Some(payload) => match self.manager.seed(&id, payload.clone()) {
                Ok(entity) => {
                    info!(
                        "event=load_current module=integrator status=remote_seeded table={} id={id}",
                        E::TABLE
                    );
                    Ok(LoadCompletion {
                        entity,
                        source: LoadSource::RemoteSeeded,
                        generation,
                    })
                }
                // The store already faulted once; a failed cache fill must
                // not sink a load the remote answered. Validation failures
                // still propagate.
                Err(TableError::Store(err)) if after_store_fault => {
                    warn!(
                        "event=load_current module=integrator status=cache_fill_skipped table={} id={id} error={err}",
                        E::TABLE
                    );
                    let record = Record::new(id, E::TABLE, payload);
                    let entity = E::from_record(&record).map_err(TableError::from)?;
                    Ok(LoadCompletion {
                        entity,
                        source: LoadSource::RemoteUncached,
                        generation,
                    })
                }
                Err(err) => Err(err.into()),
            },
            None => Err(TableError::NotFound(id).into()),
        }
    }

    fn push(&mut self, id: RecordId, payload: Payload, remote: &dyn RemoteBackend) -> RemoteWriteStatus {
        match remote.upsert_record(E::TABLE, &id, &payload) {
            Ok(()) => RemoteWriteStatus::Acked,
            Err(err) => {
                warn!(
                    "event=push module=integrator status=deferred table={} id={id} error={err}",
                    E::TABLE
                );
                self.outbox.push_back(PendingPush { id, payload });
                RemoteWriteStatus::Deferred(err)
            }
        }
    }

    fn bump_generation(&mut self) -> u64 {
        self.load_seq += 1;
        self.load_seq
    }
}
