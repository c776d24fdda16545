//! Remote backend contract consumed by integrators.
//!
//! # Responsibility
//! - Define the fetch/upsert/change-feed surface of the multi-user backend.
//! - Keep credentials and transport outside the core; the host supplies an
//!   authenticated implementation.
//!
//! # Invariants
//! - Integrators are the only callers; UI code and the store engine never
//!   touch a remote directly.

use crate::identity::RecordId;
use crate::model::record::Payload;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod memory;

pub type RemoteResult<T> = Result<T, RemoteError>;

/// Remote rejection taxonomy. None of these roll back local optimistic
/// writes; last-writer-wins reconciliation corrects state on the next pull.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteError {
    /// The backend rejected a write against newer remote state.
    Conflict,
    /// The session is missing or no longer authorized.
    Auth,
    /// Network partition or backend outage.
    Unavailable(String),
}

impl Display for RemoteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Conflict => write!(f, "remote rejected write: conflict"),
            Self::Auth => write!(f, "remote rejected write: not authorized"),
            Self::Unavailable(message) => write!(f, "remote unavailable: {message}"),
        }
    }
}

impl Error for RemoteError {}

/// One change observed on the remote system of record.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteChange {
    Upserted { id: RecordId, payload: Payload },
    Deleted { id: RecordId },
}

/// System-of-record backend, one per authenticated session.
///
/// The change feed is poll-based: the host pumps `drain_changes` and feeds
/// each event to the owning integrator's `apply_remote_change`.
pub trait RemoteBackend {
    /// Fetches one record's payload; `Ok(None)` when the remote has no
    /// record under this id.
    fn fetch_record(&self, table: &str, id: &RecordId) -> RemoteResult<Option<Payload>>;

    /// Pushes one full payload under `(table, id)`.
    fn upsert_record(&self, table: &str, id: &RecordId, payload: &Payload) -> RemoteResult<()>;

    /// Returns and clears the changes accumulated for `table` since the
    /// previous drain, in arrival order.
    fn drain_changes(&self, table: &str) -> RemoteResult<Vec<RemoteChange>>;
}
