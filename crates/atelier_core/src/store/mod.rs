//! Embedded store engine: durable, table-namespaced record storage.
//!
//! # Responsibility
//! - Persist raw records keyed by `(table, id)` across app restarts.
//! - Keep failure taxonomy at two levels: transport faults and corrupt
//!   prior state.
//!
//! # Invariants
//! - Each call is independently atomic; there are no cross-table
//!   transactions.
//! - A corrupt row never crashes a listing; it is skipped and logged.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod engine;

pub use engine::StoreEngine;

pub type StoreResult<T> = Result<T, StoreError>;

/// Store engine failure taxonomy.
#[derive(Debug)]
pub enum StoreError {
    /// Quota, I/O or serialization failure while reading or writing.
    Fault(String),
    /// Previously persisted state that can no longer be decoded.
    Corrupt(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fault(message) => write!(f, "storage fault: {message}"),
            Self::Corrupt(message) => write!(f, "corrupt stored state: {message}"),
        }
    }
}

impl Error for StoreError {}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Fault(value.to_string())
    }
}
