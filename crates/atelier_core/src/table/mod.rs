//! Generic table-scoped CRUD layer.
//!
//! # Responsibility
//! - Bind one logical table name to the shared store engine.
//! - Translate between raw records and typed entities at the boundary.
//!
//! # Invariants
//! - The manager itself is payload-agnostic; required-field checks live in
//!   the entity conversion it delegates to.
//! - Semantic `NotFound` is distinct from transport-level store faults.

use crate::identity::RecordId;
use crate::model::record::{Payload, Record};
use crate::model::{project::ProjectProps, record, tag::Tag, EntityError};
use crate::store::StoreError;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod manager;

pub use manager::TableManager;

pub type TableResult<T> = Result<T, TableError>;

#[derive(Debug)]
pub enum TableError {
    NotFound(RecordId),
    Validation(EntityError),
    Store(StoreError),
}

impl Display for TableError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "record not found: {id}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TableError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<EntityError> for TableError {
    fn from(value: EntityError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for TableError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Typed view over one fixed table of the store engine.
///
/// Implementors own both directions of the payload mapping; `from_record`
/// is the validation gate every write passes through before persisting.
pub trait TableEntity: Sized {
    const TABLE: &'static str;

    fn id(&self) -> &RecordId;
    fn from_record(record: &Record) -> Result<Self, EntityError>;
    fn to_payload(&self) -> Payload;
}

impl TableEntity for ProjectProps {
    const TABLE: &'static str = record::PROJECT_PROPS_TABLE;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn from_record(record: &Record) -> Result<Self, EntityError> {
        Self::from_payload(record.id.clone(), &record.payload)
    }

    fn to_payload(&self) -> Payload {
        self.to_payload()
    }
}

impl TableEntity for Tag {
    const TABLE: &'static str = record::PROJECT_TAGS_TABLE;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn from_record(record: &Record) -> Result<Self, EntityError> {
        Self::from_payload(record.id.clone(), &record.payload)
    }

    fn to_payload(&self) -> Payload {
        self.to_payload()
    }
}
