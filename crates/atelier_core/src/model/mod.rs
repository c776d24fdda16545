//! Domain model: raw records and their typed entity views.
//!
//! # Responsibility
//! - Define the persisted record shape and the fixed table vocabulary.
//! - Define typed entities and own both directions of the payload mapping.
//!
//! # Invariants
//! - Every entity materializes from exactly one record.
//! - Required-field validation happens in the entity conversion, never in
//!   the payload-agnostic table layer.

use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod project;
pub mod record;
pub mod tag;

use record::Payload;

/// Validation failure raised when a payload cannot back its typed view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityError {
    MissingField(&'static str),
    InvalidField {
        field: &'static str,
        message: String,
    },
}

impl Display for EntityError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "required field `{field}` is missing"),
            Self::InvalidField { field, message } => {
                write!(f, "field `{field}` is invalid: {message}")
            }
        }
    }
}

impl Error for EntityError {}

pub(crate) fn require_text(payload: &Payload, field: &'static str) -> Result<String, EntityError> {
    match payload.get(field) {
        None | Some(Value::Null) => Err(EntityError::MissingField(field)),
        Some(Value::String(text)) if text.trim().is_empty() => Err(EntityError::InvalidField {
            field,
            message: "must not be empty".to_string(),
        }),
        Some(Value::String(text)) => Ok(text.clone()),
        Some(other) => Err(EntityError::InvalidField {
            field,
            message: format!("expected string, got {other}"),
        }),
    }
}

pub(crate) fn optional_text(payload: &Payload, field: &'static str) -> Result<String, EntityError> {
    match payload.get(field) {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(text)) => Ok(text.clone()),
        Some(other) => Err(EntityError::InvalidField {
            field,
            message: format!("expected string, got {other}"),
        }),
    }
}

pub(crate) fn optional_bool(payload: &Payload, field: &'static str) -> Result<bool, EntityError> {
    match payload.get(field) {
        None | Some(Value::Null) => Ok(false),
        Some(Value::Bool(flag)) => Ok(*flag),
        Some(other) => Err(EntityError::InvalidField {
            field,
            message: format!("expected bool, got {other}"),
        }),
    }
}

pub(crate) fn optional_epoch_ms(
    payload: &Payload,
    field: &'static str,
) -> Result<Option<i64>, EntityError> {
    match payload.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(number)) => {
            number
                .as_i64()
                .map(Some)
                .ok_or_else(|| EntityError::InvalidField {
                    field,
                    message: "expected integer epoch milliseconds".to_string(),
                })
        }
        Some(other) => Err(EntityError::InvalidField {
            field,
            message: format!("expected integer, got {other}"),
        }),
    }
}
