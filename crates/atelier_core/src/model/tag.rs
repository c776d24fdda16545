//! Tag entity.
//!
//! # Responsibility
//! - Typed view of one tag-catalog record.
//! - Payload conversion for standalone tag records and for tag lists
//!   embedded in project payloads.
//!
//! # Invariants
//! - `tag` text is required and non-empty.
//! - `color` is free-form; an absent color reads back as an empty string.

use crate::identity::RecordId;
use crate::model::record::Payload;
use crate::model::{optional_text, require_text, EntityError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One tag in the project tag catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: RecordId,
    /// Display text shown on tag chips.
    pub tag: String,
    /// CSS-style color token chosen by the user.
    pub color: String,
}

impl Tag {
    pub fn new(tag: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: RecordId::generate(),
            tag: tag.into(),
            color: color.into(),
        }
    }

    /// Materializes a tag from a record payload; `id` comes from the record
    /// key, never from the payload body.
    pub fn from_payload(id: RecordId, payload: &Payload) -> Result<Self, EntityError> {
        Ok(Self {
            id,
            tag: require_text(payload, "tag")?,
            color: optional_text(payload, "color")?,
        })
    }

    pub fn to_payload(&self) -> Payload {
        let mut payload = Map::new();
        payload.insert("tag".to_string(), Value::String(self.tag.clone()));
        payload.insert("color".to_string(), Value::String(self.color.clone()));
        payload
    }

    /// Parses one element of an embedded tag list (project payloads carry
    /// the tag id inline).
    pub fn from_value(value: &Value) -> Result<Self, EntityError> {
        let object = value.as_object().ok_or(EntityError::InvalidField {
            field: "tags",
            message: format!("expected tag object, got {value}"),
        })?;
        let id = require_text(object, "id")?;
        Self::from_payload(RecordId::from(id), object)
    }

    /// Serializes for embedding inside another payload, id included.
    pub fn to_value(&self) -> Value {
        let mut object = self.to_payload();
        object.insert("id".to_string(), Value::String(self.id.to_string()));
        Value::Object(object)
    }
}
