//! Raw persisted record shape and payload helpers.
//!
//! # Responsibility
//! - Define the `(id, table, payload)` unit stored by the engine.
//! - Provide the shallow-merge primitive used by partial updates.
//!
//! # Invariants
//! - `id` is immutable once a record is persisted.
//! - `table` values come from the fixed vocabulary below; a manager never
//!   reads another table's records.

use crate::identity::RecordId;
use serde_json::{Map, Value};

/// Table holding per-project editor properties.
pub const PROJECT_PROPS_TABLE: &str = "project_props_local_db";
/// Table holding the project tag catalog.
pub const PROJECT_TAGS_TABLE: &str = "project_tags_local_db";

/// Open field map carried by every record.
///
/// Entity modules own the translation between this shape and typed views;
/// the store and table layers treat it as opaque JSON.
pub type Payload = Map<String, Value>;

/// The atomic persisted unit inside the store engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub id: RecordId,
    pub table: &'static str,
    pub payload: Payload,
}

impl Record {
    pub fn new(id: RecordId, table: &'static str, payload: Payload) -> Self {
        Self { id, table, payload }
    }
}

/// Shallow-merges `partial` into `base`: supplied keys replace, omitted keys
/// are retained. Nested objects are replaced wholesale, not merged.
pub fn merge_shallow(base: &Payload, partial: &Payload) -> Payload {
    let mut merged = base.clone();
    for (key, value) in partial {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::merge_shallow;
    use serde_json::json;

    fn payload(value: serde_json::Value) -> super::Payload {
        value.as_object().expect("payload literal").clone()
    }

    #[test]
    fn merge_replaces_supplied_and_keeps_omitted() {
        let base = payload(json!({"a": 1, "b": "x"}));
        let partial = payload(json!({"b": "y", "c": true}));

        let merged = merge_shallow(&base, &partial);
        assert_eq!(merged, payload(json!({"a": 1, "b": "y", "c": true})));
    }

    #[test]
    fn merge_replaces_nested_objects_wholesale() {
        let base = payload(json!({"nested": {"keep": 1, "drop": 2}}));
        let partial = payload(json!({"nested": {"keep": 3}}));

        let merged = merge_shallow(&base, &partial);
        assert_eq!(merged, payload(json!({"nested": {"keep": 3}})));
    }
}
