//! Project properties entity.
//!
//! # Responsibility
//! - Typed view of one project-properties record.
//! - Payload conversion including the embedded tag list.
//!
//! # Invariants
//! - `project_name` is required and non-empty.
//! - All other fields degrade to neutral defaults when absent, so records
//!   written by older app builds keep loading.

use crate::identity::RecordId;
use crate::model::record::Payload;
use crate::model::tag::Tag;
use crate::model::{
    optional_bool, optional_epoch_ms, optional_text, require_text, EntityError,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Editor-facing properties of one project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectProps {
    pub id: RecordId,
    pub project_name: String,
    pub project_description: String,
    /// User id the project is shared with; empty when private to the creator.
    pub shared_with: String,
    pub creator: String,
    /// Whether the project is listed publicly.
    pub public: bool,
    /// Creation time in epoch milliseconds, when known.
    pub created_at: Option<i64>,
    pub tags: Vec<Tag>,
}

impl ProjectProps {
    /// Creates an unsaved project with defaults matching a fresh editor
    /// session.
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            id: RecordId::generate(),
            project_name: project_name.into(),
            project_description: String::new(),
            shared_with: String::new(),
            creator: String::new(),
            public: false,
            created_at: None,
            tags: Vec::new(),
        }
    }

    pub fn from_payload(id: RecordId, payload: &Payload) -> Result<Self, EntityError> {
        let tags = match payload.get("tags") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(values)) => values
                .iter()
                .map(Tag::from_value)
                .collect::<Result<Vec<_>, _>>()?,
            Some(other) => {
                return Err(EntityError::InvalidField {
                    field: "tags",
                    message: format!("expected array, got {other}"),
                });
            }
        };

        Ok(Self {
            id,
            project_name: require_text(payload, "project_name")?,
            project_description: optional_text(payload, "project_description")?,
            shared_with: optional_text(payload, "shared_with")?,
            creator: optional_text(payload, "creator")?,
            public: optional_bool(payload, "public")?,
            created_at: optional_epoch_ms(payload, "created_at")?,
            tags,
        })
    }

    pub fn to_payload(&self) -> Payload {
        let mut payload = Payload::new();
        payload.insert(
            "project_name".to_string(),
            Value::String(self.project_name.clone()),
        );
        payload.insert(
            "project_description".to_string(),
            Value::String(self.project_description.clone()),
        );
        payload.insert(
            "shared_with".to_string(),
            Value::String(self.shared_with.clone()),
        );
        payload.insert("creator".to_string(), Value::String(self.creator.clone()));
        payload.insert("public".to_string(), Value::Bool(self.public));
        if let Some(created_at) = self.created_at {
            payload.insert("created_at".to_string(), Value::from(created_at));
        }
        payload.insert(
            "tags".to_string(),
            Value::Array(self.tags.iter().map(Tag::to_value).collect()),
        );
        payload
    }
}

#[cfg(test)]
mod tests {
    use super::ProjectProps;
    use crate::identity::RecordId;
    use crate::model::tag::Tag;
    use crate::model::EntityError;
    use serde_json::json;

    #[test]
    fn payload_round_trip_preserves_all_fields() {
        let mut project = ProjectProps::new("Demo");
        project.project_description = "A demo".to_string();
        project.public = true;
        project.created_at = Some(1_700_000_000_000);
        project.tags.push(Tag::new("urgent", "red"));

        let restored = ProjectProps::from_payload(project.id.clone(), &project.to_payload()).unwrap();
        assert_eq!(restored, project);
    }

    #[test]
    fn empty_name_is_invalid() {
        let payload = json!({"project_name": "  "}).as_object().unwrap().clone();
        let err = ProjectProps::from_payload(RecordId::generate(), &payload).unwrap_err();
        assert!(matches!(err, EntityError::InvalidField { field: "project_name", .. }));
    }

    #[test]
    fn minimal_payload_fills_defaults() {
        let payload = json!({"project_name": "Min"}).as_object().unwrap().clone();
        let project = ProjectProps::from_payload(RecordId::generate(), &payload).unwrap();
        assert_eq!(project.project_description, "");
        assert!(!project.public);
        assert!(project.tags.is_empty());
        assert_eq!(project.created_at, None);
    }
}
