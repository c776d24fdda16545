//! Tag-catalog integrator.
//!
//! Specializes the generic integrator for the project tag table.

use crate::integrator::{Integrator, IntegratorResult, SaveOutcome};
use crate::model::record::Payload;
use crate::model::tag::Tag;
use crate::remote::RemoteBackend;
use crate::table::TableResult;
use serde_json::Value;

/// Integrator bound to `project_tags_local_db`.
pub type TagsIntegrator<'eng> = Integrator<'eng, Tag>;

impl<'eng> Integrator<'eng, Tag> {
    /// Authors a new tag and selects it.
    pub fn create_tag(
        &mut self,
        tag: &str,
        color: &str,
        remote: &dyn RemoteBackend,
    ) -> IntegratorResult<SaveOutcome<Tag>> {
        let mut payload = Payload::new();
        payload.insert("tag".to_string(), Value::String(tag.to_string()));
        payload.insert("color".to_string(), Value::String(color.to_string()));
        self.create(payload, remote)
    }

    /// Snapshot of the whole tag catalog.
    pub fn all_tags(&self) -> TableResult<Vec<Tag>> {
        self.manager().all()
    }
}
