//! Project-properties integrator.
//!
//! Specializes the generic integrator for the editor's per-project
//! properties table and adds typed authoring helpers.

use crate::integrator::{Integrator, IntegratorResult, SaveOutcome};
use crate::model::project::ProjectProps;
use crate::model::record::Payload;
use crate::remote::RemoteBackend;
use serde_json::Value;
use std::time::{SystemTime, UNIX_EPOCH};

/// Integrator bound to `project_props_local_db`.
pub type ProjectPropsIntegrator<'eng> = Integrator<'eng, ProjectProps>;

impl<'eng> Integrator<'eng, ProjectProps> {
    /// Authors a new project with the given name and selects it.
    pub fn create_project(
        &mut self,
        project_name: &str,
        creator: &str,
        remote: &dyn RemoteBackend,
    ) -> IntegratorResult<SaveOutcome<ProjectProps>> {
        let mut payload = Payload::new();
        payload.insert(
            "project_name".to_string(),
            Value::String(project_name.to_string()),
        );
        payload.insert("creator".to_string(), Value::String(creator.to_string()));
        payload.insert("public".to_string(), Value::Bool(false));
        payload.insert("created_at".to_string(), Value::from(now_epoch_ms()));
        self.create(payload, remote)
    }

    /// Renames the currently selected project.
    pub fn rename_current(
        &mut self,
        project_name: &str,
        remote: &dyn RemoteBackend,
    ) -> IntegratorResult<SaveOutcome<ProjectProps>> {
        self.save_current(&field("project_name", project_name), remote)
    }

    /// Replaces the description of the currently selected project.
    pub fn describe_current(
        &mut self,
        project_description: &str,
        remote: &dyn RemoteBackend,
    ) -> IntegratorResult<SaveOutcome<ProjectProps>> {
        self.save_current(&field("project_description", project_description), remote)
    }

    /// Toggles public listing for the currently selected project.
    pub fn set_public_current(
        &mut self,
        public: bool,
        remote: &dyn RemoteBackend,
    ) -> IntegratorResult<SaveOutcome<ProjectProps>> {
        let mut partial = Payload::new();
        partial.insert("public".to_string(), Value::Bool(public));
        self.save_current(&partial, remote)
    }
}

fn field(name: &str, value: &str) -> Payload {
    let mut partial = Payload::new();
    partial.insert(name.to_string(), Value::String(value.to_string()));
    partial
}

fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}
