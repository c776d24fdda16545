//! In-memory mirror of UI selection state.
//!
//! # Responsibility
//! - Hold the transient pointers presentation code reads: active project,
//!   active tag set, panel visibility, clicked-project snapshot.
//! - Stay a pure in-memory projection: no persistence, no store access.
//!
//! # Invariants
//! - Every setter is a pure replace; merging happens in integrators.
//! - Fresh instances start at empty defaults and are repopulated through
//!   integrator loads, never invented locally.
//! - When both are set, `current_project_id` matches the clicked-project
//!   snapshot id.

use crate::identity::RecordId;
use crate::model::project::ProjectProps;
use crate::model::tag::Tag;
use std::collections::HashSet;

/// Summary of the active project shown in headers and modals.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProjectData {
    pub project_name: String,
    pub project_description: String,
    /// Whether the project settings modal is open.
    pub project_modal: bool,
}

/// Active-project slice: id pointer plus display summary.
#[derive(Debug, Default)]
pub struct ProjectSelection {
    current_project_id: Option<RecordId>,
    project_data: ProjectData,
}

impl ProjectSelection {
    pub fn current_project_id(&self) -> Option<&RecordId> {
        self.current_project_id.as_ref()
    }

    pub fn set_current_project_id(&mut self, id: Option<RecordId>) {
        self.current_project_id = id;
    }

    pub fn project_data(&self) -> &ProjectData {
        &self.project_data
    }

    pub fn set_project_data(&mut self, data: ProjectData) {
        self.project_data = data;
    }
}

/// Current tag set; ordering carries no meaning.
#[derive(Debug, Default)]
pub struct TagSelection {
    current_tags: Vec<Tag>,
}

impl TagSelection {
    pub fn current_tags(&self) -> &[Tag] {
        &self.current_tags
    }

    pub fn set_current_tags(&mut self, tags: Vec<Tag>) {
        self.current_tags = tags;
    }

    /// Set equality by tag id, ignoring order.
    pub fn matches(&self, tags: &[Tag]) -> bool {
        let ours: HashSet<&RecordId> = self.current_tags.iter().map(|tag| &tag.id).collect();
        let theirs: HashSet<&RecordId> = tags.iter().map(|tag| &tag.id).collect();
        ours == theirs
    }
}

/// Side-panel visibility slice.
#[derive(Debug, Default)]
pub struct PanelState {
    action_bar: bool,
}

impl PanelState {
    pub fn action_bar(&self) -> bool {
        self.action_bar
    }

    pub fn set_action_bar(&mut self, visible: bool) {
        self.action_bar = visible;
    }
}

/// Aggregating façade over the selection slices.
///
/// Getters reflect the most recent setter call synchronously; nothing here
/// suspends or performs I/O.
#[derive(Debug, Default)]
pub struct MirrorContext {
    pub project: ProjectSelection,
    pub tags: TagSelection,
    pub panel: PanelState,
    current_clicked_project: Option<ProjectProps>,
}

impl MirrorContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_clicked_project(&self) -> Option<&ProjectProps> {
        self.current_clicked_project.as_ref()
    }

    pub fn set_current_clicked_project(&mut self, project: Option<ProjectProps>) {
        self.current_clicked_project = project;
    }

    /// Mirrors one loaded project into every project-facing slice at once:
    /// id pointer, display summary, and clicked snapshot.
    pub fn mirror_project(&mut self, project: &ProjectProps) {
        self.project
            .set_current_project_id(Some(project.id.clone()));
        self.project.set_project_data(ProjectData {
            project_name: project.project_name.clone(),
            project_description: project.project_description.clone(),
            project_modal: self.project.project_data().project_modal,
        });
        self.current_clicked_project = Some(project.clone());
    }

    /// True unless the id pointer and the clicked snapshot disagree while
    /// both are set.
    pub fn selection_consistent(&self) -> bool {
        match (
            self.project.current_project_id(),
            self.current_clicked_project.as_ref(),
        ) {
            (Some(id), Some(clicked)) => id == &clicked.id,
            _ => true,
        }
    }

    /// Restores the empty defaults of a fresh browser session.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
