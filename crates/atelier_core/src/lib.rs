//! Local-first persistence and synchronization core for the editor.
//!
//! State lives in three places: the durable embedded store (survives
//! reloads), the remote system of record, and the in-memory mirror context
//! the UI reads. Integrators keep the three consistent: reads fall through
//! to the remote on a cold cache, writes settle locally first and are
//! pushed optimistically, and remote changes overwrite local state
//! last-writer-wins.

pub mod context;
pub mod db;
pub mod identity;
pub mod integrator;
pub mod logging;
pub mod model;
pub mod remote;
pub mod route;
pub mod store;
pub mod table;

pub use context::{MirrorContext, PanelState, ProjectData, ProjectSelection, TagSelection};
pub use db::{open_store, open_store_in_memory};
pub use identity::RecordId;
pub use integrator::{
    Integrator, IntegratorError, LoadCompletion, LoadSource, ProjectPropsIntegrator,
    RemoteWriteStatus, SaveOutcome, TagsIntegrator,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::project::ProjectProps;
pub use model::record::{
    merge_shallow, Payload, Record, PROJECT_PROPS_TABLE, PROJECT_TAGS_TABLE,
};
pub use model::tag::Tag;
pub use model::EntityError;
pub use remote::{memory::MemoryRemote, RemoteBackend, RemoteChange, RemoteError};
pub use route::{prime_for_route, Route};
pub use store::{StoreEngine, StoreError};
pub use table::{TableEntity, TableError, TableManager};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
