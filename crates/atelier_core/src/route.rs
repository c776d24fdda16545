//! Route-driven session priming.
//!
//! The navigation layer owns routing; this module only consumes the current
//! route value to decide which integrator primes the mirror context after a
//! load or reload.

use crate::context::MirrorContext;
use crate::identity::RecordId;
use crate::integrator::{IntegratorResult, ProjectPropsIntegrator, TagsIntegrator};
use crate::remote::RemoteBackend;

/// Current route as supplied by the external navigation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Landing,
    Auth,
    Editor { project_id: RecordId },
}

/// Rebuilds the mirror context for `route`.
///
/// On an editor route the project integrator loads the routed project
/// (read-through on a cold cache) and the tag catalog is mirrored; other
/// routes reset the context to its defaults. Stale completions are dropped
/// rather than applied.
pub fn prime_for_route(
    route: &Route,
    projects: &mut ProjectPropsIntegrator<'_>,
    tags: &mut TagsIntegrator<'_>,
    ctx: &mut MirrorContext,
    remote: &dyn RemoteBackend,
) -> IntegratorResult<()> {
    match route {
        Route::Editor { project_id } => {
            let completion = projects.load_current(project_id.clone(), remote)?;
            if !projects.is_stale(&completion) {
                ctx.mirror_project(&completion.entity);
            }
            ctx.tags.set_current_tags(tags.all_tags()?);
            Ok(())
        }
        Route::Landing | Route::Auth => {
            ctx.reset();
            Ok(())
        }
    }
}
