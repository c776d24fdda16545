//! CLI smoke entry point.
//!
//! # Responsibility
//! - Exercise the core end to end against an in-memory store and remote,
//!   independently of any UI shell.

use atelier_core::{
    default_log_level, init_logging, open_store_in_memory, MemoryRemote, ProjectPropsIntegrator,
    StoreEngine,
};

fn main() {
    println!("atelier_core version={}", atelier_core::core_version());

    let log_dir = std::env::temp_dir().join("atelier-cli-logs");
    if let Some(log_dir) = log_dir.to_str() {
        if let Err(err) = init_logging(default_log_level(), log_dir) {
            eprintln!("logging unavailable: {err}");
        }
    }

    let conn = match open_store_in_memory() {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("store open failed: {err}");
            std::process::exit(1);
        }
    };
    let engine = StoreEngine::new(conn);
    let remote = MemoryRemote::new();
    let mut projects = ProjectPropsIntegrator::new(&engine);

    match projects.create_project("Smoke Project", "cli", &remote) {
        Ok(outcome) => {
            println!(
                "created project `{}` id={} remote={:?}",
                outcome.entity.project_name, outcome.entity.id, outcome.remote
            );
        }
        Err(err) => {
            eprintln!("create failed: {err}");
            std::process::exit(1);
        }
    }
}
