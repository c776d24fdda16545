use atelier_core::{
    open_store_in_memory, IntegratorError, LoadSource, MemoryRemote, MirrorContext, Payload,
    ProjectPropsIntegrator, RecordId, RemoteBackend, RemoteChange, RemoteError, RemoteWriteStatus,
    StoreEngine,
    TableError, TagsIntegrator, PROJECT_PROPS_TABLE, PROJECT_TAGS_TABLE,
};
use serde_json::json;

fn engine() -> StoreEngine {
    StoreEngine::new(open_store_in_memory().unwrap())
}

fn payload(value: serde_json::Value) -> Payload {
    value.as_object().expect("payload literal").clone()
}

#[test]
fn create_then_save_current_merges_fields() {
    let engine = engine();
    let remote = MemoryRemote::new();
    let mut projects = ProjectPropsIntegrator::new(&engine);

    let created = projects
        .create(payload(json!({"project_name": "Demo"})), &remote)
        .unwrap();
    assert_eq!(projects.current_id(), Some(&created.entity.id));

    let saved = projects.describe_current("A demo", &remote).unwrap();
    assert_eq!(saved.entity.project_name, "Demo");
    assert_eq!(saved.entity.project_description, "A demo");

    let loaded = projects.manager().read(&created.entity.id).unwrap();
    assert_eq!(loaded.project_name, "Demo");
    assert_eq!(loaded.project_description, "A demo");
}

#[test]
fn load_current_seeds_local_table_from_remote_on_miss() {
    let engine = engine();
    let remote = MemoryRemote::new();
    let mut tags = TagsIntegrator::new(&engine);
    let mut ctx = MirrorContext::new();
    let id = RecordId::from("missing-id");

    remote.seed_record(
        PROJECT_TAGS_TABLE,
        &id,
        payload(json!({"tag": "urgent", "color": "red"})),
    );

    let completion = tags.load_current(id.clone(), &remote).unwrap();
    assert_eq!(completion.source, LoadSource::RemoteSeeded);
    assert_eq!(completion.entity.tag, "urgent");
    assert_eq!(completion.entity.color, "red");

    // The record is now cached locally.
    let cached = tags.manager().read(&id).unwrap();
    assert_eq!(cached, completion.entity);

    // And the mirror reflects it once the completion is confirmed fresh.
    assert!(!tags.is_stale(&completion));
    ctx.tags.set_current_tags(vec![completion.entity.clone()]);
    assert!(ctx.tags.matches(&[completion.entity]));
}

#[test]
fn store_fault_falls_back_to_remote_without_failing_the_load() {
    // A broken store (no records table) faults every read and write.
    let conn = open_store_in_memory().unwrap();
    conn.execute_batch("DROP TABLE records;").unwrap();
    let engine = StoreEngine::new(conn);

    let remote = MemoryRemote::new();
    let mut tags = TagsIntegrator::new(&engine);
    let id = RecordId::from("missing-id");
    remote.seed_record(
        PROJECT_TAGS_TABLE,
        &id,
        payload(json!({"tag": "urgent", "color": "red"})),
    );

    // The remote is available, so the load must still succeed; the cache
    // fill is skipped because the store keeps faulting.
    let completion = tags.load_current(id.clone(), &remote).unwrap();
    assert_eq!(completion.source, LoadSource::RemoteUncached);
    assert_eq!(completion.entity.tag, "urgent");
    assert_eq!(completion.entity.color, "red");
    assert_eq!(tags.current_id(), Some(&id));
}

#[test]
fn rename_and_publicity_helpers_update_the_current_project() {
    let engine = engine();
    let remote = MemoryRemote::new();
    let mut projects = ProjectPropsIntegrator::new(&engine);

    let created = projects
        .create(payload(json!({"project_name": "Before"})), &remote)
        .unwrap();

    let renamed = projects.rename_current("After", &remote).unwrap();
    assert_eq!(renamed.entity.project_name, "After");

    let published = projects.set_public_current(true, &remote).unwrap();
    assert!(published.entity.public);

    let stored = projects.manager().read(&created.entity.id).unwrap();
    assert_eq!(stored.project_name, "After");
    assert!(stored.public);
}

#[test]
fn load_current_missing_on_both_sides_is_not_found() {
    let engine = engine();
    let remote = MemoryRemote::new();
    let mut projects = ProjectPropsIntegrator::new(&engine);

    let err = projects
        .load_current(RecordId::from("nowhere"), &remote)
        .unwrap_err();
    assert!(matches!(
        err,
        IntegratorError::Table(TableError::NotFound(_))
    ));
}

#[test]
fn remote_change_wins_over_pending_local_save() {
    let engine = engine();
    let remote = MemoryRemote::new();
    let mut projects = ProjectPropsIntegrator::new(&engine);

    let created = projects
        .create(payload(json!({"project_name": "Demo"})), &remote)
        .unwrap();
    let id = created.entity.id.clone();

    // The local save settles but its push is still in flight (deferred).
    remote.fail_next_upsert(RemoteError::Unavailable("partition".to_string()));
    let saved = projects.describe_current("local edit", &remote).unwrap();
    assert!(matches!(saved.remote, RemoteWriteStatus::Deferred(_)));
    assert_eq!(projects.outbox_len(), 1);

    // A remote update for the same id arrives before the push retries.
    let remote_payload = payload(json!({
        "project_name": "Demo",
        "project_description": "remote edit"
    }));
    let refreshed = projects
        .apply_remote_change(RemoteChange::Upserted {
            id: id.clone(),
            payload: remote_payload.clone(),
        })
        .unwrap()
        .expect("change touches the current selection");

    // Last-writer-wins: the stored record equals the remote payload, not a
    // merge, and the superseded push is dropped.
    assert_eq!(refreshed.project_description, "remote edit");
    let stored = projects.manager().read(&id).unwrap();
    assert_eq!(stored.project_description, "remote edit");
    assert_eq!(projects.outbox_len(), 0);

    // Flushing pushes nothing: the remote still holds only the initial
    // create, never the superseded local edit.
    projects.flush_outbox(&remote).unwrap();
    let remote_stored = remote.record(PROJECT_PROPS_TABLE, &id).unwrap();
    assert_eq!(remote_stored.get("project_description"), Some(&json!("")));
}

#[test]
fn deferred_push_is_flushed_in_order() {
    let engine = engine();
    let remote = MemoryRemote::new();
    let mut projects = ProjectPropsIntegrator::new(&engine);

    let created = projects
        .create(payload(json!({"project_name": "Demo"})), &remote)
        .unwrap();
    assert_eq!(created.remote, RemoteWriteStatus::Acked);

    remote.fail_next_upsert(RemoteError::Conflict);
    let saved = projects.describe_current("queued", &remote).unwrap();
    assert_eq!(saved.remote, RemoteWriteStatus::Deferred(RemoteError::Conflict));

    // The optimistic local write stays in place.
    let local = projects.manager().read(&created.entity.id).unwrap();
    assert_eq!(local.project_description, "queued");

    projects.flush_outbox(&remote).unwrap();
    assert_eq!(projects.outbox_len(), 0);
    let pushed = remote
        .record(PROJECT_PROPS_TABLE, &created.entity.id)
        .unwrap();
    assert_eq!(pushed.get("project_description"), Some(&json!("queued")));
}

#[test]
fn flush_stops_at_the_first_failure() {
    let engine = engine();
    let remote = MemoryRemote::new();
    let mut tags = TagsIntegrator::new(&engine);

    remote.fail_next_upsert(RemoteError::Unavailable("down".to_string()));
    tags.create_tag("one", "red", &remote).unwrap();
    remote.fail_next_upsert(RemoteError::Unavailable("down".to_string()));
    tags.create_tag("two", "blue", &remote).unwrap();
    assert_eq!(tags.outbox_len(), 2);

    remote.fail_next_upsert(RemoteError::Unavailable("still down".to_string()));
    assert!(tags.flush_outbox(&remote).is_err());
    assert_eq!(tags.outbox_len(), 2);

    tags.flush_outbox(&remote).unwrap();
    assert_eq!(tags.outbox_len(), 0);
    assert_eq!(remote.accepted_upserts().len(), 2);
}

#[test]
fn superseded_load_completion_is_reported_stale() {
    let engine = engine();
    let remote = MemoryRemote::new();
    let mut projects = ProjectPropsIntegrator::new(&engine);

    let first = projects
        .create(payload(json!({"project_name": "First"})), &remote)
        .unwrap();
    let second = projects
        .create(payload(json!({"project_name": "Second"})), &remote)
        .unwrap();

    let completion_a = projects
        .load_current(first.entity.id.clone(), &remote)
        .unwrap();
    let completion_b = projects
        .load_current(second.entity.id.clone(), &remote)
        .unwrap();

    // The earlier completion must be dropped, the newer one applied.
    assert!(projects.is_stale(&completion_a));
    assert!(!projects.is_stale(&completion_b));

    let mut ctx = MirrorContext::new();
    for completion in [completion_a, completion_b] {
        if !projects.is_stale(&completion) {
            ctx.mirror_project(&completion.entity);
        }
    }
    assert_eq!(
        ctx.project.current_project_id(),
        Some(&second.entity.id)
    );
    assert!(ctx.selection_consistent());
}

#[test]
fn clear_current_detaches_without_deleting() {
    let engine = engine();
    let remote = MemoryRemote::new();
    let mut projects = ProjectPropsIntegrator::new(&engine);

    let created = projects
        .create(payload(json!({"project_name": "Keep"})), &remote)
        .unwrap();
    projects.clear_current();

    assert_eq!(projects.current_id(), None);
    assert!(projects.manager().read(&created.entity.id).is_ok());

    let err = projects
        .describe_current("should fail", &remote)
        .unwrap_err();
    assert!(matches!(err, IntegratorError::NoCurrentSelection));
}

#[test]
fn remote_delete_of_the_current_record_clears_the_selection() {
    let engine = engine();
    let remote = MemoryRemote::new();
    let mut projects = ProjectPropsIntegrator::new(&engine);

    let created = projects
        .create(payload(json!({"project_name": "Doomed"})), &remote)
        .unwrap();
    let id = created.entity.id.clone();

    projects
        .apply_remote_change(RemoteChange::Deleted { id: id.clone() })
        .unwrap();

    assert_eq!(projects.current_id(), None);
    let err = projects.manager().read(&id).unwrap_err();
    assert!(matches!(err, TableError::NotFound(_)));
}

#[test]
fn drained_remote_changes_feed_apply_in_arrival_order() {
    let engine = engine();
    let remote = MemoryRemote::new();
    let mut tags = TagsIntegrator::new(&engine);
    let id = RecordId::from("shared-tag");

    remote.queue_change(
        PROJECT_TAGS_TABLE,
        RemoteChange::Upserted {
            id: id.clone(),
            payload: payload(json!({"tag": "v1", "color": "red"})),
        },
    );
    remote.queue_change(
        PROJECT_TAGS_TABLE,
        RemoteChange::Upserted {
            id: id.clone(),
            payload: payload(json!({"tag": "v2", "color": "red"})),
        },
    );

    for change in remote.drain_changes(PROJECT_TAGS_TABLE).unwrap() {
        tags.apply_remote_change(change).unwrap();
    }

    assert_eq!(tags.manager().read(&id).unwrap().tag, "v2");
    assert!(remote.drain_changes(PROJECT_TAGS_TABLE).unwrap().is_empty());
}
