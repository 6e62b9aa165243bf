use super::common::*;
use crate::workflows::screening::storage::{
    JsonFileStore, KeyValueStore, MemoryStore, StorageError, APPLICATIONS_KEY,
};
use crate::workflows::screening::ScreeningWorkflow;

#[test]
fn memory_store_round_trips_values() {
    let store = MemoryStore::new();
    assert!(store.load("missing").expect("load succeeds").is_none());

    store.save("key", "value").expect("save succeeds");
    assert_eq!(store.load("key").expect("load succeeds").as_deref(), Some("value"));
}

#[test]
fn json_file_store_escapes_key_into_file_name() {
    let dir = tempfile::tempdir().expect("temp dir");
    let store = JsonFileStore::new(dir.path());

    let path = store.path_for(APPLICATIONS_KEY);
    assert_eq!(path.parent(), Some(dir.path()));
    assert_eq!(
        path.file_name().and_then(|name| name.to_str()),
        Some("tenant-screening_2Fapplications.json")
    );
}

#[test]
fn json_file_store_keeps_similar_keys_apart() {
    let dir = tempfile::tempdir().expect("temp dir");
    let store = JsonFileStore::new(dir.path());

    assert_ne!(store.path_for("a/b"), store.path_for("a_b"));
    assert_ne!(store.path_for("a.b"), store.path_for("a_2Eb"));

    store.save("a/b", "slash").expect("save succeeds");
    store.save("a_b", "underscore").expect("save succeeds");
    assert_eq!(store.load("a/b").expect("load succeeds").as_deref(), Some("slash"));
    assert_eq!(
        store.load("a_b").expect("load succeeds").as_deref(),
        Some("underscore")
    );
}

#[test]
fn json_file_store_missing_key_is_none() {
    let dir = tempfile::tempdir().expect("temp dir");
    let store = JsonFileStore::new(dir.path().join("nested"));

    assert!(store.load(APPLICATIONS_KEY).expect("load succeeds").is_none());
}

#[test]
fn json_file_store_persists_workflow_across_instances() {
    let dir = tempfile::tempdir().expect("temp dir");

    let mut workflow =
        ScreeningWorkflow::open(JsonFileStore::new(dir.path())).expect("opens empty dir");
    let mut data = submission();
    data.screening = excellent_screening();
    let id = workflow.add_application(data);
    assert!(workflow.reject_application(&id, "mgr3", "unit no longer available"));
    drop(workflow);

    assert!(JsonFileStore::new(dir.path())
        .path_for(APPLICATIONS_KEY)
        .exists());

    let reopened =
        ScreeningWorkflow::open(JsonFileStore::new(dir.path())).expect("reopens from disk");
    let restored = reopened.get_application_by_id(&id).expect("record restored");
    assert_eq!(restored.overall_score(), 100);
    assert_eq!(restored.notes.as_deref(), Some("unit no longer available"));
    assert_eq!(restored.reviewed_by.as_deref(), Some("mgr3"));
}

#[test]
fn corrupt_file_surfaces_serialization_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let store = JsonFileStore::new(dir.path());
    store
        .save(APPLICATIONS_KEY, "[{\"id\": 7}]")
        .expect("raw save succeeds");

    match ScreeningWorkflow::open(store) {
        Err(StorageError::Serialization(_)) => {}
        Err(other) => panic!("expected serialization error, got {other:?}"),
        Ok(_) => panic!("expected serialization error, got a workflow"),
    }
}
