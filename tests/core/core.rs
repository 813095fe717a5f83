use baton::core::document::{CheckpointDocument, ContextEntry, RemainingEntry, Scenario};
use baton::core::error::BatonError;
use baton::core::record::{CheckpointRecord, RECORD_SCHEMA_VERSION};
use baton::core::session::SessionKey;
use baton::core::store::{CheckpointStore, FileStore};
use std::fs;
use tempfile::tempdir;

fn sample_document(objective: &str) -> CheckpointDocument {
    CheckpointDocument {
        scenario: Scenario::MidTask,
        objective: objective.to_string(),
        architectural_context: vec![ContextEntry {
            reference: "src/payment.rs".to_string(),
            role: "module under change".to_string(),
        }],
        work_completed: Vec::new(),
        work_remaining: vec![RemainingEntry::none()],
        lessons_learned: None,
        current_state: "branch retry-logic, tests green".to_string(),
        open_questions: Vec::new(),
        resumption_prompt: "Continue working on retry logic in the payment module".to_string(),
    }
}

#[test]
fn resolve_is_deterministic_and_default_stable() {
    // Repeated calls with no name and the empty name all land on the same key.
    let defaults = [
        SessionKey::resolve(None).unwrap(),
        SessionKey::resolve(Some("")).unwrap(),
        SessionKey::resolve(None).unwrap(),
    ];
    assert!(defaults.iter().all(|k| *k == SessionKey::Default));

    let first = SessionKey::resolve(Some("feature-a")).unwrap();
    let second = SessionKey::resolve(Some("feature-a")).unwrap();
    assert_eq!(first, second);
}

#[test]
fn resolve_rejects_namespace_escapes_before_storage() {
    for bad in ["..", "../../etc", "a/b", "a\\b", "über"] {
        let err = SessionKey::resolve(Some(bad)).unwrap_err();
        assert!(
            matches!(err, BatonError::InvalidName(_)),
            "'{}' should be an invalid name, got {:?}",
            bad,
            err
        );
    }
}

#[test]
fn default_and_named_addresses_follow_the_layout() {
    let tmp = tempdir().unwrap();
    let store = FileStore::new(tmp.path());

    let default_addr = store.address(&SessionKey::Default);
    assert_eq!(default_addr, tmp.path().join("handoff.json"));

    let named = SessionKey::resolve(Some("feature-a")).unwrap();
    assert_eq!(
        store.address(&named),
        tmp.path().join("handoffs").join("handoff-feature-a.json")
    );
}

#[test]
fn store_get_and_delete_on_absent_key_fail_with_not_found() {
    let tmp = tempdir().unwrap();
    let store = FileStore::new(tmp.path());
    let key = SessionKey::resolve(Some("ghost")).unwrap();

    assert!(!store.exists(&key));
    assert!(matches!(store.get(&key), Err(BatonError::NotFound(_))));
    assert!(matches!(store.delete(&key), Err(BatonError::NotFound(_))));
    // Neither failure may create a namespace entry.
    assert!(!tmp.path().join("handoffs").exists());
}

#[test]
fn store_put_creates_namespace_and_round_trips_bytes() {
    let tmp = tempdir().unwrap();
    let store = FileStore::new(tmp.path());
    let key = SessionKey::resolve(Some("feature-a")).unwrap();

    let address = store.put(&key, b"payload-one").unwrap();
    assert!(address.exists());
    assert!(store.exists(&key));
    assert_eq!(store.get(&key).unwrap(), b"payload-one");

    // Last-write-wins replace, and no temp file is left behind.
    store.put(&key, b"payload-two").unwrap();
    assert_eq!(store.get(&key).unwrap(), b"payload-two");
    let leftovers: Vec<_> = fs::read_dir(tmp.path().join("handoffs"))
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(leftovers, ["handoff-feature-a.json"]);

    store.delete(&key).unwrap();
    assert!(!store.exists(&key));
}

#[test]
fn record_envelope_carries_version_id_and_hash() {
    let record = CheckpointRecord::seal(sample_document("Add retry logic"), false).unwrap();
    assert_eq!(record.schema_version, RECORD_SCHEMA_VERSION);
    assert!(ulid::Ulid::from_string(&record.record_id).is_ok());
    assert!(record.written_at.ends_with('Z'));
    assert_eq!(
        record.document_hash,
        record.document.canonical_hash_hex().unwrap()
    );
}

#[test]
fn record_with_missing_required_field_is_corrupt() {
    let record = CheckpointRecord::seal(sample_document("Add retry logic"), false).unwrap();
    let mut value: serde_json::Value = serde_json::from_slice(&record.encode().unwrap()).unwrap();
    value["document"]
        .as_object_mut()
        .unwrap()
        .remove("resumption_prompt");
    let bytes = serde_json::to_vec(&value).unwrap();

    let err = CheckpointRecord::decode(&bytes).unwrap_err();
    assert!(matches!(err, BatonError::CorruptRecord(_)));
}

#[test]
fn list_keys_orders_default_first_then_names() {
    let tmp = tempdir().unwrap();
    let store = FileStore::new(tmp.path());

    for name in ["zeta", "alpha"] {
        let key = SessionKey::resolve(Some(name)).unwrap();
        store.put(&key, b"{}").unwrap();
    }
    store.put(&SessionKey::Default, b"{}").unwrap();

    let keys = store.list_keys().unwrap();
    let labels: Vec<_> = keys.iter().map(|k| k.label().to_string()).collect();
    assert_eq!(labels, ["default", "alpha", "zeta"]);
}
