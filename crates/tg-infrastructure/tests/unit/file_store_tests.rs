//! Tests for the file-backed credential store

use tg_application::{SessionResolver, clear_session};
use tg_domain::constants::{AUTH_API_KEY_KEY, AUTH_API_SECRET_KEY, ENTITY_DATA_KEY};
use tg_domain::CredentialStore;
use tg_infrastructure::config::StorageConfig;
use tg_infrastructure::FileCredentialStore;

#[test]
fn test_missing_file_reads_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileCredentialStore::new(dir.path().join("absent.json"));
    assert_eq!(store.get("auth_token"), None);
}

#[test]
fn test_values_persist_across_instances() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("storage.json");

    FileCredentialStore::new(&path).set("auth_token", "t", None);
    let reopened = FileCredentialStore::new(&path);
    assert_eq!(reopened.get("auth_token").as_deref(), Some("t"));
}

#[test]
fn test_corrupt_file_reads_as_empty_and_recovers() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    std::fs::write(&path, "{not json").unwrap();

    let store = FileCredentialStore::new(&path);
    assert_eq!(store.get("auth_token"), None);

    store.set("auth_token", "fresh", None);
    assert_eq!(store.get("auth_token").as_deref(), Some("fresh"));
}

#[test]
fn test_namespaces_are_independent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");

    let a = FileCredentialStore::new(&path).with_namespace("a");
    let b = FileCredentialStore::new(&path).with_namespace("b");
    a.set("auth_token", "from-a", None);

    assert_eq!(b.get("auth_token"), None);
    assert_eq!(a.get("auth_token").as_deref(), Some("from-a"));

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.contains("a:auth_token"));
}

#[test]
fn test_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = StorageConfig {
        path: dir.path().join("storage.json"),
        namespace: "tg".to_string(),
    };
    let store = FileCredentialStore::from_config(&config);
    assert_eq!(store.path(), config.path.as_path());
}

#[test]
fn test_resolver_over_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileCredentialStore::new(dir.path().join("storage.json"));
    store.set(AUTH_API_KEY_KEY, "k", None);
    store.set(AUTH_API_SECRET_KEY, "s", None);
    store.set(ENTITY_DATA_KEY, r#"{"details":{"entity_id":"ENT-1"}}"#, None);
    store.set("ui-preferences", "{}", None);

    assert!(SessionResolver::new().resolve(&store).is_authenticated());

    clear_session(&store);
    assert!(!SessionResolver::new().resolve(&store).is_authenticated());
    assert!(store.get("ui-preferences").is_some());
}
