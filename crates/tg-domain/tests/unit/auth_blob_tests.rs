//! Tests for persisted credential blobs

use tg_domain::{AuthState, AuthStorageEnvelope, EntityData};

#[test]
fn test_entity_id_prefers_details() {
    let data = EntityData::parse(Some(
        r#"{"entity_id":"TOP","details":{"entity_id":"NESTED"}}"#,
    ));
    assert_eq!(data.entity_id().as_deref(), Some("NESTED"));

    let top_only = EntityData::parse(Some(r#"{"entity_id":"TOP"}"#));
    assert_eq!(top_only.entity_id().as_deref(), Some("TOP"));
}

#[test]
fn test_malformed_entity_data_is_empty_object() {
    for raw in [Some("{not json"), Some("[1,2]"), Some("\"str\""), None] {
        let data = EntityData::parse(raw);
        assert_eq!(data, EntityData::default());
        assert!(data.entity_id().is_none());
    }
}

#[test]
fn test_entity_roles_and_type() {
    let data = EntityData::parse(Some(
        r#"{"roles":["Business Admin",{"role":"Recruiter"},7],
            "details":{"roles":[{"role":"Owner"}],"entity_type":"Business"}}"#,
    ));
    assert_eq!(data.roles(), vec!["Business Admin", "Recruiter", "Owner"]);
    assert_eq!(data.entity_type().as_deref(), Some("Business"));
}

#[test]
fn test_envelope_uses_camel_case_fields() {
    let raw = r#"{"state":{"token":"t","apiKey":"k","apiSecret":"s","entityId":"E",
                  "isAuthenticated":true,"user":{"roles":["Individual Seller"],"userType":"Individual"}},
                  "version":0}"#;
    let envelope = AuthStorageEnvelope::parse(Some(raw)).unwrap();
    assert_eq!(envelope.token(), Some("t"));
    assert_eq!(envelope.state.api_key.as_deref(), Some("k"));
    assert_eq!(envelope.state.entity_id.as_deref(), Some("E"));
    assert!(envelope.state.is_authenticated);
    assert_eq!(envelope.state.roles(), vec!["Individual Seller"]);
    assert_eq!(envelope.state.user_type().as_deref(), Some("Individual"));
}

#[test]
fn test_envelope_missing_state_defaults() {
    let envelope = AuthStorageEnvelope::parse(Some(r#"{"version":3}"#)).unwrap();
    assert_eq!(envelope.version, 3);
    assert!(envelope.token().is_none());
    assert!(AuthStorageEnvelope::parse(Some("garbage")).is_none());
}

#[test]
fn test_envelope_mistyped_fields_are_absent() {
    let raw = r#"{"state":{"token":"t","apiKey":["k"],"entityId":"E",
                  "isAuthenticated":null,"user":"nobody"},"version":"1"}"#;
    let envelope = AuthStorageEnvelope::parse(Some(raw)).unwrap();
    assert_eq!(envelope.token(), Some("t"));
    assert_eq!(envelope.state.entity_id.as_deref(), Some("E"));
    assert_eq!(envelope.state.api_key, None);
    assert!(!envelope.state.is_authenticated);
    assert_eq!(envelope.state.user, None);
    assert_eq!(envelope.version, 0);
}

#[test]
fn test_envelope_must_be_an_object() {
    assert!(AuthStorageEnvelope::parse(Some("[1,2]")).is_none());
    assert!(AuthStorageEnvelope::parse(Some("\"token\"")).is_none());
    let envelope = AuthStorageEnvelope::parse(Some(r#"{"state":"t"}"#)).unwrap();
    assert!(envelope.token().is_none());
}

#[test]
fn test_envelope_deserializes_leniently() {
    let envelope: AuthStorageEnvelope =
        serde_json::from_str(r#"{"state":{"token":"t","isAuthenticated":1}}"#).unwrap();
    assert_eq!(envelope.token(), Some("t"));
    assert!(serde_json::from_str::<AuthStorageEnvelope>("[]").is_err());
}

#[test]
fn test_empty_token_is_absent() {
    let envelope = AuthStorageEnvelope::new(AuthState {
        token: Some(String::new()),
        ..AuthState::default()
    });
    assert!(envelope.token().is_none());
    let json = envelope.to_json().unwrap();
    assert!(json.contains("\"isAuthenticated\":false"));
}
