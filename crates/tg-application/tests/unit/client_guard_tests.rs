//! Tests for the client guard

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tg_application::{ClientGuard, ClientGuardConfig, GuardState, LoginCredentials};
use tg_domain::constants::{
    AUTH_API_KEY_KEY, AUTH_API_SECRET_KEY, AUTH_STORAGE_KEY, AUTH_TOKEN_KEY, ENTITY_DATA_KEY,
    UI_PREFERENCES_KEY,
};
use tg_domain::{AuthStorageEnvelope, CredentialStore};

use crate::test_utils::{MemoryStore, as_shared, envelope_store, primary_store};

struct Fixture {
    durable: Arc<MemoryStore>,
    cookies: Arc<MemoryStore>,
    guard: Arc<ClientGuard>,
}

fn fixture(durable: MemoryStore) -> Fixture {
    let durable = durable.shared();
    let cookies = MemoryStore::new().shared();
    let guard = Arc::new(ClientGuard::new(
        as_shared(&durable),
        as_shared(&cookies),
        ClientGuardConfig::default(),
    ));
    Fixture {
        durable,
        cookies,
        guard,
    }
}

#[tokio::test(start_paused = true)]
async fn test_primary_session_allows_business_dashboard() {
    let fx = fixture(primary_store(&["Business Admin"]));

    let state = fx.guard.on_navigate("/business-dashboard").await;
    assert_eq!(state, Some(GuardState::Allowed));
    assert_eq!(fx.guard.state(), GuardState::Allowed);
}

#[tokio::test(start_paused = true)]
async fn test_unauthenticated_protected_redirects_to_login() {
    let fx = fixture(MemoryStore::new());

    let state = fx.guard.on_navigate("/portfolio").await;
    assert_eq!(
        state,
        Some(GuardState::RedirectingToLogin {
            location: "/auth/login?redirect=%2Fportfolio".to_string()
        })
    );
}

#[tokio::test(start_paused = true)]
async fn test_business_user_on_login_goes_to_business_landing() {
    let fx = fixture(primary_store(&["Business Admin"]));

    let state = fx.guard.on_navigate("/auth/login").await;
    assert_eq!(
        state,
        Some(GuardState::RedirectingToLanding {
            location: "/business-dashboard".to_string()
        })
    );
}

#[tokio::test(start_paused = true)]
async fn test_individual_user_on_login_goes_to_individual_landing() {
    let fx = fixture(primary_store(&["Individual Seller"]));

    let state = fx.guard.on_navigate("/auth/login").await;
    assert_eq!(
        state,
        Some(GuardState::RedirectingToLanding {
            location: "/individual-dashboard".to_string()
        })
    );
}

#[tokio::test(start_paused = true)]
async fn test_redirect_param_wins_over_landing() {
    let fx = fixture(primary_store(&["Business Admin"]));

    let state = fx.guard.on_navigate("/auth/login?redirect=%2Fportfolio").await;
    assert_eq!(
        state,
        Some(GuardState::RedirectingToLanding {
            location: "/portfolio".to_string()
        })
    );
}

#[tokio::test(start_paused = true)]
async fn test_external_redirect_param_is_ignored() {
    let fx = fixture(primary_store(&[]));

    for target in [
        "/auth/login?redirect=%2F%2Fevil.example",
        "/auth/login?redirect=https%3A%2F%2Fevil.example",
        "/auth/login?redirect=%2Fauth%2Flogin",
        "/auth/login?redirect=%2F%09%2Fevil.example",
        "/auth/login?redirect=%2F%0A%2Fevil.example",
        "/auth/login?redirect=%2F%0D%2Fevil.example",
    ] {
        let state = fx.guard.on_navigate(target).await;
        assert_eq!(
            state,
            Some(GuardState::RedirectingToLanding {
                location: "/individual-dashboard".to_string()
            }),
            "{target}"
        );
    }
}

#[tokio::test(start_paused = true)]
async fn test_unauthenticated_login_page_renders() {
    let fx = fixture(MemoryStore::new());
    assert_eq!(
        fx.guard.on_navigate("/auth/login").await,
        Some(GuardState::Allowed)
    );
}

#[tokio::test(start_paused = true)]
async fn test_unclassified_route_is_allowed_without_session() {
    let fx = fixture(MemoryStore::new());
    assert_eq!(
        fx.guard.on_navigate("/opportunities").await,
        Some(GuardState::Allowed)
    );
}

#[tokio::test(start_paused = true)]
async fn test_fallback_session_allows_protected_route() {
    let fx = fixture(envelope_store("env-token", "ENT-7"));
    assert_eq!(
        fx.guard.on_navigate("/settings").await,
        Some(GuardState::Allowed)
    );
    assert_eq!(fx.cookies.get(AUTH_TOKEN_KEY).as_deref(), Some("env-token"));
}

#[tokio::test(start_paused = true)]
async fn test_storage_hydrating_during_grace_delay_is_seen() {
    let fx = fixture(MemoryStore::new());

    let guard = fx.guard.clone();
    let pending = tokio::spawn(async move { guard.on_navigate("/portfolio").await });

    tokio::time::sleep(Duration::from_millis(10)).await;
    fx.durable.set(AUTH_API_KEY_KEY, "late-key", None);
    fx.durable.set(AUTH_API_SECRET_KEY, "late-secret", None);
    fx.durable
        .set(ENTITY_DATA_KEY, r#"{"entity_id":"ENT-LATE"}"#, None);

    let state = pending.await.unwrap();
    assert_eq!(state, Some(GuardState::Allowed));
}

#[tokio::test(start_paused = true)]
async fn test_newer_navigation_supersedes_pending_decision() {
    let fx = fixture(MemoryStore::new());
    let mut rx = fx.guard.subscribe();

    let guard = fx.guard.clone();
    let stale = tokio::spawn(async move { guard.on_navigate("/portfolio").await });

    tokio::time::sleep(Duration::from_millis(10)).await;
    let current = fx.guard.on_navigate("/opportunities").await;
    assert_eq!(current, Some(GuardState::Allowed));

    assert_eq!(stale.await.unwrap(), None);
    assert_eq!(fx.guard.state(), GuardState::Allowed);
    assert_eq!(*rx.borrow_and_update(), GuardState::Allowed);
}

#[tokio::test(start_paused = true)]
async fn test_navigation_enters_checking_first() {
    let fx = fixture(primary_store(&[]));
    let rx = fx.guard.subscribe();

    let guard = fx.guard.clone();
    let pending = tokio::spawn(async move { guard.on_navigate("/portfolio").await });

    tokio::time::sleep(Duration::from_millis(10)).await;
    assert_eq!(*rx.borrow(), GuardState::Checking);

    pending.await.unwrap();
    assert_eq!(*rx.borrow(), GuardState::Allowed);
}

#[test]
fn test_sync_cookies_mirrors_primary_credentials() {
    let fx = fixture(primary_store(&[]));

    let session = fx.guard.sync_cookies();
    assert!(session.is_authenticated());
    assert_eq!(
        fx.cookies.get(AUTH_TOKEN_KEY).as_deref(),
        Some("key-1:secret-1")
    );
    assert_eq!(
        fx.cookies.ttl_of(AUTH_TOKEN_KEY),
        Some(Duration::from_secs(86_400))
    );

    let envelope = AuthStorageEnvelope::parse(fx.cookies.get(AUTH_STORAGE_KEY).as_deref())
        .expect("mirrored envelope");
    assert_eq!(envelope.token(), Some("key-1:secret-1"));
    assert_eq!(envelope.state.entity_id.as_deref(), Some("ENT-42"));
    assert_eq!(envelope.state.api_secret, None);
}

#[test]
fn test_sync_cookies_copies_durable_envelope() {
    let fx = fixture(envelope_store("env-token", "ENT-7"));
    fx.guard.sync_cookies();

    let raw = fx.cookies.get(AUTH_STORAGE_KEY).expect("auth-storage cookie");
    assert!(!raw.contains("env-secret"));
    let envelope = AuthStorageEnvelope::parse(Some(&raw)).expect("mirrored envelope");
    assert_eq!(envelope.token(), Some("env-token"));
    assert_eq!(envelope.state.api_key.as_deref(), Some("env-key"));
    assert_eq!(envelope.state.entity_id.as_deref(), Some("ENT-7"));
    assert_eq!(envelope.state.roles(), vec!["Individual Seller"]);
    assert_eq!(envelope.state.api_secret, None);

    let durable = AuthStorageEnvelope::parse(fx.durable.get(AUTH_STORAGE_KEY).as_deref()).unwrap();
    assert_eq!(durable.state.api_secret.as_deref(), Some("env-secret"));
}

#[test]
fn test_sync_cookies_clears_when_unauthenticated() {
    let fx = fixture(MemoryStore::new());
    fx.cookies.set(AUTH_TOKEN_KEY, "stale", None);
    fx.cookies.set(AUTH_STORAGE_KEY, "{}", None);

    fx.guard.sync_cookies();
    assert_eq!(fx.cookies.get(AUTH_TOKEN_KEY), None);
    assert_eq!(fx.cookies.get(AUTH_STORAGE_KEY), None);
}

#[test]
fn test_complete_login_then_logout() {
    let fx = fixture(MemoryStore::with(&[(UI_PREFERENCES_KEY, r#"{"theme":"dark"}"#)]));

    let session = fx
        .guard
        .complete_login(&LoginCredentials {
            token: Some("issued-token".to_string()),
            api_key: "k".to_string(),
            api_secret: "s".to_string(),
            entity_data: json!({ "details": { "entity_id": "ENT-1" } }),
            user: Some(json!({ "roles": ["Business Owner"] })),
        })
        .unwrap();
    assert!(session.is_authenticated());
    assert!(session.is_business());
    assert_eq!(
        fx.cookies.get(AUTH_TOKEN_KEY).as_deref(),
        Some("issued-token")
    );
    let raw = fx.cookies.get(AUTH_STORAGE_KEY).expect("auth-storage cookie");
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert!(value["state"]["apiSecret"].is_null());
    let mirrored = AuthStorageEnvelope::parse(Some(&raw)).unwrap();
    assert_eq!(mirrored.token(), Some("issued-token"));
    assert_eq!(mirrored.state.api_secret, None);
    assert_eq!(fx.durable.get(AUTH_API_SECRET_KEY).as_deref(), Some("s"));

    fx.guard.logout();
    assert!(!fx.guard.current_session().is_authenticated());
    assert_eq!(fx.cookies.get(AUTH_TOKEN_KEY), None);
    assert_eq!(fx.cookies.get(AUTH_STORAGE_KEY), None);
    assert!(fx.durable.get(UI_PREFERENCES_KEY).is_some());
}

#[test]
fn test_complete_login_rejects_incomplete_credentials() {
    let fx = fixture(MemoryStore::new());
    let result = fx.guard.complete_login(&LoginCredentials {
        api_key: "k".to_string(),
        api_secret: "s".to_string(),
        entity_data: json!({}),
        ..LoginCredentials::default()
    });

    assert!(result.is_err());
    assert_eq!(fx.durable.len(), 0);
    assert_eq!(fx.cookies.get(AUTH_TOKEN_KEY), None);
}
