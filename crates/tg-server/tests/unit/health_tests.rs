//! Tests for the health checks

use rocket::http::Status;
use serde_json::Value;

use crate::test_utils::{client_for, default_client, test_config};

#[rocket::async_test]
async fn test_live_reports_alive() {
    let (client, _dir) = default_client().await;

    let response = client.get("/live").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    let body: Value = response.into_json().await.unwrap();
    assert_eq!(body["status"], "alive");
}

#[rocket::async_test]
async fn test_ready_reports_missing_assets() {
    let (client, _dir) = default_client().await;

    let body: Value = client.get("/ready").dispatch().await.into_json().await.unwrap();
    assert_eq!(body["status"], "ready");
    assert_eq!(body["static_assets"], false);
    assert_eq!(body["remote_origin"], "http://localhost:8000");
}

#[rocket::async_test]
async fn test_ready_reports_present_assets_and_origin() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path(), Some("https://backend.example".to_string()));
    let client = client_for(&config).await;

    let body: Value = client.get("/ready").dispatch().await.into_json().await.unwrap();
    assert_eq!(body["static_assets"], true);
    assert_eq!(body["remote_origin"], "https://backend.example");
}
