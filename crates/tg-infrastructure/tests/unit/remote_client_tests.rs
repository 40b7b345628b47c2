//! Tests for the backend REST client against a mock server

use mockito::{Matcher, Server};
use serde_json::json;
use tg_domain::ports::FileUpload;
use tg_domain::{ApiCredentials, Error, RemoteApi};
use tg_infrastructure::config::RemoteConfig;
use tg_infrastructure::remote::{ForwardRequest, ProxyMethod};
use tg_infrastructure::FrappeClient;

fn client(server: &Server) -> FrappeClient {
    FrappeClient::new(&RemoteConfig {
        base_url: format!("{}/", server.url()),
        timeout_secs: 5,
    })
    .unwrap()
}

fn creds() -> ApiCredentials {
    ApiCredentials::new("key", "secret")
}

#[test]
fn test_url_joins_without_double_slash() {
    let client = FrappeClient::with_client("https://backend.example/", reqwest::Client::new());
    assert_eq!(
        client.url("/api/method/ping"),
        "https://backend.example/api/method/ping"
    );
}

#[tokio::test]
async fn test_get_sends_auth_headers_and_returns_data() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/method/portfolio.list")
        .match_header("authorization", "token key:secret")
        .match_header("accept", "application/json")
        .match_query(Matcher::UrlEncoded("page".into(), "2".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message":{"status":"success","data":[1,2]}}"#)
        .create_async()
        .await;

    let data = client(&server)
        .get(
            &creds(),
            "api/method/portfolio.list",
            &[("page".to_string(), "2".to_string())],
        )
        .await
        .unwrap();

    assert_eq!(data, json!([1, 2]));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_post_json_sets_content_type() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/method/settings.save")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({ "theme": "dark" })))
        .with_status(200)
        .with_body(r#"{"message":{"status":"success"}}"#)
        .create_async()
        .await;

    let data = client(&server)
        .post_json(&creds(), "api/method/settings.save", &json!({ "theme": "dark" }))
        .await
        .unwrap();

    assert!(data.is_null());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_non_success_status_on_http_200_is_an_error() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/method/jobs.list")
        .with_status(200)
        .with_body(r#"{"message":{"status":"error","message":"Not permitted"}}"#)
        .create_async()
        .await;

    let err = client(&server)
        .get(&creds(), "api/method/jobs.list", &[])
        .await
        .unwrap_err();

    match err {
        Error::Api { status, message } => {
            assert_eq!(status, "error");
            assert_eq!(message, "Not permitted");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_http_failure_is_a_network_error() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/method/jobs.list")
        .with_status(502)
        .with_body("bad gateway")
        .create_async()
        .await;

    let err = client(&server)
        .get(&creds(), "api/method/jobs.list", &[])
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Network { .. }));
    assert!(err.to_string().contains("502"));
}

#[tokio::test]
async fn test_upload_sends_multipart() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/method/upload_file")
        .match_header("authorization", "token key:secret")
        .match_header(
            "content-type",
            Matcher::Regex("^multipart/form-data; boundary=".into()),
        )
        .match_body(Matcher::Regex("certificate.pdf".into()))
        .with_status(200)
        .with_body(r#"{"message":{"status":"success","data":{"file_url":"/files/c.pdf"}}}"#)
        .create_async()
        .await;

    let data = client(&server)
        .upload(
            &creds(),
            "api/method/upload_file",
            FileUpload {
                field_name: "file".to_string(),
                file_name: "certificate.pdf".to_string(),
                mime_type: Some("application/pdf".to_string()),
                bytes: b"%PDF-1.4".to_vec(),
                fields: vec![("is_private".to_string(), "1".to_string())],
            },
        )
        .await
        .unwrap();

    assert_eq!(data["file_url"], "/files/c.pdf");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_forward_relays_status_and_body() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/method/login")
        .match_query(Matcher::UrlEncoded("lang".into(), "en".into()))
        .match_header("authorization", "token a:b")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message":"Invalid login"}"#)
        .create_async()
        .await;

    let response = client(&server)
        .forward(ForwardRequest {
            method: ProxyMethod::Post,
            path: "api/method/login".to_string(),
            query: Some("lang=en".to_string()),
            authorization: Some("token a:b".to_string()),
            content_type: Some("application/json".to_string()),
            body: br#"{"usr":"x"}"#.to_vec(),
        })
        .await
        .unwrap();

    assert_eq!(response.status, 401);
    assert_eq!(response.content_type.as_deref(), Some("application/json"));
    assert_eq!(response.body, br#"{"message":"Invalid login"}"#.to_vec());
}
