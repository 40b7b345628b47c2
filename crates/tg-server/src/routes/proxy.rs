//! API proxy
//!
//! `/api/<path..>` is relayed to the configured backend origin with the
//! caller's `Authorization` header, query string and body. Upstream status
//! and body come back unchanged; transport failures answer `502`. Bodies
//! are read up to `server.max_body_bytes`; larger ones answer `413`.

use std::path::PathBuf;

use rocket::data::{Data, ToByteUnit};
use rocket::http::{ContentType, Status};
use rocket::request::{self, FromRequest, Outcome, Request};
use rocket::{State, get, post};
use tg_infrastructure::remote::{ForwardRequest, ProxyMethod};
use tracing::warn;

use crate::state::ServerState;

/// Status, content type and body relayed to the caller
pub type ProxyResponse = (Status, (ContentType, Vec<u8>));

/// Request parts forwarded upstream
pub struct ProxyHeaders {
    query: Option<String>,
    authorization: Option<String>,
    content_type: Option<String>,
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for ProxyHeaders {
    type Error = ();

    async fn from_request(req: &'r Request<'_>) -> request::Outcome<Self, Self::Error> {
        let headers = req.headers();
        Outcome::Success(ProxyHeaders {
            query: req.uri().query().map(|q| q.as_str().to_string()),
            authorization: headers.get_one("Authorization").map(str::to_string),
            content_type: headers.get_one("Content-Type").map(str::to_string),
        })
    }
}

#[get("/api/<path..>")]
pub async fn proxy_get(
    path: PathBuf,
    headers: ProxyHeaders,
    state: &State<ServerState>,
) -> ProxyResponse {
    relay(state, ProxyMethod::Get, &path, headers, Vec::new()).await
}

#[post("/api/<path..>", data = "<body>")]
pub async fn proxy_post(
    path: PathBuf,
    headers: ProxyHeaders,
    body: Data<'_>,
    state: &State<ServerState>,
) -> ProxyResponse {
    let body = match body.open(state.max_body_bytes.bytes()).into_bytes().await {
        Ok(bytes) if bytes.is_complete() => bytes.into_inner(),
        Ok(_) => {
            warn!(limit = state.max_body_bytes, "API proxy request body too large");
            return error_response(Status::PayloadTooLarge, "request body too large");
        }
        Err(e) => {
            warn!(error = %e, "could not read API proxy request body");
            return error_response(Status::BadRequest, "unreadable request body");
        }
    };
    relay(state, ProxyMethod::Post, &path, headers, body).await
}

async fn relay(
    state: &ServerState,
    method: ProxyMethod,
    path: &std::path::Path,
    headers: ProxyHeaders,
    body: Vec<u8>,
) -> ProxyResponse {
    let segments: Vec<String> = path
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    let request = ForwardRequest {
        method,
        path: format!("api/{}", segments.join("/")),
        query: headers.query,
        authorization: headers.authorization,
        content_type: headers.content_type,
        body,
    };

    match state.remote.forward(request).await {
        Ok(response) => {
            let status = Status::from_code(response.status).unwrap_or(Status::BadGateway);
            let content_type = response
                .content_type
                .as_deref()
                .and_then(ContentType::parse_flexible)
                .unwrap_or(ContentType::JSON);
            (status, (content_type, response.body))
        }
        Err(e) => {
            warn!(error = %e, "API proxy request failed");
            error_response(Status::BadGateway, "backend unreachable")
        }
    }
}

/// Error in the backend's `{ message: { status, message } }` shape
fn error_response(status: Status, message: &str) -> ProxyResponse {
    let body = serde_json::json!({
        "message": { "status": "error", "message": message }
    });
    (status, (ContentType::JSON, body.to_string().into_bytes()))
}
