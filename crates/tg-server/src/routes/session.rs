//! Session inspection and cookie mirroring
//!
//! The edge only sees cookies, so these routes report and maintain what
//! the edge guard will decide on: `auth_token` and `auth-storage`.

use rocket::http::{CookieJar, Status};
use rocket::serde::json::Json;
use rocket::{State, delete, get, post};
use tg_domain::constants::{AUTH_STORAGE_KEY, AUTH_TOKEN_KEY, MIRRORED_COOKIE_KEYS};
use tg_domain::{AuthStorageEnvelope, CredentialStore, SessionSummary};
use tracing::{debug, info};

use crate::cookies::CookieCredentialStore;
use crate::state::ServerState;

/// Session resolved from the request cookies
#[get("/session")]
pub fn current(cookies: &CookieJar<'_>, state: &State<ServerState>) -> Json<SessionSummary> {
    let store = CookieCredentialStore::with_max_age(cookies, state.cookie_max_age);
    Json(state.resolver.resolve_request_scoped(&store).summary())
}

/// Mirror an `auth-storage` envelope into cookies
///
/// The envelope must carry a token; the API secret is dropped before the
/// envelope is written to the cookie.
#[post("/session", format = "json", data = "<envelope>")]
pub fn mirror(
    envelope: Json<AuthStorageEnvelope>,
    cookies: &CookieJar<'_>,
    state: &State<ServerState>,
) -> Result<Json<SessionSummary>, Status> {
    let mut envelope = envelope.into_inner();
    let Some(token) = envelope.token().map(str::to_string) else {
        debug!("refusing to mirror an envelope without a token");
        return Err(Status::UnprocessableEntity);
    };
    envelope.state.api_secret = None;
    envelope.state.is_authenticated = true;
    let json = envelope.to_json().map_err(|_| Status::InternalServerError)?;

    let store = CookieCredentialStore::with_max_age(cookies, state.cookie_max_age);
    store.set(AUTH_TOKEN_KEY, &token, None);
    store.set(AUTH_STORAGE_KEY, &json, None);

    info!(entity_id = ?envelope.state.entity_id, "session cookies mirrored");
    Ok(Json(state.resolver.resolve_request_scoped(&store).summary()))
}

/// Clear the mirrored cookies
#[delete("/session")]
pub fn clear(cookies: &CookieJar<'_>, state: &State<ServerState>) -> Status {
    let store = CookieCredentialStore::with_max_age(cookies, state.cookie_max_age);
    for key in MIRRORED_COOKIE_KEYS {
        store.clear(key);
    }
    info!("session cookies cleared");
    Status::NoContent
}
