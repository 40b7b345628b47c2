//! Health checks

use rocket::State;
use rocket::get;
use rocket::serde::json::{Json, Value, json};

use crate::state::ServerState;

/// Liveness check
#[get("/live")]
pub fn live() -> Json<Value> {
    Json(json!({ "status": "alive" }))
}

/// Readiness check
///
/// Reports whether built assets are present; the server is ready either
/// way because the built-in shell covers a missing directory.
#[get("/ready")]
pub fn ready(state: &State<ServerState>) -> Json<Value> {
    Json(json!({
        "status": "ready",
        "static_assets": state.static_dir.is_dir(),
        "remote_origin": state.remote.base_url(),
    }))
}
