//! App shell fallback
//!
//! Client-side routes have no file on disk; any GET that neither a route
//! nor the static file server answered gets the shell, and the client
//! router takes over.

use std::path::PathBuf;

use rocket::response::content::RawHtml;
use rocket::{State, get};
use tracing::debug;

use crate::constants::{APP_SHELL_FILE, FALLBACK_APP_SHELL};
use crate::state::ServerState;

#[get("/<_path..>", rank = 20)]
pub async fn app_shell(_path: PathBuf, state: &State<ServerState>) -> RawHtml<String> {
    let index = state.static_dir.join(APP_SHELL_FILE);
    match tokio::fs::read_to_string(&index).await {
        Ok(html) => RawHtml(html),
        Err(e) => {
            debug!(path = %index.display(), error = %e, "serving built-in app shell");
            RawHtml(FALLBACK_APP_SHELL.to_string())
        }
    }
}
