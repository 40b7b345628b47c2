//! Server initialization
//!
//! Builds the Rocket application from [`AppConfig`] and launches it.

use rocket::fs::FileServer;
use rocket::{Build, Rocket};
use tg_application::{EdgeGuard, SessionResolver};
use tg_domain::error::{Error, Result};
use tg_infrastructure::{AppConfig, FrappeClient};
use tracing::{info, warn};

use crate::constants::STATIC_FILES_RANK;
use crate::edge::EdgeGuardFairing;
use crate::routes;
use crate::state::ServerState;

/// Assemble the edge server
///
/// The static file server is mounted only when the configured directory
/// exists; the app shell covers every other GET.
pub fn build_rocket(config: &AppConfig) -> Result<Rocket<Build>> {
    let remote = FrappeClient::new(&config.remote)?;
    let state = ServerState {
        resolver: SessionResolver::new(),
        remote,
        static_dir: config.server.static_dir.clone(),
        cookie_max_age: config.auth.cookie_max_age(),
        max_body_bytes: config.server.max_body_bytes,
    };

    let figment = rocket::Config::figment()
        .merge(("address", config.server.address()))
        .merge(("port", config.server.port))
        .merge(("cli_colors", false));

    let mut rocket = rocket::custom(figment)
        .attach(EdgeGuardFairing::new(EdgeGuard::new(
            config.auth.guard_routes(),
        )))
        .manage(state)
        .mount("/", routes::all());

    if config.server.static_dir.is_dir() {
        rocket = rocket.mount(
            "/",
            FileServer::from(&config.server.static_dir).rank(STATIC_FILES_RANK),
        );
    } else {
        warn!(
            path = %config.server.static_dir.display(),
            "static directory missing; serving the built-in app shell only"
        );
    }

    Ok(rocket)
}

/// Build and launch the edge server; returns when Rocket shuts down
pub async fn run_server(config: &AppConfig) -> Result<()> {
    let rocket = build_rocket(config)?;
    info!(
        host = %config.server.host,
        port = config.server.port,
        remote = %config.remote.base_url,
        "starting edge server"
    );
    rocket
        .launch()
        .await
        .map_err(|e| Error::Infrastructure {
            message: format!("Edge server failed: {}", e),
            source: None,
        })?;
    info!("edge server stopped");
    Ok(())
}
