//! Command line interface
//!
//! | Command | Description |
//! |---------|-------------|
//! | `serve` | Launch the edge server |
//! | `session` | Resolve the session held by the durable store |
//! | `login` | Persist credentials as a completed login would |
//! | `logout` | Delete every auth key |
//! | `classify <path>` | Route class of a path |
//! | `guard <location>` | Guard decision for a navigation |
//! | `api <method>` | Call the backend with the resolved session |
//!
//! Every command except `serve` prints one JSON document on stdout; logs go
//! to stderr.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, anyhow, bail};
use clap::{Args, Parser, Subcommand};
use serde_json::{Value, json};
use tg_application::{
    ClientGuard, EdgeGuard, LoginCredentials, ROUTE_TABLE, SessionResolver, clear_session,
};
use tg_domain::constants::AUTH_KEYS;
use tg_domain::cookies::{cookie_header, parse_cookie_header};
use tg_domain::value_objects::route::normalize_path;
use tg_domain::{CredentialStore, Error, Location, RemoteApi, SharedCredentialStore};
use tg_infrastructure::{
    AppConfig, ConfigLoader, FileCredentialStore, FrappeClient, InMemoryCredentialStore,
    init_logging,
};
use tracing::debug;

/// Command line interface for Talent Guard
#[derive(Parser, Debug)]
#[command(name = "tg")]
#[command(about = "Talent Guard - session resolution and route guarding")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Durable store selection shared by store-based commands
#[derive(Args, Debug, Clone, Default)]
pub struct StoreArgs {
    /// Credential store file; overrides `storage.path`
    #[arg(long)]
    pub store: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Launch the edge server
    Serve,

    /// Print the resolved session (secrets redacted)
    Session {
        #[command(flatten)]
        store: StoreArgs,
    },

    /// Persist login credentials into the durable store
    Login {
        #[command(flatten)]
        store: StoreArgs,
        #[arg(long)]
        api_key: String,
        #[arg(long)]
        api_secret: String,
        #[arg(long)]
        entity_id: String,
        /// Bearer token issued by the backend
        #[arg(long)]
        token: Option<String>,
        /// Account type, e.g. `Business` or `Individual`
        #[arg(long)]
        user_type: Option<String>,
        /// Role name; repeatable
        #[arg(long = "role")]
        roles: Vec<String>,
    },

    /// Clear the auth keys from the durable store
    Logout {
        #[command(flatten)]
        store: StoreArgs,
    },

    /// Print the route class of a path
    Classify { path: String },

    /// Decide a navigation
    ///
    /// Uses the client guard over the durable store, or with `--edge` the
    /// edge guard over a `Cookie` header.
    Guard {
        #[command(flatten)]
        store: StoreArgs,
        /// Path with optional query, e.g. `/auth/login?redirect=%2Fsettings`
        location: String,
        /// Decide as the edge server would
        #[arg(long)]
        edge: bool,
        /// `Cookie` header seen by the edge
        #[arg(long, requires = "edge")]
        cookie: Option<String>,
    },

    /// Call a backend method with the stored API credentials
    Api {
        #[command(flatten)]
        store: StoreArgs,
        /// Method path, e.g. `api/method/portfolio.get_certificates`
        method: String,
        /// Query parameter `key=value`; repeatable
        #[arg(long = "param", value_parser = parse_key_value)]
        params: Vec<(String, String)>,
        /// JSON body; sends a POST instead of a GET
        #[arg(long)]
        body: Option<String>,
    },
}

/// Run the parsed command line
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref())?;
    init_logging(&config.logging)?;

    if let Command::Serve = cli.command {
        tg_server::run_server(&config).await?;
        return Ok(());
    }

    let output = execute(&cli.command, &config).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Load configuration from `path` or the default locations
pub fn load_config(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    let loader = match path {
        Some(p) => ConfigLoader::new().with_config_path(p),
        None => ConfigLoader::new(),
    };
    loader.load().context("loading configuration")
}

/// Execute a non-server command and return its JSON output
pub async fn execute(command: &Command, config: &AppConfig) -> anyhow::Result<Value> {
    match command {
        Command::Serve => bail!("`serve` does not produce output; use `run`"),
        Command::Session { store } => {
            let store = open_store(config, store);
            let session = SessionResolver::new().resolve(&store);
            Ok(serde_json::to_value(session.summary())?)
        }
        Command::Login {
            store,
            api_key,
            api_secret,
            entity_id,
            token,
            user_type,
            roles,
        } => {
            let credentials = LoginCredentials {
                token: token.clone(),
                api_key: api_key.clone(),
                api_secret: api_secret.clone(),
                entity_data: json!({ "details": { "entity_id": entity_id } }),
                user: Some(json!({ "roles": roles, "user_type": user_type })),
            };
            let cookies = Arc::new(InMemoryCredentialStore::new());
            let guard = client_guard(config, store, &cookies);
            let session = guard.complete_login(&credentials)?;
            Ok(json!({
                "session": session.summary(),
                "cookie": mirrored_header(&cookies),
            }))
        }
        Command::Logout { store } => {
            let store = open_store(config, store);
            clear_session(&store);
            Ok(json!({ "cleared": AUTH_KEYS }))
        }
        Command::Classify { path } => Ok(json!({
            "path": normalize_path(path),
            "class": ROUTE_TABLE.classify(path),
            "static_asset": ROUTE_TABLE.is_static_asset(path),
        })),
        Command::Guard {
            location,
            edge: true,
            cookie,
            ..
        } => {
            let cookies = InMemoryCredentialStore::new();
            for (key, value) in parse_cookie_header(cookie.as_deref().unwrap_or_default()) {
                cookies.set(&key, &value, None);
            }
            let decision = EdgeGuard::new(config.auth.guard_routes())
                .evaluate(&Location::parse(location), &cookies);
            Ok(serde_json::to_value(decision)?)
        }
        Command::Guard {
            store, location, ..
        } => {
            let cookies = Arc::new(InMemoryCredentialStore::new());
            let guard = client_guard(config, store, &cookies);
            let state = guard
                .on_navigate(location)
                .await
                .ok_or_else(|| anyhow!("navigation was superseded"))?;
            Ok(json!({
                "state": state,
                "cookie": mirrored_header(&cookies),
            }))
        }
        Command::Api {
            store,
            method,
            params,
            body,
        } => {
            let store = open_store(config, store);
            let credentials = SessionResolver::new()
                .resolve(&store)
                .api_credentials()
                .ok_or_else(|| {
                    Error::authentication("no API credentials stored; run `tg login` first")
                })?;
            let client = FrappeClient::new(&config.remote)?;
            debug!(method = %method, "calling backend");
            let data = match body {
                Some(raw) => {
                    let body: Value = serde_json::from_str(raw).context("parsing --body")?;
                    client.post_json(&credentials, method, &body).await?
                }
                None => client.get(&credentials, method, params).await?,
            };
            Ok(data)
        }
    }
}

fn open_store(config: &AppConfig, args: &StoreArgs) -> FileCredentialStore {
    match &args.store {
        Some(path) => FileCredentialStore::new(path.clone())
            .with_namespace(config.storage.namespace.clone()),
        None => FileCredentialStore::from_config(&config.storage),
    }
}

fn client_guard(
    config: &AppConfig,
    store: &StoreArgs,
    cookies: &Arc<InMemoryCredentialStore>,
) -> ClientGuard {
    let durable: SharedCredentialStore = Arc::new(open_store(config, store));
    let cookies: SharedCredentialStore = cookies.clone();
    ClientGuard::new(durable, cookies, config.auth.client_guard_config())
}

/// `Cookie` header carrying the mirrored cookies
fn mirrored_header(cookies: &InMemoryCredentialStore) -> String {
    let pairs = cookies.snapshot();
    cookie_header(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got `{raw}`"))
}
