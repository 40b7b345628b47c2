//! Configuration loader
//!
//! Sources are merged in order, later ones overriding earlier ones:
//!
//! 1. `AppConfig::default()`
//! 2. A TOML file: the explicit path, else `tg.toml` in the working
//!    directory, `./tg/`, the user config dir or `~/.tg/`
//! 3. Environment variables such as `TG_SERVER__PORT=8080`

use std::env;
use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use tg_domain::error::{Error, Result};
use tg_domain::value_objects::route::normalize_path;
use tg_domain::RouteClass;

use crate::config::AppConfig;
use crate::constants::{
    CONFIG_ENV_NESTING, CONFIG_ENV_PREFIX, DEFAULT_CONFIG_DIR, DEFAULT_CONFIG_FILENAME,
};
use crate::error_ext::ErrorContext;
use crate::logging::log_config_loaded;

/// Configuration loader service
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self { config_path: None }
    }

    /// Set the configuration file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Load and validate configuration from all sources
    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        match &self.config_path {
            Some(path) if path.exists() => {
                figment = figment.merge(Toml::file(path));
                log_config_loaded(path, true);
            }
            Some(path) => {
                return Err(Error::config(format!(
                    "Configuration file not found: {}",
                    path.display()
                )));
            }
            None => {
                if let Some(path) = Self::find_default_config_path() {
                    figment = figment.merge(Toml::file(&path));
                    log_config_loaded(&path, true);
                }
            }
        }

        figment = figment.merge(
            Env::prefixed(&format!("{}_", CONFIG_ENV_PREFIX)).split(CONFIG_ENV_NESTING),
        );

        let app_config: AppConfig = figment
            .extract()
            .config_context("Failed to extract configuration")?;

        validate_app_config(&app_config)?;
        Ok(app_config)
    }

    /// Write configuration as TOML
    pub fn save_to_file<P: AsRef<Path>>(&self, config: &AppConfig, path: P) -> Result<()> {
        let toml_string =
            toml::to_string_pretty(config).context("Failed to serialize config to TOML")?;
        std::fs::write(path.as_ref(), toml_string).io_context("Failed to write config file")?;
        Ok(())
    }

    /// Get the explicit configuration file path
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    fn find_default_config_path() -> Option<PathBuf> {
        let current_dir = env::current_dir().ok()?;

        let candidates = [
            Some(current_dir.join(DEFAULT_CONFIG_FILENAME)),
            Some(
                current_dir
                    .join(DEFAULT_CONFIG_DIR)
                    .join(DEFAULT_CONFIG_FILENAME),
            ),
            dirs::config_dir().map(|d| d.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME)),
            dirs::home_dir().map(|d| {
                d.join(format!(".{}", DEFAULT_CONFIG_DIR))
                    .join(DEFAULT_CONFIG_FILENAME)
            }),
        ];

        candidates.into_iter().flatten().find(|path| path.exists())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate application configuration
pub fn validate_app_config(config: &AppConfig) -> Result<()> {
    validate_server_config(config)?;
    validate_auth_config(config)?;
    validate_remote_config(config)?;
    Ok(())
}

fn validate_server_config(config: &AppConfig) -> Result<()> {
    if config.server.port == 0 {
        return Err(Error::config("Server port cannot be 0"));
    }
    if config.server.max_body_bytes == 0 {
        return Err(Error::config("Server body limit cannot be 0"));
    }
    Ok(())
}

fn validate_auth_config(config: &AppConfig) -> Result<()> {
    let auth = &config.auth;
    if auth.cookie_max_age_secs == 0 {
        return Err(Error::config("Cookie max age cannot be 0"));
    }
    for (name, route) in [
        ("login_route", &auth.login_route),
        ("business_landing_route", &auth.business_landing_route),
        ("individual_landing_route", &auth.individual_landing_route),
    ] {
        if !route.starts_with('/') || route.starts_with("//") {
            return Err(Error::config(format!(
                "auth.{} must be an absolute path, got {:?}",
                name, route
            )));
        }
    }
    // A protected login route would redirect to itself forever
    let login = normalize_path(&auth.login_route);
    if tg_application::classify(&login) != RouteClass::Public {
        return Err(Error::config(format!(
            "auth.login_route {} is not a public route",
            login
        )));
    }
    Ok(())
}

fn validate_remote_config(config: &AppConfig) -> Result<()> {
    let url = &config.remote.base_url;
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(Error::config(format!(
            "remote.base_url must be an http(s) origin, got {:?}",
            url
        )));
    }
    if config.remote.timeout_secs == 0 {
        return Err(Error::config("Remote timeout cannot be 0"));
    }
    Ok(())
}
