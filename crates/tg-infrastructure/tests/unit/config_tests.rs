//! Tests for configuration loading and validation

use std::time::Duration;

use figment::Jail;
use tg_infrastructure::config::loader::validate_app_config;
use tg_infrastructure::config::{AppConfig, ConfigLoader};

#[test]
fn test_defaults_are_valid() {
    let config = AppConfig::default();
    assert!(validate_app_config(&config).is_ok());
    assert_eq!(config.server.port, 3000);
    assert_eq!(config.server.max_body_bytes, 32 * 1024 * 1024);
    assert_eq!(config.auth.login_route, "/auth/login");
    assert_eq!(config.auth.cookie_max_age(), Duration::from_secs(86_400));
}

#[test]
fn test_toml_file_overrides_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "tg.toml",
            r#"
            [server]
            port = 4100

            [auth]
            grace_delay_ms = 250
            "#,
        )?;

        let config = ConfigLoader::new().load().map_err(|e| e.to_string())?;
        assert_eq!(config.server.port, 4100);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(
            config.auth.client_guard_config().grace_delay,
            Duration::from_millis(250)
        );
        Ok(())
    });
}

#[test]
fn test_env_overrides_file() {
    Jail::expect_with(|jail| {
        jail.create_file("custom.toml", "[server]\nport = 4100\n")?;
        jail.set_env("TG_SERVER__PORT", "5200");
        jail.set_env("TG_REMOTE__BASE_URL", "https://backend.example");

        let config = ConfigLoader::new()
            .with_config_path("custom.toml")
            .load()
            .map_err(|e| e.to_string())?;
        assert_eq!(config.server.port, 5200);
        assert_eq!(config.remote.base_url, "https://backend.example");
        Ok(())
    });
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    Jail::expect_with(|_jail| {
        let result = ConfigLoader::new().with_config_path("absent.toml").load();
        assert!(result.is_err());
        Ok(())
    });
}

#[test]
fn test_zero_port_is_rejected() {
    Jail::expect_with(|jail| {
        jail.set_env("TG_SERVER__PORT", "0");
        let err = ConfigLoader::new().load().unwrap_err();
        assert!(err.to_string().contains("port"));
        Ok(())
    });
}

#[test]
fn test_protected_login_route_is_rejected() {
    let mut config = AppConfig::default();
    config.auth.login_route = "/settings/login".to_string();
    assert!(validate_app_config(&config).is_err());
}

#[test]
fn test_relative_landing_route_is_rejected() {
    let mut config = AppConfig::default();
    config.auth.business_landing_route = "business".to_string();
    assert!(validate_app_config(&config).is_err());
}

#[test]
fn test_zero_body_limit_is_rejected() {
    let mut config = AppConfig::default();
    config.server.max_body_bytes = 0;
    assert!(validate_app_config(&config).is_err());
}

#[test]
fn test_zero_cookie_max_age_is_rejected() {
    let mut config = AppConfig::default();
    config.auth.cookie_max_age_secs = 0;
    assert!(validate_app_config(&config).is_err());
}

#[test]
fn test_custom_guard_routes() {
    let mut config = AppConfig::default();
    config.auth.business_landing_route = "/team-management".to_string();

    let routes = config.auth.guard_routes();
    assert_eq!(routes.business_landing, "/team-management");
    assert!(routes.is_login("/auth/login/"));
}

#[test]
fn test_save_then_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("saved.toml");

    let mut config = AppConfig::default();
    config.server.port = 8088;
    config.storage.namespace = "tg".to_string();

    let loader = ConfigLoader::new().with_config_path(&path);
    loader.save_to_file(&config, &path).unwrap();
    let loaded = loader.load().unwrap();
    assert_eq!(loaded.server.port, 8088);
    assert_eq!(loaded.storage.namespace, "tg");
}
