//! Layered application configuration.
//!
//! Sources, lowest precedence first: built-in defaults, `config/default.toml`,
//! `config/{RUN_ENV}.toml`, then `APP__*` environment variables where `__` separates
//! sections (`APP__DATABASE__URL`, `APP__SERVER__PORT`, `APP__CORS__ALLOWED_ORIGINS`).

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::{env, path::Path};
use thiserror::Error;
use tracing::{error, info, warn};
use validator::{Validate, ValidationError};

const CONFIG_DIR: &str = "config";
const DEFAULT_ENV: &str = "development";
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(default, deny_unknown_fields)]
#[validate(schema(function = "validate_cors_policy"))]
pub struct AppConfig {
    /// `development`, `test`, `staging`, `production`, ...
    pub environment: String,
    #[validate]
    pub server: ServerSettings,
    #[validate]
    pub database: DatabaseSettings,
    #[validate]
    pub logging: LoggingSettings,
    pub cors: CorsSettings,
}

#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(default, deny_unknown_fields)]
pub struct ServerSettings {
    pub host: String,
    #[validate(range(min = 1, message = "Port must be between 1 and 65535"))]
    pub port: u16,
    /// Per-request timeout applied by the HTTP layer
    #[validate(range(min = 1, message = "request_timeout_secs must be at least 1"))]
    pub request_timeout_secs: u64,
}

#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(default, deny_unknown_fields)]
#[validate(schema(function = "validate_pool_bounds"))]
pub struct DatabaseSettings {
    pub url: String,
    /// Apply embedded migrations at startup
    pub auto_migrate: bool,
    #[validate(range(min = 1, message = "max_connections must be at least 1"))]
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub acquire_timeout_secs: u64,
}

#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSettings {
    #[validate(custom = "validate_log_level")]
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CorsSettings {
    /// Comma-separated origins
    pub allowed_origins: Option<String>,
    /// Opt into permissive CORS outside development
    pub allow_any_origin: bool,
    pub allow_credentials: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: DEFAULT_ENV.to_string(),
            server: ServerSettings::default(),
            database: DatabaseSettings::default(),
            logging: LoggingSettings::default(),
            cors: CorsSettings::default(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            request_timeout_secs: 30,
        }
    }
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: "sqlite://stockroom.db?mode=rwc".to_string(),
            auto_migrate: true,
            max_connections: 10,
            min_connections: 1,
            connect_timeout_secs: 8,
            idle_timeout_secs: 300,
            acquire_timeout_secs: 8,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Default tuning around an explicit database, listen address and environment
    pub fn new(database_url: String, host: String, port: u16, environment: String) -> Self {
        Self {
            environment,
            server: ServerSettings {
                host,
                port,
                ..Default::default()
            },
            database: DatabaseSettings {
                url: database_url,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn is_development(&self) -> bool {
        self.environment.eq_ignore_ascii_case("development")
    }

    /// Permissive CORS is allowed in development or when explicitly requested
    pub fn should_allow_permissive_cors(&self) -> bool {
        self.is_development() || self.cors.allow_any_origin
    }
}

impl CorsSettings {
    /// Configured origins, trimmed, blanks dropped
    pub fn origins(&self) -> Vec<String> {
        self.allowed_origins
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[derive(Debug, Error)]
pub enum AppConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] ConfigError),

    #[error("invalid configuration: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

fn validate_log_level(level: &str) -> Result<(), ValidationError> {
    if LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
        return Ok(());
    }
    let mut err = ValidationError::new("log_level");
    err.message = Some(format!("log level must be one of: {}", LOG_LEVELS.join(", ")).into());
    Err(err)
}

fn validate_pool_bounds(db: &DatabaseSettings) -> Result<(), ValidationError> {
    if db.min_connections > db.max_connections {
        let mut err = ValidationError::new("pool_bounds");
        err.message = Some("min_connections cannot exceed max_connections".into());
        return Err(err);
    }
    Ok(())
}

fn validate_cors_policy(cfg: &AppConfig) -> Result<(), ValidationError> {
    if cfg.should_allow_permissive_cors() || !cfg.cors.origins().is_empty() {
        return Ok(());
    }
    let mut err = ValidationError::new("cors_origins_required");
    err.message = Some(
        "outside development set APP__CORS__ALLOWED_ORIGINS or APP__CORS__ALLOW_ANY_ORIGIN=true"
            .into(),
    );
    Err(err)
}

/// Installs the global subscriber; `RUST_LOG` wins over the configured level
pub fn init_tracing(settings: &LoggingSettings) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = env::var("RUST_LOG")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| {
            format!(
                "stockroom_api={},tower_http=debug,sea_orm=warn",
                settings.level
            )
        });

    let builder = fmt().with_env_filter(EnvFilter::new(filter));
    let _ = if settings.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}

/// Loads configuration for the environment named by `RUN_ENV` (or `APP_ENV`)
pub fn load_config() -> Result<AppConfig, AppConfigError> {
    let run_env = env::var("RUN_ENV")
        .or_else(|_| env::var("APP_ENV"))
        .unwrap_or_else(|_| DEFAULT_ENV.to_string());

    if !Path::new(CONFIG_DIR).is_dir() {
        warn!(
            "No '{}' directory; using built-in defaults and APP__* variables",
            CONFIG_DIR
        );
    }

    load_config_from(CONFIG_DIR, &run_env)
}

fn load_config_from(config_dir: &str, run_env: &str) -> Result<AppConfig, AppConfigError> {
    info!(environment = run_env, "Loading configuration");

    let cfg: AppConfig = Config::builder()
        .set_default("environment", run_env)?
        .add_source(File::with_name(&format!("{}/default", config_dir)).required(false))
        .add_source(File::with_name(&format!("{}/{}", config_dir, run_env)).required(false))
        .add_source(
            Environment::with_prefix("APP")
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()?;

    cfg.validate().map_err(|e| {
        error!("Configuration rejected: {}", e);
        AppConfigError::Validation(e)
    })?;

    Ok(cfg)
}
