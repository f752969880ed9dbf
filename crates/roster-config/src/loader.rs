//! Configuration loader with layered sources.

use crate::{AppConfig, DatabaseBackend};
use config::{Config, ConfigError, Environment, File};
use roster_core::RosterError;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};
use url::Url;

/// Environment variable selecting the `{environment}.toml` layer.
pub const ENVIRONMENT_VAR: &str = "ROSTER_ENVIRONMENT";

/// Configuration loader with reload support.
#[derive(Clone)]
pub struct ConfigLoader {
    config: Arc<RwLock<AppConfig>>,
    config_dir: String,
    environment: String,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// Configuration is loaded from multiple sources in order:
    /// 1. `config/default.toml` - Default values
    /// 2. `config/{environment}.toml` - Environment-specific overrides
    /// 3. `config/local.toml` - Local overrides
    /// 4. Environment variables with `ROSTER_` prefix
    pub fn new(config_dir: impl Into<String>) -> Result<Self, RosterError> {
        // Load .env file if present
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let environment =
            std::env::var(ENVIRONMENT_VAR).unwrap_or_else(|_| "development".to_string());
        Self::with_environment(config_dir, environment)
    }

    /// Creates a loader for an explicit environment name.
    pub fn with_environment(
        config_dir: impl Into<String>,
        environment: impl Into<String>,
    ) -> Result<Self, RosterError> {
        let config_dir = config_dir.into();
        let environment = environment.into();
        let config = load_config(&config_dir, &environment, |key| std::env::var(key).ok())?;

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            config_dir,
            environment,
        })
    }

    /// Loads configuration from the default location (`./config`).
    pub fn from_default_location() -> Result<Self, RosterError> {
        Self::new("./config")
    }

    /// Returns the current configuration.
    pub async fn get(&self) -> AppConfig {
        self.config.read().await.clone()
    }

    /// Reloads the configuration from disk.
    pub async fn reload(&self) -> Result<(), RosterError> {
        let new_config = load_config(&self.config_dir, &self.environment, |key| {
            std::env::var(key).ok()
        })?;
        let mut config = self.config.write().await;
        *config = new_config;
        info!("Configuration reloaded successfully");
        Ok(())
    }
}

fn load_config<F>(config_dir: &str, environment: &str, lookup: F) -> Result<AppConfig, RosterError>
where
    F: Fn(&str) -> Option<String>,
{
    info!("Loading configuration for environment: {}", environment);

    let mut builder = Config::builder();

    for layer in ["default", environment, "local"] {
        let path = format!("{}/{}.toml", config_dir, layer);
        if Path::new(&path).exists() {
            debug!("Loading config from: {}", path);
            builder = builder.add_source(File::with_name(&path).required(false));
        }
    }

    // Override with environment variables (ROSTER_ prefix)
    builder = builder.add_source(
        Environment::with_prefix("ROSTER")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("server.cors_origins")
            .try_parsing(true),
    );

    let config = builder.build().map_err(config_error_to_roster_error)?;

    let mut app_config: AppConfig = config
        .try_deserialize()
        .map_err(config_error_to_roster_error)?;
    app_config.app.environment = environment.to_string();

    if app_config.database.backend == DatabaseBackend::Postgres
        && app_config.database.url.trim().is_empty()
    {
        app_config.database.url = database_url_from_env(lookup)?;
        debug!("Database URL assembled from DB_* variables");
    }

    validate_config(&app_config)?;

    Ok(app_config)
}

/// Builds a PostgreSQL URL from `DB_HOST`, `DB_PORT`, `DB_USERNAME`,
/// `DB_PASSWORD` and `DB_DATABASE`, with local defaults for missing parts.
pub fn database_url_from_env<F>(lookup: F) -> Result<String, RosterError>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |key: &str, default: &str| {
        lookup(key)
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| default.to_string())
    };

    let host = var("DB_HOST", "localhost");
    let port: u16 = var("DB_PORT", "5432")
        .parse()
        .map_err(|_| RosterError::Configuration("DB_PORT must be a port number".to_string()))?;
    let username = var("DB_USERNAME", "postgres");
    let password = var("DB_PASSWORD", "postgres");
    let database = var("DB_DATABASE", "roster");

    let invalid = |part: &str| RosterError::Configuration(format!("Invalid database {}", part));

    let mut url = Url::parse("postgres://localhost")
        .map_err(|e| RosterError::Configuration(e.to_string()))?;
    url.set_host(Some(&host)).map_err(|_| invalid("host"))?;
    url.set_port(Some(port)).map_err(|()| invalid("port"))?;
    url.set_username(&username).map_err(|()| invalid("username"))?;
    url.set_password(Some(&password)).map_err(|()| invalid("password"))?;
    url.set_path(&format!("/{}", database));

    Ok(url.to_string())
}

/// Validates the configuration.
fn validate_config(config: &AppConfig) -> Result<(), RosterError> {
    if config.database.backend == DatabaseBackend::Postgres && config.database.url.is_empty() {
        return Err(RosterError::Configuration("Database URL is required".to_string()));
    }

    if config.database.max_connections == 0 {
        return Err(RosterError::Configuration(
            "database.max_connections must be at least 1".to_string(),
        ));
    }

    if config.database.min_connections > config.database.max_connections {
        return Err(RosterError::Configuration(
            "database.min_connections cannot exceed database.max_connections".to_string(),
        ));
    }

    Ok(())
}

fn config_error_to_roster_error(err: ConfigError) -> RosterError {
    RosterError::Configuration(err.to_string())
}
