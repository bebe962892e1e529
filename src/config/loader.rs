//! Configuration loading from disk and the environment.

use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::{AppConfig, Environment, ServerConfig};
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Cannot read .env file: {0}")]
    Dotenv(#[from] dotenvy::Error),

    #[error("Invalid value `{value}` for environment variable {name}")]
    Env { name: &'static str, value: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse a TOML configuration file without validating it.
pub fn read_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let config = read_config(path)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load `path` into the process environment. Variables that are already
/// set keep their value. Returns `false` when the file does not exist.
pub fn load_dotenv(path: &Path) -> Result<bool, ConfigError> {
    match dotenvy::from_path(path) {
        Ok(()) => Ok(true),
        Err(e) if e.not_found() => Ok(false),
        Err(e) => Err(e.into()),
    }
}

/// Build the runtime configuration: `.env` from the working directory,
/// file (or defaults), then process environment overrides, then
/// validation.
pub fn load(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    load_dotenv(Path::new(".env"))?;

    let mut config = match path {
        Some(path) => read_config(path)?,
        None => AppConfig::default(),
    };
    apply_env_overrides(&mut config, |name| std::env::var(name).ok())?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Apply `API_TOKEN`, `NODE_ENV` and `PORT` from `lookup`.
///
/// `PORT` also moves `server.public_url` onto that port while it still
/// holds the default `http://localhost:8000`.
pub fn apply_env_overrides<F>(config: &mut AppConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(token) = lookup("API_TOKEN") {
        config.auth.api_token = token;
    }

    if let Some(env) = lookup("NODE_ENV") {
        config.observability.environment = Environment::from_env_value(&env);
    }

    if let Some(port) = lookup("PORT") {
        let port: u16 = port.trim().parse().map_err(|_| ConfigError::Env {
            name: "PORT",
            value: port.clone(),
        })?;
        // An unparsable bind address is left alone for validation to report.
        if let Ok(mut addr) = config.server.bind_address.parse::<SocketAddr>() {
            addr.set_port(port);
            config.server.bind_address = addr.to_string();
        }
        if config.server.public_url == ServerConfig::default().public_url {
            config.server.public_url = format!("http://localhost:{port}");
        }
    }

    Ok(())
}
