//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML files, and
//! every section has defaults so a missing file or section is valid.

use serde::{Deserialize, Serialize};

/// Root configuration for the service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Listener and public URL settings.
    pub server: ServerConfig,

    /// Bearer-token authentication.
    pub auth: AuthConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Security headers, CORS and body limits.
    pub security: SecurityConfig,

    /// Logging and metrics.
    pub observability: ObservabilityConfig,

    /// In-memory store options.
    pub store: StoreConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:8000").
    pub bind_address: String,

    /// Base URL used to build `Location` headers, without trailing slash.
    pub public_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8000".to_string(),
            public_url: "http://localhost:8000".to_string(),
        }
    }
}

/// Authentication configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AuthConfig {
    /// Shared secret expected as the second segment of `Authorization`.
    /// Usually supplied through `API_TOKEN`.
    pub api_token: String,

    /// Request paths served without authentication.
    pub exempt_paths: Vec<String>,
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Security hardening configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Enable security headers.
    pub enable_headers: bool,
    /// Enable permissive CORS.
    pub cors_enabled: bool,
    /// Maximum body size in bytes.
    pub max_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            enable_headers: true,
            cors_enabled: true,
            max_body_size: 100 * 1024, // 100KB
        }
    }
}

/// Deployment environment. Anything other than `production` is treated as
/// development.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    /// Interpret a `NODE_ENV`-style value.
    pub fn from_env_value(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("production") {
            Environment::Production
        } else {
            Environment::Development
        }
    }

    pub fn is_production(self) -> bool {
        self == Environment::Production
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Selects console logging, access log verbosity and error detail.
    pub environment: Environment,

    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// JSON log file. `None` disables the file sink.
    pub log_file: Option<String>,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            log_level: "info".to_string(),
            log_file: Some("info.log".to_string()),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Start with the example card and list.
    pub seed: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { seed: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [auth]
            api_token = "secret"

            [observability]
            environment = "production"
            "#,
        )
        .unwrap();

        assert_eq!(config.auth.api_token, "secret");
        assert!(config.auth.exempt_paths.is_empty());
        assert_eq!(config.server.bind_address, "0.0.0.0:8000");
        assert!(config.observability.environment.is_production());
        assert_eq!(config.security.max_body_size, 100 * 1024);
        assert!(config.store.seed);
    }

    #[test]
    fn test_environment_from_env_value() {
        assert_eq!(Environment::from_env_value("production"), Environment::Production);
        assert_eq!(Environment::from_env_value("Production "), Environment::Production);
        assert_eq!(Environment::from_env_value("development"), Environment::Development);
        assert_eq!(Environment::from_env_value("test"), Environment::Development);
    }
}
