//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! .env (optional, fills unset process variables)
//!     → config file (TOML, optional)
//!     → loader.rs (parse & deserialize, or defaults)
//!     → loader.rs (API_TOKEN / NODE_ENV / PORT overrides)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//!     → handed to HttpServer and the logging/metrics setup
//! ```
//!
//! # Design Decisions
//! - Config is read once at startup and never reloaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load, load_config, load_dotenv, ConfigError};
pub use schema::AppConfig;
pub use schema::AuthConfig;
pub use schema::Environment;
pub use schema::ObservabilityConfig;
pub use schema::SecurityConfig;
pub use schema::ServerConfig;
