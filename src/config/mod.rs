//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `MENTOR_ASSESSMENT` prefix and nested values are separated by double underscores.
//!
//! # Example
//!
//! ```no_run
//! use mentor_assessment::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod assessment;
mod auth;
mod database;
mod error;
mod server;

pub use assessment::AssessmentConfig;
pub use auth::{AuthConfig, MIN_JWT_SECRET_CHARS};
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Prefix of every environment variable the service reads.
pub const ENV_PREFIX: &str = "MENTOR_ASSESSMENT";

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, logging)
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration; absent means the in-memory store
    #[serde(default)]
    pub database: Option<DatabaseConfig>,

    /// Authentication configuration
    #[serde(default)]
    pub auth: AuthConfig,

    /// Assessment engine configuration
    #[serde(default)]
    pub assessment: AssessmentConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// - `MENTOR_ASSESSMENT__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `MENTOR_ASSESSMENT__DATABASE__URL=...` -> `database.url = ...`
    /// - `MENTOR_ASSESSMENT__ASSESSMENT__BRAIN_PROFILE_SCORING=forced_rank`
    /// - `MENTOR_ASSESSMENT__SERVER__CORS_ORIGINS=https://a.example,https://b.example`
    ///
    /// A `.env` file is read first when present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.cors_origins")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        if let Some(database) = &self.database {
            database.validate()?;
        }
        self.auth.validate(&self.server.environment)?;
        self.assessment.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
