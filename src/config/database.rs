//! Database configuration
//!
//! Optional: without a `database` section the service uses the in-memory store.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Hard ceiling on the pool size.
const MAX_POOL_SIZE: u32 = 100;

/// PostgreSQL storage settings.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Connection URL. Carries credentials, so it never appears in logs.
    pub url: SecretString,

    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Seconds to wait for a pooled connection
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,

    /// Milliseconds a submission waits on a locked assessment row before
    /// failing. Racing final submissions queue on this lock.
    #[serde(default = "default_lock_timeout")]
    pub lock_timeout_ms: u64,

    /// Apply `migrations/` on startup
    #[serde(default = "default_run_migrations")]
    pub run_migrations: bool,
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: SecretString::new(url.into()),
            min_connections: default_min_connections(),
            max_connections: default_max_connections(),
            acquire_timeout_secs: default_acquire_timeout(),
            lock_timeout_ms: default_lock_timeout(),
            run_migrations: default_run_migrations(),
        }
    }

    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    /// Session setting applied to every new connection.
    pub fn lock_timeout_statement(&self) -> String {
        format!("SET lock_timeout = {}", self.lock_timeout_ms)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let url = self.url.expose_secret();
        if url.is_empty() {
            return Err(ValidationError::MissingRequired("DATABASE__URL"));
        }
        if !url.starts_with("postgres://") && !url.starts_with("postgresql://") {
            return Err(ValidationError::InvalidDatabaseUrl);
        }
        if self.min_connections > self.max_connections || self.max_connections == 0 {
            return Err(ValidationError::InvalidPoolSize);
        }
        if self.max_connections > MAX_POOL_SIZE {
            return Err(ValidationError::PoolSizeTooLarge);
        }
        if self.acquire_timeout_secs == 0 || self.lock_timeout_ms == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

fn default_min_connections() -> u32 {
    1
}

fn default_max_connections() -> u32 {
    10
}

fn default_acquire_timeout() -> u64 {
    30
}

fn default_lock_timeout() -> u64 {
    5_000
}

fn default_run_migrations() -> bool {
    true
}
