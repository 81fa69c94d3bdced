//! Listener, logging and CORS settings

use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use super::error::ValidationError;

/// Longest request the service will hold open.
const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub environment: Environment,

    /// `EnvFilter` directive; `RUST_LOG` overrides it.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit logs as JSON lines
    #[serde(default)]
    pub json_logs: bool,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Browser origins allowed to call the API. Empty disables CORS.
    /// From the environment as a comma-separated list.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

/// Deployment environment
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// Configured origins, trimmed, without blanks.
    pub fn allowed_origins(&self) -> impl Iterator<Item = &str> {
        self.cors_origins
            .iter()
            .map(|origin| origin.trim())
            .filter(|origin| !origin.is_empty())
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        if self.request_timeout_secs == 0 || self.request_timeout_secs > MAX_REQUEST_TIMEOUT_SECS {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.is_production() && self.allowed_origins().any(|origin| origin == "*") {
            return Err(ValidationError::WildcardOriginInProduction);
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            environment: Environment::default(),
            log_level: default_log_level(),
            json_logs: false,
            request_timeout_secs: default_request_timeout(),
            cors_origins: Vec::new(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info,mentor_assessment=debug,sqlx=warn".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_bind_all_interfaces() {
        let config = ServerConfig::default();
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_allowed_origins_skip_blanks() {
        let config = ServerConfig {
            cors_origins: vec![
                " https://mentor.example ".to_string(),
                String::new(),
                "http://localhost:5173".to_string(),
            ],
            ..Default::default()
        };
        let origins: Vec<&str> = config.allowed_origins().collect();
        assert_eq!(origins, vec!["https://mentor.example", "http://localhost:5173"]);
    }

    #[test]
    fn test_wildcard_origin_only_outside_production() {
        let mut config = ServerConfig {
            cors_origins: vec!["*".to_string()],
            ..Default::default()
        };
        assert!(config.validate().is_ok());

        config.environment = Environment::Production;
        assert_eq!(
            config.validate(),
            Err(ValidationError::WildcardOriginInProduction)
        );
    }

    #[test]
    fn test_port_and_timeout_bounds() {
        let zero_port = ServerConfig {
            port: 0,
            ..Default::default()
        };
        assert_eq!(zero_port.validate(), Err(ValidationError::InvalidPort));

        for secs in [0, 301] {
            let config = ServerConfig {
                request_timeout_secs: secs,
                ..Default::default()
            };
            assert_eq!(config.validate(), Err(ValidationError::InvalidTimeout));
        }
    }
}
