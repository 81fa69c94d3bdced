//! Authentication configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Minimum HS256 secret length.
pub const MIN_JWT_SECRET_CHARS: usize = 32;

/// Authentication configuration (HS256 bearer tokens)
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Shared signing secret of the identity service
    pub jwt_secret: Option<SecretString>,

    /// Expected issuer for tokens
    #[serde(default = "default_issuer")]
    pub issuer: String,

    /// Expected audience for tokens
    #[serde(default = "default_audience")]
    pub audience: String,

    /// Static bearer token accepted outside production (local development)
    pub dev_token: Option<String>,

    /// User the development token authenticates as
    #[serde(default = "default_dev_user")]
    pub dev_user: String,
}

impl AuthConfig {
    /// True when the mock validator with `dev_token` should be used.
    pub fn uses_dev_token(&self) -> bool {
        self.jwt_secret.is_none() && self.dev_token.is_some()
    }

    /// Validate authentication configuration
    ///
    /// Production requires a JWT secret and forbids development tokens.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if *environment == Environment::Production && self.dev_token.is_some() {
            return Err(ValidationError::DevTokenInProduction);
        }

        match &self.jwt_secret {
            Some(secret) if secret.expose_secret().chars().count() < MIN_JWT_SECRET_CHARS => {
                return Err(ValidationError::WeakJwtSecret(MIN_JWT_SECRET_CHARS));
            }
            Some(_) => {}
            None if self.dev_token.is_none() => {
                return Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"));
            }
            None => {}
        }

        if self.issuer.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__ISSUER"));
        }
        if self.audience.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__AUDIENCE"));
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            issuer: default_issuer(),
            audience: default_audience(),
            dev_token: None,
            dev_user: default_dev_user(),
        }
    }
}

fn default_issuer() -> String {
    "mentor-platform".to_string()
}

fn default_audience() -> String {
    "mentor-assessment".to_string()
}

fn default_dev_user() -> String {
    "dev-user".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret(value: &str) -> Option<SecretString> {
        Some(SecretString::new(value.to_string()))
    }

    #[test]
    fn test_validation_missing_secret() {
        let config = AuthConfig::default();
        assert_eq!(
            config.validate(&Environment::Development),
            Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"))
        );
    }

    #[test]
    fn test_validation_short_secret() {
        let config = AuthConfig {
            jwt_secret: secret("too-short"),
            ..Default::default()
        };
        assert_eq!(
            config.validate(&Environment::Development),
            Err(ValidationError::WeakJwtSecret(MIN_JWT_SECRET_CHARS))
        );
    }

    #[test]
    fn test_dev_token_allowed_only_outside_production() {
        let config = AuthConfig {
            dev_token: Some("local".to_string()),
            ..Default::default()
        };
        assert!(config.validate(&Environment::Development).is_ok());
        assert!(config.uses_dev_token());
        assert_eq!(
            config.validate(&Environment::Production),
            Err(ValidationError::DevTokenInProduction)
        );
    }

    #[test]
    fn test_validation_valid_config() {
        let config = AuthConfig {
            jwt_secret: secret("0123456789abcdef0123456789abcdef"),
            ..Default::default()
        };
        assert!(config.validate(&Environment::Production).is_ok());
        assert!(!config.uses_dev_token());
    }
}
