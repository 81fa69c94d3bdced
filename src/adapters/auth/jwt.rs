//! HS256 JWT adapter for bearer token validation.
//!
//! Implements the `SessionValidator` port for tokens signed with a shared
//! secret by the platform's identity service. Validates:
//!
//! - **Signature**: HS256 with the configured secret
//! - **Issuer (iss)**: Must match the configured issuer
//! - **Audience (aud)**: Must contain the configured audience
//! - **Expiry (exp)**: Must be in the future

use async_trait::async_trait;
use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::ports::SessionValidator;

/// Configuration for the JWT adapter.
#[derive(Clone)]
pub struct JwtConfig {
    /// Shared HS256 signing secret.
    pub secret: SecretString,

    /// Expected issuer claim.
    pub issuer: String,

    /// Expected audience claim.
    pub audience: String,
}

impl JwtConfig {
    /// Create a new configuration.
    pub fn new(
        secret: SecretString,
        issuer: impl Into<String>,
        audience: impl Into<String>,
    ) -> Self {
        Self {
            secret,
            issuer: issuer.into(),
            audience: audience.into(),
        }
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .finish_non_exhaustive()
    }
}

/// Claims issued by the identity service.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - the user ID
    pub sub: String,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    /// Expiry timestamp (Unix epoch seconds)
    pub exp: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// HS256 JWT session validator.
pub struct JwtSessionValidator {
    config: JwtConfig,
    decoding_key: DecodingKey,
}

impl JwtSessionValidator {
    pub fn new(config: JwtConfig) -> Self {
        let decoding_key = DecodingKey::from_secret(config.secret.expose_secret().as_bytes());
        Self {
            config,
            decoding_key,
        }
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_audience(&[&self.config.audience]);
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);
        validation
    }
}

#[async_trait]
impl SessionValidator for JwtSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation())
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => {
                    tracing::debug!("Token expired");
                    AuthError::TokenExpired
                }
                ErrorKind::InvalidIssuer => {
                    tracing::warn!("Invalid issuer in token");
                    AuthError::InvalidToken
                }
                ErrorKind::InvalidAudience => {
                    tracing::warn!("Invalid audience in token");
                    AuthError::InvalidToken
                }
                _ => {
                    tracing::warn!("Token validation failed: {}", e);
                    AuthError::InvalidToken
                }
            })?;
        let claims = token_data.claims;

        let user_id = UserId::new(&claims.sub).map_err(|_| {
            tracing::warn!("Invalid user ID in token: {:?}", claims.sub);
            AuthError::InvalidToken
        })?;

        Ok(AuthenticatedUser::new(user_id, claims.email, claims.name))
    }
}

impl std::fmt::Debug for JwtSessionValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtSessionValidator")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
