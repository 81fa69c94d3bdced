//! Mock authentication adapter for tests and local development.
//!
//! Implements the `SessionValidator` port without a real identity service.
//!
//! # Example
//!
//! ```ignore
//! let validator = MockSessionValidator::new().with_test_user("token-a", "user-a");
//! let user = validator.validate("token-a").await?;
//! ```

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::ports::SessionValidator;

/// Mock session validator.
///
/// Stores a map of tokens to users. Tokens not in the map return `InvalidToken`.
#[derive(Debug, Default)]
pub struct MockSessionValidator {
    /// Map of valid tokens to their associated users
    tokens: RwLock<HashMap<String, AuthenticatedUser>>,
    /// Optional error to return for all validations (for error testing)
    force_error: Option<AuthError>,
}

impl MockSessionValidator {
    /// Creates a new empty mock validator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a valid token that maps to a user.
    pub fn with_user(mut self, token: impl Into<String>, user: AuthenticatedUser) -> Self {
        self.tokens.get_mut().insert(token.into(), user);
        self
    }

    /// Adds a valid token for a generated test user.
    ///
    /// Blank user ids are ignored.
    pub fn with_test_user(self, token: impl Into<String>, user_id: impl Into<String>) -> Self {
        let user_id = user_id.into();
        match UserId::new(&user_id) {
            Ok(id) => {
                let user = AuthenticatedUser::new(
                    id,
                    Some(format!("{}@test.example.com", user_id)),
                    Some(format!("Test User {}", user_id)),
                );
                self.with_user(token, user)
            }
            Err(_) => self,
        }
    }

    /// Forces all validations to return the specified error.
    pub fn with_error(mut self, error: AuthError) -> Self {
        self.force_error = Some(error);
        self
    }

    /// Registers a new valid token at runtime.
    pub async fn add_token(&self, token: impl Into<String>, user: AuthenticatedUser) {
        self.tokens.write().await.insert(token.into(), user);
    }

    /// Returns the number of registered valid tokens.
    pub async fn token_count(&self) -> usize {
        self.tokens.read().await.len()
    }
}

#[async_trait]
impl SessionValidator for MockSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        if let Some(error) = &self.force_error {
            return Err(error.clone());
        }

        self.tokens
            .read()
            .await
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn registered_token_returns_user() {
        let validator = MockSessionValidator::new().with_test_user("token-1", "user-1");

        let user = validator.validate("token-1").await.unwrap();

        assert_eq!(user.id.as_str(), "user-1");
        assert_eq!(user.email.as_deref(), Some("user-1@test.example.com"));
    }

    #[tokio::test]
    async fn unknown_token_is_invalid() {
        let validator = MockSessionValidator::new();
        assert!(matches!(
            validator.validate("nope").await,
            Err(AuthError::InvalidToken)
        ));
    }

    #[tokio::test]
    async fn forced_error_wins() {
        let validator = MockSessionValidator::new()
            .with_test_user("token-1", "user-1")
            .with_error(AuthError::service_unavailable("down"));

        assert!(matches!(
            validator.validate("token-1").await,
            Err(AuthError::ServiceUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn tokens_can_be_added_at_runtime() {
        let validator = MockSessionValidator::new();
        validator
            .add_token(
                "late",
                AuthenticatedUser::new(UserId::new("user-9").unwrap(), None, None),
            )
            .await;

        assert_eq!(validator.token_count().await, 1);
        assert!(validator.validate("late").await.is_ok());
    }
}
