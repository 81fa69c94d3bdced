//! Identity collaborator: bearer token in, authenticated owner out.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Resolves the owner behind a bearer token.
///
/// Every assessment read and write is scoped to the `UserId` returned here.
/// Implementations check signature, issuer, audience and expiry, and report:
/// - `AuthError::InvalidToken` for malformed, forged or mis-addressed tokens
/// - `AuthError::TokenExpired` once `exp` has passed
/// - `AuthError::ServiceUnavailable` when the identity source cannot answer
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// `token` is the raw credential without the `Bearer ` prefix.
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;
    use std::sync::Arc;

    struct FixedOwner;

    #[async_trait]
    impl SessionValidator for FixedOwner {
        async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
            match token {
                "student-token" => Ok(AuthenticatedUser::new(
                    UserId::new("student-7").unwrap(),
                    None,
                    None,
                )),
                "stale-token" => Err(AuthError::TokenExpired),
                _ => Err(AuthError::InvalidToken),
            }
        }
    }

    #[tokio::test]
    async fn usable_as_shared_trait_object() {
        let validator: Arc<dyn SessionValidator> = Arc::new(FixedOwner);

        let owner = validator.validate("student-token").await.unwrap();
        assert_eq!(owner.id.as_str(), "student-7");
        assert!(matches!(
            validator.validate("stale-token").await,
            Err(AuthError::TokenExpired)
        ));
        assert!(matches!(
            validator.validate("nope").await,
            Err(AuthError::InvalidToken)
        ));
    }
}
