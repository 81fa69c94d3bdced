//! Authentication adapters.
//!
//! Implementations of the `SessionValidator` port:
//!
//! - `jwt` - HS256 JWT validation against the platform identity service
//! - `mock` - Test implementation that doesn't require external services

mod jwt;
mod mock;

pub use jwt::{Claims, JwtConfig, JwtSessionValidator};
pub use mock::MockSessionValidator;
