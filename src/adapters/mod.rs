//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `auth` - Bearer token validation (JWT, mock)
//! - `http` - REST API (axum)
//! - `memory` - In-memory storage for tests and local development
//! - `postgres` - PostgreSQL storage

pub mod auth;
pub mod http;
pub mod memory;
pub mod postgres;

pub use auth::{JwtConfig, JwtSessionValidator, MockSessionValidator};
pub use memory::InMemoryAssessmentRepository;
pub use postgres::PostgresAssessmentRepository;
