//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers (start, submit, abandon, delete) are kept apart from
//! query handlers (get, latest, history).

pub mod handlers;

pub use handlers::*;
