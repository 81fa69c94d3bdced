//! Domain layer containing the assessment engine.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, enums, errors)
//! - `instrument` - The four instruments and their versioned catalog
//! - `scoring` - Pure validator, aggregator, interpretation and synthesizer
//! - `assessment` - Assessment session aggregate and lifecycle

pub mod assessment;
pub mod foundation;
pub mod instrument;
pub mod scoring;
