//! Instrument module - the four psychometric instruments and their catalog.
//!
//! - `InstrumentType` - tagged variant selecting validator/aggregator per section
//! - `RiasecCategory`, `BrainQuadrant`, `StepsCategory` - category vocabularies
//! - `catalog` - versioned question tables (no state)

pub mod catalog;
mod categories;
mod instrument_type;

pub use catalog::CATALOG_VERSION;
pub use categories::{BrainQuadrant, RiasecCategory, StepsCategory};
pub use instrument_type::InstrumentType;
