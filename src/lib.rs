//! Mentor Assessment - Multi-Section Psychometric Assessment Engine
//!
//! Administers four instruments (interest inventory, brain profile,
//! employability skills, personal insights), scores each section as it is
//! submitted, and synthesizes a composite profile once all four are in.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod server;
pub mod telemetry;
