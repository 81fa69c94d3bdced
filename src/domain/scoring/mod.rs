//! Scoring module - the pure engine functions.
//!
//! - `validator` - raw JSON → typed responses, collecting every violation
//! - `aggregator` - typed responses → per-section score vector
//! - `interpretation` - per-section text and recommendations
//! - `synthesizer` - three score vectors → composite result

mod aggregator;
mod interpretation;
mod responses;
mod synthesizer;
mod validator;

pub use aggregator::{score, BrainScores, RiasecScores, SectionScores, StepsScores};
pub use interpretation::{interpret, SectionInterpretation};
pub use responses::{
    BrainResponses, InterestResponses, PersonalInsights, SectionResponses, StepsResponses,
};
pub use synthesizer::{
    holland_code, synthesize, CompositeResult, EmployabilityBand, NO_SKILL_GAPS,
};
pub use validator::{BrainProfileScoring, ResponseValidator, ValidationReport};
