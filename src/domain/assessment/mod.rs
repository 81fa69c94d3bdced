//! Assessment module - the session state machine.
//!
//! - `AssessmentSession` - one attempt, owning per-section results
//! - `SessionTransition` - what a mutation did
//! - `AssessmentProgress` - completion projection returned to clients
//! - `AssessmentError` - validation/state/consistency taxonomy

mod aggregate;
mod errors;
mod progress;
mod section;
mod transition;

pub use aggregate::AssessmentSession;
pub use errors::AssessmentError;
pub use progress::{AssessmentProgress, SectionsCompleted};
pub use section::SectionRecord;
pub use transition::SessionTransition;
