//! The assessment state machine.
//!
//! This module wires the pure core into a step-by-step engine:
//!
//! - **Validation**: each question step turns raw text into a typed answer
//! - **Transitions**: an explicit table of guarded edges between steps
//! - **Engine**: `process` validates, records the answer and picks the next
//!   step, or derives the final classification
//!
//! Errors are returned as values; the engine never panics on operator input.

mod machine;
mod transition;
mod validation;

pub use machine::{confirmation_prompt, AssessmentEngine, EngineError, StepOutcome};
pub use transition::{assessment_transitions, Transition, TransitionError};
pub use validation::{validate, ValidationError};
