//! Core assessment types and logic.
//!
//! This module contains the pure domain of the assessment:
//! - Steps of the dialogue and their prompts
//! - Accumulated answers and completeness checks
//! - Guard predicates for transition control
//! - Immutable transition history
//! - Classification and recommendation derivation
//!
//! Nothing in this module performs I/O.

mod answers;
mod classification;
mod guard;
mod history;
mod step;

pub use answers::{
    Answer, AssessmentState, CompleteAssessment, EjectionFractionOutOfRange, IncompleteStateError,
    MissingAnswer, Severity,
};
pub use classification::{
    classify, recommendation, Classification, ClassificationResult, EfThresholds,
    URGENT_CARE_ADVISORY,
};
pub use guard::Guard;
pub use history::{AssessmentHistory, StepTransition};
pub use step::{Step, UnknownStepError};
