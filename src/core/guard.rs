//! Guard predicates over accumulated answers.
//!
//! A guard decides whether a transition may fire, given the answers
//! recorded so far. Guards are pure and thread-safe so a single engine can
//! serve any number of independent sessions.

use super::answers::AssessmentState;
use super::step::Step;

/// Pure predicate that determines if a transition can fire.
///
/// # Example
///
/// ```rust
/// use hf_triage::core::{Answer, AssessmentState, Guard};
///
/// let has_ef = Guard::new(|s: &AssessmentState| s.ejection_fraction().is_some());
///
/// assert!(!has_ef.check(&AssessmentState::new()));
/// assert!(has_ef.check(&AssessmentState::new().apply(Answer::EjectionFraction(50))));
/// ```
pub struct Guard {
    predicate: Box<dyn Fn(&AssessmentState) -> bool + Send + Sync>,
}

impl Guard {
    /// Create a guard from a pure predicate function.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&AssessmentState) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Box::new(predicate),
        }
    }

    /// Guard that holds once every answer is present.
    pub fn complete() -> Self {
        Self::new(AssessmentState::is_complete)
    }

    /// Guard that holds once `step` and every step before it is answered.
    pub fn answered_through(step: Step) -> Self {
        Self::new(move |s: &AssessmentState| s.require_answered_through(step).is_ok())
    }

    pub fn check(&self, state: &AssessmentState) -> bool {
        (self.predicate)(state)
    }
}

impl std::fmt::Debug for Guard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Guard").finish_non_exhaustive()
    }
}
