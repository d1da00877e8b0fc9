//! Step transition history.
//!
//! Records the path an assessment took through the dialogue, with
//! timestamps and the number of responses each step needed.

use super::step::Step;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of one accepted step transition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StepTransition {
    /// The step that was answered
    pub from: Step,
    /// The step the assessment moved to
    pub to: Step,
    /// When the answer was accepted
    pub timestamp: DateTime<Utc>,
    /// Responses submitted at `from` up to and including the accepted one
    pub attempt: usize,
}

/// Ordered history of step transitions.
///
/// History is immutable: `record` returns a new history with the
/// transition appended.
///
/// # Example
///
/// ```rust
/// use hf_triage::core::{AssessmentHistory, Step, StepTransition};
/// use chrono::Utc;
///
/// let history = AssessmentHistory::new().record(StepTransition {
///     from: Step::Step1,
///     to: Step::Step2,
///     timestamp: Utc::now(),
///     attempt: 2,
/// });
///
/// assert_eq!(history.get_path(), vec![Step::Step1, Step::Step2]);
/// assert_eq!(history.total_attempts(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AssessmentHistory {
    transitions: Vec<StepTransition>,
}

impl AssessmentHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a transition, returning a new history.
    pub fn record(&self, transition: StepTransition) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
    }

    /// Steps visited, in order: the first `from`, then every `to`.
    pub fn get_path(&self) -> Vec<Step> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.first() {
            path.push(first.from);
        }
        path.extend(self.transitions.iter().map(|t| t.to));
        path
    }

    /// Time between the first and last accepted answers.
    ///
    /// Returns `None` if nothing has been recorded.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.transitions.first()?, self.transitions.last()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    /// Total responses submitted across all recorded transitions.
    pub fn total_attempts(&self) -> usize {
        self.transitions.iter().map(|t| t.attempt).sum()
    }

    pub fn transitions(&self) -> &[StepTransition] {
        &self.transitions
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}
