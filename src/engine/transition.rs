//! The assessment transition table.

use crate::core::{AssessmentState, Guard, Step};
use thiserror::Error;

/// Errors raised when the transition table cannot move the assessment on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("No transition available from step '{from}'")]
    NoTransition { from: Step },
}

/// An edge of the assessment machine.
///
/// The edge fires when the current step equals `from` and the guard (if
/// any) holds for the answers recorded so far.
#[derive(Debug)]
pub struct Transition {
    pub from: Step,
    pub to: Step,
    pub guard: Option<Guard>,
}

impl Transition {
    pub fn new(from: Step, to: Step, guard: Guard) -> Self {
        Self {
            from,
            to,
            guard: Some(guard),
        }
    }

    /// Check if this transition can fire from the current step (pure).
    pub fn can_execute(&self, current: Step, state: &AssessmentState) -> bool {
        if current != self.from {
            return false;
        }

        self.guard.as_ref().is_none_or(|g| g.check(state))
    }
}

/// The fixed dialogue: `step1 -> step2 -> step3 -> classification`.
///
/// Each edge requires the answer collected at its source step and every
/// answer collected before it.
pub fn assessment_transitions() -> Vec<Transition> {
    vec![
        Transition::new(Step::Step1, Step::Step2, Guard::answered_through(Step::Step1)),
        Transition::new(Step::Step2, Step::Step3, Guard::answered_through(Step::Step2)),
        Transition::new(Step::Step3, Step::Classification, Guard::complete()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Answer, Severity};

    fn fire(current: Step, state: &AssessmentState) -> Option<Step> {
        assessment_transitions()
            .iter()
            .find(|t| t.can_execute(current, state))
            .map(|t| t.to)
    }

    #[test]
    fn can_execute_matches_from_step() {
        let transition = Transition {
            from: Step::Step1,
            to: Step::Step2,
            guard: None,
        };

        assert!(transition.can_execute(Step::Step1, &AssessmentState::new()));
        assert!(!transition.can_execute(Step::Step2, &AssessmentState::new()));
    }

    #[test]
    fn table_follows_dialogue_order() {
        let state = AssessmentState::new().apply(Answer::EjectionFraction(50));
        assert_eq!(fire(Step::Step1, &state), Some(Step::Step2));

        let state = state.apply(Answer::Symptoms(true));
        assert_eq!(fire(Step::Step2, &state), Some(Step::Step3));

        let state = state.apply(Answer::Severity(Severity::Mild));
        assert_eq!(fire(Step::Step3, &state), Some(Step::Classification));
    }

    #[test]
    fn guards_block_unanswered_steps() {
        let empty = AssessmentState::new();
        assert_eq!(fire(Step::Step1, &empty), None);
        assert_eq!(fire(Step::Step2, &empty), None);

        // Symptoms without an ejection fraction cannot leave step2
        let symptoms_only = empty.apply(Answer::Symptoms(true));
        assert_eq!(fire(Step::Step2, &symptoms_only), None);

        // Severity alone is not enough to reach classification
        let severity_only = empty.apply(Answer::Severity(Severity::Severe));
        assert_eq!(fire(Step::Step3, &severity_only), None);
    }

    #[test]
    fn classification_has_no_outgoing_edge() {
        let state = AssessmentState::new()
            .apply(Answer::EjectionFraction(30))
            .apply(Answer::Symptoms(true))
            .apply(Answer::Severity(Severity::Mild));

        assert_eq!(fire(Step::Classification, &state), None);
    }

    #[test]
    fn no_backward_or_skipping_edges() {
        for transition in assessment_transitions() {
            let from = Step::ALL.iter().position(|s| *s == transition.from);
            let to = Step::ALL.iter().position(|s| *s == transition.to);
            assert_eq!(to, from.map(|i| i + 1));
        }
    }
}
