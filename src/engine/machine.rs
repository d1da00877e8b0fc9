//! The assessment engine.

use crate::core::{
    AssessmentState, ClassificationResult, CompleteAssessment, EfThresholds, IncompleteStateError,
    Step, UnknownStepError,
};
use crate::engine::transition::{assessment_transitions, Transition, TransitionError};
use crate::engine::validation::{validate, ValidationError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, info};

/// Result of processing one response.
///
/// Serializes to `{"nextStep": .., "prompt": ..}` or
/// `{"classification": .., "recommendation": ..}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StepOutcome {
    /// The answer was accepted; ask the next question
    #[serde(rename_all = "camelCase")]
    Prompt { next_step: Step, prompt: String },

    /// The assessment is finished
    Complete(ClassificationResult),
}

impl StepOutcome {
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete(_))
    }
}

/// Everything the engine can reject.
///
/// `Validation` and `UnknownStep` are operator-facing and recoverable.
/// `IncompleteState` and `Transition` mean the caller drove the engine out
/// of order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    UnknownStep(#[from] UnknownStepError),

    #[error(transparent)]
    IncompleteState(#[from] IncompleteStateError),

    #[error(transparent)]
    Transition(#[from] TransitionError),
}

impl EngineError {
    /// Whether re-prompting the operator is the right response.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::UnknownStep(_))
    }
}

/// Step-wise heart-failure assessment.
///
/// The engine holds no per-assessment data: answers live in the
/// caller-owned [`AssessmentState`], so one engine can serve any number of
/// independent assessments.
///
/// # Example
///
/// ```rust
/// use hf_triage::core::{AssessmentState, Classification, Step};
/// use hf_triage::engine::{AssessmentEngine, StepOutcome};
///
/// let engine = AssessmentEngine::default();
/// let state = AssessmentState::new();
///
/// let (outcome, state) = engine.process("step1", "30", &state).unwrap();
/// assert!(matches!(outcome, StepOutcome::Prompt { next_step: Step::Step2, .. }));
///
/// let (_, state) = engine.process("step2", "yes", &state).unwrap();
/// let (_, state) = engine.process("step3", "severe", &state).unwrap();
///
/// let (outcome, _) = engine.process("classification", "", &state).unwrap();
/// match outcome {
///     StepOutcome::Complete(result) => {
///         assert_eq!(result.classification, Classification::HfREf);
///         assert!(result.has_urgent_advisory());
///     }
///     _ => panic!("expected a classification"),
/// }
/// ```
#[derive(Debug)]
pub struct AssessmentEngine {
    transitions: Vec<Transition>,
    thresholds: EfThresholds,
}

impl Default for AssessmentEngine {
    fn default() -> Self {
        Self::with_thresholds(EfThresholds::default())
    }
}

impl AssessmentEngine {
    /// Thresholds are trusted here; `EngineBuilder` validates them.
    pub(crate) fn with_thresholds(thresholds: EfThresholds) -> Self {
        Self {
            transitions: assessment_transitions(),
            thresholds,
        }
    }

    pub fn thresholds(&self) -> &EfThresholds {
        &self.thresholds
    }

    /// The first step and its question.
    pub fn initial_prompt(&self) -> (Step, &'static str) {
        let step = Step::INITIAL;
        (step, step.prompt().unwrap_or_default())
    }

    /// Process a response given the step identifier used on the wire.
    ///
    /// Unknown identifiers are rejected without touching `state`.
    pub fn process(
        &self,
        current_step: &str,
        response: &str,
        state: &AssessmentState,
    ) -> Result<(StepOutcome, AssessmentState), EngineError> {
        let step = current_step.parse::<Step>().map_err(|err| {
            debug!(step = %err.step, "rejected unknown step");
            err
        })?;
        self.process_step(step, response, state)
    }

    /// Process a response for an already-parsed step.
    ///
    /// On success returns the outcome and the updated answers. On any error
    /// the caller's state is unchanged (it is only ever borrowed). Answering a
    /// step whose earlier answers are absent is an `IncompleteState` error
    /// naming them.
    pub fn process_step(
        &self,
        step: Step,
        response: &str,
        state: &AssessmentState,
    ) -> Result<(StepOutcome, AssessmentState), EngineError> {
        if step.is_final() {
            let result = self.classify(state)?;
            return Ok((StepOutcome::Complete(result), *state));
        }

        let answer = validate(step, response).map_err(|err| {
            debug!(%step, error = %err, "response failed validation");
            err
        })?;
        let updated = state.apply(answer);
        updated.require_answered_through(step).map_err(|err| {
            error!(%step, error = %err, "step answered before earlier steps");
            err
        })?;
        let next_step = self.next_step(step, &updated)?;
        debug!(from = %step, to = %next_step, ?answer, "answer accepted");

        let prompt = match next_step.prompt() {
            Some(prompt) => prompt.to_string(),
            None => confirmation_prompt(&updated.require_complete()?),
        };

        Ok((StepOutcome::Prompt { next_step, prompt }, updated))
    }

    /// Derive the classification from completed answers.
    ///
    /// Incomplete answers are a contract violation and are reported, never
    /// defaulted.
    pub fn classify(&self, state: &AssessmentState) -> Result<ClassificationResult, EngineError> {
        let assessment = state.require_complete().map_err(|err| {
            error!(error = %err, "classification requested before all answers were collected");
            err
        })?;

        let result = ClassificationResult::from_assessment(&assessment, &self.thresholds);
        info!(
            classification = %result.classification,
            urgent = result.has_urgent_advisory(),
            "assessment classified"
        );
        Ok(result)
    }

    fn next_step(&self, from: Step, state: &AssessmentState) -> Result<Step, TransitionError> {
        self.transitions
            .iter()
            .find(|t| t.can_execute(from, state))
            .map(|t| t.to)
            .ok_or_else(|| {
                error!(%from, "no transition fired");
                TransitionError::NoTransition { from }
            })
    }
}

/// Summary shown once every answer is in, before the result.
pub fn confirmation_prompt(assessment: &CompleteAssessment) -> String {
    format!(
        "Please confirm the following:\nEF: {}%, Symptoms: {}, Severity: {}",
        assessment.ejection_fraction,
        if assessment.has_symptoms { "yes" } else { "no" },
        assessment.severity
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Answer, Classification, MissingAnswer, Severity};

    fn run(responses: [&str; 3]) -> (ClassificationResult, AssessmentState) {
        let engine = AssessmentEngine::default();
        let mut state = AssessmentState::new();
        for (step, response) in ["step1", "step2", "step3"].into_iter().zip(responses) {
            let (_, next) = engine.process(step, response, &state).unwrap();
            state = next;
        }
        match engine.process("classification", "", &state).unwrap() {
            (StepOutcome::Complete(result), state) => (result, state),
            (other, _) => panic!("expected classification, got {other:?}"),
        }
    }

    #[test]
    fn step1_stores_ef_and_prompts_step2() {
        let engine = AssessmentEngine::default();
        let (outcome, state) = engine.process("step1", "55", &AssessmentState::new()).unwrap();

        assert_eq!(
            outcome,
            StepOutcome::Prompt {
                next_step: Step::Step2,
                prompt: Step::Step2.prompt().unwrap().to_string(),
            }
        );
        assert_eq!(state.ejection_fraction(), Some(55));
    }

    #[test]
    fn invalid_ef_stays_on_step1_without_state_change() {
        let engine = AssessmentEngine::default();
        let state = AssessmentState::new();

        let err = engine.process("step1", "150", &state).unwrap_err();

        assert!(err.is_recoverable());
        match err {
            EngineError::Validation(err) => assert_eq!(err.step, Step::Step1),
            other => panic!("expected validation error, got {other:?}"),
        }
        assert!(state.is_empty());
    }

    #[test]
    fn repeated_invalid_input_yields_same_error() {
        let engine = AssessmentEngine::default();
        let state = AssessmentState::new().apply(Answer::EjectionFraction(40));

        let first = engine.process("step2", "maybe", &state).unwrap_err();
        let second = engine.process("step2", "maybe", &state).unwrap_err();

        assert_eq!(first, second);
        assert_eq!(state.ejection_fraction(), Some(40));
        assert_eq!(state.has_symptoms(), None);
    }

    #[test]
    fn unknown_step_is_rejected() {
        let engine = AssessmentEngine::default();
        let err = engine
            .process("step9", "55", &AssessmentState::new())
            .unwrap_err();

        assert!(err.is_recoverable());
        assert_eq!(err.to_string(), "Invalid step. Please start with 'step1'.");
    }

    #[test]
    fn step3_advances_to_classification_with_confirmation() {
        let engine = AssessmentEngine::default();
        let state = AssessmentState::new()
            .apply(Answer::EjectionFraction(45))
            .apply(Answer::Symptoms(false));

        let (outcome, state) = engine.process("step3", "Mild", &state).unwrap();

        assert_eq!(
            outcome,
            StepOutcome::Prompt {
                next_step: Step::Classification,
                prompt: "Please confirm the following:\nEF: 45%, Symptoms: no, Severity: mild"
                    .to_string(),
            }
        );
        assert_eq!(state.severity(), Some(Severity::Mild));
    }

    #[test]
    fn classification_with_incomplete_state_fails_loudly() {
        let engine = AssessmentEngine::default();
        let state = AssessmentState::new().apply(Answer::EjectionFraction(45));

        let err = engine.process("classification", "", &state).unwrap_err();

        assert!(!err.is_recoverable());
        match err {
            EngineError::IncompleteState(err) => {
                assert_eq!(
                    err.missing,
                    vec![MissingAnswer::Symptoms, MissingAnswer::Severity]
                );
            }
            other => panic!("expected incomplete state, got {other:?}"),
        }
    }

    #[test]
    fn step2_without_ef_is_incomplete() {
        let engine = AssessmentEngine::default();
        let err = engine
            .process("step2", "yes", &AssessmentState::new())
            .unwrap_err();

        assert!(!err.is_recoverable());
        assert_eq!(
            err,
            EngineError::IncompleteState(IncompleteStateError {
                missing: vec![MissingAnswer::EjectionFraction],
            })
        );
    }

    #[test]
    fn step3_names_every_earlier_missing_answer() {
        let engine = AssessmentEngine::default();
        let err = engine
            .process("step3", "mild", &AssessmentState::new())
            .unwrap_err();

        assert_eq!(
            err,
            EngineError::IncompleteState(IncompleteStateError {
                missing: vec![MissingAnswer::EjectionFraction, MissingAnswer::Symptoms],
            })
        );
        assert_eq!(
            err.to_string(),
            "Assessment incomplete, missing: ejection fraction, symptom presence"
        );
    }

    #[test]
    fn classification_ignores_the_raw_response() {
        let (expected, _) = run(["45", "no", "mild"]);
        let engine = AssessmentEngine::default();
        let state = AssessmentState::new()
            .apply(Answer::EjectionFraction(45))
            .apply(Answer::Symptoms(false))
            .apply(Answer::Severity(Severity::Mild));
        let (outcome, _) = engine
            .process("classification", "whatever", &state)
            .unwrap();

        assert_eq!(outcome, StepOutcome::Complete(expected));
    }

    #[test]
    fn boundary_scenarios() {
        assert_eq!(run(["55", "no", "mild"]).0.classification, Classification::AtRiskForHf);
        assert_eq!(run(["55", "yes", "mild"]).0.classification, Classification::HfPef);
        assert_eq!(run(["45", "yes", "mild"]).0.classification, Classification::HfMrEf);
        assert_eq!(run(["45", "no", "mild"]).0.classification, Classification::HfMrEf);

        let (severe, _) = run(["30", "yes", "severe"]);
        assert_eq!(severe.classification, Classification::HfREf);
        assert!(severe.has_urgent_advisory());

        let (mild, _) = run(["30", "yes", "mild"]);
        assert_eq!(mild.classification, Classification::HfREf);
        assert!(!mild.has_urgent_advisory());
    }

    #[test]
    fn end_to_end_moderate_hfpef() {
        let (result, state) = run(["55", "yes", "moderate"]);

        assert_eq!(result.classification, Classification::HfPef);
        assert!(result.has_urgent_advisory());
        assert!(state.is_complete());
    }

    #[test]
    fn custom_thresholds_are_used() {
        let engine = AssessmentEngine::with_thresholds(EfThresholds {
            preserved: 60,
            mildly_reduced: 45,
        });
        let state = AssessmentState::new()
            .apply(Answer::EjectionFraction(55))
            .apply(Answer::Symptoms(true))
            .apply(Answer::Severity(Severity::Mild));

        let result = engine.classify(&state).unwrap();
        assert_eq!(result.classification, Classification::HfMrEf);
    }

    #[test]
    fn initial_prompt_is_step1() {
        let (step, prompt) = AssessmentEngine::default().initial_prompt();
        assert_eq!(step, Step::Step1);
        assert!(prompt.contains("ejection fraction"));
    }

    #[test]
    fn outcome_serializes_to_wire_shapes() {
        let prompt = StepOutcome::Prompt {
            next_step: Step::Step2,
            prompt: "Next?".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&prompt).unwrap(),
            serde_json::json!({ "nextStep": "step2", "prompt": "Next?" })
        );

        let (result, _) = run(["45", "no", "mild"]);
        let complete = StepOutcome::Complete(result);
        assert_eq!(
            serde_json::to_value(&complete).unwrap(),
            serde_json::json!({
                "classification": "HFmrEF",
                "recommendation": "Similar to HFrEF management. Optimize GDMT.",
            })
        );
    }
}
