//! Caller-owned assessment sessions.
//!
//! A session tracks where one assessment is in the dialogue, the answers
//! collected so far and the path taken. Sessions share nothing, so any
//! number can run against the same [`AssessmentEngine`].

use crate::core::{AssessmentHistory, AssessmentState, ClassificationResult, Step, StepTransition};
use crate::engine::{confirmation_prompt, AssessmentEngine, EngineError, StepOutcome};
use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, debug_span};
use uuid::Uuid;

/// What the operator should see after a response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionReply {
    /// Ask the question for `step`
    Prompt { step: Step, prompt: String },

    /// All answers collected: the confirmation summary and the result
    Complete {
        confirmation: String,
        result: ClassificationResult,
    },
}

/// Errors surfaced by a session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Assessment already complete. Restart to begin a new one.")]
    AlreadyComplete,

    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl SessionError {
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::AlreadyComplete => true,
            Self::Engine(err) => err.is_recoverable(),
        }
    }
}

/// One in-flight assessment.
///
/// # Example
///
/// ```rust
/// use hf_triage::core::Classification;
/// use hf_triage::engine::AssessmentEngine;
/// use hf_triage::session::{AssessmentSession, SessionReply};
///
/// let engine = AssessmentEngine::default();
/// let mut session = AssessmentSession::new();
///
/// session.submit(&engine, "55").unwrap();
/// session.submit(&engine, "yes").unwrap();
/// let reply = session.submit(&engine, "moderate").unwrap();
///
/// match reply {
///     SessionReply::Complete { result, .. } => {
///         assert_eq!(result.classification, Classification::HfPef);
///         assert!(result.has_urgent_advisory());
///     }
///     _ => panic!("expected a result"),
/// }
/// assert!(session.is_complete());
/// ```
#[derive(Clone, Debug)]
pub struct AssessmentSession {
    id: Uuid,
    current: Step,
    state: AssessmentState,
    history: AssessmentHistory,
    attempt_count: usize,
    result: Option<ClassificationResult>,
    started_at: DateTime<Utc>,
}

impl Default for AssessmentSession {
    fn default() -> Self {
        Self::new()
    }
}

impl AssessmentSession {
    /// Start a new session at `step1` with a fresh identifier.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            current: Step::INITIAL,
            state: AssessmentState::new(),
            history: AssessmentHistory::new(),
            attempt_count: 0,
            result: None,
            started_at: Utc::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn current_step(&self) -> Step {
        self.current
    }

    pub fn state(&self) -> &AssessmentState {
        &self.state
    }

    pub fn history(&self) -> &AssessmentHistory {
        &self.history
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Responses submitted at the current step so far.
    pub fn attempts_at_current_step(&self) -> usize {
        self.attempt_count
    }

    pub fn result(&self) -> Option<&ClassificationResult> {
        self.result.as_ref()
    }

    pub fn is_complete(&self) -> bool {
        self.result.is_some()
    }

    /// Question for the current step, if one is pending.
    pub fn current_prompt(&self) -> Option<&'static str> {
        self.current.prompt()
    }

    /// Submit the operator's response to the current step.
    ///
    /// Invalid responses leave the step and answers unchanged. Reaching
    /// `classification` computes the result straight away.
    pub fn submit(
        &mut self,
        engine: &AssessmentEngine,
        response: &str,
    ) -> Result<SessionReply, SessionError> {
        let _span = debug_span!(
            "assessment",
            session_id = %self.id,
            step = %self.current
        )
        .entered();

        if self.is_complete() {
            return Err(SessionError::AlreadyComplete);
        }

        self.attempt_count += 1;
        let (outcome, state) = engine.process_step(self.current, response, &self.state)?;

        match outcome {
            StepOutcome::Prompt { next_step, prompt } => {
                self.advance(next_step, state);
                if next_step.is_final() {
                    let result = engine.classify(&self.state)?;
                    return Ok(self.complete(prompt, result));
                }
                Ok(SessionReply::Prompt {
                    step: next_step,
                    prompt,
                })
            }
            StepOutcome::Complete(result) => {
                let assessment = self.state.require_complete().map_err(EngineError::from)?;
                Ok(self.complete(confirmation_prompt(&assessment), result))
            }
        }
    }

    /// Discard all answers and return to `step1`, keeping the identifier.
    pub fn restart(&mut self) {
        debug!(session_id = %self.id, "assessment restarted");
        *self = Self {
            id: self.id,
            ..Self::new()
        };
    }

    fn advance(&mut self, next_step: Step, state: AssessmentState) {
        self.history = self.history.record(StepTransition {
            from: self.current,
            to: next_step,
            timestamp: Utc::now(),
            attempt: self.attempt_count,
        });
        self.current = next_step;
        self.state = state;
        self.attempt_count = 0;
    }

    fn complete(&mut self, confirmation: String, result: ClassificationResult) -> SessionReply {
        debug!(
            classification = %result.classification,
            responses = self.history.total_attempts(),
            "assessment complete"
        );
        self.result = Some(result.clone());
        SessionReply::Complete {
            confirmation,
            result,
        }
    }
}
