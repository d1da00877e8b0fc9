//! hf-triage: a pure step-wise heart-failure assessment engine
//!
//! hf-triage follows the "pure core, imperative shell" philosophy. The
//! engine walks an operator through three questions (ejection fraction,
//! symptom presence, symptom severity), validates every answer, and derives
//! a heart-failure classification with a management recommendation. It
//! performs no I/O: prompting, display and the read loop belong to the
//! caller.
//!
//! # Core Concepts
//!
//! - **Step**: the dialogue positions `step1 -> step2 -> step3 -> classification`
//! - **AssessmentState**: caller-owned answers, replaced rather than mutated
//! - **Transitions**: an explicit table of guarded edges between steps
//! - **Classification**: HFpEF / HFmrEF / HFrEF / at risk, plus recommendation
//! - **Session**: optional driver tracking one assessment end to end
//!
//! # Example
//!
//! ```rust
//! use hf_triage::core::{AssessmentState, Classification, Step};
//! use hf_triage::engine::{AssessmentEngine, StepOutcome};
//!
//! let engine = AssessmentEngine::default();
//! let state = AssessmentState::new();
//!
//! // Invalid input re-prompts and leaves the state alone
//! assert!(engine.process("step1", "fifty", &state).is_err());
//!
//! let (_, state) = engine.process("step1", "55", &state).unwrap();
//! let (_, state) = engine.process("step2", "yes", &state).unwrap();
//! let (outcome, state) = engine.process("step3", "moderate", &state).unwrap();
//! assert!(matches!(outcome, StepOutcome::Prompt { next_step: Step::Classification, .. }));
//!
//! let (outcome, _) = engine.process("classification", "", &state).unwrap();
//! if let StepOutcome::Complete(result) = outcome {
//!     assert_eq!(result.classification, Classification::HfPef);
//!     assert!(result.has_urgent_advisory());
//! }
//! ```

pub mod builder;
pub mod core;
pub mod engine;
pub mod session;

// Re-export commonly used types
pub use crate::builder::{BuildError, EngineBuilder, EngineConfig};
pub use crate::core::{AssessmentState, Classification, ClassificationResult, Severity, Step};
pub use crate::engine::{AssessmentEngine, EngineError, StepOutcome};
pub use crate::session::{AssessmentSession, SessionError, SessionReply};
