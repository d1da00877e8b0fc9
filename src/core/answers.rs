//! Accumulated assessment answers.
//!
//! `AssessmentState` is an immutable value owned by the caller. Applying a
//! validated answer returns a new state; the original is left untouched.

use crate::core::Step;
use serde::{Deserialize, Serialize};
use std::fmt;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// Reported severity of heart-failure symptoms.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Mild,
    Moderate,
    Severe,
}

impl Severity {
    /// Every severity, mildest first.
    pub const ALL: [Severity; 3] = [Severity::Mild, Severity::Moderate, Severity::Severe];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mild => "mild",
            Self::Moderate => "moderate",
            Self::Severe => "severe",
        }
    }

    /// Moderate and severe symptoms warrant the urgent-care advisory.
    pub fn requires_urgent_care(&self) -> bool {
        matches!(self, Self::Moderate | Self::Severe)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated response to one question step.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
pub enum Answer {
    /// Ejection fraction percentage, always within 0..=100
    EjectionFraction(u8),
    /// Whether signs or symptoms of heart failure are present
    Symptoms(bool),
    Severity(Severity),
}

/// An answer that has not been collected yet.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum MissingAnswer {
    EjectionFraction,
    Symptoms,
    Severity,
}

impl fmt::Display for MissingAnswer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::EjectionFraction => "ejection fraction",
            Self::Symptoms => "symptom presence",
            Self::Severity => "symptom severity",
        };
        f.write_str(label)
    }
}

/// Classification was requested before every answer was collected.
///
/// This signals a defect in whatever drives the engine, not bad operator
/// input: the engine's own transitions never reach classification early.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Assessment incomplete, missing: {}", format_missing(.missing))]
pub struct IncompleteStateError {
    /// Every answer that is still absent, in step order
    pub missing: Vec<MissingAnswer>,
}

fn format_missing(missing: &[MissingAnswer]) -> String {
    missing
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// A deserialized state carried an ejection fraction above 100.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("ejection fraction {0} is outside 0..=100")]
pub struct EjectionFractionOutOfRange(pub u8);

/// All three answers, guaranteed present.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct CompleteAssessment {
    pub ejection_fraction: u8,
    pub has_symptoms: bool,
    pub severity: Severity,
}

/// Answers collected so far in one assessment.
///
/// # Example
///
/// ```rust
/// use hf_triage::core::{Answer, AssessmentState, Severity};
///
/// let state = AssessmentState::new();
/// assert!(state.require_complete().is_err());
///
/// let state = state
///     .apply(Answer::EjectionFraction(45))
///     .apply(Answer::Symptoms(true))
///     .apply(Answer::Severity(Severity::Mild));
///
/// let complete = state.require_complete().unwrap();
/// assert_eq!(complete.ejection_fraction, 45);
/// ```
///
/// Deserializing rejects an ejection fraction above 100, so a state held by
/// a caller between requests cannot smuggle in an unvalidated answer.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(try_from = "RawAssessmentState")]
pub struct AssessmentState {
    ejection_fraction: Option<u8>,
    has_symptoms: Option<bool>,
    severity: Option<Severity>,
}

#[derive(Deserialize)]
struct RawAssessmentState {
    ejection_fraction: Option<u8>,
    has_symptoms: Option<bool>,
    severity: Option<Severity>,
}

impl TryFrom<RawAssessmentState> for AssessmentState {
    type Error = EjectionFractionOutOfRange;

    fn try_from(raw: RawAssessmentState) -> Result<Self, Self::Error> {
        match raw.ejection_fraction {
            Some(ef) if ef > 100 => Err(EjectionFractionOutOfRange(ef)),
            ejection_fraction => Ok(Self {
                ejection_fraction,
                has_symptoms: raw.has_symptoms,
                severity: raw.severity,
            }),
        }
    }
}

impl AssessmentState {
    /// Create an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a validated answer, returning a new state.
    ///
    /// Re-applying an answer of the same kind replaces the previous value.
    pub fn apply(&self, answer: Answer) -> Self {
        let mut next = *self;
        match answer {
            Answer::EjectionFraction(ef) => next.ejection_fraction = Some(ef),
            Answer::Symptoms(present) => next.has_symptoms = Some(present),
            Answer::Severity(severity) => next.severity = Some(severity),
        }
        next
    }

    pub fn ejection_fraction(&self) -> Option<u8> {
        self.ejection_fraction
    }

    pub fn has_symptoms(&self) -> Option<bool> {
        self.has_symptoms
    }

    pub fn severity(&self) -> Option<Severity> {
        self.severity
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn is_complete(&self) -> bool {
        self.require_complete().is_ok()
    }

    /// Check that every answer collected at or before `step` is present.
    ///
    /// Question steps build on earlier answers, so answering step3 requires
    /// the ejection fraction and symptom presence to be known already.
    pub fn require_answered_through(&self, step: Step) -> Result<(), IncompleteStateError> {
        let required: &[MissingAnswer] = match step {
            Step::Step1 => &[MissingAnswer::EjectionFraction],
            Step::Step2 => &[MissingAnswer::EjectionFraction, MissingAnswer::Symptoms],
            Step::Step3 | Step::Classification => &[
                MissingAnswer::EjectionFraction,
                MissingAnswer::Symptoms,
                MissingAnswer::Severity,
            ],
        };

        let checks: Vec<Validation<(), NonEmptyVec<MissingAnswer>>> = required
            .iter()
            .map(|answer| require(self.has(*answer), *answer))
            .collect();

        match Validation::all_vec(checks) {
            Validation::Failure(errors) => Err(IncompleteStateError {
                missing: errors.iter().copied().collect(),
            }),
            Validation::Success(_) => Ok(()),
        }
    }

    /// Extract all three answers, reporting every missing one at once.
    pub fn require_complete(&self) -> Result<CompleteAssessment, IncompleteStateError> {
        match (self.ejection_fraction, self.has_symptoms, self.severity) {
            (Some(ejection_fraction), Some(has_symptoms), Some(severity)) => {
                Ok(CompleteAssessment {
                    ejection_fraction,
                    has_symptoms,
                    severity,
                })
            }
            _ => Err(self
                .require_answered_through(Step::Classification)
                .err()
                .unwrap_or(IncompleteStateError {
                    missing: Vec::new(),
                })),
        }
    }

    fn has(&self, answer: MissingAnswer) -> bool {
        match answer {
            MissingAnswer::EjectionFraction => self.ejection_fraction.is_some(),
            MissingAnswer::Symptoms => self.has_symptoms.is_some(),
            MissingAnswer::Severity => self.severity.is_some(),
        }
    }
}

fn require(present: bool, missing: MissingAnswer) -> Validation<(), NonEmptyVec<MissingAnswer>> {
    if present {
        Validation::success(())
    } else {
        Validation::fail(missing)
    }
}
