//! Per-step response validation.
//!
//! Each question step has one validator turning the operator's raw text
//! into a typed [`Answer`]. Responses must match exactly, including
//! whitespace; only the yes/no and severity questions ignore ASCII case.
//! Trimming operator input is the shell's job.

use crate::core::{Answer, Severity, Step};
use thiserror::Error;

/// The response did not satisfy the current step's validator.
///
/// Recoverable: the operator is re-prompted for the same step.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Step whose validator rejected the response
    pub step: Step,
    /// Operator-facing explanation
    pub message: &'static str,
}

impl ValidationError {
    fn new(step: Step) -> Self {
        let message = match step {
            Step::Step1 => "Invalid EF. Please enter a number between 0 and 100.",
            Step::Step2 => "Invalid response. Please answer 'yes' or 'no'.",
            Step::Step3 => "Invalid severity. Please enter 'mild', 'moderate', or 'severe'.",
            Step::Classification => "Classification does not take a response.",
        };
        Self { step, message }
    }
}

/// Validate a raw response against the given step.
///
/// # Example
///
/// ```rust
/// use hf_triage::core::{Answer, Severity, Step};
/// use hf_triage::engine::validate;
///
/// assert_eq!(validate(Step::Step1, "35"), Ok(Answer::EjectionFraction(35)));
/// assert_eq!(validate(Step::Step2, "YES"), Ok(Answer::Symptoms(true)));
/// assert_eq!(validate(Step::Step3, "Severe"), Ok(Answer::Severity(Severity::Severe)));
/// assert!(validate(Step::Step1, "101").is_err());
/// ```
pub fn validate(step: Step, response: &str) -> Result<Answer, ValidationError> {
    let answer = match step {
        Step::Step1 => parse_ejection_fraction(response).map(Answer::EjectionFraction),
        Step::Step2 => parse_symptoms(response).map(Answer::Symptoms),
        Step::Step3 => parse_severity(response).map(Answer::Severity),
        Step::Classification => None,
    };
    answer.ok_or_else(|| ValidationError::new(step))
}

/// Unsigned decimal integer in 0..=100. Signs and decimals are rejected.
fn parse_ejection_fraction(response: &str) -> Option<u8> {
    if response.is_empty() || !response.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    response.parse::<u8>().ok().filter(|ef| *ef <= 100)
}

fn parse_symptoms(response: &str) -> Option<bool> {
    if response.eq_ignore_ascii_case("yes") {
        Some(true)
    } else if response.eq_ignore_ascii_case("no") {
        Some(false)
    } else {
        None
    }
}

fn parse_severity(response: &str) -> Option<Severity> {
    Severity::ALL
        .into_iter()
        .find(|severity| response.eq_ignore_ascii_case(severity.as_str()))
}
