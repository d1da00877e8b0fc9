//! Assessment steps.
//!
//! Steps are the states of the assessment machine. Each question step
//! carries a fixed prompt; `Classification` is the terminal pseudo-step.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A position in the assessment dialogue.
///
/// Steps are ordered: `Step1 -> Step2 -> Step3 -> Classification`.
/// On the wire they use the identifiers `step1`, `step2`, `step3` and
/// `classification`.
///
/// # Example
///
/// ```rust
/// use hf_triage::core::Step;
///
/// let step: Step = "step2".parse().unwrap();
/// assert_eq!(step, Step::Step2);
/// assert_eq!(step.name(), "step2");
/// assert!(!step.is_final());
/// assert!(Step::Classification.is_final());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    /// Ejection fraction
    Step1,
    /// Presence of heart-failure signs or symptoms
    Step2,
    /// Symptom severity
    Step3,
    /// Terminal pseudo-step: all answers collected
    Classification,
}

impl Step {
    /// Every step in dialogue order.
    pub const ALL: [Step; 4] = [Step::Step1, Step::Step2, Step::Step3, Step::Classification];

    /// The step every assessment starts from.
    pub const INITIAL: Step = Step::Step1;

    /// Wire identifier of this step.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Step1 => "step1",
            Self::Step2 => "step2",
            Self::Step3 => "step3",
            Self::Classification => "classification",
        }
    }

    /// Question shown to the operator, or `None` for the terminal step.
    pub fn prompt(&self) -> Option<&'static str> {
        match self {
            Self::Step1 => Some(
                "What is the patient's ejection fraction (EF)? (Enter as a percentage)",
            ),
            Self::Step2 => Some("Are there signs/symptoms of heart failure? (yes/no)"),
            Self::Step3 => Some("How severe are the symptoms? (mild/moderate/severe)"),
            Self::Classification => None,
        }
    }

    /// Check if this is the terminal step.
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Classification)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Raised when a step identifier is not one of the known steps.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid step. Please start with 'step1'.")]
pub struct UnknownStepError {
    /// The identifier that was supplied
    pub step: String,
}

impl FromStr for Step {
    type Err = UnknownStepError;

    /// Step identifiers are matched exactly.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Step::ALL
            .into_iter()
            .find(|step| step.name() == s)
            .ok_or_else(|| UnknownStepError {
                step: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_name_returns_wire_identifier() {
        assert_eq!(Step::Step1.name(), "step1");
        assert_eq!(Step::Step2.name(), "step2");
        assert_eq!(Step::Step3.name(), "step3");
        assert_eq!(Step::Classification.name(), "classification");
    }

    #[test]
    fn parse_accepts_every_known_step() {
        for step in Step::ALL {
            assert_eq!(step.name().parse::<Step>(), Ok(step));
        }
    }

    #[test]
    fn parse_rejects_unknown_identifiers() {
        let err = "step4".parse::<Step>().unwrap_err();
        assert_eq!(err.step, "step4");
        assert_eq!(err.to_string(), "Invalid step. Please start with 'step1'.");

        assert!("".parse::<Step>().is_err());
        assert!("Step1".parse::<Step>().is_err());
    }

    #[test]
    fn only_classification_is_final() {
        assert!(!Step::Step1.is_final());
        assert!(!Step::Step2.is_final());
        assert!(!Step::Step3.is_final());
        assert!(Step::Classification.is_final());
    }

    #[test]
    fn question_steps_have_prompts() {
        assert!(Step::Step1.prompt().unwrap().contains("ejection fraction"));
        assert!(Step::Step2.prompt().unwrap().contains("(yes/no)"));
        assert!(Step::Step3.prompt().unwrap().contains("(mild/moderate/severe)"));
        assert!(Step::Classification.prompt().is_none());
    }

    #[test]
    fn step_serializes_as_wire_identifier() {
        let json = serde_json::to_string(&Step::Step3).unwrap();
        assert_eq!(json, "\"step3\"");

        let deserialized: Step = serde_json::from_str("\"classification\"").unwrap();
        assert_eq!(deserialized, Step::Classification);
    }
}
