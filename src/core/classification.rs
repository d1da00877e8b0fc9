//! Heart-failure classification and recommendations.
//!
//! Pure functions of the completed answers: ejection fraction picks the
//! category, symptom presence separates HFpEF from at-risk, and severity
//! decides whether the urgent-care advisory is appended.

use super::answers::{CompleteAssessment, Severity};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Appended to the recommendation for moderate or severe symptoms.
pub const URGENT_CARE_ADVISORY: &str =
    "Urgent: Provide oxygen if needed. Consider IV diuretics for congestion. Monitor vital signs closely.";

/// Heart-failure category derived from the assessment.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Classification {
    #[serde(rename = "At risk for HF")]
    AtRiskForHf,
    /// Preserved ejection fraction
    #[serde(rename = "HFpEF")]
    HfPef,
    /// Mildly reduced ejection fraction
    #[serde(rename = "HFmrEF")]
    HfMrEf,
    /// Reduced ejection fraction
    #[serde(rename = "HFrEF")]
    HfREf,
}

impl Classification {
    pub fn label(&self) -> &'static str {
        match self {
            Self::AtRiskForHf => "At risk for HF",
            Self::HfPef => "HFpEF",
            Self::HfMrEf => "HFmrEF",
            Self::HfREf => "HFrEF",
        }
    }

    /// Base management recommendation, before any urgent-care advisory.
    pub fn base_recommendation(&self) -> &'static str {
        match self {
            Self::AtRiskForHf => "Monitor closely. Consider preventive measures.",
            Self::HfPef => "Optimize blood pressure control. Consider diuretics for congestion.",
            Self::HfMrEf => "Similar to HFrEF management. Optimize GDMT.",
            Self::HfREf => {
                "Initiate or optimize GDMT (ACEi/ARB/ARNI, beta-blockers, MRAs). \
                 Consider device therapy if EF ≤ 35%."
            }
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Ejection-fraction cut-offs, in percent.
///
/// EF at or above `preserved` is preserved; EF at or above `mildly_reduced`
/// (and below `preserved`) is mildly reduced; anything lower is reduced.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct EfThresholds {
    pub preserved: u8,
    pub mildly_reduced: u8,
}

impl Default for EfThresholds {
    fn default() -> Self {
        Self {
            preserved: 50,
            mildly_reduced: 40,
        }
    }
}

/// Classify from ejection fraction and symptom presence.
///
/// # Example
///
/// ```rust
/// use hf_triage::core::{classify, Classification, EfThresholds};
///
/// let thresholds = EfThresholds::default();
/// assert_eq!(classify(55, false, &thresholds), Classification::AtRiskForHf);
/// assert_eq!(classify(55, true, &thresholds), Classification::HfPef);
/// assert_eq!(classify(45, false, &thresholds), Classification::HfMrEf);
/// assert_eq!(classify(30, true, &thresholds), Classification::HfREf);
/// ```
pub fn classify(
    ejection_fraction: u8,
    has_symptoms: bool,
    thresholds: &EfThresholds,
) -> Classification {
    if ejection_fraction >= thresholds.preserved {
        if has_symptoms {
            Classification::HfPef
        } else {
            Classification::AtRiskForHf
        }
    } else if ejection_fraction >= thresholds.mildly_reduced {
        Classification::HfMrEf
    } else {
        Classification::HfREf
    }
}

/// Recommendation text for a classification at a given severity.
pub fn recommendation(classification: Classification, severity: Severity) -> String {
    let base = classification.base_recommendation();
    if severity.requires_urgent_care() {
        format!("{base}\n{URGENT_CARE_ADVISORY}")
    } else {
        base.to_string()
    }
}

/// Terminal output of an assessment.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub classification: Classification,
    pub recommendation: String,
}

impl ClassificationResult {
    /// Derive classification and recommendation from completed answers.
    pub fn from_assessment(assessment: &CompleteAssessment, thresholds: &EfThresholds) -> Self {
        let classification = classify(
            assessment.ejection_fraction,
            assessment.has_symptoms,
            thresholds,
        );
        Self {
            classification,
            recommendation: recommendation(classification, assessment.severity),
        }
    }

    pub fn has_urgent_advisory(&self) -> bool {
        self.recommendation.contains(URGENT_CARE_ADVISORY)
    }
}

impl fmt::Display for ClassificationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Classification: {}\n\nRecommendations:\n{}",
            self.classification, self.recommendation
        )
    }
}
