//! Serializable engine configuration.

use crate::builder::error::BuildError;
use crate::core::EfThresholds;
use serde::{Deserialize, Serialize};

/// Engine settings that can be loaded from JSON.
///
/// Missing fields take the clinical defaults (50% and 40%).
///
/// # Example
///
/// ```rust
/// use hf_triage::builder::EngineConfig;
///
/// let config = EngineConfig::from_json(r#"{ "preserved_ef_threshold": 55 }"#).unwrap();
/// assert_eq!(config.preserved_ef_threshold, 55);
/// assert_eq!(config.mildly_reduced_ef_threshold, 40);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// EF at or above this is preserved
    pub preserved_ef_threshold: u8,
    /// EF at or above this (and below preserved) is mildly reduced
    pub mildly_reduced_ef_threshold: u8,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let thresholds = EfThresholds::default();
        Self {
            preserved_ef_threshold: thresholds.preserved,
            mildly_reduced_ef_threshold: thresholds.mildly_reduced,
        }
    }
}

impl EngineConfig {
    /// Parse a configuration document. Values are checked at build time.
    pub fn from_json(json: &str) -> Result<Self, BuildError> {
        serde_json::from_str(json).map_err(|e| BuildError::InvalidConfig(e.to_string()))
    }

    pub fn thresholds(&self) -> EfThresholds {
        EfThresholds {
            preserved: self.preserved_ef_threshold,
            mildly_reduced: self.mildly_reduced_ef_threshold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = EngineConfig::from_json("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.thresholds(), EfThresholds::default());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result = EngineConfig::from_json(r#"{ "preserved": 50 }"#);
        assert!(matches!(result, Err(BuildError::InvalidConfig(_))));
    }

    #[test]
    fn malformed_json_is_rejected() {
        let result = EngineConfig::from_json("{ not json");
        assert!(matches!(result, Err(BuildError::InvalidConfig(_))));
    }

    #[test]
    fn negative_thresholds_do_not_parse() {
        let result = EngineConfig::from_json(r#"{ "mildly_reduced_ef_threshold": -1 }"#);
        assert!(result.is_err());
    }
}
