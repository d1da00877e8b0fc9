//! Builder for constructing assessment engines.

use crate::builder::config::EngineConfig;
use crate::builder::error::BuildError;
use crate::core::EfThresholds;
use crate::engine::AssessmentEngine;
use tracing::debug;

/// Builder for configuring an [`AssessmentEngine`] with a fluent API.
///
/// # Example
///
/// ```rust
/// use hf_triage::builder::{BuildError, EngineBuilder};
///
/// let engine = EngineBuilder::new()
///     .preserved_ef_threshold(50)
///     .mildly_reduced_ef_threshold(40)
///     .build()
///     .unwrap();
/// assert_eq!(engine.thresholds().preserved, 50);
///
/// let inverted = EngineBuilder::new()
///     .preserved_ef_threshold(40)
///     .mildly_reduced_ef_threshold(50)
///     .build();
/// assert!(matches!(inverted, Err(BuildError::ThresholdsOutOfOrder { .. })));
/// ```
#[derive(Clone, Debug, Default)]
pub struct EngineBuilder {
    preserved: Option<u8>,
    mildly_reduced: Option<u8>,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the preserved-EF cut-off (default 50).
    pub fn preserved_ef_threshold(mut self, percent: u8) -> Self {
        self.preserved = Some(percent);
        self
    }

    /// Set the mildly-reduced-EF cut-off (default 40).
    pub fn mildly_reduced_ef_threshold(mut self, percent: u8) -> Self {
        self.mildly_reduced = Some(percent);
        self
    }

    /// Take every setting from a loaded configuration.
    pub fn config(self, config: EngineConfig) -> Self {
        self.preserved_ef_threshold(config.preserved_ef_threshold)
            .mildly_reduced_ef_threshold(config.mildly_reduced_ef_threshold)
    }

    /// Build the engine.
    /// Returns an error if the thresholds are out of range or inverted.
    pub fn build(self) -> Result<AssessmentEngine, BuildError> {
        let defaults = EfThresholds::default();
        let thresholds = EfThresholds {
            preserved: self.preserved.unwrap_or(defaults.preserved),
            mildly_reduced: self.mildly_reduced.unwrap_or(defaults.mildly_reduced),
        };

        check_percentage("preserved_ef_threshold", thresholds.preserved)?;
        check_percentage("mildly_reduced_ef_threshold", thresholds.mildly_reduced)?;

        if thresholds.mildly_reduced >= thresholds.preserved {
            return Err(BuildError::ThresholdsOutOfOrder {
                mildly_reduced: thresholds.mildly_reduced,
                preserved: thresholds.preserved,
            });
        }

        debug!(?thresholds, "assessment engine built");
        Ok(AssessmentEngine::with_thresholds(thresholds))
    }
}

fn check_percentage(name: &'static str, value: u8) -> Result<(), BuildError> {
    if value > 100 {
        return Err(BuildError::ThresholdOutOfRange { name, value });
    }
    Ok(())
}
