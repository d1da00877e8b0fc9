//! Build errors for engine configuration.

use thiserror::Error;

/// Errors that can occur when configuring an assessment engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("Threshold '{name}' must be a percentage between 0 and 100, got {value}")]
    ThresholdOutOfRange { name: &'static str, value: u8 },

    #[error(
        "Mildly reduced EF threshold ({mildly_reduced}) must be below the preserved EF threshold ({preserved})"
    )]
    ThresholdsOutOfOrder { mildly_reduced: u8, preserved: u8 },

    #[error("Invalid engine configuration: {0}")]
    InvalidConfig(String),
}
