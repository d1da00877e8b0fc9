//! Builder API for engine configuration.
//!
//! This module provides a fluent builder and a JSON-loadable configuration
//! for creating assessment engines with validated settings.

pub mod config;
pub mod engine;
pub mod error;

pub use config::EngineConfig;
pub use engine::EngineBuilder;
pub use error::BuildError;
