//! Configuration management for the loan assistant
//!
//! Supports loading configuration from:
//! - YAML/TOML/JSON files under `config/`
//! - Environment variables (LOAN_ASSISTANT_ prefix, `__` separator)
//! - Serde defaults for every field
//!
//! Engine tuning (memory capacities, match thresholds, feedback review
//! limits) lives in [`agent`]; process-level settings in [`settings`].

pub mod agent;
pub mod constants;
pub mod observability;
pub mod settings;

pub use agent::{EngineConfig, LearningConfig, MatchingConfig, MemoryConfig};
pub use observability::init_tracing;
pub use settings::{
    load_settings, load_settings_from, KnowledgeConfig, ObservabilityConfig, RuntimeEnvironment,
    Settings,
};

use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Tracing initialization failed: {0}")]
    Tracing(String),
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

impl From<ConfigError> for loan_assistant_core::Error {
    fn from(err: ConfigError) -> Self {
        loan_assistant_core::Error::Config(err.to_string())
    }
}
