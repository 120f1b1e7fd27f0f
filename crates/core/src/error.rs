//! Error types shared across crates

use thiserror::Error;

/// Result alias using the core error
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error for the loan assistant
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Knowledge error: {0}")]
    Knowledge(String),

    #[error("Agent error: {0}")]
    Agent(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
