//! Conversation engine for the loan assistant
//!
//! Features:
//! - Resolution pipeline: loan shortcut, knowledge match, contextual
//!   override, learned override, generated response
//! - Short-term conversation memory with FIFO eviction
//! - Feedback learning with quality review
//! - Templated responses with typed placeholders
//!
//! # Example
//!
//! ```
//! use loan_assistant_agent::ChatEngine;
//! use loan_assistant_config::EngineConfig;
//! use loan_assistant_knowledge::KnowledgeBase;
//!
//! let engine = ChatEngine::new(EngineConfig::default(), KnowledgeBase::empty());
//! let reply = engine.respond_detailed("hi");
//!
//! assert_eq!(reply.intent, "greeting");
//! ```

pub mod engine;
pub mod learning;
pub mod memory;
pub mod metrics;
pub mod response;

pub use engine::{ChatEngine, EngineReply, ResponseSource};
pub use learning::{FeedbackRecord, LearningStats, LearningStore, QualityFlag, RankedResponse};
pub use memory::ContextMemory;
pub use response::{Placeholder, ResponseGenerator};

use thiserror::Error;

/// Agent errors
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Knowledge error: {0}")]
    Knowledge(String),

    #[error("Invalid feedback: {0}")]
    Feedback(String),
}

impl From<loan_assistant_config::ConfigError> for AgentError {
    fn from(err: loan_assistant_config::ConfigError) -> Self {
        AgentError::Config(err.to_string())
    }
}

impl From<loan_assistant_knowledge::KnowledgeError> for AgentError {
    fn from(err: loan_assistant_knowledge::KnowledgeError) -> Self {
        AgentError::Knowledge(err.to_string())
    }
}

impl From<AgentError> for loan_assistant_core::Error {
    fn from(err: AgentError) -> Self {
        loan_assistant_core::Error::Agent(err.to_string())
    }
}
