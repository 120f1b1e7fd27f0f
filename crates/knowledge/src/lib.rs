//! Knowledge base for the loan assistant
//!
//! Features:
//! - Knowledge document loading from JSON/YAML files or an HTTP endpoint
//! - Duplicate-tag validation at load time
//! - Keyword index with phrase, word and word-variation scoring
//! - Graceful degradation to an empty intent set when loading fails

pub mod keyword_index;
pub mod knowledge_loader;
pub mod variations;

pub use keyword_index::{KeywordIndex, KnowledgeMatch};
pub use knowledge_loader::{KnowledgeBase, KnowledgeFile, KnowledgeIntent, KnowledgeLoader};
pub use variations::WordVariations;

use thiserror::Error;

/// Knowledge errors
#[derive(Error, Debug)]
pub enum KnowledgeError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Duplicate intent tag: {0}")]
    DuplicateTag(String),

    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    #[error("Fetch error: {0}")]
    Fetch(String),
}

impl From<reqwest::Error> for KnowledgeError {
    fn from(err: reqwest::Error) -> Self {
        KnowledgeError::Fetch(err.to_string())
    }
}

impl From<KnowledgeError> for loan_assistant_core::Error {
    fn from(err: KnowledgeError) -> Self {
        loan_assistant_core::Error::Knowledge(err.to_string())
    }
}
