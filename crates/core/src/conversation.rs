//! Conversation types: turns, raw history entries and feedback sentiment

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// One resolved exchange between the user and the assistant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    /// Raw user input, as received
    pub message: String,
    /// Intent tag the turn resolved to
    pub intent: String,
    /// Response text returned to the user
    pub response: String,
    /// When the turn was recorded
    pub timestamp: DateTime<Utc>,
}

impl ConversationTurn {
    /// Create a turn stamped with the current time
    pub fn new(
        message: impl Into<String>,
        intent: impl Into<String>,
        response: impl Into<String>,
    ) -> Self {
        Self {
            message: message.into(),
            intent: intent.into(),
            response: response.into(),
            timestamp: Utc::now(),
        }
    }

    /// Whether the resolved intent tag contains `fragment`
    pub fn intent_mentions(&self, fragment: &str) -> bool {
        self.intent.contains(fragment)
    }
}

/// Lowercased user message kept in the full conversation history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

/// User feedback on a response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sentiment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "positive" | "up" | "helpful" => Ok(Sentiment::Positive),
            "negative" | "down" | "not helpful" => Ok(Sentiment::Negative),
            other => Err(Error::InvalidInput(format!("unknown sentiment: {}", other))),
        }
    }
}
