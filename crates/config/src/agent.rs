//! Engine configuration
//!
//! Memory capacities, knowledge-match scoring weights and feedback review
//! limits for the chat engine.

use serde::{Deserialize, Serialize};

use crate::constants::{learning, matching, memory};
use crate::ConfigError;

/// Everything the chat engine needs besides the knowledge document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub memory: MemoryConfig,

    #[serde(default)]
    pub matching: MatchingConfig,

    #[serde(default)]
    pub learning: LearningConfig,

    /// User id that feedback tallies are attributed to
    #[serde(default = "default_user_id")]
    pub user_id: String,
}

fn default_user_id() -> String {
    "anonymous".to_string()
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.memory.validate()?;
        self.learning.validate()?;
        if self.user_id.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "engine.user_id".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// Conversation memory configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// Short-term turn log capacity (FIFO)
    #[serde(default = "default_short_term_capacity")]
    pub short_term_capacity: usize,

    /// Raw user-message history capacity (FIFO)
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,

    /// Intent trail capacity
    #[serde(default = "default_context_trail_capacity")]
    pub context_trail_capacity: usize,

    /// Turns inspected for contextual overrides
    #[serde(default = "default_recent_context_window")]
    pub recent_context_window: usize,
}

fn default_short_term_capacity() -> usize {
    memory::SHORT_TERM_CAPACITY
}
fn default_history_capacity() -> usize {
    memory::HISTORY_CAPACITY
}
fn default_context_trail_capacity() -> usize {
    memory::CONTEXT_TRAIL_CAPACITY
}
fn default_recent_context_window() -> usize {
    memory::RECENT_CONTEXT_WINDOW
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            short_term_capacity: default_short_term_capacity(),
            history_capacity: default_history_capacity(),
            context_trail_capacity: default_context_trail_capacity(),
            recent_context_window: default_recent_context_window(),
        }
    }
}

impl MemoryConfig {
    /// Capacities may shrink below the defaults but never grow past them
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value, max) in [
            (
                "memory.short_term_capacity",
                self.short_term_capacity,
                memory::SHORT_TERM_CAPACITY,
            ),
            (
                "memory.history_capacity",
                self.history_capacity,
                memory::HISTORY_CAPACITY,
            ),
            (
                "memory.context_trail_capacity",
                self.context_trail_capacity,
                memory::CONTEXT_TRAIL_CAPACITY,
            ),
        ] {
            if !(1..=max).contains(&value) {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    message: format!("capacity must be between 1 and {max}, got {value}"),
                });
            }
        }

        if self.recent_context_window > self.short_term_capacity {
            return Err(ConfigError::InvalidValue {
                field: "memory.recent_context_window".to_string(),
                message: format!(
                    "window {} exceeds short-term capacity {}",
                    self.recent_context_window, self.short_term_capacity
                ),
            });
        }

        Ok(())
    }
}

/// Knowledge-index scoring weights
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// Winning score must be strictly greater than this
    #[serde(default = "default_exact_match_threshold")]
    pub exact_match_threshold: u32,

    #[serde(default = "default_phrase_weight")]
    pub phrase_weight: u32,

    #[serde(default = "default_exact_word_weight")]
    pub exact_word_weight: u32,

    #[serde(default = "default_variation_weight")]
    pub variation_weight: u32,

    #[serde(default = "default_partial_word_weight")]
    pub partial_word_weight: u32,
}

fn default_exact_match_threshold() -> u32 {
    matching::EXACT_MATCH_THRESHOLD
}
fn default_phrase_weight() -> u32 {
    matching::PHRASE_WEIGHT
}
fn default_exact_word_weight() -> u32 {
    matching::EXACT_WORD_WEIGHT
}
fn default_variation_weight() -> u32 {
    matching::VARIATION_WEIGHT
}
fn default_partial_word_weight() -> u32 {
    matching::PARTIAL_WORD_WEIGHT
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            exact_match_threshold: default_exact_match_threshold(),
            phrase_weight: default_phrase_weight(),
            exact_word_weight: default_exact_word_weight(),
            variation_weight: default_variation_weight(),
            partial_word_weight: default_partial_word_weight(),
        }
    }
}

/// Feedback review configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearningConfig {
    /// Records need strictly more feedback than this to appear in the report
    #[serde(default = "default_review_min_feedback")]
    pub review_min_feedback: u32,

    /// Positive ratio below which a response is flagged
    #[serde(default = "default_low_quality_ratio")]
    pub low_quality_ratio: f64,
}

fn default_review_min_feedback() -> u32 {
    learning::REVIEW_MIN_FEEDBACK
}
fn default_low_quality_ratio() -> f64 {
    learning::LOW_QUALITY_RATIO
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self {
            review_min_feedback: default_review_min_feedback(),
            low_quality_ratio: default_low_quality_ratio(),
        }
    }
}

impl LearningConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.low_quality_ratio) {
            return Err(ConfigError::InvalidValue {
                field: "learning.low_quality_ratio".to_string(),
                message: format!(
                    "Must be between 0.0 and 1.0, got {}",
                    self.low_quality_ratio
                ),
            });
        }
        Ok(())
    }
}
