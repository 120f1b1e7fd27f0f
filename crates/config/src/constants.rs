//! Centralized defaults for the loan assistant
//!
//! Every tunable that has a serde default reads it from here, so the
//! numbers appear exactly once.

/// Conversation memory limits
pub mod memory {
    /// Short-term turn log capacity
    pub const SHORT_TERM_CAPACITY: usize = 10;

    /// Raw user-message history capacity
    pub const HISTORY_CAPACITY: usize = 10;

    /// Intent trail capacity (exact knowledge matches)
    pub const CONTEXT_TRAIL_CAPACITY: usize = 5;

    /// Turns inspected for contextual overrides
    pub const RECENT_CONTEXT_WINDOW: usize = 3;
}

/// Knowledge-index scoring
pub mod matching {
    /// A knowledge intent must score strictly above this to win
    pub const EXACT_MATCH_THRESHOLD: u32 = 5;

    /// Keyword phrase found verbatim in the input
    pub const PHRASE_WEIGHT: u32 = 10;

    /// Input word equals a keyword word
    pub const EXACT_WORD_WEIGHT: u32 = 3;

    /// Known word variation (loan/loans, emi/payment, ...)
    pub const VARIATION_WEIGHT: u32 = 2;

    /// One word contains the other
    pub const PARTIAL_WORD_WEIGHT: u32 = 1;
}

/// Feedback review
pub mod learning {
    /// Records need strictly more feedback than this to be reviewed
    pub const REVIEW_MIN_FEEDBACK: u32 = 2;

    /// Positive ratio below which a response is flagged
    pub const LOW_QUALITY_RATIO: f64 = 0.5;
}

/// Knowledge document location
pub mod knowledge {
    pub const DEFAULT_PATH: &str = "config/knowledge.json";
}

/// Environment variable prefix for settings overrides
pub const ENV_PREFIX: &str = "LOAN_ASSISTANT";
