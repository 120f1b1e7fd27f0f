//! Conversation Memory
//!
//! Short-term and long-term memory for one conversation:
//! - Turn log: recent (message, intent, response) turns, FIFO-bounded
//! - History: raw lowercased user messages, FIFO-bounded
//! - Trail: tags of recent knowledge matches, for trend checks
//! - Long-term: per-user profiles (preferences, interests, behavior)
//!
//! The turn log also drives contextual overrides: a follow-up question is
//! answered differently when recent turns were about a related topic.

use parking_lot::RwLock;
use std::collections::{HashMap, VecDeque};

use loan_assistant_config::MemoryConfig;
use loan_assistant_core::intents;
use loan_assistant_core::{ConversationTurn, HistoryEntry, ProfileUpdate, UserProfile};

/// Returned for a documents question after loan turns
pub const LOAN_DOCUMENTS_RESPONSE: &str =
    "Since you're asking about loan documents, here are the specific requirements for your loan type...";

/// Returned for a support question after EMI turns
pub const EMI_SUPPORT_RESPONSE: &str =
    "For EMI-related support, you can check your schedule online or contact our EMI support team.";

/// Push onto a bounded queue, dropping from the front
fn push_bounded<T>(queue: &mut VecDeque<T>, item: T, capacity: usize) {
    queue.push_back(item);
    while queue.len() > capacity {
        queue.pop_front();
    }
}

/// Conversation memory
pub struct ContextMemory {
    config: MemoryConfig,
    /// Resolved turns
    turns: RwLock<VecDeque<ConversationTurn>>,
    /// Raw user messages
    history: RwLock<VecDeque<HistoryEntry>>,
    /// Recent knowledge-match tags
    trail: RwLock<VecDeque<String>>,
    /// Long-term profiles by user id
    long_term: RwLock<HashMap<String, UserProfile>>,
}

impl Default for ContextMemory {
    fn default() -> Self {
        Self::new(MemoryConfig::default())
    }
}

impl ContextMemory {
    pub fn new(config: MemoryConfig) -> Self {
        Self {
            config,
            turns: RwLock::new(VecDeque::new()),
            history: RwLock::new(VecDeque::new()),
            trail: RwLock::new(VecDeque::new()),
            long_term: RwLock::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &MemoryConfig {
        &self.config
    }

    /// Append a resolved turn, evicting the oldest beyond capacity
    pub fn record(
        &self,
        message: impl Into<String>,
        intent: impl Into<String>,
        response: impl Into<String>,
    ) {
        let turn = ConversationTurn::new(message, intent, response);
        push_bounded(
            &mut self.turns.write(),
            turn,
            self.config.short_term_capacity,
        );
    }

    /// All retained turns, oldest first
    pub fn turns(&self) -> Vec<ConversationTurn> {
        self.turns.read().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.turns.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.read().is_empty()
    }

    /// Last `n` turns, most recent last
    pub fn recent_context(&self, n: usize) -> Vec<ConversationTurn> {
        let turns = self.turns.read();
        let skip = turns.len().saturating_sub(n);
        turns.iter().skip(skip).cloned().collect()
    }

    /// Last turns using the configured window
    pub fn recent(&self) -> Vec<ConversationTurn> {
        self.recent_context(self.config.recent_context_window)
    }

    /// Canned follow-up answer when recent turns set the topic
    pub fn contextual_override(
        &self,
        intent: &str,
        recent: &[ConversationTurn],
    ) -> Option<&'static str> {
        let loan_mentions = recent.iter().filter(|t| t.intent_mentions("loan")).count();
        let emi_mentions = recent.iter().filter(|t| t.intent_mentions("emi")).count();

        if loan_mentions > 0 && intent == intents::DOCUMENTS {
            return Some(LOAN_DOCUMENTS_RESPONSE);
        }
        if emi_mentions > 0 && intent == intents::SUPPORT {
            return Some(EMI_SUPPORT_RESPONSE);
        }
        None
    }

    /// Append a raw user message to the history
    pub fn record_message(&self, message: impl Into<String>) {
        push_bounded(
            &mut self.history.write(),
            HistoryEntry::new(message),
            self.config.history_capacity,
        );
    }

    pub fn history(&self) -> Vec<HistoryEntry> {
        self.history.read().iter().cloned().collect()
    }

    /// Remember a knowledge-match tag
    pub fn push_trail(&self, tag: impl Into<String>) {
        push_bounded(
            &mut self.trail.write(),
            tag.into(),
            self.config.context_trail_capacity,
        );
    }

    pub fn trail(&self) -> Vec<String> {
        self.trail.read().iter().cloned().collect()
    }

    /// Whether any trail tag contains `fragment`
    pub fn mentioned_recently(&self, fragment: &str) -> bool {
        self.trail.read().iter().any(|tag| tag.contains(fragment))
    }

    /// Merge into a user's profile, creating it if absent
    pub fn update_long_term(&self, user_id: &str, update: ProfileUpdate) {
        self.long_term
            .write()
            .entry(user_id.to_string())
            .or_default()
            .merge(update);
    }

    pub fn profile(&self, user_id: &str) -> Option<UserProfile> {
        self.long_term.read().get(user_id).cloned()
    }

    /// Bump a behavior counter, returning the new value
    pub fn increment_behavior(&self, user_id: &str, key: &str) -> u64 {
        self.long_term
            .write()
            .entry(user_id.to_string())
            .or_default()
            .increment_behavior(key)
    }

    /// Drop turns, history and trail; long-term profiles are kept
    pub fn clear(&self) {
        self.turns.write().clear();
        self.history.write().clear();
        self.trail.write().clear();
    }
}
