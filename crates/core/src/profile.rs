//! Long-term user profile

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Long-term memory kept per user id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub preferences: HashMap<String, Value>,
    #[serde(default)]
    pub interests: HashMap<String, Value>,
    /// Behavioural counters, e.g. feedback tallies
    #[serde(default)]
    pub behavior: HashMap<String, Value>,
}

/// Partial profile update; every supplied section replaces the stored one
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default)]
    pub preferences: Option<HashMap<String, Value>>,
    #[serde(default)]
    pub interests: Option<HashMap<String, Value>>,
    #[serde(default)]
    pub behavior: Option<HashMap<String, Value>>,
}

impl UserProfile {
    /// Shallow merge: sections present in `update` overwrite, others are kept
    pub fn merge(&mut self, update: ProfileUpdate) {
        if let Some(preferences) = update.preferences {
            self.preferences = preferences;
        }
        if let Some(interests) = update.interests {
            self.interests = interests;
        }
        if let Some(behavior) = update.behavior {
            self.behavior = behavior;
        }
    }

    /// Increment a numeric behaviour counter, starting from zero
    pub fn increment_behavior(&mut self, key: &str) -> u64 {
        let next = self
            .behavior
            .get(key)
            .and_then(Value::as_u64)
            .unwrap_or(0)
            + 1;
        self.behavior.insert(key.to_string(), Value::from(next));
        next
    }

    /// Read a numeric behaviour counter
    pub fn behavior_count(&self, key: &str) -> u64 {
        self.behavior.get(key).and_then(Value::as_u64).unwrap_or(0)
    }
}
