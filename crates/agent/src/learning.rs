//! Feedback learning
//!
//! Counts positive/negative reactions per (message, response) pair. The
//! counts feed two things: a quality report listing responses users keep
//! rejecting, and a suggestion lookup that replays the best-rated response
//! previously given to a similar message.
//!
//! Records are never reset or evicted.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use loan_assistant_config::LearningConfig;
use loan_assistant_core::Sentiment;

/// Note attached to every quality flag
pub const IMPROVEMENT_NOTE: &str = "Consider improving this response";

/// Feedback counts for one (message, response) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub message: String,
    pub response: String,
    pub positive: u32,
    pub negative: u32,
    pub updated_at: DateTime<Utc>,
}

impl FeedbackRecord {
    fn new(message: &str, response: &str) -> Self {
        Self {
            message: message.to_string(),
            response: response.to_string(),
            positive: 0,
            negative: 0,
            updated_at: Utc::now(),
        }
    }

    pub fn total(&self) -> u32 {
        self.positive.saturating_add(self.negative)
    }

    /// Share of positive feedback; `None` until any feedback exists
    pub fn positive_ratio(&self) -> Option<f64> {
        match self.total() {
            0 => None,
            total => Some(f64::from(self.positive) / f64::from(total)),
        }
    }
}

/// A response flagged for review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityFlag {
    pub message: String,
    pub response: String,
    pub ratio: f64,
    pub note: String,
}

/// A previously given response and how well it was received
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResponse {
    pub response: String,
    pub positive_ratio: f64,
}

/// Aggregate counts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningStats {
    pub records: usize,
    pub positive: u64,
    pub negative: u64,
}

#[derive(Default)]
struct FeedbackLog {
    /// Records in first-seen order
    records: Vec<FeedbackRecord>,
    /// (message, response) -> position in `records`
    index: HashMap<(String, String), usize>,
}

/// Feedback store
pub struct LearningStore {
    config: LearningConfig,
    log: RwLock<FeedbackLog>,
}

impl Default for LearningStore {
    fn default() -> Self {
        Self::new(LearningConfig::default())
    }
}

impl LearningStore {
    pub fn new(config: LearningConfig) -> Self {
        Self {
            config,
            log: RwLock::new(FeedbackLog::default()),
        }
    }

    /// Count one reaction, creating the record on first sight
    ///
    /// Returns the updated record.
    pub fn record_feedback(
        &self,
        message: &str,
        response: &str,
        sentiment: Sentiment,
    ) -> FeedbackRecord {
        let mut log = self.log.write();
        let key = (message.to_string(), response.to_string());

        let existing = log.index.get(&key).copied();
        let position = match existing {
            Some(position) => position,
            None => {
                let position = log.records.len();
                log.records.push(FeedbackRecord::new(message, response));
                log.index.insert(key, position);
                position
            },
        };

        let record = &mut log.records[position];
        match sentiment {
            Sentiment::Positive => record.positive = record.positive.saturating_add(1),
            Sentiment::Negative => record.negative = record.negative.saturating_add(1),
        }
        record.updated_at = Utc::now();

        tracing::debug!(
            positive = record.positive,
            negative = record.negative,
            sentiment = %sentiment,
            "Recorded feedback"
        );

        record.clone()
    }

    pub fn get(&self, message: &str, response: &str) -> Option<FeedbackRecord> {
        let log = self.log.read();
        log.index
            .get(&(message.to_string(), response.to_string()))
            .map(|&position| log.records[position].clone())
    }

    /// Responses with enough feedback and a low positive ratio
    pub fn quality_report(&self) -> Vec<QualityFlag> {
        self.log
            .read()
            .records
            .iter()
            .filter(|record| record.total() > self.config.review_min_feedback)
            .filter_map(|record| {
                let ratio = record.positive_ratio()?;
                (ratio < self.config.low_quality_ratio).then(|| QualityFlag {
                    message: record.message.clone(),
                    response: record.response.clone(),
                    ratio,
                    note: IMPROVEMENT_NOTE.to_string(),
                })
            })
            .collect()
    }

    /// Best-rated response previously given to a message containing `message`
    ///
    /// Matching is case-insensitive. Records without feedback are skipped;
    /// ties keep the record seen first.
    pub fn suggest_better_response(&self, message: &str, intent: &str) -> Option<RankedResponse> {
        let needle = message.to_lowercase();
        let log = self.log.read();

        let mut best: Option<RankedResponse> = None;
        for record in &log.records {
            if !record.message.to_lowercase().contains(&needle) {
                continue;
            }
            let Some(ratio) = record.positive_ratio() else {
                continue;
            };
            if best.as_ref().map_or(true, |b| ratio > b.positive_ratio) {
                best = Some(RankedResponse {
                    response: record.response.clone(),
                    positive_ratio: ratio,
                });
            }
        }

        if let Some(found) = &best {
            tracing::debug!(
                intent = %intent,
                ratio = found.positive_ratio,
                "Found previously rated response"
            );
        }
        best
    }

    pub fn stats(&self) -> LearningStats {
        let log = self.log.read();
        LearningStats {
            records: log.records.len(),
            positive: log.records.iter().map(|r| u64::from(r.positive)).sum(),
            negative: log.records.iter().map(|r| u64::from(r.negative)).sum(),
        }
    }

    pub fn len(&self) -> usize {
        self.log.read().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.read().records.is_empty()
    }
}
