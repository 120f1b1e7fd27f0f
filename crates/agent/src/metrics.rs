//! Engine metrics
//!
//! Counters and gauges are emitted through the `metrics` facade; installing a
//! recorder/exporter is left to the host process. Without one these calls
//! are no-ops.

use loan_assistant_core::Sentiment;
use metrics::{counter, gauge};

use crate::engine::ResponseSource;

/// Record a resolved response by resolution path
pub fn record_response(source: ResponseSource) {
    counter!("assistant_responses_total", "source" => source.as_str()).increment(1);
}

/// Record a feedback submission
pub fn record_feedback(sentiment: Sentiment) {
    counter!("assistant_feedback_total", "sentiment" => sentiment.as_str()).increment(1);
}

/// Record the size of the loaded knowledge set
pub fn record_knowledge_intents(count: usize) {
    gauge!("assistant_knowledge_intents").set(count as f64);
}
