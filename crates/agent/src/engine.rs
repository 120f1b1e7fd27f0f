//! Chat engine
//!
//! Owns every store for one conversation and resolves each message through a
//! fixed precedence chain:
//!
//! 1. Loan shortcut: a generic loan question gets a loan-overview variant
//! 2. Knowledge match: a confident keyword match returns its canned answer
//! 3. Contextual override: follow-ups answered in light of recent turns
//! 4. Learned override: a previously well-rated response to a similar message
//! 5. Generated: templated response for the classified intent
//!
//! Every non-blank message is recorded as exactly one turn.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use loan_assistant_config::{EngineConfig, Settings};
use loan_assistant_core::{intents, ConversationTurn, Sentiment};
use loan_assistant_knowledge::{KeywordIndex, KnowledgeBase, KnowledgeLoader};
use loan_assistant_text_processing::intent::{
    BUSINESS_MARKERS, CONFIDENCE_SCALE, GOLD_MARKERS, LOAN_GENERAL_SCORE, VEHICLE_MARKERS,
};
use loan_assistant_text_processing::{
    mentions_loan, normalize, EntityExtractor, ExtractedEntities, IntentClassifier,
};

use crate::learning::{FeedbackRecord, LearningStore, QualityFlag};
use crate::memory::ContextMemory;
use crate::metrics;
use crate::response::ResponseGenerator;
use crate::AgentError;

/// Which stage of the pipeline produced a reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseSource {
    LoanShortcut,
    KnowledgeMatch,
    ContextualOverride,
    LearnedOverride,
    Generated,
    EmptyInput,
}

impl ResponseSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseSource::LoanShortcut => "loan_shortcut",
            ResponseSource::KnowledgeMatch => "knowledge_match",
            ResponseSource::ContextualOverride => "contextual_override",
            ResponseSource::LearnedOverride => "learned_override",
            ResponseSource::Generated => "generated",
            ResponseSource::EmptyInput => "empty_input",
        }
    }
}

/// Reply plus the metadata a presentation layer may show
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineReply {
    pub text: String,
    pub intent: String,
    /// Scaled score of the resolving stage; not a probability
    pub confidence: f32,
    pub source: ResponseSource,
}

/// Conversation engine
pub struct ChatEngine {
    config: EngineConfig,
    session_id: String,
    user_id: String,
    classifier: IntentClassifier,
    extractor: EntityExtractor,
    index: KeywordIndex,
    memory: ContextMemory,
    learning: LearningStore,
    generator: ResponseGenerator,
}

impl ChatEngine {
    pub fn new(config: EngineConfig, knowledge: KnowledgeBase) -> Self {
        metrics::record_knowledge_intents(knowledge.len());

        Self {
            session_id: Uuid::new_v4().to_string(),
            user_id: config.user_id.clone(),
            classifier: IntentClassifier::new(),
            extractor: EntityExtractor::new(),
            index: KeywordIndex::new(knowledge, config.matching.clone()),
            memory: ContextMemory::new(config.memory.clone()),
            learning: LearningStore::new(config.learning.clone()),
            generator: ResponseGenerator::new(),
            config,
        }
    }

    /// Validate the configuration before building
    pub fn try_new(config: EngineConfig, knowledge: KnowledgeBase) -> Result<Self, AgentError> {
        config.validate()?;
        Ok(Self::new(config, knowledge))
    }

    /// Build from settings, loading the local knowledge file
    ///
    /// A missing or malformed file leaves the knowledge tier empty.
    pub fn from_settings(settings: &Settings) -> Self {
        let knowledge = KnowledgeLoader::load_configured(&settings.knowledge);
        Self::new(settings.engine.clone(), knowledge)
    }

    /// Build from settings, trying the knowledge URL before the local file
    pub async fn from_settings_async(settings: &Settings) -> Self {
        let knowledge = KnowledgeLoader::load_configured_async(&settings.knowledge).await;
        Self::new(settings.engine.clone(), knowledge)
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    /// Reproducible template selection
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.generator = ResponseGenerator::with_seed(seed);
        self
    }

    pub fn with_generator(mut self, generator: ResponseGenerator) -> Self {
        self.generator = generator;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn memory(&self) -> &ContextMemory {
        &self.memory
    }

    pub fn learning(&self) -> &LearningStore {
        &self.learning
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        self.index.knowledge()
    }

    pub fn classifier(&self) -> &IntentClassifier {
        &self.classifier
    }

    pub fn generator(&self) -> &ResponseGenerator {
        &self.generator
    }

    /// Respond to a user message
    pub fn respond(&self, input: &str) -> String {
        self.respond_detailed(input).text
    }

    /// Respond with intent, confidence and resolution path
    pub fn respond_detailed(&self, input: &str) -> EngineReply {
        if input.trim().is_empty() {
            return self.finish(EngineReply {
                text: ResponseGenerator::fallback(intents::UNKNOWN).to_string(),
                intent: intents::UNKNOWN.to_string(),
                confidence: 0.0,
                source: ResponseSource::EmptyInput,
            });
        }

        let message = input.trim().to_lowercase();
        self.memory.record_message(message.as_str());

        let reply = self.resolve(&message);
        self.memory
            .record(message.as_str(), reply.intent.as_str(), reply.text.as_str());
        self.finish(reply)
    }

    fn resolve(&self, message: &str) -> EngineReply {
        if Self::is_generic_loan_question(message) {
            return EngineReply {
                text: self
                    .generator
                    .generate(intents::LOAN_GENERAL, &ExtractedEntities::default()),
                intent: intents::LOAN_GENERAL.to_string(),
                confidence: LOAN_GENERAL_SCORE as f32 / CONFIDENCE_SCALE,
                source: ResponseSource::LoanShortcut,
            };
        }

        if let Some(found) = self.index.best_match(message) {
            self.memory.push_trail(found.intent.tag.as_str());
            return EngineReply {
                text: found.intent.response.clone(),
                intent: found.intent.tag.clone(),
                confidence: found.score as f32 / CONFIDENCE_SCALE,
                source: ResponseSource::KnowledgeMatch,
            };
        }

        let normalized = normalize(message);
        let classification = self.classifier.classify(&normalized);
        let entities = self.extractor.extract(&normalized);
        let recent = self.memory.recent();

        let intent = classification.intent;
        let confidence = classification.confidence;

        if let Some(text) = self.memory.contextual_override(&intent, &recent) {
            return EngineReply {
                text: text.to_string(),
                intent,
                confidence,
                source: ResponseSource::ContextualOverride,
            };
        }

        if let Some(ranked) = self
            .learning
            .suggest_better_response(&normalized, &intent)
            .filter(|ranked| ranked.positive_ratio > 0.0)
        {
            return EngineReply {
                text: ranked.response,
                intent,
                confidence,
                source: ResponseSource::LearnedOverride,
            };
        }

        EngineReply {
            text: self.generator.generate(&intent, &entities),
            intent,
            confidence,
            source: ResponseSource::Generated,
        }
    }

    /// Mentions a loan but none of the product keywords
    fn is_generic_loan_question(message: &str) -> bool {
        mentions_loan(message)
            && !VEHICLE_MARKERS
                .iter()
                .chain(GOLD_MARKERS)
                .chain(BUSINESS_MARKERS)
                .any(|marker| message.contains(marker))
    }

    fn finish(&self, reply: EngineReply) -> EngineReply {
        tracing::debug!(
            session_id = %self.session_id,
            intent = %reply.intent,
            confidence = reply.confidence,
            source = reply.source.as_str(),
            "Resolved response"
        );
        metrics::record_response(reply.source);
        reply
    }

    /// Record user feedback on a response
    ///
    /// Also bumps the user's feedback tally and logs any responses that now
    /// need review.
    pub fn submit_feedback(
        &self,
        message: &str,
        response: &str,
        sentiment: Sentiment,
    ) -> FeedbackRecord {
        let record = self.learning.record_feedback(message, response, sentiment);
        self.memory
            .increment_behavior(&self.user_id, sentiment.as_str());
        metrics::record_feedback(sentiment);

        let flags = self.learning.quality_report();
        if !flags.is_empty() {
            tracing::info!(
                session_id = %self.session_id,
                flagged = flags.len(),
                "Responses flagged for review"
            );
            for flag in &flags {
                tracing::debug!(
                    message = %flag.message,
                    ratio = flag.ratio,
                    note = %flag.note,
                    "Low quality response"
                );
            }
        }

        record
    }

    /// Record feedback given as a label such as "positive" or "down"
    pub fn submit_feedback_label(
        &self,
        message: &str,
        response: &str,
        label: &str,
    ) -> Result<FeedbackRecord, AgentError> {
        let sentiment: Sentiment = label
            .parse()
            .map_err(|e: loan_assistant_core::Error| AgentError::Feedback(e.to_string()))?;
        Ok(self.submit_feedback(message, response, sentiment))
    }

    pub fn recent_context(&self, n: usize) -> Vec<ConversationTurn> {
        self.memory.recent_context(n)
    }

    pub fn quality_report(&self) -> Vec<QualityFlag> {
        self.learning.quality_report()
    }

    /// Forget the current conversation; feedback and profiles are kept
    pub fn reset(&self) {
        self.memory.clear();
        tracing::debug!(session_id = %self.session_id, "Conversation reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loan_assistant_knowledge::{KnowledgeFile, KnowledgeIntent};

    fn engine() -> ChatEngine {
        ChatEngine::new(EngineConfig::default(), KnowledgeBase::empty()).with_seed(42)
    }

    fn engine_with(intents: Vec<KnowledgeIntent>) -> ChatEngine {
        let base = KnowledgeBase::from_file(KnowledgeFile {
            version: None,
            intents,
        })
        .unwrap();
        ChatEngine::new(EngineConfig::default(), base).with_seed(42)
    }

    fn intent(tag: &str, keywords: &[&str], response: &str) -> KnowledgeIntent {
        KnowledgeIntent {
            tag: tag.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            response: response.to_string(),
        }
    }

    #[test]
    fn test_generic_loan_question() {
        let engine = engine();
        let reply = engine.respond_detailed("What loans do you have?");

        assert_eq!(reply.source, ResponseSource::LoanShortcut);
        assert_eq!(reply.intent, "loan_general");
        assert!(engine.generator().variants("loan_general").contains(&reply.text));
    }

    #[test]
    fn test_shortcut_beats_knowledge_match() {
        let engine = engine_with(vec![intent("loan_info", &["loan"], "Canned loan answer")]);
        let reply = engine.respond_detailed("loan");
        assert_eq!(reply.source, ResponseSource::LoanShortcut);
    }

    #[test]
    fn test_cd_loan_still_takes_shortcut() {
        let engine = engine();
        let reply = engine.respond_detailed("cd loan");
        assert_eq!(reply.source, ResponseSource::LoanShortcut);
    }

    #[test]
    fn test_knowledge_match_pushes_trail() {
        let engine = engine_with(vec![intent(
            "contact",
            &["contact number", "phone"],
            "Call 1800-000-000.",
        )]);
        let reply = engine.respond_detailed("What is your contact number?");

        assert_eq!(reply.source, ResponseSource::KnowledgeMatch);
        assert_eq!(reply.text, "Call 1800-000-000.");
        assert_eq!(reply.intent, "contact");
        assert_eq!(engine.memory().trail(), vec!["contact"]);
    }

    #[test]
    fn test_greeting_fallback() {
        let engine = engine();
        let reply = engine.respond_detailed("hi");

        assert_eq!(reply.intent, "greeting");
        assert_eq!(reply.source, ResponseSource::Generated);
        assert_eq!(reply.text, ResponseGenerator::fallback("greeting"));
    }

    #[test]
    fn test_urgent_vehicle_loan() {
        let engine = engine();
        let reply = engine.respond_detailed("I need a bike loan urgently");

        assert_eq!(reply.intent, "vehicle_loan");
        assert_eq!(reply.confidence, 1.5);
        assert!(reply
            .text
            .ends_with(" For urgent processing, please contact our support team immediately."));
    }

    #[test]
    fn test_contextual_override_after_loan_turn() {
        let engine = engine();
        engine.respond("gold loan please");
        let reply = engine.respond_detailed("which documents");

        assert_eq!(reply.intent, "documents");
        assert_eq!(reply.source, ResponseSource::ContextualOverride);
        assert_eq!(reply.text, crate::memory::LOAN_DOCUMENTS_RESPONSE);
    }

    #[test]
    fn test_learned_override() {
        let engine = engine();
        engine.submit_feedback("how to repay", "Pay via the app.", Sentiment::Positive);

        let reply = engine.respond_detailed("How to repay?");
        assert_eq!(reply.source, ResponseSource::LearnedOverride);
        assert_eq!(reply.text, "Pay via the app.");
    }

    #[test]
    fn test_zero_ratio_suggestion_ignored() {
        let engine = engine();
        engine.submit_feedback("how to repay", "Bad answer", Sentiment::Negative);

        let reply = engine.respond_detailed("how to repay");
        assert_eq!(reply.source, ResponseSource::Generated);
    }

    #[test]
    fn test_blank_input_records_nothing() {
        let engine = engine();
        let reply = engine.respond_detailed("   ");

        assert_eq!(reply.source, ResponseSource::EmptyInput);
        assert_eq!(reply.intent, "unknown");
        assert!(engine.memory().is_empty());
        assert!(engine.memory().history().is_empty());
    }

    #[test]
    fn test_every_turn_recorded_once() {
        let engine = engine_with(vec![intent("contact", &["contact number"], "Call us.")]);
        engine.respond("loans?");
        engine.respond("contact number");
        engine.respond("hello");

        let turns = engine.recent_context(10);
        assert_eq!(turns.len(), 3);
        assert_eq!(turns[0].intent, "loan_general");
        assert_eq!(turns[1].intent, "contact");
        assert_eq!(turns[2].intent, "greeting");
        assert_eq!(engine.memory().history().len(), 3);
    }

    #[test]
    fn test_feedback_updates_behavior() {
        let engine = engine().with_user_id("user-1");
        engine.submit_feedback("hi", "Hello", Sentiment::Positive);
        engine.submit_feedback("hi", "Hello", Sentiment::Positive);
        engine.submit_feedback("hi", "Hello", Sentiment::Negative);

        let profile = engine.memory().profile("user-1").unwrap();
        assert_eq!(profile.behavior_count("positive"), 2);
        assert_eq!(profile.behavior_count("negative"), 1);
    }

    #[test]
    fn test_feedback_label() {
        let engine = engine();
        let record = engine.submit_feedback_label("hi", "Hello", "up").unwrap();
        assert_eq!(record.positive, 1);

        assert!(matches!(
            engine.submit_feedback_label("hi", "Hello", "meh"),
            Err(AgentError::Feedback(_))
        ));
    }

    #[test]
    fn test_try_new_rejects_invalid_config() {
        let mut config = EngineConfig::default();
        config.memory.short_term_capacity = 0;

        assert!(matches!(
            ChatEngine::try_new(config, KnowledgeBase::empty()),
            Err(AgentError::Config(_))
        ));
    }

    #[test]
    fn test_reset() {
        let engine = engine();
        engine.respond("hello");
        engine.reset();
        assert!(engine.recent_context(3).is_empty());
    }
}
