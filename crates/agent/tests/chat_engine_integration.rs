//! Integration tests for the chat engine
//!
//! These tests drive full conversations through the public API, from
//! settings and knowledge loading to feedback.

use std::path::PathBuf;

use loan_assistant_agent::memory::EMI_SUPPORT_RESPONSE;
use loan_assistant_agent::response::GREETING_FALLBACK;
use loan_assistant_agent::{ChatEngine, ResponseSource};
use loan_assistant_config::{load_settings_from, EngineConfig, KnowledgeConfig, Settings};
use loan_assistant_core::Sentiment;
use loan_assistant_knowledge::{KnowledgeBase, KnowledgeLoader};
use loan_assistant_text_processing::{EntityExtractor, IntentClassifier, LoanType, Urgency};

const URGENCY_SUFFIX: &str = " For urgent processing, please contact our support team immediately.";

fn shipped_config_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../config")
}

fn sample_knowledge_path() -> PathBuf {
    shipped_config_dir().join("knowledge.json")
}

/// Engine built the way a host process would, from the shipped config files
fn shipped_engine() -> ChatEngine {
    let mut settings = load_settings_from(&shipped_config_dir(), None).unwrap();
    // The shipped path is relative to the workspace root
    settings.knowledge.path = Some(sample_knowledge_path().to_string_lossy().into_owned());

    let engine = ChatEngine::from_settings(&settings);
    assert!(!engine.knowledge().is_empty());
    engine
}

fn empty_engine() -> ChatEngine {
    ChatEngine::new(EngineConfig::default(), KnowledgeBase::empty()).with_seed(11)
}

/// The shipped knowledge document is valid and answers deterministically
#[test]
fn test_sample_knowledge_match() {
    let knowledge = KnowledgeLoader::load_file(&sample_knowledge_path()).unwrap();
    assert!(!knowledge.is_empty());

    let engine = ChatEngine::new(EngineConfig::default(), knowledge);
    let expected = engine.knowledge().get("interest_rates").unwrap().response.clone();

    for _ in 0..3 {
        let reply = engine.respond_detailed("What is the interest rate?");
        assert_eq!(reply.source, ResponseSource::KnowledgeMatch);
        assert_eq!(reply.text, expected);
    }
    assert_eq!(engine.memory().trail().len(), 3);
}

/// Everyday phrasing must not be swallowed by the shipped FAQ keywords
#[test]
fn test_shipped_knowledge_conversation() {
    let engine = shipped_engine();

    let reply = engine.respond_detailed("hi");
    assert_eq!(reply.intent, "greeting");
    assert_eq!(reply.text, GREETING_FALLBACK);

    let reply = engine.respond_detailed("I need a bike loan urgently");
    assert_eq!(reply.source, ResponseSource::Generated);
    assert_eq!(reply.intent, "vehicle_loan");
    assert_eq!(reply.confidence, 1.5);
    assert!(reply.text.ends_with(URGENCY_SUFFIX));

    let reply = engine.respond_detailed("emi schedule");
    assert_eq!(reply.source, ResponseSource::KnowledgeMatch);
    assert_eq!(reply.intent, "emi_calculation");

    let reply = engine.respond_detailed("I need help");
    assert_eq!(reply.source, ResponseSource::ContextualOverride);
    assert_eq!(reply.intent, "support");
    assert_eq!(reply.text, EMI_SUPPORT_RESPONSE);

    assert_eq!(engine.memory().trail(), vec!["emi_calculation".to_string()]);
}

/// Real FAQ questions still reach their canned answers
#[test]
fn test_shipped_knowledge_answers_faq_questions() {
    let engine = shipped_engine();

    for (question, tag) in [
        ("What documents do I need?", "documents_required"),
        ("How to apply?", "application_process"),
        ("What is your contact number?", "contact_details"),
        ("Where is the nearest branch?", "branch_location"),
        ("Am I eligible?", "eligibility"),
        ("What is the tenure?", "loan_tenure"),
    ] {
        let reply = engine.respond_detailed(question);
        assert_eq!(reply.source, ResponseSource::KnowledgeMatch, "input: {question}");
        assert_eq!(reply.intent, tag, "input: {question}");
    }
}

/// The 11th message evicts the first turn
#[test]
fn test_short_term_memory_is_bounded() {
    let engine = empty_engine();
    for i in 0..11 {
        engine.respond(&format!("question number {i}"));
    }

    let turns = engine.recent_context(20);
    assert_eq!(turns.len(), 10);
    assert_eq!(turns[0].message, "question number 1");
    assert_eq!(turns[9].message, "question number 10");
}

#[test]
fn test_greeting() {
    let engine = empty_engine();
    let reply = engine.respond_detailed("hi");

    assert_eq!(reply.intent, "greeting");
    assert_eq!(
        reply.text,
        "Hello! Welcome to our banking services. How can I help you today with your loan queries?"
    );
}

#[test]
fn test_urgent_bike_loan() {
    let input = "I need a bike loan urgently";

    let entities = EntityExtractor::new().extract(input);
    assert_eq!(entities.loan_type, Some(LoanType::Vehicle));
    assert_eq!(entities.urgency, Some(Urgency::High));

    let classification = IntentClassifier::new().classify(input);
    assert_eq!(classification.intent, "vehicle_loan");
    assert_eq!(classification.confidence, 1.5);

    let engine = empty_engine();
    let reply = engine.respond(input);
    assert!(reply.ends_with(URGENCY_SUFFIX));
}

/// Any generic loan question gets a loan-overview variant
#[test]
fn test_generic_loan_questions() {
    let engine = empty_engine();
    let variants = engine.generator().variants("loan_general");

    for input in ["loan", "Do you give LOANS?", "personal loan options", "cd loan"] {
        let reply = engine.respond_detailed(input);
        assert_eq!(reply.source, ResponseSource::LoanShortcut, "input: {input}");
        assert!(variants.contains(&reply.text), "input: {input}");
    }
}

/// Repeating a question yields members of the same variant set
#[test]
fn test_repeated_input_stays_in_variant_set() {
    let engine = ChatEngine::new(EngineConfig::default(), KnowledgeBase::empty());
    let variants = engine.generator().variants("gold_loan");

    for _ in 0..10 {
        let reply = engine.respond_detailed("tell me about gold loan");
        assert_eq!(reply.intent, "gold_loan");
        assert!(variants.contains(&reply.text));
    }
}

#[test]
fn test_feedback_flow() {
    let engine = empty_engine();
    let response = engine.respond("what is the emi");

    // No feedback yet: nothing to review, no error
    assert!(engine.quality_report().is_empty());

    let mut last_positive = 0;
    for sentiment in [Sentiment::Negative, Sentiment::Negative, Sentiment::Positive] {
        let record = engine.submit_feedback("what is the emi", &response, sentiment);
        assert!(record.positive >= last_positive);
        last_positive = record.positive;
    }

    // 1 of 3 positive: flagged
    let report = engine.quality_report();
    assert_eq!(report.len(), 1);
    assert_eq!(report[0].response, response);

    let profile = engine.memory().profile(engine.user_id()).unwrap();
    assert_eq!(profile.behavior_count("negative"), 2);
    assert_eq!(profile.behavior_count("positive"), 1);

    // The rated response is replayed for the same question
    let reply = engine.respond_detailed("What is the EMI?");
    assert_eq!(reply.source, ResponseSource::LearnedOverride);
    assert_eq!(reply.text, response);
}

#[test]
fn test_emi_follow_up_support() {
    let engine = empty_engine();
    engine.respond("emi schedule");

    let reply = engine.respond_detailed("I need help");
    assert_eq!(reply.intent, "support");
    assert_eq!(reply.source, ResponseSource::ContextualOverride);
}

#[test]
fn test_from_settings_with_missing_knowledge() {
    let dir = tempfile::tempdir().unwrap();
    let settings = Settings {
        knowledge: KnowledgeConfig {
            path: Some(dir.path().join("missing.json").to_string_lossy().into_owned()),
            url: None,
            fetch_timeout_ms: 1000,
        },
        ..Default::default()
    };

    let engine = ChatEngine::from_settings(&settings);
    assert!(engine.knowledge().is_empty());
    assert_eq!(engine.respond_detailed("hello").intent, "greeting");
}

#[test]
fn test_from_settings_files() {
    let dir = tempfile::tempdir().unwrap();
    let knowledge_path = dir.path().join("knowledge.yaml");
    std::fs::write(
        &knowledge_path,
        "intents:\n  - tag: branch_hours\n    keywords: [branch hours, opening hours]\n    response: Branches are open 9 to 6.\n",
    )
    .unwrap();
    std::fs::write(
        dir.path().join("default.yaml"),
        format!(
            "engine:\n  user_id: tester\nknowledge:\n  path: {}\n",
            knowledge_path.display()
        ),
    )
    .unwrap();

    let settings = load_settings_from(dir.path(), None).unwrap();
    let engine = ChatEngine::from_settings(&settings);

    assert_eq!(engine.user_id(), "tester");
    assert_eq!(engine.knowledge().len(), 1);
    assert_eq!(
        engine.respond("What are your branch hours?"),
        "Branches are open 9 to 6."
    );
}

#[tokio::test]
async fn test_from_settings_async_unreachable_url() {
    let dir = tempfile::tempdir().unwrap();
    let settings = Settings {
        knowledge: KnowledgeConfig {
            path: Some(dir.path().join("missing.json").to_string_lossy().into_owned()),
            url: Some("http://127.0.0.1:9/knowledge.json".to_string()),
            fetch_timeout_ms: 500,
        },
        ..Default::default()
    };

    let engine = ChatEngine::from_settings_async(&settings).await;
    assert!(engine.knowledge().is_empty());
    assert_eq!(engine.respond_detailed("bye").intent, "farewell");
}
