//! Intent Classification
//!
//! Rule-based classifier with two tiers:
//!
//! 1. **Loan override tier** - when the text mentions a loan, the first loan
//!    sub-type whose markers appear (vehicle, gold, business, certificate of
//!    deposit, in that priority) scores a fixed 15. With no sub-type,
//!    `loan_general` scores 10. Once this tier fires no other loan intent is
//!    considered.
//! 2. **Pattern tier** - every other registered intent scores the summed
//!    character length of each trigger phrase found in the text, so longer
//!    and more specific phrases outweigh short ones.
//!
//! The highest score wins. Ties go to the entry scored first: tier-1 entries
//! precede tier-2 entries, and tier-2 entries follow registration order.
//! Confidence is the raw score divided by 10; it is a scaled magnitude, not a
//! probability, and can exceed 1.0.
//!
//! # Example
//!
//! ```
//! use loan_assistant_text_processing::intent::IntentClassifier;
//!
//! let classifier = IntentClassifier::new();
//! let result = classifier.classify("Do you give gold loans?");
//!
//! assert_eq!(result.intent, "gold_loan");
//! assert_eq!(result.confidence, 1.5);
//! ```

use loan_assistant_core::intents;
use serde::{Deserialize, Serialize};

use crate::normalize::{mentions_loan, normalize};
use crate::synonyms::SynonymTable;

/// Score assigned to a recognised loan sub-type
pub const LOAN_SUBTYPE_SCORE: u32 = 15;

/// Score assigned to a loan mention with no recognised sub-type
pub const LOAN_GENERAL_SCORE: u32 = 10;

/// Raw scores are divided by this to produce the confidence
pub const CONFIDENCE_SCALE: f32 = 10.0;

pub const VEHICLE_MARKERS: &[&str] = &["vehicle", "bike", "motorcycle", "scooter", "two wheeler"];
pub const GOLD_MARKERS: &[&str] = &["gold"];
pub const BUSINESS_MARKERS: &[&str] = &["business"];
pub const CD_MARKERS: &[&str] = &["cd", "certificate"];

/// Pattern-tier intent definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternIntent {
    /// Intent tag
    pub tag: String,
    /// Trigger phrases, matched as substrings of the normalized text
    pub triggers: Vec<String>,
}

impl PatternIntent {
    pub fn new(tag: &str, triggers: &[&str]) -> Self {
        Self {
            tag: tag.to_string(),
            triggers: triggers.iter().map(|t| t.to_string()).collect(),
        }
    }

    /// Summed character length of every trigger found in `text`
    fn score(&self, text: &str) -> u32 {
        self.triggers
            .iter()
            .filter(|trigger| text.contains(trigger.as_str()))
            .map(|trigger| trigger.chars().count() as u32)
            .sum()
    }
}

/// Loan sub-type checked by the override tier
#[derive(Debug, Clone)]
struct LoanSubtype {
    tag: &'static str,
    markers: &'static [&'static str],
}

/// Classification result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// Winning intent tag, or `unknown`
    pub intent: String,
    /// Winning score / 10
    pub confidence: f32,
    /// Every positive score, in scoring order
    pub scores: Vec<(String, u32)>,
    /// Synonym-expanded keywords of the normalized text
    pub keywords: Vec<String>,
}

impl Classification {
    pub fn is_unknown(&self) -> bool {
        self.intent == intents::UNKNOWN
    }

    /// Raw score for a tag, if it scored at all
    pub fn score_of(&self, tag: &str) -> Option<u32> {
        self.scores
            .iter()
            .find(|(name, _)| name == tag)
            .map(|(_, score)| *score)
    }
}

/// Intent classifier
pub struct IntentClassifier {
    patterns: Vec<PatternIntent>,
    loan_subtypes: Vec<LoanSubtype>,
    synonyms: SynonymTable,
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl IntentClassifier {
    /// Create a classifier with the built-in lending patterns
    pub fn new() -> Self {
        Self::with_patterns(Self::builtin_patterns())
    }

    /// Create a classifier with a custom pattern tier
    ///
    /// Registration order is the tie-break order.
    pub fn with_patterns(patterns: Vec<PatternIntent>) -> Self {
        Self {
            patterns,
            loan_subtypes: vec![
                LoanSubtype {
                    tag: intents::VEHICLE_LOAN,
                    markers: VEHICLE_MARKERS,
                },
                LoanSubtype {
                    tag: intents::GOLD_LOAN,
                    markers: GOLD_MARKERS,
                },
                LoanSubtype {
                    tag: intents::BUSINESS_LOAN,
                    markers: BUSINESS_MARKERS,
                },
                LoanSubtype {
                    tag: intents::CD_LOAN,
                    markers: CD_MARKERS,
                },
            ],
            synonyms: SynonymTable::new(),
        }
    }

    /// Replace the synonym table used for keyword expansion
    pub fn with_synonyms(mut self, synonyms: SynonymTable) -> Self {
        self.synonyms = synonyms;
        self
    }

    pub fn patterns(&self) -> &[PatternIntent] {
        &self.patterns
    }

    pub fn synonyms(&self) -> &SynonymTable {
        &self.synonyms
    }

    fn builtin_patterns() -> Vec<PatternIntent> {
        vec![
            PatternIntent::new(
                intents::GREETING,
                &["hello", "hi", "hey", "good morning", "good afternoon", "good evening"],
            ),
            PatternIntent::new(
                intents::FAREWELL,
                &["bye", "goodbye", "see you", "thank you", "thanks"],
            ),
            PatternIntent::new(
                intents::LOAN_GENERAL,
                &["loan", "loans", "borrow", "money", "fund"],
            ),
            PatternIntent::new(
                intents::VEHICLE_LOAN,
                &[
                    "vehicle loan",
                    "bike loan",
                    "motorcycle loan",
                    "scooter loan",
                    "two wheeler",
                ],
            ),
            PatternIntent::new(intents::GOLD_LOAN, &["gold loan", "gold", "jewelry loan"]),
            PatternIntent::new(
                intents::BUSINESS_LOAN,
                &["business loan", "business", "commercial loan"],
            ),
            PatternIntent::new(intents::CD_LOAN, &["cd loan", "certificate of deposit"]),
            PatternIntent::new(intents::EMI, &["emi", "payment", "installment", "repay"]),
            PatternIntent::new(
                intents::DOCUMENTS,
                &["document", "documents", "paperwork", "proof"],
            ),
            PatternIntent::new(
                intents::APPLICATION,
                &["apply", "application", "process", "start"],
            ),
            PatternIntent::new(intents::SUPPORT, &["help", "support", "contact", "assist"]),
            PatternIntent::new(
                intents::URGENT,
                &["urgent", "emergency", "immediately", "quick"],
            ),
        ]
    }

    /// Classify free text
    pub fn classify(&self, text: &str) -> Classification {
        let normalized = normalize(text);
        let mut scores: Vec<(String, u32)> = Vec::new();

        let loan_tier_fired = mentions_loan(&normalized);
        if loan_tier_fired {
            let entry = self
                .loan_subtypes
                .iter()
                .find(|subtype| subtype.markers.iter().any(|m| normalized.contains(m)))
                .map(|subtype| (subtype.tag.to_string(), LOAN_SUBTYPE_SCORE))
                .unwrap_or_else(|| (intents::LOAN_GENERAL.to_string(), LOAN_GENERAL_SCORE));
            scores.push(entry);
        }

        for pattern in &self.patterns {
            // Loan intents belong to the override tier; loan_general may still
            // match on "borrow"/"money" when no loan was mentioned
            if intents::is_loan_intent(&pattern.tag)
                && (loan_tier_fired || pattern.tag != intents::LOAN_GENERAL)
            {
                continue;
            }

            let score = pattern.score(&normalized);
            if score > 0 {
                scores.push((pattern.tag.clone(), score));
            }
        }

        let best = scores.iter().fold(None::<&(String, u32)>, |best, entry| match best {
            Some(current) if current.1 >= entry.1 => Some(current),
            _ => Some(entry),
        });

        let (intent, confidence) = match best {
            Some((tag, score)) => (tag.clone(), *score as f32 / CONFIDENCE_SCALE),
            None => (intents::UNKNOWN.to_string(), 0.0),
        };

        tracing::debug!(
            text = %normalized,
            intent = %intent,
            confidence,
            candidates = scores.len(),
            "Intent analysis"
        );

        Classification {
            intent,
            confidence,
            keywords: self.synonyms.expand_keywords(&normalized),
            scores,
        }
    }
}
