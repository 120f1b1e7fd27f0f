//! Text processing for the loan assistant
//!
//! This crate provides the rule-based language layer:
//! - **Normalization**: lowercase, strip punctuation, collapse whitespace
//! - **Synonyms**: canonical term groups used for keyword expansion
//! - **Intent Classification**: loan override tier plus pattern-length scoring
//! - **Entity Extraction**: loan amount, loan type and urgency
//!
//! # Example
//!
//! ```
//! use loan_assistant_text_processing::{EntityExtractor, IntentClassifier};
//!
//! let classifier = IntentClassifier::new();
//! let result = classifier.classify("I need a bike loan urgently");
//! assert_eq!(result.intent, "vehicle_loan");
//!
//! let entities = EntityExtractor::new().extract("I need a bike loan urgently");
//! assert!(entities.is_urgent());
//! ```

pub mod entities;
pub mod intent;
pub mod normalize;
pub mod synonyms;

pub use entities::{EntityExtractor, ExtractedEntities, LoanType, Urgency};
pub use intent::{Classification, IntentClassifier, PatternIntent};
pub use normalize::{mentions_loan, normalize};
pub use synonyms::{SynonymGroup, SynonymTable};
