//! Entity Extraction
//!
//! Pulls lending entities out of free text:
//! - Requested amount (raw span such as "5 lakh" or "20000 rs")
//! - Loan type (vehicle, gold, business)
//! - Urgency
//!
//! Matching is case-insensitive. The amount is kept as the matched text; no
//! unit conversion is attempted.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static AMOUNT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\d+)\s*(lakh|lac|thousand|k|rs|rupees?)").unwrap()
});

/// Loan product mentioned by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanType {
    Vehicle,
    Gold,
    Business,
}

impl LoanType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoanType::Vehicle => "vehicle",
            LoanType::Gold => "gold",
            LoanType::Business => "business",
        }
    }
}

/// Urgency level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    High,
}

/// All entities extracted from text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedEntities {
    /// Requested amount, as written
    pub loan_amount: Option<String>,
    pub loan_type: Option<LoanType>,
    pub urgency: Option<Urgency>,
    /// Reserved; not populated yet
    pub time_period: Option<String>,
}

impl ExtractedEntities {
    /// Check if any entities were extracted
    pub fn is_empty(&self) -> bool {
        self.loan_amount.is_none()
            && self.loan_type.is_none()
            && self.urgency.is_none()
            && self.time_period.is_none()
    }

    pub fn is_urgent(&self) -> bool {
        self.urgency == Some(Urgency::High)
    }
}

/// Entity extractor
#[derive(Debug, Clone, Default)]
pub struct EntityExtractor;

impl EntityExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract all entities from text
    pub fn extract(&self, text: &str) -> ExtractedEntities {
        let lowered = text.to_lowercase();

        ExtractedEntities {
            loan_amount: self.extract_amount(text),
            loan_type: self.extract_loan_type(&lowered),
            urgency: self.extract_urgency(&lowered),
            time_period: None,
        }
    }

    /// First amount-like span
    fn extract_amount(&self, text: &str) -> Option<String> {
        AMOUNT_PATTERN
            .find(text)
            .map(|m| m.as_str().to_string())
    }

    /// Later checks override earlier ones: business > gold > vehicle
    fn extract_loan_type(&self, text: &str) -> Option<LoanType> {
        let mut loan_type = None;

        if text.contains("vehicle") || text.contains("bike") {
            loan_type = Some(LoanType::Vehicle);
        }
        if text.contains("gold") {
            loan_type = Some(LoanType::Gold);
        }
        if text.contains("business") {
            loan_type = Some(LoanType::Business);
        }

        loan_type
    }

    fn extract_urgency(&self, text: &str) -> Option<Urgency> {
        (text.contains("urgent") || text.contains("emergency")).then_some(Urgency::High)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bike_loan_urgently() {
        let extractor = EntityExtractor::new();
        let entities = extractor.extract("I need a bike loan urgently");

        assert_eq!(entities.loan_type, Some(LoanType::Vehicle));
        assert_eq!(entities.urgency, Some(Urgency::High));
        assert!(entities.is_urgent());
        assert!(entities.loan_amount.is_none());
    }

    #[test]
    fn test_extract_amount() {
        let extractor = EntityExtractor::new();

        let entities = extractor.extract("Can I get 5 lakh for my shop?");
        assert_eq!(entities.loan_amount.as_deref(), Some("5 lakh"));

        let entities = extractor.extract("need 20000Rs");
        assert_eq!(entities.loan_amount.as_deref(), Some("20000Rs"));

        let entities = extractor.extract("50k or 2 lac");
        assert_eq!(entities.loan_amount.as_deref(), Some("50k"));
    }

    #[test]
    fn test_amount_needs_unit() {
        let extractor = EntityExtractor::new();
        assert!(extractor.extract("I am 35 years old").loan_amount.is_none());
    }

    #[test]
    fn test_loan_type_last_wins() {
        let extractor = EntityExtractor::new();

        let entities = extractor.extract("gold or a bike loan for business");
        assert_eq!(entities.loan_type, Some(LoanType::Business));

        let entities = extractor.extract("bike or GOLD");
        assert_eq!(entities.loan_type, Some(LoanType::Gold));
    }

    #[test]
    fn test_emergency_is_urgent() {
        let extractor = EntityExtractor::new();
        assert!(extractor.extract("Medical EMERGENCY").is_urgent());
        assert!(!extractor.extract("whenever convenient").is_urgent());
    }

    #[test]
    fn test_empty() {
        let extractor = EntityExtractor::new();
        let entities = extractor.extract("hello");

        assert!(entities.is_empty());
        assert!(entities.time_period.is_none());
    }

    #[test]
    fn test_serialization() {
        let extractor = EntityExtractor::new();
        let entities = extractor.extract("urgent gold loan");
        let json = serde_json::to_value(&entities).unwrap();

        assert_eq!(json["loan_type"], "gold");
        assert_eq!(json["urgency"], "high");
        assert!(json["loan_amount"].is_null());
    }
}
