//! Built-in intent tags
//!
//! Tags loaded from the knowledge document are free-form strings; these are
//! the tags the classifier and response generator know about natively.

pub const GREETING: &str = "greeting";
pub const FAREWELL: &str = "farewell";
pub const LOAN_GENERAL: &str = "loan_general";
pub const VEHICLE_LOAN: &str = "vehicle_loan";
pub const GOLD_LOAN: &str = "gold_loan";
pub const BUSINESS_LOAN: &str = "business_loan";
pub const CD_LOAN: &str = "cd_loan";
pub const EMI: &str = "emi";
pub const DOCUMENTS: &str = "documents";
pub const APPLICATION: &str = "application";
pub const SUPPORT: &str = "support";
pub const URGENT: &str = "urgent";

/// Sentinel for "nothing matched"
pub const UNKNOWN: &str = "unknown";

/// Whether a tag belongs to the loan family (`loan_general`, `gold_loan`, ...)
pub fn is_loan_intent(tag: &str) -> bool {
    tag.contains("loan")
}
