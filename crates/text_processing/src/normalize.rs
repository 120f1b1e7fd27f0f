//! Input normalization

use once_cell::sync::Lazy;
use regex::Regex;

static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s]").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Lowercase, replace punctuation with spaces, collapse whitespace, trim
///
/// Word characters are Unicode-aware, so Devanagari and other scripts survive.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped = NON_WORD.replace_all(&lowered, " ");
    WHITESPACE.replace_all(&stripped, " ").trim().to_string()
}

/// Whether the text mentions a loan ("loan" also covers "loans")
pub fn mentions_loan(text: &str) -> bool {
    text.contains("loan")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_punctuation() {
        assert_eq!(normalize("  What's   the EMI?? "), "what s the emi");
        assert_eq!(normalize("Hi!"), "hi");
        assert_eq!(normalize("two-wheeler loan"), "two wheeler loan");
    }

    #[test]
    fn test_normalize_keeps_underscores_and_digits() {
        assert_eq!(normalize("5_lakh, 10k"), "5_lakh 10k");
    }

    #[test]
    fn test_normalize_blank() {
        assert_eq!(normalize(" \t\n "), "");
        assert_eq!(normalize("?!."), "");
    }

    #[test]
    fn test_normalize_keeps_devanagari_letters() {
        assert_eq!(normalize("लोन चाहिए!"), "लोन चाहिए");
    }

    #[test]
    fn test_mentions_loan() {
        assert!(mentions_loan("any loans available"));
        assert!(mentions_loan("loan"));
        assert!(!mentions_loan("emi schedule"));
    }
}
