//! Word variations used by the keyword index
//!
//! A small, fixed table of inflections and near-synonyms (loan/loans,
//! emi/payment/installment, ...). It is separate from the classifier's
//! synonym groups and is checked in both directions: two words match if
//! either lists the other.

const VARIATIONS: &[(&str, &[&str])] = &[
    ("loan", &["loans"]),
    ("loans", &["loan"]),
    ("offer", &["offers"]),
    ("offers", &["offer"]),
    ("type", &["types"]),
    ("types", &["type"]),
    ("what", &["which"]),
    ("which", &["what"]),
    ("how", &["what"]),
    ("when", &["what"]),
    ("where", &["what"]),
    ("emi", &["payment", "installment"]),
    ("payment", &["emi", "installment"]),
    ("installment", &["emi", "payment"]),
    ("document", &["documents", "paperwork"]),
    ("documents", &["document", "paperwork"]),
    ("paperwork", &["document", "documents"]),
    ("apply", &["application", "apply for"]),
    ("application", &["apply", "apply for"]),
    ("require", &["required", "need"]),
    ("required", &["require", "need"]),
    ("need", &["require", "required"]),
    ("contact", &["call", "reach", "support"]),
    ("call", &["contact", "reach", "support"]),
    ("support", &["contact", "call", "reach"]),
    ("branch", &["location", "office"]),
    ("location", &["branch", "office"]),
    ("office", &["branch", "location"]),
    ("money", &["fund", "loan"]),
    ("fund", &["money", "loan"]),
    ("quick", &["fast", "urgent"]),
    ("fast", &["quick", "urgent"]),
    ("urgent", &["quick", "fast"]),
];

/// Fixed variation table
#[derive(Debug, Clone, Copy)]
pub struct WordVariations {
    entries: &'static [(&'static str, &'static [&'static str])],
}

impl Default for WordVariations {
    fn default() -> Self {
        Self::new()
    }
}

impl WordVariations {
    pub fn new() -> Self {
        Self {
            entries: VARIATIONS,
        }
    }

    fn lookup(&self, word: &str) -> Option<&'static [&'static str]> {
        self.entries
            .iter()
            .find(|(key, _)| *key == word)
            .map(|(_, variants)| *variants)
    }

    fn lists(&self, word: &str, other: &str) -> bool {
        self.lookup(word)
            .is_some_and(|variants| variants.iter().any(|v| *v == other))
    }

    /// Case-insensitive, symmetric variation check
    pub fn are_variations(&self, a: &str, b: &str) -> bool {
        let a = a.to_lowercase();
        let b = b.to_lowercase();
        self.lists(&a, &b) || self.lists(&b, &a)
    }
}
