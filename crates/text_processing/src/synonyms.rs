//! Synonym groups for keyword expansion
//!
//! Each group maps a canonical term to its variant forms. Lookup is
//! symmetric: the canonical term and every variant resolve to the same
//! group, so any member expands to all the others.

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// One canonical term and its variants
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynonymGroup {
    pub canonical: String,
    pub variants: Vec<String>,
}

impl SynonymGroup {
    pub fn new(canonical: &str, variants: &[&str]) -> Self {
        Self {
            canonical: canonical.to_string(),
            variants: variants.iter().map(|v| v.to_string()).collect(),
        }
    }

    /// Whether `term` is the canonical form or one of the variants
    pub fn contains(&self, term: &str) -> bool {
        self.canonical == term || self.variants.iter().any(|v| v == term)
    }
}

/// Ordered synonym table; lookups resolve to the first group containing a term
#[derive(Debug, Clone)]
pub struct SynonymTable {
    groups: Vec<SynonymGroup>,
}

impl Default for SynonymTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SynonymTable {
    /// Built-in lending vocabulary
    pub fn new() -> Self {
        Self::from_groups(vec![
            SynonymGroup::new(
                "loan",
                &["loans", "borrow", "credit", "money", "fund", "advance", "financing"],
            ),
            SynonymGroup::new(
                "vehicle",
                &["bike", "motorcycle", "scooter", "two wheeler", "transport"],
            ),
            SynonymGroup::new("gold", &["jewelry", "ornaments", "precious metal"]),
            SynonymGroup::new("business", &["commercial", "enterprise", "company", "startup"]),
            SynonymGroup::new(
                "apply",
                &["application", "apply for", "start", "begin", "get", "obtain"],
            ),
            SynonymGroup::new(
                "document",
                &["documents", "paperwork", "papers", "proof", "certificate"],
            ),
            SynonymGroup::new(
                "emi",
                &["payment", "installment", "monthly payment", "repayment"],
            ),
            SynonymGroup::new("help", &["support", "assist", "guide", "aid"]),
            SynonymGroup::new("contact", &["call", "reach", "connect", "get in touch"]),
            SynonymGroup::new("urgent", &["emergency", "immediately", "quick", "fast", "asap"]),
        ])
    }

    pub fn from_groups(groups: Vec<SynonymGroup>) -> Self {
        Self { groups }
    }

    pub fn groups(&self) -> &[SynonymGroup] {
        &self.groups
    }

    /// Canonical form of a term, if any group knows it
    pub fn canonical_of(&self, term: &str) -> Option<&str> {
        self.groups
            .iter()
            .find(|g| g.contains(term))
            .map(|g| g.canonical.as_str())
    }

    fn group(&self, canonical: &str) -> Option<&SynonymGroup> {
        self.groups.iter().find(|g| g.canonical == canonical)
    }

    /// Expand every word of `text` with the full group of its canonical term
    ///
    /// Output keeps first-seen order and contains no duplicates.
    pub fn expand_keywords(&self, text: &str) -> Vec<String> {
        let mut keywords: Vec<String> = Vec::new();

        for word in text.unicode_words() {
            push_unique(&mut keywords, word);
            let Some(group) = self.canonical_of(word).and_then(|c| self.group(c)) else {
                continue;
            };
            push_unique(&mut keywords, &group.canonical);
            for variant in &group.variants {
                push_unique(&mut keywords, variant);
            }
        }

        keywords
    }
}

fn push_unique(keywords: &mut Vec<String>, term: &str) {
    if !keywords.iter().any(|k| k == term) {
        keywords.push(term.to_string());
    }
}
