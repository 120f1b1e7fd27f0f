//! Keyword index
//!
//! Highest-precedence matcher. Every intent is scored against the input:
//!
//! - `phrase_weight` for each keyword phrase contained in the input
//! - for every (input word, keyword word) pair: `exact_word_weight` when
//!   equal, else `partial_word_weight` when one contains the other, else
//!   `variation_weight` when the words are listed as variations
//!
//! The best intent is returned only if its score is strictly above the
//! configured threshold. Ties keep the intent that appears first in the
//! document.

use loan_assistant_config::MatchingConfig;

use crate::knowledge_loader::{KnowledgeBase, KnowledgeIntent};
use crate::variations::WordVariations;

/// A confident keyword match
#[derive(Debug, Clone, PartialEq)]
pub struct KnowledgeMatch<'a> {
    pub intent: &'a KnowledgeIntent,
    pub score: u32,
}

/// Keyword matcher over a loaded knowledge base
#[derive(Debug, Clone)]
pub struct KeywordIndex {
    base: KnowledgeBase,
    /// Lowercased keywords per intent, aligned with `base.intents()`
    keywords: Vec<Vec<String>>,
    matching: MatchingConfig,
    variations: WordVariations,
}

impl KeywordIndex {
    pub fn new(base: KnowledgeBase, matching: MatchingConfig) -> Self {
        let keywords = base
            .intents()
            .iter()
            .map(|intent| intent.keywords.iter().map(|k| k.to_lowercase()).collect())
            .collect();

        Self {
            base,
            keywords,
            matching,
            variations: WordVariations::new(),
        }
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.base
    }

    pub fn matching(&self) -> &MatchingConfig {
        &self.matching
    }

    /// Score a single intent's keywords against lowercased input
    fn score_keywords(&self, input: &str, keywords: &[String]) -> u32 {
        let input_words: Vec<&str> = input.split_whitespace().collect();
        let mut score = 0;

        for keyword in keywords {
            if input.contains(keyword.as_str()) {
                score += self.matching.phrase_weight;
            }

            for input_word in &input_words {
                for keyword_word in keyword.split_whitespace() {
                    score += self.score_word_pair(input_word, keyword_word);
                }
            }
        }

        score
    }

    fn score_word_pair(&self, input_word: &str, keyword_word: &str) -> u32 {
        if input_word == keyword_word {
            self.matching.exact_word_weight
        } else if input_word.contains(keyword_word) || keyword_word.contains(input_word) {
            self.matching.partial_word_weight
        } else if self.variations.are_variations(input_word, keyword_word) {
            self.matching.variation_weight
        } else {
            0
        }
    }

    /// Score of one tag, mainly for diagnostics
    pub fn score_of(&self, input: &str, tag: &str) -> Option<u32> {
        let input = input.to_lowercase();
        self.base
            .intents()
            .iter()
            .position(|intent| intent.tag == tag)
            .map(|i| self.score_keywords(&input, &self.keywords[i]))
    }

    /// Best-scoring intent above the threshold
    pub fn best_match(&self, input: &str) -> Option<KnowledgeMatch<'_>> {
        let input = input.to_lowercase();
        let mut best: Option<KnowledgeMatch<'_>> = None;

        for (intent, keywords) in self.base.intents().iter().zip(&self.keywords) {
            let score = self.score_keywords(&input, keywords);
            if score > best.as_ref().map_or(0, |b| b.score) {
                best = Some(KnowledgeMatch { intent, score });
            }
        }

        let best = best.filter(|b| b.score > self.matching.exact_match_threshold);
        if let Some(m) = &best {
            tracing::debug!(tag = %m.intent.tag, score = m.score, "Knowledge match");
        }
        best
    }
}
