// file: src/tagger/matcher.rs
// description: case-insensitive multi-keyword substring search over extracted text
// reference: https://docs.rs/aho-corasick

use crate::error::{PipelineError, Result};
use aho_corasick::AhoCorasick;
use std::collections::BTreeSet;

/// Finds which keywords occur anywhere in a text, case-insensitively.
///
/// Keywords are compiled into a single Aho-Corasick automaton, so one pass
/// over the text answers all of them at once. They are treated as literal
/// substrings: pattern metacharacters have no meaning, and "cat" matches
/// inside "category". The scan is overlapping, so "cat" and "category" can
/// both be reported for the same text.
pub struct TagMatcher {
    automaton: Option<AhoCorasick>,
    keywords: Vec<String>,
}

impl TagMatcher {
    /// Build a matcher over the given keywords. Empty strings are skipped;
    /// keyword order is preserved and determines result order.
    pub fn new(keywords: impl IntoIterator<Item = String>) -> Result<Self> {
        let keywords: Vec<String> = keywords
            .into_iter()
            .filter(|k| !k.trim().is_empty())
            .collect();

        if keywords.is_empty() {
            return Ok(Self {
                automaton: None,
                keywords,
            });
        }

        let lowered: Vec<String> = keywords.iter().map(|k| k.to_lowercase()).collect();

        let automaton = AhoCorasick::new(&lowered)
            .map_err(|e| PipelineError::Matcher(format!("failed to build automaton: {}", e)))?;

        Ok(Self {
            automaton: Some(automaton),
            keywords,
        })
    }

    /// The subset of keywords present in `text`, deduplicated, in keyword
    /// input order.
    pub fn matches(&self, text: &str) -> Vec<String> {
        let Some(automaton) = &self.automaton else {
            return Vec::new();
        };

        if text.is_empty() {
            return Vec::new();
        }

        let lowered = text.to_lowercase();

        let mut found: BTreeSet<usize> = BTreeSet::new();
        for mat in automaton.find_overlapping_iter(&lowered) {
            found.insert(mat.pattern().as_usize());
        }

        found
            .into_iter()
            .map(|idx| self.keywords[idx].clone())
            .collect()
    }

    /// Matched keywords rendered as the comma-joined report value.
    pub fn matches_joined(&self, text: &str) -> String {
        self.matches(text).join(",")
    }

    pub fn keyword_count(&self) -> usize {
        self.keywords.len()
    }
}
