// file: src/models/tag_result.rs
// description: per-document tag matches and the aggregated run report
// reference: internal data structures

use serde::Serialize;
use std::collections::BTreeMap;

/// Keywords matched in one document, in keyword-list order.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TagResult {
    pub document_name: String,
    pub matched: Vec<String>,
}

impl TagResult {
    pub fn new(document_name: impl Into<String>, matched: Vec<String>) -> Self {
        Self {
            document_name: document_name.into(),
            matched,
        }
    }

    pub fn joined(&self) -> String {
        self.matched.join(",")
    }

    pub fn is_empty(&self) -> bool {
        self.matched.is_empty()
    }
}

/// The persisted artifact: document name mapped to its comma-joined tags.
///
/// Backed by a BTreeMap so repeated runs over the same inputs serialize to
/// byte-identical JSON.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct TagReport {
    #[serde(flatten)]
    entries: BTreeMap<String, String>,
}

impl TagReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, result: &TagResult) {
        self.entries
            .insert(result.document_name.clone(), result.joined());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, document_name: &str) -> Option<&str> {
        self.entries.get(document_name).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.entries.iter()
    }
}
