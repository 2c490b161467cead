use serde::{Deserialize, Serialize};

use crate::config::NGramConfig;

/// A tokenized document pulled from an external token source.
///
/// `id` only labels the output matrix row; tokens are not retained after
/// processing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub tokens: Vec<String>,
}

impl Document {
    pub fn new<I, T>(id: impl Into<String>, tokens: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            id: id.into(),
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl AsRef<[String]> for Document {
    fn as_ref(&self) -> &[String] {
        &self.tokens
    }
}

/// Per-term corpus statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermStat {
    /// Dense id assigned on first sight; never reused.
    pub term_id: usize,
    /// Occurrences across the corpus, repeats within a document included.
    pub global_count: u64,
    /// Distinct documents containing the term.
    pub doc_count: u64,
}

impl TermStat {
    pub fn new(term_id: usize) -> Self {
        Self { term_id, global_count: 0, doc_count: 0 }
    }
}

/// One row of a vocabulary snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyEntry {
    pub term: String,
    pub term_id: usize,
    pub global_count: u64,
    pub doc_count: u64,
}

/// Read-only view of a term dictionary, suitable for persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocabularySnapshot {
    pub ngram: NGramConfig,
    pub document_count: u64,
    pub token_count: u64,
    pub entries: Vec<VocabularyEntry>,
}

impl VocabularySnapshot {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Linear lookup by term text.
    pub fn get(&self, term: &str) -> Option<&VocabularyEntry> {
        self.entries.iter().find(|e| e.term == term)
    }
}
