//! Term dictionary: a bidirectional interning table with corpus statistics.

use std::collections::{HashMap, HashSet};

use tracing::debug;
use tv_core::{
    NGramConfig, Result, TermStat, VectorizeError, VocabularyEntry, VocabularySnapshot,
};

/// Maps term text to dense ids `[0, len)` assigned in first-seen order,
/// and ids back to text.
///
/// Grows only through [`crate::VocabularyBuilder`]. Pruning and merging
/// produce new dictionaries and leave their inputs untouched.
#[derive(Debug, Clone)]
pub struct TermDictionary {
    config: NGramConfig,
    index: HashMap<String, usize>,
    terms: Vec<String>,
    stats: Vec<TermStat>,
    document_count: u64,
    token_count: u64,
}

impl TermDictionary {
    pub fn new(config: NGramConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::empty(config, 0, 0))
    }

    pub(crate) fn empty(config: NGramConfig, document_count: u64, token_count: u64) -> Self {
        Self {
            config,
            index: HashMap::new(),
            terms: Vec::new(),
            stats: Vec::new(),
            document_count,
            token_count,
        }
    }

    pub fn config(&self) -> &NGramConfig {
        &self.config
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Documents ingested.
    pub fn document_count(&self) -> u64 {
        self.document_count
    }

    /// N-gram occurrences ingested.
    pub fn token_count(&self) -> u64 {
        self.token_count
    }

    pub fn increase_token_count(&mut self) {
        self.token_count += 1;
    }

    pub fn term_id(&self, term: &str) -> Option<usize> {
        self.index.get(term).copied()
    }

    pub fn term(&self, term_id: usize) -> Option<&str> {
        self.terms.get(term_id).map(String::as_str)
    }

    pub fn stat(&self, term: &str) -> Option<&TermStat> {
        self.term_id(term).map(|id| &self.stats[id])
    }

    pub fn stat_by_id(&self, term_id: usize) -> Option<&TermStat> {
        self.stats.get(term_id)
    }

    pub fn contains(&self, term: &str) -> bool {
        self.index.contains_key(term)
    }

    /// Terms with their statistics in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TermStat)> + '_ {
        self.terms.iter().map(String::as_str).zip(self.stats.iter())
    }

    /// Count one occurrence of `term`, interning it if unseen. Returns its id.
    pub(crate) fn record_occurrence(&mut self, term: &str) -> usize {
        self.token_count += 1;
        let id = match self.index.get(term) {
            Some(&id) => id,
            None => self.intern(term.to_string()),
        };
        self.stats[id].global_count += 1;
        id
    }

    pub(crate) fn record_document(&mut self) {
        self.document_count += 1;
    }

    pub(crate) fn record_document_occurrence(&mut self, term_id: usize) {
        self.stats[term_id].doc_count += 1;
    }

    /// Append a term with known counts. The caller guarantees it is new.
    pub(crate) fn push_term(&mut self, term: &str, global_count: u64, doc_count: u64) -> usize {
        let id = self.intern(term.to_string());
        let stat = &mut self.stats[id];
        stat.global_count = global_count;
        stat.doc_count = doc_count;
        id
    }

    fn intern(&mut self, term: String) -> usize {
        let id = self.terms.len();
        self.index.insert(term.clone(), id);
        self.terms.push(term);
        self.stats.push(TermStat::new(id));
        id
    }

    /// Read-only copy of every term and its statistics, in id order.
    pub fn snapshot(&self) -> VocabularySnapshot {
        VocabularySnapshot {
            ngram: self.config.clone(),
            document_count: self.document_count,
            token_count: self.token_count,
            entries: self
                .iter()
                .map(|(term, stat)| VocabularyEntry {
                    term: term.to_string(),
                    term_id: stat.term_id,
                    global_count: stat.global_count,
                    doc_count: stat.doc_count,
                })
                .collect(),
        }
    }

    /// Rebuild a dictionary from a persisted snapshot.
    ///
    /// Entries may arrive in any order but their ids must cover `[0, n)`
    /// exactly once and their terms must be distinct.
    pub fn from_snapshot(snapshot: &VocabularySnapshot) -> Result<Self> {
        snapshot.ngram.validate()?;
        let n = snapshot.entries.len();
        let mut by_id: Vec<Option<&VocabularyEntry>> = vec![None; n];
        for entry in &snapshot.entries {
            if entry.term_id >= n {
                return Err(VectorizeError::InvalidSnapshot(format!(
                    "term id {} out of range for {} entries",
                    entry.term_id, n
                )));
            }
            if by_id[entry.term_id].replace(entry).is_some() {
                return Err(VectorizeError::InvalidSnapshot(format!(
                    "duplicate term id {}",
                    entry.term_id
                )));
            }
            if entry.doc_count > entry.global_count {
                return Err(VectorizeError::InvalidSnapshot(format!(
                    "term {:?} has doc_count {} above global_count {}",
                    entry.term, entry.doc_count, entry.global_count
                )));
            }
            if entry.doc_count > snapshot.document_count {
                return Err(VectorizeError::InvalidSnapshot(format!(
                    "term {:?} has doc_count {} above document_count {}",
                    entry.term, entry.doc_count, snapshot.document_count
                )));
            }
        }

        let mut dictionary = Self::empty(
            snapshot.ngram.clone(),
            snapshot.document_count,
            snapshot.token_count,
        );
        let mut seen: HashSet<&str> = HashSet::with_capacity(n);
        for entry in by_id.into_iter().flatten() {
            if !seen.insert(entry.term.as_str()) {
                return Err(VectorizeError::InvalidSnapshot(format!(
                    "duplicate term {:?}",
                    entry.term
                )));
            }
            dictionary.push_term(&entry.term, entry.global_count, entry.doc_count);
        }
        Ok(dictionary)
    }

    /// Union of two dictionaries built with the same n-gram configuration.
    ///
    /// Shared terms sum their counts. Terms of `self` keep their ids; terms
    /// only in `other` are appended in `other`'s id order.
    pub fn merge(&self, other: &TermDictionary) -> Result<TermDictionary> {
        self.config.ensure_compatible(&other.config)?;
        let mut merged = self.clone();
        let mut shared = 0usize;
        for (term, stat) in other.iter() {
            match merged.index.get(term) {
                Some(&id) => {
                    let target = &mut merged.stats[id];
                    target.global_count += stat.global_count;
                    target.doc_count += stat.doc_count;
                    shared += 1;
                }
                None => {
                    merged.push_term(term, stat.global_count, stat.doc_count);
                }
            }
        }
        merged.document_count += other.document_count;
        merged.token_count += other.token_count;
        debug!(
            left = self.len(),
            right = other.len(),
            shared,
            merged = merged.len(),
            "merged term dictionaries"
        );
        Ok(merged)
    }
}
