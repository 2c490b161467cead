//! Vocabulary builder — drives n-gram generation into a term dictionary.

use std::collections::HashSet;

use tracing::{debug, trace};
use tv_core::{NGramConfig, Result, VectorizeError, VocabularySnapshot};

use crate::dictionary::TermDictionary;
use crate::ngram::NGramGenerator;

/// Single-writer vocabulary construction.
///
/// Each builder owns its dictionary exclusively. To ingest in parallel, run
/// one builder per shard and combine the results with
/// [`TermDictionary::merge`].
#[derive(Debug, Clone)]
pub struct VocabularyBuilder {
    generator: NGramGenerator,
    dictionary: TermDictionary,
    /// Distinct term ids of the document being ingested; reused across calls.
    doc_terms: HashSet<usize>,
}

impl VocabularyBuilder {
    pub fn new(config: NGramConfig) -> Result<Self> {
        let dictionary = TermDictionary::new(config.clone())?;
        Ok(Self {
            generator: NGramGenerator::new(config)?,
            dictionary,
            doc_terms: HashSet::new(),
        })
    }

    /// Continue building on top of an existing dictionary.
    pub fn from_dictionary(dictionary: TermDictionary) -> Result<Self> {
        Ok(Self {
            generator: NGramGenerator::new(dictionary.config().clone())?,
            dictionary,
            doc_terms: HashSet::new(),
        })
    }

    pub fn config(&self) -> &NGramConfig {
        self.generator.config()
    }

    /// Ingest one document's tokens.
    ///
    /// Every n-gram occurrence bumps its term's `global_count`; each distinct
    /// term of the document bumps its `doc_count` exactly once.
    pub fn insert_document<S: AsRef<str>>(&mut self, tokens: &[S]) {
        self.doc_terms.clear();
        self.dictionary.record_document();

        let dictionary = &mut self.dictionary;
        let doc_terms = &mut self.doc_terms;
        self.generator.for_each_ngram(tokens, |gram| {
            let id = dictionary.record_occurrence(gram);
            doc_terms.insert(id);
        });

        for &id in self.doc_terms.iter() {
            self.dictionary.record_document_occurrence(id);
        }
        trace!(
            tokens = tokens.len(),
            distinct = self.doc_terms.len(),
            vocabulary = self.dictionary.len(),
            "document ingested"
        );
    }

    /// Ingest documents in order; same result as repeated `insert_document`.
    pub fn insert_document_batch<I, D, S>(&mut self, documents: I)
    where
        I: IntoIterator<Item = D>,
        D: AsRef<[S]>,
        S: AsRef<str>,
    {
        let before = self.dictionary.document_count();
        for document in documents {
            self.insert_document(document.as_ref());
        }
        debug!(
            documents = self.dictionary.document_count() - before,
            vocabulary = self.dictionary.len(),
            "document batch ingested"
        );
    }

    /// Ingest from a fallible source, stopping at the first source error.
    ///
    /// Documents ingested before the error remain counted. Returns the
    /// number of documents ingested by this call.
    pub fn try_insert_documents<I, D, S, E>(&mut self, documents: I) -> Result<u64>
    where
        I: IntoIterator<Item = std::result::Result<D, E>>,
        D: AsRef<[S]>,
        S: AsRef<str>,
        E: Into<anyhow::Error>,
    {
        let mut ingested = 0u64;
        for document in documents {
            let document = document.map_err(|e| VectorizeError::Source(e.into()))?;
            self.insert_document(document.as_ref());
            ingested += 1;
        }
        Ok(ingested)
    }

    /// Snapshot of every term with its id and counts.
    pub fn vocabulary_stat(&self) -> VocabularySnapshot {
        self.dictionary.snapshot()
    }

    pub fn dictionary(&self) -> &TermDictionary {
        &self.dictionary
    }

    pub fn into_dictionary(self) -> TermDictionary {
        self.dictionary
    }
}
