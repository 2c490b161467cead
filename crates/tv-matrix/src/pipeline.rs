//! Feature pipeline — vocabulary, pruning, vectorization and TF-IDF from one
//! configuration.

use std::borrow::Borrow;

use tracing::debug;
use tv_core::{Document, PipelineConfig, Result, VectorizeError};
use tv_vocab::{TermDictionary, VocabularyBuilder};

use crate::assembler;
use crate::sparse::SparseMatrix;
use crate::tfidf::TfIdf;
use crate::vectorizer::{DictionaryVectorizer, HashVectorizer};

/// Two-pass feature extraction.
///
/// `fit` streams the corpus once to learn (and prune) a vocabulary;
/// `transform` streams documents again to produce the matrix. In hash mode
/// `fit` is a no-op and `transform` works immediately.
#[derive(Debug, Clone)]
pub struct FeaturePipeline {
    config: PipelineConfig,
    hasher: Option<HashVectorizer>,
    tfidf: Option<TfIdf>,
    vocabulary: Option<TermDictionary>,
}

impl FeaturePipeline {
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        let hasher = match config.hash_size {
            Some(size) => Some(HashVectorizer::new(config.ngram.clone(), size)?),
            None => None,
        };
        let tfidf = match &config.tfidf {
            Some(c) => Some(TfIdf::new(c.clone())?),
            None => None,
        };
        Ok(Self { config, hasher, tfidf, vocabulary: None })
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Self::new(PipelineConfig::from_json(json)?)
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn is_hashing(&self) -> bool {
        self.hasher.is_some()
    }

    /// The fitted (and pruned) vocabulary, if any.
    pub fn vocabulary(&self) -> Option<&TermDictionary> {
        self.vocabulary.as_ref()
    }

    /// Use an existing vocabulary instead of fitting one. Its n-gram
    /// settings must match the pipeline's.
    pub fn with_vocabulary(mut self, vocabulary: TermDictionary) -> Result<Self> {
        self.config.ngram.ensure_compatible(vocabulary.config())?;
        self.vocabulary = Some(vocabulary);
        Ok(self)
    }

    /// Learn the vocabulary from one pass over `documents`.
    pub fn fit<I, D>(&mut self, documents: I) -> Result<()>
    where
        I: IntoIterator<Item = D>,
        D: Borrow<Document>,
    {
        if self.is_hashing() {
            debug!("hashing pipeline, skipping vocabulary fit");
            return Ok(());
        }
        let mut builder = VocabularyBuilder::new(self.config.ngram.clone())?;
        for document in documents {
            builder.insert_document(&document.borrow().tokens);
        }
        let dictionary = builder.into_dictionary();
        let dictionary = match &self.config.prune {
            Some(prune) => dictionary.prune(prune)?,
            None => dictionary,
        };
        debug!(
            terms = dictionary.len(),
            documents = dictionary.document_count(),
            "pipeline vocabulary fitted"
        );
        self.vocabulary = Some(dictionary);
        Ok(())
    }

    /// Raw n-gram count matrix for `documents`.
    pub fn transform_counts<I, D>(&self, documents: I) -> Result<SparseMatrix>
    where
        I: IntoIterator<Item = D>,
        D: Borrow<Document>,
    {
        match (&self.hasher, &self.vocabulary) {
            (Some(hasher), _) => assembler::build(hasher, documents),
            (None, Some(vocabulary)) => {
                assembler::build(DictionaryVectorizer::new(vocabulary), documents)
            }
            (None, None) => Err(VectorizeError::NotFitted),
        }
    }

    /// Count matrix for `documents`, TF-IDF weighted when configured.
    pub fn transform<I, D>(&self, documents: I) -> Result<SparseMatrix>
    where
        I: IntoIterator<Item = D>,
        D: Borrow<Document>,
    {
        let counts = self.transform_counts(documents)?;
        Ok(match &self.tfidf {
            Some(tfidf) => tfidf.transform(&counts),
            None => counts,
        })
    }
}
