//! Construction-time configuration. Every consumer validates on construction.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, VectorizeError};

/// N-gram window and join delimiter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NGramConfig {
    pub ngram_min: usize,
    pub ngram_max: usize,
    pub delimiter: String,
}

impl NGramConfig {
    pub fn new(ngram_min: usize, ngram_max: usize, delimiter: impl Into<String>) -> Result<Self> {
        let config = Self { ngram_min, ngram_max, delimiter: delimiter.into() };
        config.validate()?;
        Ok(config)
    }

    /// Unigrams joined with `_`.
    pub fn unigram() -> Self {
        Self::default()
    }

    pub fn validate(&self) -> Result<()> {
        if self.ngram_min < 1 || self.ngram_min > self.ngram_max {
            return Err(VectorizeError::InvalidNGramRange {
                min: self.ngram_min,
                max: self.ngram_max,
            });
        }
        Ok(())
    }

    /// Fails when `other` would produce different term identities.
    ///
    /// Vectorization never calls this on its own; callers that combine a
    /// vocabulary with a separately configured vectorizer should.
    pub fn ensure_compatible(&self, other: &NGramConfig) -> Result<()> {
        if self != other {
            return Err(VectorizeError::IdentityMismatch {
                expected: self.to_string(),
                found: other.to_string(),
            });
        }
        Ok(())
    }
}

impl Default for NGramConfig {
    fn default() -> Self {
        Self { ngram_min: 1, ngram_max: 1, delimiter: "_".into() }
    }
}

impl fmt::Display for NGramConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ngram({}..={}, {:?})", self.ngram_min, self.ngram_max, self.delimiter)
    }
}

/// Vocabulary pruning thresholds. Bounds are inclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PruneConfig {
    pub term_count_min: u64,
    pub term_count_max: u64,
    pub doc_count_min: u64,
    pub doc_count_max: u64,
    pub doc_proportion_min: f64,
    pub doc_proportion_max: f64,
    /// Keep at most this many of the most frequent surviving terms.
    pub max_terms: Option<usize>,
}

impl Default for PruneConfig {
    fn default() -> Self {
        Self {
            term_count_min: 0,
            term_count_max: u64::MAX,
            doc_count_min: 0,
            doc_count_max: u64::MAX,
            doc_proportion_min: 0.0,
            doc_proportion_max: 1.0,
            max_terms: None,
        }
    }
}

impl PruneConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn term_count(mut self, min: u64, max: u64) -> Self {
        self.term_count_min = min;
        self.term_count_max = max;
        self
    }

    pub fn term_count_min(mut self, min: u64) -> Self {
        self.term_count_min = min;
        self
    }

    pub fn term_count_max(mut self, max: u64) -> Self {
        self.term_count_max = max;
        self
    }

    pub fn doc_count(mut self, min: u64, max: u64) -> Self {
        self.doc_count_min = min;
        self.doc_count_max = max;
        self
    }

    pub fn doc_proportion(mut self, min: f64, max: f64) -> Self {
        self.doc_proportion_min = min;
        self.doc_proportion_max = max;
        self
    }

    pub fn max_terms(mut self, max_terms: usize) -> Self {
        self.max_terms = Some(max_terms);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.term_count_min > self.term_count_max {
            return Err(VectorizeError::InvalidThreshold {
                name: "term_count",
                min: self.term_count_min as f64,
                max: self.term_count_max as f64,
            });
        }
        if self.doc_count_min > self.doc_count_max {
            return Err(VectorizeError::InvalidThreshold {
                name: "doc_count",
                min: self.doc_count_min as f64,
                max: self.doc_count_max as f64,
            });
        }
        let (min, max) = (self.doc_proportion_min, self.doc_proportion_max);
        if min.is_nan() || max.is_nan() || min < 0.0 || min > max {
            return Err(VectorizeError::InvalidThreshold { name: "doc_proportion", min, max });
        }
        Ok(())
    }
}

/// TF-IDF settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TfIdfConfig {
    /// Added to document frequency in the idf denominator.
    pub smoothing: f64,
}

impl Default for TfIdfConfig {
    fn default() -> Self {
        Self { smoothing: 1.0 }
    }
}

impl TfIdfConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.smoothing.is_finite() || self.smoothing < 0.0 {
            return Err(VectorizeError::InvalidSmoothing(self.smoothing));
        }
        Ok(())
    }
}

/// End-to-end feature extraction settings.
///
/// `hash_size` selects feature hashing; without it a vocabulary is built
/// and, when `prune` is set, pruned before vectorization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub ngram: NGramConfig,
    pub prune: Option<PruneConfig>,
    pub hash_size: Option<usize>,
    pub tfidf: Option<TfIdfConfig>,
}

impl PipelineConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        self.ngram.validate()?;
        if let Some(prune) = &self.prune {
            prune.validate()?;
        }
        if self.hash_size == Some(0) {
            return Err(VectorizeError::InvalidHashSize(0));
        }
        if let Some(tfidf) = &self.tfidf {
            tfidf.validate()?;
        }
        Ok(())
    }
}
