use std::collections::hash_map::DefaultHasher;
use std::hash::{BuildHasher, BuildHasherDefault};

use tv_core::{NGramConfig, Result, VectorizeError};

use super::Vectorizer;

/// Feature hashing: `column = hash(term) mod hash_size`.
///
/// Holds no vocabulary. Distinct terms may share a bucket. Power-of-two
/// sizes reduce the modulo to a mask.
///
/// The default hasher is SipHash with fixed keys: stable within a build, not
/// promised across toolchain releases. Pass a hasher of your own through
/// [`HashVectorizer::with_hasher`] when columns must stay stable across
/// persisted matrices.
#[derive(Debug, Clone)]
pub struct HashVectorizer<S = BuildHasherDefault<DefaultHasher>> {
    config: NGramConfig,
    hash_size: usize,
    mask: Option<usize>,
    build_hasher: S,
}

impl HashVectorizer {
    pub fn new(config: NGramConfig, hash_size: usize) -> Result<Self> {
        Self::with_hasher(config, hash_size, BuildHasherDefault::default())
    }
}

impl<S: BuildHasher> HashVectorizer<S> {
    pub fn with_hasher(config: NGramConfig, hash_size: usize, build_hasher: S) -> Result<Self> {
        config.validate()?;
        if hash_size == 0 {
            return Err(VectorizeError::InvalidHashSize(hash_size));
        }
        let mask = hash_size.is_power_of_two().then(|| hash_size - 1);
        Ok(Self { config, hash_size, mask, build_hasher })
    }

    pub fn hash_size(&self) -> usize {
        self.hash_size
    }

    /// Bucket of `term`; always in `[0, hash_size)`.
    pub fn column(&self, term: &str) -> usize {
        let hash = self.build_hasher.hash_one(term) as usize;
        match self.mask {
            Some(mask) => hash & mask,
            None => hash % self.hash_size,
        }
    }
}

impl<S: BuildHasher + Send + Sync> Vectorizer for HashVectorizer<S> {
    fn term_to_column(&self, term: &str) -> Option<usize> {
        Some(self.column(term))
    }

    fn n_columns(&self) -> usize {
        self.hash_size
    }

    fn ngram_config(&self) -> &NGramConfig {
        &self.config
    }
}
