//! Term → column mapping: dictionary lookup or feature hashing.

mod dictionary;
mod hashing;

pub use dictionary::DictionaryVectorizer;
pub use hashing::HashVectorizer;

use tv_core::NGramConfig;

/// Resolves terms to matrix columns.
///
/// The assembler generates n-grams with [`Vectorizer::ngram_config`], so a
/// vectorizer must be configured like the vocabulary it stands for or term
/// identities silently diverge. Use [`NGramConfig::ensure_compatible`] to
/// check when the two are configured separately.
pub trait Vectorizer: Send + Sync {
    /// Column for `term`, or `None` when the term has no column.
    fn term_to_column(&self, term: &str) -> Option<usize>;

    /// Width of the column space.
    fn n_columns(&self) -> usize;

    /// N-gram settings that produce the terms this vectorizer expects.
    fn ngram_config(&self) -> &NGramConfig;
}

impl<V: Vectorizer + ?Sized> Vectorizer for &V {
    fn term_to_column(&self, term: &str) -> Option<usize> {
        (**self).term_to_column(term)
    }

    fn n_columns(&self) -> usize {
        (**self).n_columns()
    }

    fn ngram_config(&self) -> &NGramConfig {
        (**self).ngram_config()
    }
}
