//! Vocabulary construction: n-gram generation, term dictionary, pruning.
//!
//! Components:
//! 1. `NGramGenerator` — contiguous token spans joined by a delimiter
//! 2. `TermDictionary` — interning table with per-term corpus statistics
//! 3. `VocabularyBuilder` — single-writer ingestion of documents
//! 4. `prune` — frequency-threshold filtering into a new dictionary

pub mod builder;
pub mod dictionary;
pub mod ngram;
pub mod prune;

pub use builder::VocabularyBuilder;
pub use dictionary::TermDictionary;
pub use ngram::NGramGenerator;
pub use prune::prune;
pub use tv_core::{
    Document, NGramConfig, PruneConfig, Result, TermStat, VectorizeError, VocabularyEntry,
    VocabularySnapshot,
};
