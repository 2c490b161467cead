//! Shared types for the term vectorization engine: configuration, errors,
//! documents and vocabulary statistics.

pub mod config;
pub mod error;
pub mod types;

pub use config::{NGramConfig, PipelineConfig, PruneConfig, TfIdfConfig};
pub use error::{Result, VectorizeError};
pub use types::{Document, TermStat, VocabularyEntry, VocabularySnapshot};
