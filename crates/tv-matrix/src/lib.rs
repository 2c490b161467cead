//! Document-term matrices from tokenized document streams.
//!
//! Stages:
//! 1. Vectorizer — term → column, by dictionary lookup or feature hashing
//! 2. Assembler — one sparse row of n-gram counts per document
//! 3. TF-IDF — optional reweighting of the count matrix
//!
//! `FeaturePipeline` wires these to a vocabulary from `tv-vocab`.

pub mod assembler;
pub mod pipeline;
pub mod sparse;
pub mod tfidf;
pub mod vectorizer;

pub use assembler::{build, try_build, MatrixAssembler};
pub use pipeline::FeaturePipeline;
pub use sparse::SparseMatrix;
pub use tfidf::{IdfWeights, TfIdf};
pub use vectorizer::{DictionaryVectorizer, HashVectorizer, Vectorizer};

#[cfg(test)]
mod tests;
