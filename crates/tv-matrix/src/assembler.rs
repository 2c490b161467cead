//! Document-term matrix assembly over a document stream.

use std::borrow::Borrow;
use std::collections::HashMap;

use tracing::{debug, trace};
use tv_core::{Document, Result, VectorizeError};
use tv_vocab::NGramGenerator;

use crate::sparse::SparseMatrix;
use crate::vectorizer::Vectorizer;

/// Accumulates one matrix row per document, in arrival order.
///
/// Holds only the current document's counts besides the matrix itself.
/// Stopping after any whole document leaves a valid partial matrix.
pub struct MatrixAssembler<V: Vectorizer> {
    vectorizer: V,
    generator: NGramGenerator,
    /// Column counts for the document in progress; reused across rows.
    counts: HashMap<usize, u64>,
    row: Vec<(usize, f64)>,
    matrix: SparseMatrix,
}

impl<V: Vectorizer> MatrixAssembler<V> {
    pub fn new(vectorizer: V) -> Result<Self> {
        let generator = NGramGenerator::new(vectorizer.ngram_config().clone())?;
        let matrix = SparseMatrix::empty(vectorizer.n_columns());
        Ok(Self {
            vectorizer,
            generator,
            counts: HashMap::new(),
            row: Vec::new(),
            matrix,
        })
    }

    /// Rows assembled so far.
    pub fn rows(&self) -> usize {
        self.matrix.rows()
    }

    /// Count the n-grams of one document into a new row labelled `id`.
    pub fn push_document<S: AsRef<str>>(&mut self, id: impl Into<String>, tokens: &[S]) {
        self.counts.clear();
        let vectorizer = &self.vectorizer;
        let counts = &mut self.counts;
        let mut dropped = 0usize;
        self.generator.for_each_ngram(tokens, |gram| match vectorizer.term_to_column(gram) {
            Some(col) => *counts.entry(col).or_insert(0) += 1,
            None => dropped += 1,
        });

        self.row.clear();
        self.row.extend(self.counts.iter().map(|(&col, &n)| (col, n as f64)));
        self.row.sort_unstable_by_key(|&(col, _)| col);

        let id = id.into();
        trace!(id = %id, columns = self.row.len(), dropped, "document vectorized");
        self.matrix.push_row(id, self.row.drain(..));
    }

    pub fn push(&mut self, document: &Document) {
        self.push_document(document.id.as_str(), &document.tokens);
    }

    pub fn finish(self) -> SparseMatrix {
        debug!(
            rows = self.matrix.rows(),
            cols = self.matrix.cols(),
            nnz = self.matrix.nnz(),
            "assembled document-term matrix"
        );
        self.matrix
    }
}

/// Assemble a count matrix from a document stream.
pub fn build<V, I, D>(vectorizer: V, documents: I) -> Result<SparseMatrix>
where
    V: Vectorizer,
    I: IntoIterator<Item = D>,
    D: Borrow<Document>,
{
    let mut assembler = MatrixAssembler::new(vectorizer)?;
    for document in documents {
        assembler.push(document.borrow());
    }
    Ok(assembler.finish())
}

/// Like [`build`], over a fallible source. The first source error aborts
/// the build and is returned as [`VectorizeError::Source`].
pub fn try_build<V, I, D, E>(vectorizer: V, documents: I) -> Result<SparseMatrix>
where
    V: Vectorizer,
    I: IntoIterator<Item = std::result::Result<D, E>>,
    D: Borrow<Document>,
    E: Into<anyhow::Error>,
{
    let mut assembler = MatrixAssembler::new(vectorizer)?;
    for document in documents {
        let document = document.map_err(|e| VectorizeError::Source(e.into()))?;
        assembler.push(document.borrow());
    }
    Ok(assembler.finish())
}
