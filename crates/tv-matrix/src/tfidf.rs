//! TF-IDF reweighting of count matrices.
//!
//! `tf = count / row_sum`, `idf = ln(rows / (smoothing + df))`.

use serde::{Deserialize, Serialize};
use tracing::debug;
use tv_core::{Result, TfIdfConfig, VectorizeError};

use crate::sparse::SparseMatrix;

/// Inverse document frequencies learned from one count matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdfWeights {
    idf: Vec<f64>,
    documents: usize,
}

impl IdfWeights {
    pub fn idf(&self) -> &[f64] {
        &self.idf
    }

    /// Rows of the matrix the weights were fitted on.
    pub fn documents(&self) -> usize {
        self.documents
    }

    /// Reweight `matrix`, which must have as many columns as the fitted one.
    pub fn transform(&self, matrix: &SparseMatrix) -> Result<SparseMatrix> {
        if matrix.cols() != self.idf.len() {
            return Err(VectorizeError::ShapeMismatch {
                expected: self.idf.len(),
                found: matrix.cols(),
            });
        }
        Ok(self.apply(matrix))
    }

    fn apply(&self, matrix: &SparseMatrix) -> SparseMatrix {
        let mut values = Vec::with_capacity(matrix.nnz());
        for row in 0..matrix.rows() {
            let sum: f64 = matrix.row(row).map(|(_, v)| v).sum();
            for (col, count) in matrix.row(row) {
                let tf = if sum > 0.0 { count / sum } else { 0.0 };
                values.push(tf * self.idf[col]);
            }
        }
        matrix.with_values(values)
    }
}

#[derive(Debug, Clone, Default)]
pub struct TfIdf {
    config: TfIdfConfig,
}

impl TfIdf {
    pub fn new(config: TfIdfConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &TfIdfConfig {
        &self.config
    }

    /// Learn per-column idf. A matrix with no rows yields all-zero weights,
    /// as does a column whose `smoothing + df` is zero.
    pub fn fit(&self, matrix: &SparseMatrix) -> IdfWeights {
        let rows = matrix.rows();
        let idf: Vec<f64> = if rows == 0 {
            vec![0.0; matrix.cols()]
        } else {
            matrix
                .column_document_frequency()
                .into_iter()
                .map(|df| {
                    let denominator = self.config.smoothing + df as f64;
                    if denominator > 0.0 {
                        (rows as f64 / denominator).ln()
                    } else {
                        0.0
                    }
                })
                .collect()
        };
        debug!(rows, cols = idf.len(), smoothing = self.config.smoothing, "fitted idf");
        IdfWeights { idf, documents: rows }
    }

    /// Fit on `matrix` and reweight it, returning the weights for reuse on
    /// other matrices with the same column space.
    pub fn fit_transform(&self, matrix: &SparseMatrix) -> (IdfWeights, SparseMatrix) {
        let weights = self.fit(matrix);
        let weighted = weights.apply(matrix);
        (weights, weighted)
    }

    /// Fit on `matrix` and reweight it.
    pub fn transform(&self, matrix: &SparseMatrix) -> SparseMatrix {
        self.fit_transform(matrix).1
    }
}

/// TF-IDF with the default smoothing constant.
pub fn transform(matrix: &SparseMatrix) -> SparseMatrix {
    TfIdf::default().transform(matrix)
}
