//! Row-compressed sparse matrix with labelled rows.
//!
//! Rows are appended once, in document arrival order. Within a row, column
//! indices are strictly increasing, so duplicate `(row, col)` pairs cannot
//! exist after construction.

use serde::{Deserialize, Serialize};
use sprs::CsMat;
use tv_core::{Result, VectorizeError};

/// Deserialized form of [`SparseMatrix`], checked before it is accepted.
#[derive(Deserialize)]
struct RawSparseMatrix {
    cols: usize,
    row_labels: Vec<String>,
    indptr: Vec<usize>,
    indices: Vec<usize>,
    values: Vec<f64>,
}

impl TryFrom<RawSparseMatrix> for SparseMatrix {
    type Error = VectorizeError;

    fn try_from(raw: RawSparseMatrix) -> Result<Self> {
        let invalid = |msg: String| Err(VectorizeError::InvalidMatrix(msg));
        if raw.indptr.len() != raw.row_labels.len() + 1 {
            return invalid(format!(
                "indptr has {} offsets for {} rows",
                raw.indptr.len(),
                raw.row_labels.len()
            ));
        }
        if raw.indptr[0] != 0 {
            return invalid(format!("indptr starts at {}", raw.indptr[0]));
        }
        if raw.indices.len() != raw.values.len() {
            return invalid(format!(
                "{} indices but {} values",
                raw.indices.len(),
                raw.values.len()
            ));
        }
        let last = raw.indptr[raw.indptr.len() - 1];
        if last != raw.indices.len() {
            return invalid(format!("indptr ends at {} but nnz is {}", last, raw.indices.len()));
        }
        if let Some(row) = raw.indptr.windows(2).position(|span| span[0] > span[1]) {
            return invalid(format!("indptr decreases at row {}", row));
        }
        for (row, span) in raw.indptr.windows(2).enumerate() {
            let cols = &raw.indices[span[0]..span[1]];
            if cols.windows(2).any(|pair| pair[0] >= pair[1]) {
                return invalid(format!("row {} columns not strictly increasing", row));
            }
            if let Some(&col) = cols.last().filter(|&&col| col >= raw.cols) {
                return Err(VectorizeError::OutOfBounds {
                    row,
                    col,
                    rows: raw.row_labels.len(),
                    cols: raw.cols,
                });
            }
        }
        Ok(Self {
            cols: raw.cols,
            row_labels: raw.row_labels,
            indptr: raw.indptr,
            indices: raw.indices,
            values: raw.values,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSparseMatrix")]
pub struct SparseMatrix {
    cols: usize,
    row_labels: Vec<String>,
    /// `indptr[r]..indptr[r + 1]` spans row `r` in `indices`/`values`.
    indptr: Vec<usize>,
    indices: Vec<usize>,
    values: Vec<f64>,
}

impl SparseMatrix {
    /// A matrix with no rows and `cols` columns.
    pub fn empty(cols: usize) -> Self {
        Self {
            cols,
            row_labels: Vec::new(),
            indptr: vec![0],
            indices: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Build from `(row, col, value)` triplets, summing duplicates.
    ///
    /// `row_labels` must hold exactly `rows` labels.
    pub fn from_triplets<I>(
        rows: usize,
        cols: usize,
        row_labels: Vec<String>,
        triplets: I,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, usize, f64)>,
    {
        if row_labels.len() != rows {
            return Err(VectorizeError::LabelCountMismatch {
                expected: rows,
                found: row_labels.len(),
            });
        }
        let mut entries: Vec<(usize, usize, f64)> = Vec::new();
        for (row, col, value) in triplets {
            if row >= rows || col >= cols {
                return Err(VectorizeError::OutOfBounds { row, col, rows, cols });
            }
            entries.push((row, col, value));
        }
        entries.sort_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));

        let mut matrix = Self::empty(cols);
        matrix.row_labels = row_labels;
        matrix.indptr = Vec::with_capacity(rows + 1);
        matrix.indptr.push(0);
        let mut entries = entries.into_iter().peekable();
        for row in 0..rows {
            while let Some((_, col, mut value)) = entries.next_if(|e| e.0 == row) {
                while let Some((_, _, dup)) = entries.next_if(|e| e.0 == row && e.1 == col) {
                    value += dup;
                }
                matrix.indices.push(col);
                matrix.values.push(value);
            }
            matrix.indptr.push(matrix.indices.len());
        }
        Ok(matrix)
    }

    /// Append a row. `entries` must be sorted by column with no repeats.
    pub(crate) fn push_row<I>(&mut self, label: String, entries: I)
    where
        I: IntoIterator<Item = (usize, f64)>,
    {
        let start = self.indices.len();
        for (col, value) in entries {
            debug_assert!(col < self.cols);
            debug_assert!(self.indices.len() == start || self.indices[self.indices.len() - 1] < col);
            self.indices.push(col);
            self.values.push(value);
        }
        self.row_labels.push(label);
        self.indptr.push(self.indices.len());
    }

    /// Same sparsity structure with new values, one per stored entry.
    pub(crate) fn with_values(&self, values: Vec<f64>) -> Self {
        debug_assert_eq!(values.len(), self.values.len());
        Self {
            cols: self.cols,
            row_labels: self.row_labels.clone(),
            indptr: self.indptr.clone(),
            indices: self.indices.clone(),
            values,
        }
    }

    fn row_range(&self, row: usize) -> std::ops::Range<usize> {
        self.indptr[row]..self.indptr[row + 1]
    }

    pub fn rows(&self) -> usize {
        self.row_labels.len()
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Stored entries.
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    pub fn row_labels(&self) -> &[String] {
        &self.row_labels
    }

    /// All entries as `(row, col, value)`, row-major.
    pub fn entries(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        (0..self.rows()).flat_map(move |row| self.row(row).map(move |(col, value)| (row, col, value)))
    }

    /// Entries of one row as `(col, value)`. Empty for rows out of range.
    pub fn row(&self, row: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        let range = if row < self.rows() { self.row_range(row) } else { 0..0 };
        self.indices[range.clone()]
            .iter()
            .copied()
            .zip(self.values[range].iter().copied())
    }

    /// Value at `(row, col)`, zero when absent.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        if row >= self.rows() {
            return 0.0;
        }
        let range = self.row_range(row);
        match self.indices[range.clone()].binary_search(&col) {
            Ok(pos) => self.values[range.start + pos],
            Err(_) => 0.0,
        }
    }

    pub fn row_sums(&self) -> Vec<f64> {
        (0..self.rows()).map(|row| self.row(row).map(|(_, v)| v).sum()).collect()
    }

    /// Number of rows with a nonzero entry in each column.
    pub fn column_document_frequency(&self) -> Vec<u64> {
        let mut df = vec![0u64; self.cols];
        for (&col, &value) in self.indices.iter().zip(self.values.iter()) {
            if value != 0.0 {
                df[col] += 1;
            }
        }
        df
    }

    /// Concatenate the rows of `other` after the rows of `self`.
    ///
    /// Only meaningful when both halves were vectorized with the same column
    /// mapping (one hash vectorizer, or one frozen dictionary).
    pub fn vstack(mut self, other: &SparseMatrix) -> Result<SparseMatrix> {
        if self.cols != other.cols {
            return Err(VectorizeError::ShapeMismatch {
                expected: self.cols,
                found: other.cols,
            });
        }
        let offset = self.indices.len();
        self.indices.extend_from_slice(&other.indices);
        self.values.extend_from_slice(&other.values);
        self.indptr.extend(other.indptr.iter().skip(1).map(|p| p + offset));
        self.row_labels.extend(other.row_labels.iter().cloned());
        Ok(self)
    }

    /// Compressed sparse row form for downstream linear algebra.
    pub fn to_csr(&self) -> CsMat<f64> {
        CsMat::new(
            (self.rows(), self.cols),
            self.indptr.clone(),
            self.indices.clone(),
            self.values.clone(),
        )
    }

    /// Dense row-major copy. Intended for small matrices and tests.
    pub fn to_dense(&self) -> Vec<Vec<f64>> {
        let mut dense = vec![vec![0.0; self.cols]; self.rows()];
        for (row, col, value) in self.entries() {
            dense[row][col] = value;
        }
        dense
    }
}
