use thiserror::Error;

#[derive(Error, Debug)]
pub enum VectorizeError {
    #[error("Invalid n-gram range: min={min}, max={max} (need 1 <= min <= max)")]
    InvalidNGramRange { min: usize, max: usize },
    #[error("Invalid hash size: {0}")]
    InvalidHashSize(usize),
    #[error("Invalid threshold {name}: min={min}, max={max}")]
    InvalidThreshold { name: &'static str, min: f64, max: f64 },
    #[error("Invalid idf smoothing constant: {0}")]
    InvalidSmoothing(f64),
    #[error("N-gram configuration mismatch: expected {expected}, found {found}")]
    IdentityMismatch { expected: String, found: String },
    #[error("Shape mismatch: expected {expected} columns, got {found}")]
    ShapeMismatch { expected: usize, found: usize },
    #[error("Entry ({row}, {col}) outside {rows}x{cols} matrix")]
    OutOfBounds { row: usize, col: usize, rows: usize, cols: usize },
    #[error("Expected {expected} row labels, got {found}")]
    LabelCountMismatch { expected: usize, found: usize },
    #[error("No vocabulary fitted; call fit before transform")]
    NotFitted,
    #[error("Invalid vocabulary snapshot: {0}")]
    InvalidSnapshot(String),
    #[error("Invalid sparse matrix: {0}")]
    InvalidMatrix(String),
    #[error("Document source error: {0}")]
    Source(anyhow::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, VectorizeError>;
