//! Error types for Freightcast Core

use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum CoreError {
    /// A CSV row had a different number of cells than the header
    #[error("Ragged row {row}: expected {expected} cells, found {found}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Columns passed to a dataset constructor differ in length
    #[error("Column '{column}' has {found} values, expected {expected}")]
    ColumnLength {
        column: String,
        expected: usize,
        found: usize,
    },

    #[error("Duplicate column: {0}")]
    DuplicateColumn(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
