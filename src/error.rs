use std::path::PathBuf;
use thiserror::Error;

/// Failures the import pipeline distinguishes between.
///
/// None of these stop the whole import: a missing sheet or a bad header skips
/// one category, a row without a key skips one row, and a store failure aborts
/// the remaining rows of the current category only. A malformed number is not
/// an error at all; the field is written as NULL.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Failed to open workbook {path:?}: {message}")]
    WorkbookOpen { path: PathBuf, message: String },

    #[error("Sheet not found: {0:?}")]
    SheetNotFound(String),

    #[error("Failed to read sheet {sheet:?}: {message}")]
    SheetRead { sheet: String, message: String },

    #[error("Duplicate header key \"{key}\" in columns {first} and {second}")]
    DuplicateHeader {
        key: String,
        first: usize,
        second: usize,
    },

    #[error("Row {row} is missing the station {field}")]
    RowMissingKey { row: usize, field: &'static str },

    #[error("Store write failed: {0}")]
    StoreWrite(#[from] rusqlite::Error),
}
