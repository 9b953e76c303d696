use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for every fallible store operation.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors reported by the table engine.
///
/// None of these are fatal: validation failures leave the table untouched and
/// the caller decides whether to retry or give up.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A cell or column name contains the delimiter or a line break.
    #[error("illegal character in {value:?}: '|' and line breaks are reserved")]
    IllegalCharacter { value: String },

    /// The primary key of an inserted row is already present.
    #[error("duplicate primary key {key:?}")]
    DuplicateKey { key: String },

    /// A column index outside the schema.
    #[error("invalid column index {index}: table has {columns} columns")]
    InvalidColumnIndex { index: usize, columns: usize },

    /// The operation needs a schema and none was created or loaded.
    #[error("no schema defined: create a table or load a file first")]
    NoSchema,

    /// A column name or primary-key cell is empty; it would be written as a
    /// blank line or an empty header and lost on load.
    #[error("empty {what} is not allowed")]
    EmptyValue { what: &'static str },

    /// A schema with zero columns was requested.
    #[error("a schema needs at least one column")]
    EmptySchema,

    /// An inserted row does not have one cell per column.
    #[error("row has {found} cells but the schema has {expected} columns")]
    ColumnCountMismatch { expected: usize, found: usize },

    /// The operation needs at least one row.
    #[error("table is empty")]
    EmptyTable,

    #[error("file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("cannot read {}: {source}", path.display())]
    FileUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write {}: {source}", path.display())]
    FileWriteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// I/O failure on a caller-supplied reader or writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("configuration error: {0}")]
    Config(String),
}
