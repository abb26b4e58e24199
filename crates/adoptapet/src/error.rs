//! Error types for the import configuration.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("duplicate column index on line {line}: {text}")]
    DuplicateColumnIndex { line: usize, text: String },

    #[error("mapping data found before any column header on line {line}: {text}")]
    MappingBeforeColumn { line: usize, text: String },

    #[error("invalid syntax on line {line}: {text}")]
    Syntax { line: usize, text: String },

    #[error("no such column: {0}")]
    UnknownColumn(String),

    #[error("failed to read configuration source: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
