//! Errors surfaced while normalizing a statement export.
//!
//! Every variant is fatal: the first one aborts the file. There is no
//! row-skip-and-continue mode and no partial statement output.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("line {line}: wrong number of fields: found {found} but expected {expected}")]
    FieldCountMismatch {
        line: usize,
        found: usize,
        expected: usize,
    },

    #[error(
        "line {line}: account id does not match on all lines: line has '{found}' but file started with '{expected}'"
    )]
    AccountMismatch {
        line: usize,
        found: String,
        expected: String,
    },

    #[error(
        "line {line}: currency does not match on all lines: line has '{found}' but file started with '{expected}'"
    )]
    CurrencyMismatch {
        line: usize,
        found: String,
        expected: String,
    },

    #[error("line {line}: invalid amount '{value}'")]
    InvalidAmount { line: usize, value: String },

    #[error("line {line}: invalid date '{value}', expected DD/MM/YYYY")]
    InvalidDate { line: usize, value: String },

    #[error("no transaction rows found in input")]
    EmptyStatement,

    #[error("reading input: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv: {0}")]
    Csv(#[from] csv::Error),
}
