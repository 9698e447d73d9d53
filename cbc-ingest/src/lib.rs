//! cbc-ingest: normalizes CBC (Belgium) account-history CSV exports into a
//! bank-agnostic statement model.

pub mod errors;
pub mod parsers;
pub mod types;

pub use errors::ParseError;
pub use parsers::cbc_be::{CbcParser, parse_statement, parse_statement_file};
pub use types::{Statement, StatementLine, TransactionKind};
