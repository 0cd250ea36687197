//! tally-ingest: positioned-text extraction of transactions from bank and
//! credit card statement PDFs, reconciled against the statement's printed
//! totals.

pub mod decode;
pub mod parsers;
pub mod statement;
pub mod text;

pub use parsers::parse_statement;
pub use statement::{StatementKind, StatementPeriod};
pub use text::{Fragment, Page, column, row};
