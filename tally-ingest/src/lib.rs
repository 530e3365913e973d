//! tally-ingest: statement readers (spreadsheet/CSV) and report file output.

pub mod export;
pub mod parsers;
pub mod source;
pub mod types;

pub use export::{FileName, SaveOptions, SavedReport, save_report, write_transactions_csv};
pub use source::{StatementFormat, load_statement, read_statement};
pub use types::{StatementRow, into_transactions, parse_amount};
