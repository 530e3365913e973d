pub mod csv_export;
pub mod xlsx;

pub use csv_export::{parse_statement_csv, parse_statement_csv_text};
pub use xlsx::parse_xlsx;
