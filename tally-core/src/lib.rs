//! tally-core: transaction model, date formats and date windows

pub mod error;
pub mod greeting;
pub mod time;
pub mod transaction;
pub mod window;

pub use error::{Error, Result};
pub use greeting::greeting;
pub use time::{parse_operation_date, parse_reference_datetime, parse_report_day};
pub use transaction::{SETTLED_STATUS, Transaction, columns, round2};
pub use window::{DateWindow, Reference};
