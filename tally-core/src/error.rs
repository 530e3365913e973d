//! Error types for tally-core

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid date '{input}': expected {expected}")]
    InvalidDate {
        input: String,
        expected: &'static str,
        #[source]
        source: chrono::ParseError,
    },

    #[error("invalid amount '{0}'")]
    InvalidAmount(String),

    #[error("missing column: {0}")]
    MissingColumn(String),
}

pub type Result<T> = std::result::Result<T, Error>;
