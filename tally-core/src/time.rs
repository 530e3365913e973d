//! Date utilities: the fixed textual formats used by statements and run inputs.
//!
//! All timestamps are naive. Statements carry local bank time and the
//! reference date is given in the same calendar, so nothing is converted.

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::{Error, Result};

/// `Дата операции` cells, e.g. `31.12.2021 16:44:00`
pub const OPERATION_DATE_FORMAT: &str = "%d.%m.%Y %H:%M:%S";

/// Run reference instant, e.g. `2018-01-20 18:59:59`
pub const REFERENCE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Day-only reference used by the category report, e.g. `15.02.2022`
pub const REPORT_DAY_FORMAT: &str = "%d.%m.%Y";

/// Parse an operation timestamp from a statement row.
pub fn parse_operation_date(s: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s.trim(), OPERATION_DATE_FORMAT).map_err(|source| {
        Error::InvalidDate {
            input: s.to_string(),
            expected: "DD.MM.YYYY HH:MM:SS",
            source,
        }
    })
}

/// Parse the reference instant a report run is anchored to.
pub fn parse_reference_datetime(s: &str) -> Result<NaiveDateTime> {
    tracing::debug!(input = s, "parsing reference datetime");
    NaiveDateTime::parse_from_str(s.trim(), REFERENCE_FORMAT).map_err(|source| Error::InvalidDate {
        input: s.to_string(),
        expected: "YYYY-MM-DD HH:MM:SS",
        source,
    })
}

/// Parse a day-only reference (`DD.MM.YYYY`).
pub fn parse_report_day(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), REPORT_DAY_FORMAT).map_err(|source| Error::InvalidDate {
        input: s.to_string(),
        expected: "DD.MM.YYYY",
        source,
    })
}

/// Serde adapter keeping `operation_date` in the statement's own text format.
pub mod operation_date_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::OPERATION_DATE_FORMAT;

    pub fn serialize<S: Serializer>(dt: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&dt.format(OPERATION_DATE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        super::parse_operation_date(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reference_datetime() {
        let dt = parse_reference_datetime("2021-09-27 16:00:00").unwrap();
        assert_eq!(
            dt,
            NaiveDate::from_ymd_opt(2021, 9, 27)
                .unwrap()
                .and_hms_opt(16, 0, 0)
                .unwrap()
        );
    }

    #[test]
    fn test_malformed_reference_is_an_error() {
        let err = parse_reference_datetime("27.09.2021 16:00").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("27.09.2021 16:00"), "got: {msg}");
        assert!(msg.contains("YYYY-MM-DD HH:MM:SS"), "got: {msg}");
    }

    #[test]
    fn test_parse_operation_date() {
        let dt = parse_operation_date("31.12.2021 16:44:00").unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M").to_string(), "2021-12-31 16:44");
        assert!(parse_operation_date("2021-12-31").is_err());
        assert!(parse_operation_date("").is_err());
    }

    #[test]
    fn test_parse_report_day() {
        assert_eq!(
            parse_report_day("15.02.2022").unwrap(),
            NaiveDate::from_ymd_opt(2022, 2, 15).unwrap()
        );
        assert!(parse_report_day("30.02.2022").is_err());
    }
}
