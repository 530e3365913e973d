//! Spreadsheet statement reader (xlsx/xls/ods via calamine)
//!
//! Reads the first worksheet. The first row is the header; column order is
//! free. Date cells are rendered back to `DD.MM.YYYY HH:MM:SS` text and
//! integral numeric cells (card numbers) lose their `.0`.

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use calamine::{Data, Reader, open_workbook_auto};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use tally_core::time::OPERATION_DATE_FORMAT;

use crate::types::{ColumnLayout, StatementRow};

pub fn parse_xlsx(path: impl AsRef<Path>) -> Result<Vec<StatementRow>> {
    let path = path.as_ref();
    let mut workbook =
        open_workbook_auto(path).with_context(|| format!("opening {}", path.display()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| anyhow!("{} has no worksheets", path.display()))?
        .with_context(|| format!("reading first worksheet of {}", path.display()))?;

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Ok(Vec::new());
    };
    let header_text: Vec<String> = header.iter().map(|c| cell_text(c).unwrap_or_default()).collect();
    let layout = ColumnLayout::from_headers(header_text.iter().map(String::as_str))?;

    let out = rows
        .filter(|row| row.iter().any(|c| !matches!(c, Data::Empty)))
        .map(|row| layout.row(|i| row.get(i).and_then(cell_text)))
        .collect();

    Ok(out)
}

/// Render a cell as text; `None` for empty or error cells.
pub(crate) fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) => Some(s.clone()),
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e16 => Some(format!("{f:.0}")),
        Data::Float(f) => Some(f.to_string()),
        Data::Bool(b) => Some(b.to_string()),
        Data::DateTime(dt) => excel_serial_to_datetime(dt.as_f64())
            .map(|d| d.format(OPERATION_DATE_FORMAT).to_string()),
        Data::DateTimeIso(s) => Some(
            NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
                .map(|d| d.format(OPERATION_DATE_FORMAT).to_string())
                .unwrap_or_else(|_| s.clone()),
        ),
        Data::DurationIso(s) => Some(s.clone()),
    }
}

/// Excel serial day number to a timestamp (epoch 1899-12-30, 1900 leap-year bug included).
pub(crate) fn excel_serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() {
        return None;
    }
    let base = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_time(NaiveTime::MIN);
    let seconds = (serial * 86_400.0).round() as i64;
    base.checked_add_signed(TimeDelta::try_seconds(seconds)?)
}
