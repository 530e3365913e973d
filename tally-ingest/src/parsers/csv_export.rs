//! CSV statement reader
//!
//! Same columns as the spreadsheet export. Bank CSV exports are usually
//! `;`-separated; the delimiter is picked from the header line.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::types::{ColumnLayout, StatementRow};

pub fn parse_statement_csv(path: impl AsRef<Path>) -> Result<Vec<StatementRow>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    parse_statement_csv_text(&text)
}

pub fn parse_statement_csv_text(text: &str) -> Result<Vec<StatementRow>> {
    let text = text.trim_start_matches('\u{feff}');
    let header_line = text.lines().next().unwrap_or("");

    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(detect_delimiter(header_line))
        .flexible(true)
        .from_reader(text.as_bytes());

    let layout = ColumnLayout::from_headers(rdr.headers()?.iter())?;

    let mut out = Vec::new();
    for result in rdr.records() {
        let record = result?;
        if record.iter().all(|c| c.trim().is_empty()) {
            continue;
        }
        out.push(layout.row(|i| {
            record
                .get(i)
                .map(str::to_string)
                .filter(|s| !s.trim().is_empty())
        }));
    }

    Ok(out)
}

fn detect_delimiter(header_line: &str) -> u8 {
    let semicolons = header_line.matches(';').count();
    let commas = header_line.matches(',').count();
    if semicolons > commas { b';' } else { b',' }
}
