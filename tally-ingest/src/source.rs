//! Transaction source: picks a reader by file extension.

use std::path::Path;

use anyhow::{Result, bail};

use crate::parsers::{parse_statement_csv, parse_xlsx};
use crate::types::StatementRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementFormat {
    Spreadsheet,
    Csv,
}

impl StatementFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "xlsx" | "xlsm" | "xls" | "ods" => Some(StatementFormat::Spreadsheet),
            "csv" => Some(StatementFormat::Csv),
            _ => None,
        }
    }
}

/// Read a statement file, surfacing any failure.
pub fn read_statement(path: impl AsRef<Path>) -> Result<Vec<StatementRow>> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "reading statement");
    let rows = match StatementFormat::from_path(path) {
        Some(StatementFormat::Spreadsheet) => parse_xlsx(path)?,
        Some(StatementFormat::Csv) => parse_statement_csv(path)?,
        None => bail!("unsupported statement format: {}", path.display()),
    };
    tracing::info!(path = %path.display(), rows = rows.len(), "statement loaded");
    Ok(rows)
}

/// Read a statement file; any load failure is logged and yields no rows.
pub fn load_statement(path: impl AsRef<Path>) -> Vec<StatementRow> {
    let path = path.as_ref();
    match read_statement(path) {
        Ok(rows) => rows,
        Err(e) => {
            tracing::error!(path = %path.display(), error = %format!("{e:#}"), "failed to load statement");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            StatementFormat::from_path(&PathBuf::from("data/operations.xlsx")),
            Some(StatementFormat::Spreadsheet)
        );
        assert_eq!(
            StatementFormat::from_path(&PathBuf::from("ops.CSV")),
            Some(StatementFormat::Csv)
        );
        assert_eq!(StatementFormat::from_path(&PathBuf::from("ops.pdf")), None);
        assert_eq!(StatementFormat::from_path(&PathBuf::from("ops")), None);
    }

    #[test]
    fn test_load_missing_file_yields_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_statement(dir.path().join("operations.xlsx")).is_empty());
        assert!(load_statement(dir.path().join("operations.csv")).is_empty());
    }

    #[test]
    fn test_read_unsupported_format_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("operations.txt");
        std::fs::write(&path, "whatever").unwrap();
        assert!(read_statement(&path).is_err());
        assert!(load_statement(&path).is_empty());
    }

    #[test]
    fn test_read_csv_statement() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("operations.csv");
        std::fs::write(
            &path,
            "Дата операции,Статус,Сумма операции с округлением,Категория\n\
             01.01.2018 12:00:00,OK,1000,Категория1\n",
        )
        .unwrap();
        let rows = read_statement(&path).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].category, "Категория1");
    }
}
