//! Report persistence: run a report and optionally write its rows to CSV.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use tally_core::Transaction;

/// How the output file is named
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileName {
    /// `{report}_report_{YYYYmmdd_HHMMSS}.csv` inside `dir`
    Auto { dir: PathBuf },
    Explicit(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOptions {
    pub persist: bool,
    pub file_name: FileName,
}

impl SaveOptions {
    pub fn disabled() -> Self {
        Self {
            persist: false,
            file_name: FileName::Auto { dir: PathBuf::from(".") },
        }
    }

    pub fn auto(dir: impl Into<PathBuf>) -> Self {
        Self {
            persist: true,
            file_name: FileName::Auto { dir: dir.into() },
        }
    }

    pub fn explicit(path: impl Into<PathBuf>) -> Self {
        Self {
            persist: true,
            file_name: FileName::Explicit(path.into()),
        }
    }

    /// Resolve the output path for `report`, stamped with `now` in auto mode.
    pub fn path_for(&self, report: &str, now: NaiveDateTime) -> PathBuf {
        match &self.file_name {
            FileName::Auto { dir } => dir.join(auto_file_name(report, now)),
            FileName::Explicit(path) => path.clone(),
        }
    }
}

/// Rows produced by a report, with the file they were written to (if any)
#[derive(Debug, Clone, PartialEq)]
pub struct SavedReport {
    pub rows: Vec<Transaction>,
    pub path: Option<PathBuf>,
}

pub fn auto_file_name(report: &str, now: NaiveDateTime) -> String {
    format!("{report}_report_{}.csv", now.format("%Y%m%d_%H%M%S"))
}

/// Run `produce` and, when persisting is enabled, write its rows to a file.
pub fn save_report<F>(options: &SaveOptions, report: &str, produce: F) -> Result<SavedReport>
where
    F: FnOnce() -> Result<Vec<Transaction>>,
{
    let rows = produce()?;
    if !options.persist {
        return Ok(SavedReport { rows, path: None });
    }

    let path = options.path_for(report, Local::now().naive_local());
    write_transactions_csv(&path, &rows)?;
    tracing::info!(path = %path.display(), rows = rows.len(), report, "report saved");
    Ok(SavedReport {
        rows,
        path: Some(path),
    })
}

/// Write rows with the statement's own column headers.
pub fn write_transactions_csv(path: &Path, rows: &[Transaction]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush().with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::parse_statement_csv;
    use crate::types::into_transactions;
    use chrono::NaiveDate;

    fn rows() -> Vec<Transaction> {
        let at = NaiveDate::from_ymd_opt(2022, 1, 15)
            .unwrap()
            .and_hms_opt(10, 15, 0)
            .unwrap();
        vec![
            Transaction::new(at, 1500.0, "Переводы").with_card("*7197"),
            Transaction::new(at, 800.0, "Переводы").with_description("Перевод Ивану"),
        ]
    }

    #[test]
    fn test_auto_file_name() {
        let now = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(7, 5, 1)
            .unwrap();
        assert_eq!(
            auto_file_name("spending_by_category", now),
            "spending_by_category_report_20240309_070501.csv"
        );
        let opts = SaveOptions::auto("/tmp/reports");
        assert_eq!(
            opts.path_for("spending_by_category", now),
            PathBuf::from("/tmp/reports/spending_by_category_report_20240309_070501.csv")
        );
    }

    #[test]
    fn test_disabled_does_not_write() {
        let saved = save_report(&SaveOptions::disabled(), "spending_by_category", || Ok(rows())).unwrap();
        assert_eq!(saved.rows.len(), 2);
        assert_eq!(saved.path, None);
    }

    #[test]
    fn test_explicit_path_is_written_and_readable() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("custom_report.csv");
        let saved = save_report(&SaveOptions::explicit(&target), "spending_by_category", || Ok(rows())).unwrap();
        assert_eq!(saved.path.as_deref(), Some(target.as_path()));

        let back = into_transactions(parse_statement_csv(&target).unwrap()).unwrap();
        assert_eq!(back, rows());
    }

    #[test]
    fn test_auto_name_lands_in_dir() {
        let dir = tempfile::tempdir().unwrap();
        let saved = save_report(&SaveOptions::auto(dir.path()), "spending_by_category", || Ok(rows())).unwrap();
        let path = saved.path.unwrap();
        assert!(path.starts_with(dir.path()));
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("spending_by_category_report_"), "got {name}");
        assert!(path.exists());
    }

    #[test]
    fn test_producer_error_skips_write() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("never.csv");
        let res = save_report(&SaveOptions::explicit(&target), "spending_by_category", || {
            anyhow::bail!("boom")
        });
        assert!(res.is_err());
        assert!(!target.exists());
    }
}
