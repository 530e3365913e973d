//! Date windows anchored at a reference date.
//!
//! Both bounds are inclusive. Lower bounds are always normalized to midnight.

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

use crate::transaction::Transaction;

/// The instant a window is anchored to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reference {
    /// Full-precision instant; the window ends exactly here
    Instant(NaiveDateTime),
    /// Day without a time component; the window ends at the end of that day
    Day(NaiveDate),
}

impl Reference {
    pub fn date(&self) -> NaiveDate {
        match self {
            Reference::Instant(dt) => dt.date(),
            Reference::Day(d) => *d,
        }
    }

    /// Last instant covered by this reference
    pub fn end(&self) -> NaiveDateTime {
        match self {
            Reference::Instant(dt) => *dt,
            Reference::Day(d) => {
                d.and_time(NaiveTime::MIN) + TimeDelta::days(1) - TimeDelta::nanoseconds(1)
            }
        }
    }
}

impl From<NaiveDateTime> for Reference {
    fn from(dt: NaiveDateTime) -> Self {
        Reference::Instant(dt)
    }
}

impl From<NaiveDate> for Reference {
    fn from(d: NaiveDate) -> Self {
        Reference::Day(d)
    }
}

/// Inclusive `[start, end]` range of operation dates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DateWindow {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// From the first day of the reference month at 00:00:00 up to the reference.
    pub fn month_to_date(reference: impl Into<Reference>) -> Self {
        let reference = reference.into();
        let date = reference.date();
        let first = date - TimeDelta::days(i64::from(date.day0()));
        Self::new(first.and_time(NaiveTime::MIN), reference.end())
    }

    /// From `months` calendar months before the reference (at midnight) up to the
    /// reference. Month-end days clamp, so 31 May minus 3 months is 28/29 February.
    pub fn trailing_months(reference: impl Into<Reference>, months: u32) -> Self {
        let reference = reference.into();
        let start = reference
            .date()
            .checked_sub_months(Months::new(months))
            .unwrap_or(NaiveDate::MIN);
        Self::new(start.and_time(NaiveTime::MIN), reference.end())
    }

    pub fn contains(&self, at: NaiveDateTime) -> bool {
        self.start <= at && at <= self.end
    }

    /// Transactions whose operation date falls inside the window, in input order.
    pub fn filter(&self, txns: &[Transaction]) -> Vec<Transaction> {
        let selected: Vec<Transaction> = txns
            .iter()
            .filter(|t| self.contains(t.operation_date))
            .cloned()
            .collect();
        tracing::debug!(
            start = %self.start.format("%d.%m.%Y"),
            end = %self.end.format("%d.%m.%Y"),
            total = txns.len(),
            selected = selected.len(),
            "filtered transactions by date window"
        );
        selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    fn txn(at: NaiveDateTime) -> Transaction {
        Transaction::new(at, 100.0, "Супермаркеты")
    }

    #[test]
    fn test_month_to_date_filters_current_month() {
        let txns = vec![
            txn(dt(2021, 9, 1, 10, 0, 0)),
            txn(dt(2021, 9, 15, 12, 0, 0)),
            txn(dt(2021, 9, 30, 14, 0, 0)),
            txn(dt(2021, 10, 1, 16, 0, 0)),
        ];
        let window = DateWindow::month_to_date(dt(2021, 9, 30, 23, 59, 59));
        let got: Vec<_> = window
            .filter(&txns)
            .iter()
            .map(|t| t.operation_date.format("%d.%m.%Y %H:%M:%S").to_string())
            .collect();
        assert_eq!(
            got,
            vec!["01.09.2021 10:00:00", "15.09.2021 12:00:00", "30.09.2021 14:00:00"]
        );
    }

    #[test]
    fn test_month_to_date_on_first_day_includes_midnight() {
        let reference = dt(2022, 3, 1, 9, 0, 0);
        let window = DateWindow::month_to_date(reference);
        assert_eq!(window.start, dt(2022, 3, 1, 0, 0, 0));
        assert!(window.contains(dt(2022, 3, 1, 0, 0, 0)));
        assert!(window.contains(reference));
        assert!(!window.contains(dt(2022, 2, 28, 23, 59, 59)));
        assert!(!window.contains(dt(2022, 3, 1, 9, 0, 1)));
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let window = DateWindow::new(dt(2022, 1, 1, 0, 0, 0), dt(2022, 1, 31, 12, 0, 0));
        let txns = vec![
            txn(window.start),
            txn(window.end),
            txn(window.start - TimeDelta::seconds(1)),
            txn(window.end + TimeDelta::seconds(1)),
        ];
        let got = window.filter(&txns);
        assert_eq!(got.len(), 2);
        assert_eq!(got[0].operation_date, window.start);
        assert_eq!(got[1].operation_date, window.end);
    }

    #[test]
    fn test_trailing_months_from_instant() {
        let window = DateWindow::trailing_months(dt(2022, 2, 15, 18, 30, 0), 3);
        assert_eq!(window.start, dt(2021, 11, 15, 0, 0, 0));
        assert_eq!(window.end, dt(2022, 2, 15, 18, 30, 0));
    }

    #[test]
    fn test_trailing_months_from_day_runs_to_end_of_day() {
        let day = NaiveDate::from_ymd_opt(2022, 2, 15).unwrap();
        let window = DateWindow::trailing_months(day, 3);
        assert_eq!(window.start, dt(2021, 11, 15, 0, 0, 0));
        assert!(window.contains(dt(2022, 2, 15, 23, 59, 59)));
        assert!(!window.contains(dt(2022, 2, 16, 0, 0, 0)));
    }

    #[test]
    fn test_trailing_months_clamps_month_end() {
        let day = NaiveDate::from_ymd_opt(2022, 5, 31).unwrap();
        let window = DateWindow::trailing_months(day, 3);
        assert_eq!(window.start, dt(2022, 2, 28, 0, 0, 0));
    }

    #[test]
    fn test_empty_input() {
        let window = DateWindow::month_to_date(dt(2022, 3, 10, 0, 0, 0));
        assert!(window.filter(&[]).is_empty());
    }
}
