//! Spending in one category over the trailing three months

use chrono::Local;
use tally_core::{DateWindow, Reference, Transaction};

pub const CATEGORY_LOOKBACK_MONTHS: u32 = 3;

/// Transactions in `category` within three months before `reference`
/// (defaults to now), both ends inclusive, input order kept.
///
/// Status is deliberately not checked: failed operations count here, unlike
/// the card and top-N views.
pub fn spending_by_category(
    txns: &[Transaction],
    category: &str,
    reference: Option<Reference>,
) -> Vec<Transaction> {
    let reference = reference.unwrap_or_else(|| Reference::Instant(Local::now().naive_local()));
    let window = DateWindow::trailing_months(reference, CATEGORY_LOOKBACK_MONTHS);
    tracing::debug!(
        start = %window.start.format("%d.%m.%Y"),
        end = %window.end.format("%d.%m.%Y"),
        category,
        "category report window"
    );

    let selected: Vec<Transaction> = txns
        .iter()
        .filter(|t| t.category == category && window.contains(t.operation_date))
        .cloned()
        .collect();

    tracing::info!(category, rows = selected.len(), "transactions filtered by date and category");
    selected
}
