//! Per-card spend and cashback rollup

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tally_core::{Transaction, round2};

/// Spend on one card, keyed by the card's last four digits
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CardSummary {
    pub last_digits: String,
    pub total_spent: f64,
    /// 1% of `total_spent`, rounded to cents on its own
    pub cashback: f64,
}

/// Group settled, card-bearing transactions by last four digits.
///
/// Different cards sharing the same last four digits are merged. Output is
/// ordered by `last_digits`.
pub fn card_summaries(txns: &[Transaction]) -> Vec<CardSummary> {
    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();

    for txn in txns.iter().filter(|t| t.is_settled()) {
        let Some(key) = txn.last_digits() else {
            continue;
        };
        *totals.entry(key).or_insert(0.0) += txn.amount;
    }

    let summaries: Vec<CardSummary> = totals
        .into_iter()
        .map(|(last_digits, total)| CardSummary {
            last_digits: last_digits.to_string(),
            total_spent: total,
            cashback: round2(total / 100.0),
        })
        .collect();

    tracing::info!(cards = summaries.len(), "card spend and cashback computed");
    summaries
}
