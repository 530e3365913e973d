//! Month-to-date report: greeting, card rollups, top transactions and
//! market data, assembled into one JSON document.

use chrono::{NaiveDateTime, Timelike};
use serde::Serialize;
use tally_core::{DateWindow, Transaction, greeting, round2};

use crate::cards::{CardSummary, card_summaries};
use crate::market::{
    CurrencyRate, Lookup, MarketData, StockPrice, fetch_currency_rates, fetch_stock_prices,
};
use crate::top::top_five;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopTransaction {
    /// `DD.MM.YYYY`
    pub date: String,
    pub amount: f64,
    pub category: String,
    pub description: Option<String>,
}

impl From<&Transaction> for TopTransaction {
    fn from(t: &Transaction) -> Self {
        Self {
            date: t.operation_date.format("%d.%m.%Y").to_string(),
            amount: round2(t.amount),
            category: t.category.clone(),
            description: t.description.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub greeting: String,
    pub cards: Vec<CardSummary>,
    pub top_transactions: Vec<TopTransaction>,
    pub currency_rates: Vec<CurrencyRate>,
    pub stock_prices: Vec<StockPrice>,
}

impl Report {
    /// Build the report for the month containing `reference`, up to `reference`.
    pub fn assemble(
        reference: NaiveDateTime,
        txns: &[Transaction],
        rates: &[Lookup],
        prices: &[Lookup],
    ) -> Self {
        let month = DateWindow::month_to_date(reference).filter(txns);

        let cards = card_summaries(&month)
            .into_iter()
            .map(|c| CardSummary {
                total_spent: round2(c.total_spent),
                cashback: round2(c.cashback),
                ..c
            })
            .collect();

        Self {
            greeting: greeting(reference.hour()).to_string(),
            cards,
            top_transactions: top_five(&month).iter().map(TopTransaction::from).collect(),
            currency_rates: rates.iter().map(CurrencyRate::from).collect(),
            stock_prices: prices.iter().map(StockPrice::from).collect(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Fetch market data for the user's currencies and stocks, then assemble.
pub async fn monthly_report<M: MarketData>(
    market: &M,
    reference: NaiveDateTime,
    txns: &[Transaction],
    currencies: &[String],
    stocks: &[String],
) -> Report {
    let rates = fetch_currency_rates(market, currencies).await;
    let prices = fetch_stock_prices(market, stocks).await;
    let report = Report::assemble(reference, txns, &rates, &prices);
    tracing::info!(
        cards = report.cards.len(),
        top = report.top_transactions.len(),
        "report assembled"
    );
    report
}
