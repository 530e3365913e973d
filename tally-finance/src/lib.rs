//! tally-finance: card rollups, top transactions, category spend, phone-number
//! scan, market data gateway and report assembly

pub mod cards;
pub mod category_report;
pub mod market;
pub mod phones;
pub mod report;
pub mod top;

pub use cards::{CardSummary, card_summaries};
pub use category_report::{CATEGORY_LOOKBACK_MONTHS, spending_by_category};
pub use market::{
    ConfigError, CurrencyRate, Lookup, LookupError, MarketClient, MarketConfig, MarketData,
    StockPrice, fetch_currency_rates, fetch_stock_prices,
};
pub use phones::{PhoneMatcher, phone_transactions_json, transactions_with_phone_numbers};
pub use report::{Report, TopTransaction, monthly_report};
pub use top::{TOP_N, top_five, top_transactions};
