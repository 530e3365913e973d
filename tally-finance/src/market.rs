//! Market data gateway: currency conversion rates (apilayer) and latest
//! stock prices (alphavantage).
//!
//! Every lookup is independent. A failed item is logged and reported as a
//! [`LookupError`] for that item only; the batch always completes.

use std::time::Duration;

use reqwest::header::HeaderValue;
use serde::{Serialize, Serializer};
use serde_json::Value;
use tally_core::round2;
use thiserror::Error;

pub const DEFAULT_APILAYER_URL: &str = "https://api.apilayer.com";
pub const DEFAULT_ALPHAVANTAGE_URL: &str = "https://www.alphavantage.co";
const INTRADAY_SERIES: &str = "Time Series (5min)";

/// Failure of a single rate or price lookup
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LookupError {
    #[error("request failed: {0}")]
    Http(String),

    #[error("unexpected status {0}")]
    Status(u16),

    #[error("API error: {0}")]
    Api(String),

    #[error("response is missing {0}")]
    MissingField(&'static str),

    #[error("not a number: {0}")]
    InvalidNumber(String),

    #[error("no data in 'Time Series (5min)'")]
    EmptySeries,
}

impl From<reqwest::Error> for LookupError {
    fn from(e: reqwest::Error) -> Self {
        LookupError::Http(e.to_string())
    }
}

/// Invalid gateway configuration, detected before any request is made
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing API key: {0}")]
    MissingKey(&'static str),

    #[error("invalid API key for {0}")]
    InvalidKey(&'static str),

    #[error("building HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Source of currency rates and stock prices
#[allow(async_fn_in_trait)]
pub trait MarketData {
    /// Price of one unit of `code` in the configured target currency
    async fn currency_rate(&self, code: &str) -> Result<f64, LookupError>;

    /// Latest close price for `symbol`
    async fn stock_price(&self, symbol: &str) -> Result<f64, LookupError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarketConfig {
    pub apilayer_key: String,
    pub alphavantage_key: String,
    /// Target currency for conversion rates
    pub convert_to: String,
    pub apilayer_url: String,
    pub alphavantage_url: String,
    pub timeout: Duration,
}

impl MarketConfig {
    pub fn new(apilayer_key: impl Into<String>, alphavantage_key: impl Into<String>) -> Self {
        Self {
            apilayer_key: apilayer_key.into(),
            alphavantage_key: alphavantage_key.into(),
            convert_to: "RUB".to_string(),
            apilayer_url: DEFAULT_APILAYER_URL.to_string(),
            alphavantage_url: DEFAULT_ALPHAVANTAGE_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.apilayer_key.trim().is_empty() {
            return Err(ConfigError::MissingKey("apilayer"));
        }
        if self.alphavantage_key.trim().is_empty() {
            return Err(ConfigError::MissingKey("alphavantage"));
        }
        if HeaderValue::from_str(&self.apilayer_key).is_err() {
            return Err(ConfigError::InvalidKey("apilayer"));
        }
        Ok(())
    }
}

/// HTTP implementation of [`MarketData`]
pub struct MarketClient {
    http: reqwest::Client,
    config: MarketConfig,
}

impl MarketClient {
    /// Validates the configuration; fails fast on missing keys.
    pub fn new(config: MarketConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, config })
    }

    async fn get_json(&self, req: reqwest::RequestBuilder) -> Result<Value, LookupError> {
        let resp = req.send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(LookupError::Status(status.as_u16()));
        }
        Ok(resp.json().await?)
    }
}

impl MarketData for MarketClient {
    async fn currency_rate(&self, code: &str) -> Result<f64, LookupError> {
        tracing::debug!(currency = code, to = %self.config.convert_to, "requesting conversion rate");
        let req = self
            .http
            .get(format!("{}/exchangerates_data/convert", self.config.apilayer_url))
            .query(&[
                ("to", self.config.convert_to.as_str()),
                ("from", code),
                ("amount", "1"),
            ])
            .header("apikey", &self.config.apilayer_key);
        parse_conversion_rate(&self.get_json(req).await?)
    }

    async fn stock_price(&self, symbol: &str) -> Result<f64, LookupError> {
        tracing::debug!(symbol, "requesting intraday series");
        let req = self
            .http
            .get(format!("{}/query", self.config.alphavantage_url))
            .query(&[
                ("function", "TIME_SERIES_INTRADAY"),
                ("symbol", symbol),
                ("interval", "5min"),
                ("apikey", self.config.alphavantage_key.as_str()),
            ]);
        parse_latest_close(&self.get_json(req).await?)
    }
}

/// `info.rate` of an apilayer `convert` response
pub fn parse_conversion_rate(body: &Value) -> Result<f64, LookupError> {
    if let Some(msg) = body.get("message").and_then(Value::as_str) {
        return Err(LookupError::Api(msg.to_string()));
    }
    body.pointer("/info/rate")
        .and_then(Value::as_f64)
        .ok_or(LookupError::MissingField("info.rate"))
}

/// `4. close` of the most recent entry in an alphavantage intraday series
pub fn parse_latest_close(body: &Value) -> Result<f64, LookupError> {
    for key in ["Error Message", "Note", "Information"] {
        if let Some(msg) = body.get(key).and_then(Value::as_str) {
            return Err(LookupError::Api(msg.to_string()));
        }
    }

    let series = body
        .get(INTRADAY_SERIES)
        .and_then(Value::as_object)
        .ok_or(LookupError::MissingField(INTRADAY_SERIES))?;

    // Timestamps are `YYYY-MM-DD HH:MM:SS`, so the greatest key is the latest
    let (_, latest) = series
        .iter()
        .max_by(|(a, _), (b, _)| a.cmp(b))
        .ok_or(LookupError::EmptySeries)?;

    let close = latest
        .get("4. close")
        .ok_or(LookupError::MissingField("4. close"))?;
    match close {
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| LookupError::InvalidNumber(s.clone())),
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| LookupError::InvalidNumber(n.to_string())),
        other => Err(LookupError::InvalidNumber(other.to_string())),
    }
}

/// Outcome of one lookup, keyed by currency code or stock symbol
#[derive(Debug, Clone, PartialEq)]
pub struct Lookup {
    pub key: String,
    pub value: Result<f64, LookupError>,
}

impl Lookup {
    /// Rounded value, or `None` when the lookup failed
    pub fn ok(&self) -> Option<f64> {
        self.value.as_ref().ok().copied()
    }
}

/// Look up each currency in turn; values are rounded to cents.
pub async fn fetch_currency_rates<M: MarketData>(market: &M, codes: &[String]) -> Vec<Lookup> {
    let mut out = Vec::with_capacity(codes.len());
    for code in codes {
        let value = market.currency_rate(code).await.map(round2);
        match &value {
            Ok(rate) => tracing::info!(currency = %code, rate, "conversion rate received"),
            Err(e) => tracing::warn!(currency = %code, error = %e, "conversion rate unavailable"),
        }
        out.push(Lookup {
            key: code.clone(),
            value,
        });
    }
    out
}

/// Look up each stock symbol in turn; prices are rounded to cents.
pub async fn fetch_stock_prices<M: MarketData>(market: &M, symbols: &[String]) -> Vec<Lookup> {
    let mut out = Vec::with_capacity(symbols.len());
    for symbol in symbols {
        let value = market.stock_price(symbol).await.map(round2);
        match &value {
            Ok(price) => tracing::info!(symbol = %symbol, price, "stock price received"),
            Err(e) => tracing::warn!(symbol = %symbol, error = %e, "stock price unavailable"),
        }
        out.push(Lookup {
            key: symbol.clone(),
            value,
        });
    }
    out
}

/// Report entry for a currency; a failed lookup serializes its rate as `""`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrencyRate {
    pub currency: String,
    #[serde(serialize_with = "value_or_empty")]
    pub rate: Option<f64>,
}

/// Report entry for a stock; a failed lookup serializes its price as `""`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockPrice {
    pub stock: String,
    #[serde(serialize_with = "value_or_empty")]
    pub price: Option<f64>,
}

impl From<&Lookup> for CurrencyRate {
    fn from(l: &Lookup) -> Self {
        Self {
            currency: l.key.clone(),
            rate: l.ok(),
        }
    }
}

impl From<&Lookup> for StockPrice {
    fn from(l: &Lookup) -> Self {
        Self {
            stock: l.key.clone(),
            price: l.ok(),
        }
    }
}

fn value_or_empty<S: Serializer>(value: &Option<f64>, s: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(v) => s.serialize_f64(*v),
        None => s.serialize_str(""),
    }
}
