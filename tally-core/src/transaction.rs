//! Transaction record types as they appear in a bank statement export

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Statement column headers, as exported by the bank.
pub mod columns {
    pub const OPERATION_DATE: &str = "Дата операции";
    pub const CARD_NUMBER: &str = "Номер карты";
    pub const STATUS: &str = "Статус";
    pub const CATEGORY: &str = "Категория";
    pub const DESCRIPTION: &str = "Описание";
    pub const AMOUNT: &str = "Сумма операции с округлением";

    /// A statement without any of these cannot be read
    pub const REQUIRED: [&str; 4] = [OPERATION_DATE, STATUS, CATEGORY, AMOUNT];
}

/// Status value of a settled transaction
pub const SETTLED_STATUS: &str = "OK";

/// One statement row.
///
/// Serializes with the statement's own column names, so a filtered subset
/// written back out keeps the shape of the input rows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    #[serde(rename = "Дата операции", with = "crate::time::operation_date_format")]
    pub operation_date: NaiveDateTime,
    #[serde(rename = "Номер карты")]
    pub card_number: Option<String>,
    #[serde(rename = "Статус")]
    pub status: String,
    /// "Amount with rounding"; sign follows the bank export
    #[serde(rename = "Сумма операции с округлением")]
    pub amount: f64,
    #[serde(rename = "Категория")]
    pub category: String,
    #[serde(rename = "Описание")]
    pub description: Option<String>,
}

impl Transaction {
    /// Create a settled transaction with no card or description
    pub fn new(operation_date: NaiveDateTime, amount: f64, category: impl Into<String>) -> Self {
        Self {
            operation_date,
            card_number: None,
            status: SETTLED_STATUS.to_string(),
            amount,
            category: category.into(),
            description: None,
        }
    }

    pub fn with_card(mut self, card_number: impl Into<String>) -> Self {
        self.card_number = Some(card_number.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// True only for the literal `OK` status
    pub fn is_settled(&self) -> bool {
        self.status == SETTLED_STATUS
    }

    /// Last four characters of the card number, the per-card grouping key.
    /// Shorter card numbers are returned whole.
    pub fn last_digits(&self) -> Option<&str> {
        let card = self.card_number.as_deref()?;
        let start = card
            .char_indices()
            .rev()
            .nth(3)
            .map(|(i, _)| i)
            .unwrap_or(0);
        Some(&card[start..])
    }
}

/// Round half away from zero to 2 decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
