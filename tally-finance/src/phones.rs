//! Find transactions whose description contains a mobile phone number.
//!
//! Only one layout is recognized: `+7 921 11-22-33` / `+7 995 555-55-55`.
//! Parenthesized area codes and unseparated digits are not matched.

use anyhow::Result;
use regex::Regex;
use tally_core::Transaction;

const MOBILE_PATTERN: &str = r"\+7 \d{3} \d{2,3}-\d{2}-\d{2}";

pub struct PhoneMatcher {
    re: Regex,
}

impl PhoneMatcher {
    pub fn new() -> Result<Self> {
        Ok(Self {
            re: Regex::new(MOBILE_PATTERN)?,
        })
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.re.is_match(text)
    }

    /// Matching rows, in input order. Rows without a description are skipped.
    /// Status is not considered.
    pub fn extract(&self, txns: &[Transaction]) -> Vec<Transaction> {
        let found: Vec<Transaction> = txns
            .iter()
            .filter(|t| t.description.as_deref().is_some_and(|d| self.is_match(d)))
            .cloned()
            .collect();
        tracing::info!(count = found.len(), "transactions with phone numbers found");
        found
    }
}

pub fn transactions_with_phone_numbers(txns: &[Transaction]) -> Result<Vec<Transaction>> {
    Ok(PhoneMatcher::new()?.extract(txns))
}

/// Matching rows as a pretty JSON array (`[]` when nothing matches).
pub fn phone_transactions_json(txns: &[Transaction]) -> Result<String> {
    let found = transactions_with_phone_numbers(txns)?;
    Ok(serde_json::to_string_pretty(&found)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn described(description: Option<&str>, amount: f64) -> Transaction {
        let at = NaiveDate::from_ymd_opt(2021, 12, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        let t = Transaction::new(at, amount, "Мобильная связь");
        match description {
            Some(d) => t.with_description(d),
            None => t,
        }
    }

    #[test]
    fn test_pattern_matches_supported_layouts() {
        let m = PhoneMatcher::new().unwrap();
        assert!(m.is_match("Я МТС +7 921 11-22-33"));
        assert!(m.is_match("Тинькофф Мобайл +7 995 555-55-55"));
    }

    #[test]
    fn test_pattern_rejects_near_misses() {
        let m = PhoneMatcher::new().unwrap();
        for text in [
            "МТС +7 (921) 11-22-33",
            "Тинькофф +79555555555",
            "+7 921 1-22-33",
            "+7 92 111-22-33",
            "+7 921 11 22 33",
            "+7921 11-22-33",
            "8 921 11-22-33",
            "Без номера",
        ] {
            assert!(!m.is_match(text), "should not match: {text}");
        }
    }

    #[test]
    fn test_extract_keeps_order_and_rows() {
        let txns = vec![
            described(Some("Я МТС +7 921 11-22-33"), 1000.0),
            described(Some("Тинькофф Мобайл +7 995 555-55-55"), 2000.0),
            described(Some("Без номера"), 1500.0),
        ];
        let got = transactions_with_phone_numbers(&txns).unwrap();
        assert_eq!(got, vec![txns[0].clone(), txns[1].clone()]);
    }

    #[test]
    fn test_one_correct_among_malformed() {
        let txns = vec![
            described(Some("МТС +7 (921) 11-22-33"), 1500.0),
            described(Some("Тинькофф +79555555555"), 2000.0),
            described(Some("Я МТС +7 921 11-22-33"), 2500.0),
        ];
        let got = transactions_with_phone_numbers(&txns).unwrap();
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].amount, 2500.0);
    }

    #[test]
    fn test_ignores_status_and_missing_description() {
        let txns = vec![
            described(None, 10.0),
            described(Some("Я МТС +7 921 11-22-33"), 20.0).with_status("FAILED"),
        ];
        let got = transactions_with_phone_numbers(&txns).unwrap();
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].status, "FAILED");
    }

    #[test]
    fn test_json_output() {
        let none = vec![described(Some("Без номера 1"), 500.0), described(Some("Без номера 2"), 700.0)];
        let json: serde_json::Value = serde_json::from_str(&phone_transactions_json(&none).unwrap()).unwrap();
        assert_eq!(json, serde_json::json!([]));

        let empty: serde_json::Value = serde_json::from_str(&phone_transactions_json(&[]).unwrap()).unwrap();
        assert_eq!(empty, serde_json::json!([]));

        let some = vec![described(Some("Я МТС +7 921 11-22-33"), 1000.0)];
        let json: serde_json::Value = serde_json::from_str(&phone_transactions_json(&some).unwrap()).unwrap();
        assert_eq!(json[0]["Описание"], "Я МТС +7 921 11-22-33");
        assert_eq!(json[0]["Сумма операции с округлением"], 1000.0);
    }
}
