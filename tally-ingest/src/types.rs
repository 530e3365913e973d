use tally_core::{Error, Result, Transaction, columns, parse_operation_date};

/// Raw statement row, every cell still as text (bank-agnostic).
///
/// Spreadsheet and CSV readers both normalize into this shape; dates and
/// amounts are only interpreted by [`StatementRow::into_transaction`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatementRow {
    pub operation_date: String,
    pub card_number: Option<String>,
    pub status: String,
    pub amount: String,
    pub category: String,
    pub description: Option<String>,
}

impl StatementRow {
    /// Interpret the row. A malformed date or amount is an error, never coerced.
    pub fn into_transaction(self) -> Result<Transaction> {
        Ok(Transaction {
            operation_date: parse_operation_date(&self.operation_date)?,
            card_number: non_empty(self.card_number),
            status: self.status.trim().to_string(),
            amount: parse_amount(&self.amount)?,
            category: self.category,
            description: non_empty(self.description),
        })
    }
}

/// Interpret every row, stopping at the first malformed one.
pub fn into_transactions(rows: Vec<StatementRow>) -> Result<Vec<Transaction>> {
    rows.into_iter().map(StatementRow::into_transaction).collect()
}

/// Parse an amount cell. Accepts `1 234,50`-style exports as well as plain floats.
pub fn parse_amount(raw: &str) -> Result<f64> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c {
            ',' => '.',
            '\u{2212}' => '-',
            other => other,
        })
        .collect();

    match cleaned.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(Error::InvalidAmount(raw.to_string())),
    }
}

fn non_empty(cell: Option<String>) -> Option<String> {
    cell.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// Column positions of the statement fields, resolved from a header row.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ColumnLayout {
    operation_date: usize,
    card_number: Option<usize>,
    status: usize,
    amount: usize,
    category: usize,
    description: Option<usize>,
}

impl ColumnLayout {
    pub(crate) fn from_headers<'a>(headers: impl IntoIterator<Item = &'a str>) -> Result<Self> {
        let headers: Vec<String> = headers.into_iter().map(|h| h.trim().to_string()).collect();
        let find = |name: &str| headers.iter().position(|h| h == name);
        let require = |name: &str| find(name).ok_or_else(|| Error::MissingColumn(name.to_string()));

        Ok(Self {
            operation_date: require(columns::OPERATION_DATE)?,
            card_number: find(columns::CARD_NUMBER),
            status: require(columns::STATUS)?,
            amount: require(columns::AMOUNT)?,
            category: require(columns::CATEGORY)?,
            description: find(columns::DESCRIPTION),
        })
    }

    /// Build a row from a cell accessor returning `None` for empty cells.
    pub(crate) fn row(&self, cell: impl Fn(usize) -> Option<String>) -> StatementRow {
        StatementRow {
            operation_date: cell(self.operation_date).unwrap_or_default(),
            card_number: self.card_number.and_then(&cell),
            status: cell(self.status).unwrap_or_default(),
            amount: cell(self.amount).unwrap_or_default(),
            category: cell(self.category).unwrap_or_default(),
            description: self.description.and_then(&cell),
        }
    }
}
