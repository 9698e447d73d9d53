use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Direction of a statement line, derived from the sign of the amount.
/// A zero amount counts as a credit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    #[serde(rename = "DEBIT")]
    Debit,
    #[serde(rename = "CREDIT")]
    Credit,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Debit => "DEBIT",
            TransactionKind::Credit => "CREDIT",
        }
    }
}

/// Normalized output of the row parser (bank-agnostic)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementLine {
    pub date: NaiveDate,
    /// Signed amount; negative means money out.
    pub amount: f64,
    /// Raw description text, untouched.
    pub memo: String,
    /// Counterparty display name, see the payee resolution rules in the parser.
    pub payee: String,
    /// Statement number, trimmed.
    pub id: String,
    pub check_no: String,
    pub refnum: String,
    pub kind: TransactionKind,
}

/// A fully parsed export: one account, one currency, lines in file order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    pub account_id: String,
    pub currency: String,
    pub lines: Vec<StatementLine>,
}
