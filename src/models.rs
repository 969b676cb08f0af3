use chrono::NaiveDate;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxnType {
    Income,
    Expense,
}

impl TxnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    Cash,
    Bank,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Bank => "bank",
        }
    }
}

#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
}

#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct Fund {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub status: String,
}

/// One positional data row pulled out of the cashflow sheet. Monetary fields
/// and the source label have already been through the currency cleaner;
/// consumed once by the classifier and never stored.
#[derive(Debug, Clone, Default)]
pub struct RawRow {
    pub date: String,
    pub description: String,
    pub debit_bank: String,
    pub debit_cash: String,
    pub credit_bank: String,
    pub credit_cash: String,
    pub saldo_bank: String,
    pub saldo_cash: String,
    pub source: String,
}

/// Classifier output, ready for fund resolution and insert. Immutable once
/// built: it is either persisted whole or dropped with its row.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedTransaction {
    pub txn_type: TxnType,
    pub amount: f64,
    pub category: String,
    pub event_name: String,
    pub payment_method: PaymentMethod,
    pub description: String,
    pub date: NaiveDate,
}
