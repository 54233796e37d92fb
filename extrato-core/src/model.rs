//! Record types for transactions extracted from statement text

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Direction of a movement. The sign lives here, never in the amount.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Direction {
    #[serde(rename = "DÉBITO")]
    Debit,
    #[serde(rename = "CRÉDITO")]
    Credit,
    #[serde(rename = "INDEFINIDO")]
    Undefined,
}

impl Direction {
    /// Label used in exports and API payloads
    pub fn label(&self) -> &'static str {
        match self {
            Direction::Debit => "DÉBITO",
            Direction::Credit => "CRÉDITO",
            Direction::Undefined => "INDEFINIDO",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One movement extracted from a statement line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransactionRecord {
    /// Canonical DD/MM/YYYY (or the raw token when it could not be normalized)
    #[serde(rename = "Data")]
    pub date: String,
    #[serde(rename = "Movimento")]
    pub direction: Direction,
    #[serde(rename = "Historico")]
    pub description: String,
    /// Non-negative, non-zero magnitude
    #[serde(rename = "Valor")]
    pub amount: f64,
    /// Bank tag when the movement is a credit
    #[serde(rename = "Debito")]
    pub debit_account_tag: String,
    /// Bank tag when the movement is a debit
    #[serde(rename = "Credito")]
    pub credit_account_tag: String,
}

impl TransactionRecord {
    /// Build a record, placing `bank_code` in the tag slot matching `direction`.
    ///
    /// Credits go to the debit slot and debits to the credit slot (double-entry
    /// placement used by the receiving ledger). Undefined leaves both empty.
    pub fn new(
        date: impl Into<String>,
        direction: Direction,
        description: impl Into<String>,
        amount: f64,
        bank_code: &str,
    ) -> Self {
        let (debit_account_tag, credit_account_tag) = match direction {
            Direction::Credit => (bank_code.to_string(), String::new()),
            Direction::Debit => (String::new(), bank_code.to_string()),
            Direction::Undefined => (String::new(), String::new()),
        };
        Self {
            date: date.into(),
            direction,
            description: description.into(),
            amount,
            debit_account_tag,
            credit_account_tag,
        }
    }

    pub fn dedup_key(&self) -> DedupKey {
        DedupKey::of(self)
    }

    pub fn is_debit(&self) -> bool {
        self.direction == Direction::Debit
    }

    pub fn is_credit(&self) -> bool {
        self.direction == Direction::Credit
    }
}

/// Identity of a record for duplicate suppression:
/// date, amount and the first 20 characters of the description.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupKey {
    date: String,
    amount_bits: u64,
    description_prefix: String,
}

impl DedupKey {
    pub const PREFIX_CHARS: usize = 20;

    pub fn of(record: &TransactionRecord) -> Self {
        Self {
            date: record.date.clone(),
            amount_bits: record.amount.to_bits(),
            description_prefix: record.description.chars().take(Self::PREFIX_CHARS).collect(),
        }
    }
}

/// Keep the first record for every [`DedupKey`], preserving order.
pub fn dedup_records(records: Vec<TransactionRecord>) -> Vec<TransactionRecord> {
    let mut seen: HashSet<DedupKey> = HashSet::new();
    records
        .into_iter()
        .filter(|r| seen.insert(r.dedup_key()))
        .collect()
}

/// Debit/credit sums over a record set
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Totals {
    pub total_debitos: f64,
    pub total_creditos: f64,
    pub saldo_liquido: f64,
}

/// Deduplicated records plus their totals
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ExtractionResult {
    pub records: Vec<TransactionRecord>,
    #[serde(flatten)]
    pub totals: Totals,
}

impl ExtractionResult {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
