//! Record types produced by the import pipeline
//!
//! This module defines the transaction type, the parsed invoice record, the
//! categorized record stored in an import batch, and the payload sent to the
//! transaction API for each imported record.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 1-based position of a line in the pasted text
pub type LineNumber = usize;

/// Category assigned when no rule matches a description
pub const DEFAULT_CATEGORY: &str = "Outros";

/// Direction of a transaction
///
/// Imported invoice lines are expenses unless a category rule says otherwise
/// (refunds, for example).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    /// Money coming in
    Income,

    /// Money going out
    Expense,
}

impl TransactionType {
    /// Wire name used by the transaction API
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "INCOME",
            TransactionType::Expense => "EXPENSE",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single invoice line that passed validation
///
/// Produced by the record parser. The amount is always positive and carries
/// exactly two decimal places.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRecord {
    /// Original line number in the pasted text
    pub line_number: LineNumber,

    /// Transaction date
    pub date: NaiveDate,

    /// Description as written on the invoice, trimmed
    pub description: String,

    /// Amount in BRL, scale 2
    pub amount: Decimal,

    /// Defaults to [`TransactionType::Expense`]
    pub tx_type: TransactionType,
}

impl fmt::Display for ParsedRecord {
    /// Writes the record back in invoice format: `DD/MM/YYYY - DESCRIPTION - R$ 1.234,56`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} - R$ {}",
            self.date.format("%d/%m/%Y"),
            self.description,
            format_brl(self.amount)
        )
    }
}

/// A parsed record after classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedRecord {
    pub record: ParsedRecord,

    /// Category label from the first matching rule, or [`DEFAULT_CATEGORY`]
    pub category: String,
}

impl ImportedRecord {
    pub fn line_number(&self) -> LineNumber {
        self.record.line_number
    }

    pub fn tx_type(&self) -> TransactionType {
        self.record.tx_type
    }

    pub fn amount(&self) -> Decimal {
        self.record.amount
    }

    /// Build the creation payload for the transaction API
    pub fn to_payload(&self) -> TransactionPayload {
        TransactionPayload {
            title: self.record.description.clone(),
            amount: self.record.amount,
            category: self.category.clone(),
            tx_type: self.record.tx_type,
            date: iso_midnight_utc(self.record.date),
        }
    }
}

/// Body of a transaction-creation request
///
/// Matches the shape the dashboard sends: `{ title, amount, category, type, date }`
/// with the amount as a JSON number and the date as an ISO-8601 timestamp.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionPayload {
    pub title: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub category: String,
    #[serde(rename = "type")]
    pub tx_type: TransactionType,
    pub date: String,
}

fn iso_midnight_utc(date: NaiveDate) -> String {
    date.format("%Y-%m-%dT00:00:00.000Z").to_string()
}

/// Format an amount the way Brazilian invoices print it (`1.234,56`)
pub fn format_brl(amount: Decimal) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    let sign = if amount.is_sign_negative() && !amount.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}{grouped},{frac_part}")
}
