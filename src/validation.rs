//! Record validation
//!
//! Normalizes a loosely-typed expense payload into an [`Expense`], or rejects
//! it. The same rules apply to stored records being loaded, rows decoded from
//! an interchange file, and records entered by the user.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Amount, AmountError, Expense, ExpenseId, DATE_FORMAT};

/// Amount as found in stored data: a JSON number or numeric text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    Number(f64),
    Text(String),
}

impl From<f64> for RawAmount {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for RawAmount {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// A candidate expense with every field optional
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawExpense {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub amount: Option<RawAmount>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

/// Why a candidate expense was refused
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Rejection {
    #[error("id is required")]
    MissingId,
    #[error("date is required")]
    MissingDate,
    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("amount is required")]
    MissingAmount,
    #[error(transparent)]
    InvalidAmount(#[from] AmountError),
}

/// Caller-supplied fields for a new or edited expense
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseInput {
    pub date: String,
    pub amount: f64,
    pub category: String,
    pub note: String,
}

impl ExpenseInput {
    /// Create an input with an empty category and note
    pub fn new(date: impl Into<String>, amount: f64) -> Self {
        Self {
            date: date.into(),
            amount,
            category: String::new(),
            note: String::new(),
        }
    }

    /// Set the category
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the note
    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    /// Validate against the given id
    pub fn accept_as(&self, id: &ExpenseId) -> Result<Expense, Rejection> {
        accept(RawExpense {
            id: Some(id.as_str().to_string()),
            date: Some(self.date.clone()),
            amount: Some(RawAmount::Number(self.amount)),
            category: Some(self.category.clone()),
            note: Some(self.note.clone()),
        })
    }
}

/// Accept or reject a candidate expense
///
/// Rejects an empty id or date, a date that is not a fixed-width
/// `YYYY-MM-DD` calendar date, and an amount that is missing, non-finite or
/// not greater than zero. On acceptance a blank category becomes `"Other"`
/// and the note is trimmed.
pub fn accept(raw: RawExpense) -> Result<Expense, Rejection> {
    let id = raw
        .id
        .filter(|id| !id.trim().is_empty())
        .ok_or(Rejection::MissingId)?;

    let date_text = raw
        .date
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .ok_or(Rejection::MissingDate)?;
    let date = parse_date(date_text)?;

    let amount = match raw.amount.ok_or(Rejection::MissingAmount)? {
        RawAmount::Number(value) => Amount::new(value)?,
        RawAmount::Text(text) => Amount::parse(&text)?,
    };

    let note = raw.note.map(|n| n.trim().to_string()).unwrap_or_default();

    Ok(Expense::with_id(
        ExpenseId::from(id),
        date,
        amount,
        raw.category.unwrap_or_default(),
        note,
    ))
}

/// Parse a fixed-width `YYYY-MM-DD` calendar date
pub fn parse_date(text: &str) -> Result<NaiveDate, Rejection> {
    // chrono tolerates padding, signs and single digits; the text form must
    // stay fixed-width so that string order matches date order
    if !is_date_shaped(text) {
        return Err(Rejection::InvalidDate(text.to_string()));
    }
    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .map_err(|_| Rejection::InvalidDate(text.to_string()))
}

/// `DDDD-DD-DD` with ASCII digits only
fn is_date_shaped(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}
