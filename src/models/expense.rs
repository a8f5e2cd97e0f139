//! Expense model
//!
//! A single dated spend. Identity is the `id`; every other field may be
//! replaced wholesale by an edit.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::amount::Amount;
use super::ids::ExpenseId;

/// Category used when a record arrives without one
pub const DEFAULT_CATEGORY: &str = "Other";

/// Date format used for storage, interchange and display
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A recorded expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier, assigned once at creation
    pub id: ExpenseId,

    /// Calendar date the money was spent
    pub date: NaiveDate,

    /// Amount spent (always positive)
    pub amount: Amount,

    /// Spending category (never empty)
    pub category: String,

    /// Free-text note
    #[serde(default)]
    pub note: String,
}

impl Expense {
    /// Create a new expense with a freshly generated id
    pub fn new(
        date: NaiveDate,
        amount: Amount,
        category: impl Into<String>,
        note: impl Into<String>,
    ) -> Self {
        Self::with_id(ExpenseId::new(), date, amount, category, note)
    }

    /// Create an expense with a known id
    pub fn with_id(
        id: ExpenseId,
        date: NaiveDate,
        amount: Amount,
        category: impl Into<String>,
        note: impl Into<String>,
    ) -> Self {
        let category = category.into();
        Self {
            id,
            date,
            amount,
            category: if category.trim().is_empty() {
                DEFAULT_CATEGORY.to_string()
            } else {
                category
            },
            note: note.into(),
        }
    }

    /// Replace every field except the id with those of `other`
    pub fn replace_fields(&mut self, other: Expense) {
        self.date = other.date;
        self.amount = other.amount;
        self.category = other.category;
        self.note = other.note;
    }

    /// Check whether this expense falls on the given calendar day
    pub fn is_on(&self, day: NaiveDate) -> bool {
        self.date == day
    }

    /// Check whether this expense falls in the same year and month as `day`
    pub fn is_in_month_of(&self, day: NaiveDate) -> bool {
        self.date.year() == day.year() && self.date.month() == day.month()
    }

    /// The date as fixed-width `YYYY-MM-DD` text
    pub fn date_text(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.date_text(), self.category, self.amount)
    }
}
