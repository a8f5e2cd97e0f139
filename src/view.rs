//! Filtering and ordering for expense listings
//!
//! Derives the visible list from a snapshot without touching the snapshot
//! itself. Sorting is stable so that an unchanged snapshot always lists in the
//! same order.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::Expense;

/// Listing order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    /// Newest first
    #[default]
    DateDesc,
    /// Oldest first
    DateAsc,
    /// Largest amount first
    AmountDesc,
    /// Smallest amount first
    AmountAsc,
}

impl SortMode {
    /// All modes, in menu order
    pub fn all() -> &'static [SortMode] {
        &[
            SortMode::DateDesc,
            SortMode::DateAsc,
            SortMode::AmountDesc,
            SortMode::AmountAsc,
        ]
    }

    /// Wire name of the mode
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::DateDesc => "date_desc",
            SortMode::DateAsc => "date_asc",
            SortMode::AmountDesc => "amount_desc",
            SortMode::AmountAsc => "amount_asc",
        }
    }

    /// Stable in-place sort of a list of expenses
    pub fn sort(&self, items: &mut [&Expense]) {
        match self {
            SortMode::DateDesc => items.sort_by(|a, b| b.date.cmp(&a.date)),
            SortMode::DateAsc => items.sort_by(|a, b| a.date.cmp(&b.date)),
            SortMode::AmountDesc => {
                items.sort_by(|a, b| b.amount.value().total_cmp(&a.amount.value()))
            }
            SortMode::AmountAsc => {
                items.sort_by(|a, b| a.amount.value().total_cmp(&b.amount.value()))
            }
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortMode::all()
            .iter()
            .copied()
            .find(|mode| mode.as_str() == s.trim())
            .ok_or_else(|| {
                format!(
                    "unknown sort mode '{}', expected one of: date_desc, date_asc, amount_desc, amount_asc",
                    s
                )
            })
    }
}

/// Filters and ordering for a listing
///
/// The default shows everything, newest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewOptions {
    /// Keep only expenses on this exact date
    pub date: Option<NaiveDate>,
    /// Keep only expenses whose note contains this text, ignoring case
    pub note_query: Option<String>,
    /// Listing order
    pub sort: SortMode,
}

impl ViewOptions {
    /// Create options that show everything, newest first
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by date
    pub fn on_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Filter by note text
    pub fn search(mut self, query: impl Into<String>) -> Self {
        self.note_query = Some(query.into());
        self
    }

    /// Set the order
    pub fn sorted(mut self, sort: SortMode) -> Self {
        self.sort = sort;
        self
    }

    /// Check whether an expense passes both filters
    pub fn matches(&self, expense: &Expense) -> bool {
        if let Some(date) = self.date {
            if expense.date != date {
                return false;
            }
        }
        match self.normalized_query() {
            Some(query) => expense.note.to_lowercase().contains(&query),
            None => true,
        }
    }

    fn normalized_query(&self) -> Option<String> {
        self.note_query
            .as_deref()
            .map(|q| q.trim().to_lowercase())
            .filter(|q| !q.is_empty())
    }
}

/// Filter and order a snapshot for display
pub fn view<'a>(expenses: &'a [Expense], options: &ViewOptions) -> Vec<&'a Expense> {
    let mut visible: Vec<&Expense> = expenses.iter().filter(|e| options.matches(e)).collect();
    options.sort.sort(&mut visible);
    visible
}
