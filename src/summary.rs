//! Spending aggregation
//!
//! Computes the daily and monthly figures shown on the dashboard, and the
//! per-category breakdown of a month, from a snapshot of expenses.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;

use crate::models::Expense;

/// Totals for a reference day and its calendar month
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    /// Day the summary was computed for
    pub reference_date: NaiveDate,
    /// Sum of amounts dated exactly on the reference day
    pub today_total: f64,
    /// Sum of amounts in the reference month
    pub month_total: f64,
    /// Number of expenses in the reference month
    pub transaction_count: usize,
    /// Number of distinct dates with spending in the reference month
    pub unique_days: usize,
    /// `month_total / unique_days`, or 0 when the month has no spending
    pub avg_per_day: f64,
}

/// Total spent in one category
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

/// Expenses from the same calendar month as `reference_date`, input order kept
pub fn month_items(expenses: &[Expense], reference_date: NaiveDate) -> Vec<&Expense> {
    expenses
        .iter()
        .filter(|e| e.is_in_month_of(reference_date))
        .collect()
}

/// Summarize a snapshot relative to a reference day
pub fn summarize(expenses: &[Expense], reference_date: NaiveDate) -> Summary {
    let month = month_items(expenses, reference_date);

    let today_total: f64 = expenses
        .iter()
        .filter(|e| e.is_on(reference_date))
        .map(|e| e.amount.value())
        .sum();

    let month_total: f64 = month.iter().map(|e| e.amount.value()).sum();
    let unique_days = month.iter().map(|e| e.date).collect::<HashSet<_>>().len();

    let avg_per_day = if unique_days == 0 {
        0.0
    } else {
        month_total / unique_days as f64
    };

    Summary {
        reference_date,
        today_total,
        month_total,
        transaction_count: month.len(),
        unique_days,
        avg_per_day,
    }
}

/// Group expenses by category and order by total, largest first
///
/// The relative order of categories with equal totals is unspecified.
pub fn breakdown_by_category<'a, I>(items: I) -> Vec<CategoryTotal>
where
    I: IntoIterator<Item = &'a Expense>,
{
    let mut grouped: HashMap<&str, f64> = HashMap::new();
    for item in items {
        *grouped.entry(item.category.as_str()).or_insert(0.0) += item.amount.value();
    }

    let mut totals: Vec<CategoryTotal> = grouped
        .into_iter()
        .map(|(category, total)| CategoryTotal {
            category: category.to_string(),
            total,
        })
        .collect();
    totals.sort_by(|a, b| b.total.total_cmp(&a.total));
    totals
}
