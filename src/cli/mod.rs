//! CLI command handlers
//!
//! Bridges clap argument parsing with the service layer.

pub mod budget;
pub mod expense;
pub mod interchange;

pub use budget::{handle_budget_command, BudgetCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use interchange::{handle_interchange_command, InterchangeCommands};

use chrono::{Local, NaiveDate};

use crate::validation::parse_date;

/// Today's date on the local clock
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// clap value parser for `YYYY-MM-DD` arguments
pub fn parse_date_arg(s: &str) -> Result<NaiveDate, String> {
    parse_date(s.trim()).map_err(|e| e.to_string())
}
