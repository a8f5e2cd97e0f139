//! Display formatting for terminal output
//!
//! Plain-text tables, money values and the budget progress bar. Everything
//! here returns a `String`; printing is left to the caller.

pub mod expense;
pub mod money;
pub mod summary;

pub use expense::{format_expense_details, format_expense_list, format_expense_row};
pub use money::{format_money, format_percentage};
pub use summary::{format_bar, format_breakdown, format_budget, format_budget_line, format_summary};
