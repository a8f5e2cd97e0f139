//! Core data models for the ledger
//!
//! Expenses, their identifiers and the validated amount type.

pub mod amount;
pub mod expense;
pub mod ids;

pub use amount::{Amount, AmountError};
pub use expense::{Expense, DATE_FORMAT, DEFAULT_CATEGORY};
pub use ids::ExpenseId;
