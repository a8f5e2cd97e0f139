//! Service layer for the ledger
//!
//! Services sit between the front end and the stores: they load a snapshot,
//! run the pure validation and computation functions over it, save the result
//! and write the audit trail.

pub mod budget;
pub mod expense;
pub mod interchange;

pub use budget::BudgetService;
pub use expense::ExpenseService;
pub use interchange::{ImportResult, InterchangeService};
