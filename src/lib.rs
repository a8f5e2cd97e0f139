//! daily-ledger - personal daily expense tracking
//!
//! Records dated expenses, summarizes spending by day, month and category,
//! tracks the month against an optional budget ceiling, and moves the ledger
//! in and out as CSV.
//!
//! # Architecture
//!
//! - `models`: expense, id and amount types
//! - `validation`: turns loosely-typed records into expenses or rejects them
//! - `summary`, `view`, `budget`: pure computations over a snapshot
//! - `interchange`: CSV encoding, decoding and merge-by-id
//! - `storage`: store traits with JSON file and in-memory implementations
//! - `session`: which record an entry form is editing
//! - `services`: load-transform-save orchestration with auditing
//! - `audit`: append-only change log
//! - `config`: path resolution and user settings
//! - `display`, `cli`: terminal front end
//!
//! # Example
//!
//! ```rust,ignore
//! use daily_ledger::services::ExpenseService;
//! use daily_ledger::storage::MemoryStore;
//! use daily_ledger::validation::ExpenseInput;
//!
//! let store = MemoryStore::new();
//! let service = ExpenseService::with_store(&store);
//! service.create(&ExpenseInput::new("2024-01-05", 250.0).category("Food"))?;
//! ```

pub mod audit;
pub mod budget;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod interchange;
pub mod models;
pub mod services;
pub mod session;
pub mod storage;
pub mod summary;
pub mod validation;
pub mod view;

pub use error::{LedgerError, LedgerResult};
