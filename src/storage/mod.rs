//! Storage layer for the ledger
//!
//! The ledger and the monthly budget sit behind two small traits so the
//! services can run against JSON files or plain memory. Each store holds one
//! full snapshot; callers load, transform and save the whole thing.
//!
//! Two processes running load-modify-save cycles against the same files can
//! overwrite each other's changes. The last save wins.

pub mod budget;
pub mod file_io;
pub mod ledger;
pub mod memory;

pub use budget::JsonBudgetStore;
pub use ledger::JsonLedgerStore;
pub use memory::MemoryStore;

use crate::audit::AuditLogger;
use crate::config::paths::LedgerPaths;
use crate::error::LedgerResult;
use crate::models::{Amount, Expense};

/// Persistence for the expense snapshot
pub trait LedgerStore {
    /// Load every stored expense that passes validation
    ///
    /// A missing or unreadable backing store yields an empty snapshot.
    fn load(&self) -> Vec<Expense>;

    /// Replace the stored snapshot with `expenses`
    fn save(&self, expenses: &[Expense]) -> LedgerResult<()>;
}

/// Persistence for the single monthly budget value
pub trait BudgetStore {
    /// Load the budget, or `None` if unset or invalid
    fn load_budget(&self) -> Option<Amount>;

    /// Store the budget; `None` removes it
    fn save_budget(&self, budget: Option<Amount>) -> LedgerResult<()>;
}

/// Main storage coordinator that owns the file-backed stores
pub struct Storage {
    paths: LedgerPaths,
    pub expenses: JsonLedgerStore,
    pub budget: JsonBudgetStore,
    audit: AuditLogger,
}

impl Storage {
    /// Create a new Storage instance, creating directories as needed
    pub fn new(paths: LedgerPaths) -> LedgerResult<Self> {
        paths.ensure_directories()?;

        Ok(Self {
            expenses: JsonLedgerStore::new(paths.expenses_file()),
            budget: JsonBudgetStore::new(paths.budget_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &LedgerPaths {
        &self.paths
    }

    /// Get the audit logger
    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }
}
