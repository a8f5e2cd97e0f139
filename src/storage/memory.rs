//! In-memory store for tests and embedding

use std::sync::RwLock;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Amount, Expense};

use super::{BudgetStore, LedgerStore};

/// Keeps the ledger and budget in process memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    expenses: RwLock<Vec<Expense>>,
    budget: RwLock<Option<Amount>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-filled with `expenses`
    pub fn with_expenses(expenses: Vec<Expense>) -> Self {
        Self {
            expenses: RwLock::new(expenses),
            budget: RwLock::new(None),
        }
    }
}

impl LedgerStore for MemoryStore {
    fn load(&self) -> Vec<Expense> {
        match self.expenses.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn save(&self, expenses: &[Expense]) -> LedgerResult<()> {
        let mut guard = self
            .expenses
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *guard = expenses.to_vec();
        Ok(())
    }
}

impl BudgetStore for MemoryStore {
    fn load_budget(&self) -> Option<Amount> {
        match self.budget.read() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    fn save_budget(&self, budget: Option<Amount>) -> LedgerResult<()> {
        let mut guard = self
            .budget
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *guard = budget;
        Ok(())
    }
}
