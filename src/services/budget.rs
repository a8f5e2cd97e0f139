//! Monthly budget service

use tracing::info;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::budget::{evaluate, BudgetEvaluation};
use crate::error::{LedgerError, LedgerResult};
use crate::models::Amount;
use crate::storage::{BudgetStore, Storage};

/// Key used for the budget in audit entries
const BUDGET_KEY: &str = "monthly_budget";

/// Service for the single monthly budget ceiling
pub struct BudgetService<'a> {
    store: &'a dyn BudgetStore,
    audit: Option<&'a AuditLogger>,
}

impl<'a> BudgetService<'a> {
    /// Create a service over the file-backed storage, with auditing
    pub fn new(storage: &'a Storage) -> Self {
        Self {
            store: &storage.budget,
            audit: Some(storage.audit()),
        }
    }

    /// Create a service over any budget store, without auditing
    pub fn with_store(store: &'a dyn BudgetStore) -> Self {
        Self { store, audit: None }
    }

    /// The configured budget, if any
    pub fn get(&self) -> Option<Amount> {
        self.store.load_budget()
    }

    /// Set the budget; it must be a finite number greater than zero
    pub fn set(&self, value: f64) -> LedgerResult<Amount> {
        let amount = Amount::new(value)
            .map_err(|e| LedgerError::Budget(format!("invalid monthly budget: {}", e)))?;

        let before = self.store.load_budget();
        self.store.save_budget(Some(amount))?;

        info!(budget = %amount, "Monthly budget set");
        if let Some(audit) = self.audit {
            audit.record(&AuditEntry::update(
                EntityType::MonthlyBudget,
                BUDGET_KEY,
                &before,
                &Some(amount),
                None,
            ));
        }

        Ok(amount)
    }

    /// Remove the budget; returns false if none was set
    pub fn clear(&self) -> LedgerResult<bool> {
        let Some(before) = self.store.load_budget() else {
            return Ok(false);
        };

        self.store.save_budget(None)?;

        info!("Monthly budget cleared");
        if let Some(audit) = self.audit {
            audit.record(&AuditEntry::delete(
                EntityType::MonthlyBudget,
                BUDGET_KEY,
                &before,
            ));
        }

        Ok(true)
    }

    /// Evaluate a month's spending against the stored budget
    pub fn evaluate(&self, month_total: f64) -> BudgetEvaluation {
        evaluate(month_total, self.store.load_budget())
    }
}
