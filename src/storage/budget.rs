//! Monthly budget persistence in `budget.json`

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::LedgerResult;
use crate::models::Amount;
use crate::validation::RawAmount;

use super::file_io::{read_json, remove_if_exists, write_json_atomic};
use super::BudgetStore;

#[derive(Debug, Serialize, Deserialize)]
struct BudgetData {
    #[serde(default)]
    monthly_budget: Option<RawAmount>,
}

/// JSON file implementation of [`BudgetStore`]
#[derive(Debug, Clone)]
pub struct JsonBudgetStore {
    path: PathBuf,
}

impl JsonBudgetStore {
    /// Create a store backed by `path`
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Path of the backing file
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl BudgetStore for JsonBudgetStore {
    fn load_budget(&self) -> Option<Amount> {
        let data = match read_json::<BudgetData, _>(&self.path) {
            Ok(data) => data?,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Budget file unreadable, treating as unset");
                return None;
            }
        };

        let amount = match data.monthly_budget? {
            RawAmount::Number(value) => Amount::new(value),
            RawAmount::Text(text) => Amount::parse(&text),
        };

        match amount {
            Ok(amount) => Some(amount),
            Err(e) => {
                debug!(error = %e, "Ignoring stored budget");
                None
            }
        }
    }

    fn save_budget(&self, budget: Option<Amount>) -> LedgerResult<()> {
        match budget {
            Some(amount) => write_json_atomic(
                &self.path,
                &BudgetData {
                    monthly_budget: Some(RawAmount::Number(amount.value())),
                },
            ),
            None => remove_if_exists(&self.path),
        }
    }
}
