//! Expense persistence in `expenses.json`
//!
//! Loading never fails: each stored entry is validated on its own, bad
//! entries are skipped, and a missing or corrupt file reads as an empty
//! ledger.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::LedgerResult;
use crate::models::{Expense, ExpenseId};
use crate::validation::{accept, RawExpense};

use super::file_io::{read_json, write_json_atomic};
use super::LedgerStore;

/// On-disk layout of the ledger file
#[derive(Serialize)]
struct LedgerData<'a> {
    expenses: &'a [Expense],
}

/// JSON file implementation of [`LedgerStore`]
#[derive(Debug, Clone)]
pub struct JsonLedgerStore {
    path: PathBuf,
}

impl JsonLedgerStore {
    /// Create a store backed by `path`
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Path of the backing file
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl LedgerStore for JsonLedgerStore {
    fn load(&self) -> Vec<Expense> {
        match read_json::<Value, _>(&self.path) {
            Ok(Some(value)) => entries_from_value(value),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Ledger file unreadable, starting empty");
                Vec::new()
            }
        }
    }

    fn save(&self, expenses: &[Expense]) -> LedgerResult<()> {
        debug!(path = %self.path.display(), count = expenses.len(), "Saving ledger");
        write_json_atomic(&self.path, &LedgerData { expenses })
    }
}

/// Pull valid expenses out of a parsed ledger document
///
/// Accepts `{"expenses": [...]}` as well as a bare array. Later entries win
/// over earlier ones with the same id.
pub(crate) fn entries_from_value(value: Value) -> Vec<Expense> {
    let entries = match value {
        Value::Object(mut map) => match map.remove("expenses") {
            Some(Value::Array(entries)) => entries,
            _ => {
                warn!("Ledger file has no expenses list, starting empty");
                return Vec::new();
            }
        },
        Value::Array(entries) => entries,
        _ => {
            warn!("Ledger file is not a JSON object, starting empty");
            return Vec::new();
        }
    };

    let mut expenses: Vec<Expense> = Vec::with_capacity(entries.len());
    let mut index: HashMap<ExpenseId, usize> = HashMap::new();

    for (position, entry) in entries.into_iter().enumerate() {
        let raw: RawExpense = match serde_json::from_value(entry) {
            Ok(raw) => raw,
            Err(e) => {
                debug!(position, error = %e, "Skipping malformed stored entry");
                continue;
            }
        };

        match accept(raw) {
            Ok(expense) => match index.get(&expense.id) {
                Some(&slot) => expenses[slot] = expense,
                None => {
                    index.insert(expense.id.clone(), expenses.len());
                    expenses.push(expense);
                }
            },
            Err(reason) => debug!(position, %reason, "Skipping invalid stored entry"),
        }
    }

    expenses
}
