//! Expense service
//!
//! Create, edit, delete and query expenses. Every mutation loads the current
//! snapshot, validates the change, and saves the whole snapshot back; a
//! rejected change never reaches the store.

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::audit::{describe_changes, AuditEntry, AuditLogger, EntityType};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Expense, ExpenseId};
use crate::session::EditSession;
use crate::storage::{LedgerStore, Storage};
use crate::summary::{breakdown_by_category, month_items, summarize, CategoryTotal, Summary};
use crate::validation::ExpenseInput;
use crate::view::{view, ViewOptions};

/// Service for expense management
pub struct ExpenseService<'a> {
    store: &'a dyn LedgerStore,
    audit: Option<&'a AuditLogger>,
}

impl<'a> ExpenseService<'a> {
    /// Create a service over the file-backed storage, with auditing
    pub fn new(storage: &'a Storage) -> Self {
        Self {
            store: &storage.expenses,
            audit: Some(storage.audit()),
        }
    }

    /// Create a service over any ledger store, without auditing
    pub fn with_store(store: &'a dyn LedgerStore) -> Self {
        Self { store, audit: None }
    }

    /// Record a new expense under a freshly generated id
    pub fn create(&self, input: &ExpenseInput) -> LedgerResult<Expense> {
        let expense = input.accept_as(&ExpenseId::new())?;

        let mut expenses = self.store.load();
        expenses.push(expense.clone());
        self.store.save(&expenses)?;

        info!(id = %expense.id, amount = %expense.amount, "Created expense");
        self.record(AuditEntry::create(
            EntityType::Expense,
            expense.id.as_str(),
            &expense,
        ));

        Ok(expense)
    }

    /// Replace every field of an existing expense except its id
    pub fn update(&self, id: &ExpenseId, input: &ExpenseInput) -> LedgerResult<Expense> {
        let updated = input.accept_as(id)?;

        let mut expenses = self.store.load();
        let slot = expenses
            .iter_mut()
            .find(|e| &e.id == id)
            .ok_or_else(|| LedgerError::expense_not_found(id.as_str()))?;

        let before = slot.clone();
        slot.replace_fields(updated.clone());
        self.store.save(&expenses)?;

        info!(id = %id, "Updated expense");
        self.record(AuditEntry::update(
            EntityType::Expense,
            id.as_str(),
            &before,
            &updated,
            describe_changes(&before, &updated),
        ));

        Ok(updated)
    }

    /// Remove an expense; returns false if no expense had that id
    pub fn delete(&self, id: &ExpenseId) -> LedgerResult<bool> {
        let mut expenses = self.store.load();
        let Some(pos) = expenses.iter().position(|e| &e.id == id) else {
            debug!(id = %id, "Delete of unknown expense ignored");
            return Ok(false);
        };

        let removed = expenses.remove(pos);
        self.store.save(&expenses)?;

        info!(id = %id, "Deleted expense");
        self.record(AuditEntry::delete(
            EntityType::Expense,
            id.as_str(),
            &removed,
        ));

        Ok(true)
    }

    /// Get an expense by id
    pub fn get(&self, id: &ExpenseId) -> Option<Expense> {
        self.store.load().into_iter().find(|e| &e.id == id)
    }

    /// Find an expense by full id or unique id prefix
    pub fn resolve(&self, key: &str) -> LedgerResult<Expense> {
        let key = key.trim();
        if key.is_empty() {
            return Err(LedgerError::Validation("expense id is required".into()));
        }

        let expenses = self.store.load();
        if let Some(exact) = expenses.iter().find(|e| e.id.as_str() == key) {
            return Ok(exact.clone());
        }

        let mut matches = expenses.into_iter().filter(|e| e.id.as_str().starts_with(key));
        match (matches.next(), matches.next()) {
            (Some(found), None) => Ok(found),
            (Some(_), Some(_)) => Err(LedgerError::Validation(format!(
                "id prefix '{}' matches more than one expense",
                key
            ))),
            (None, _) => Err(LedgerError::expense_not_found(key)),
        }
    }

    /// Apply the entry form: create, or update the record under edit
    ///
    /// On success the session returns to create mode. A rejected input leaves
    /// the session as it was. If the record under edit has vanished the
    /// session is reset and `NotFound` is returned.
    pub fn submit(&self, session: &mut EditSession, input: &ExpenseInput) -> LedgerResult<Expense> {
        let result = match session.editing().cloned() {
            Some(id) => self.update(&id, input),
            None => self.create(input),
        };

        match &result {
            Ok(_) => session.cancel(),
            Err(e) if e.is_not_found() => session.cancel(),
            Err(_) => {}
        }

        result
    }

    /// Delete an expense and drop it from the edit session if it was being edited
    pub fn discard(&self, session: &mut EditSession, id: &ExpenseId) -> LedgerResult<bool> {
        let deleted = self.delete(id)?;
        session.forget(id);
        Ok(deleted)
    }

    /// All stored expenses in stored order
    pub fn all(&self) -> Vec<Expense> {
        self.store.load()
    }

    /// Filtered and sorted expenses
    pub fn list(&self, options: &ViewOptions) -> Vec<Expense> {
        let expenses = self.store.load();
        view(&expenses, options).into_iter().cloned().collect()
    }

    /// Day and month totals for `reference_date`
    pub fn summary(&self, reference_date: NaiveDate) -> Summary {
        summarize(&self.store.load(), reference_date)
    }

    /// Category totals for the month of `reference_date`, largest first
    pub fn breakdown(&self, reference_date: NaiveDate) -> Vec<CategoryTotal> {
        let expenses = self.store.load();
        breakdown_by_category(month_items(&expenses, reference_date))
    }

    fn record(&self, entry: AuditEntry) {
        if let Some(audit) = self.audit {
            audit.record(&entry);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::LedgerPaths;
    use crate::storage::MemoryStore;
    use crate::view::SortMode;
    use approx::assert_relative_eq;
    use tempfile::TempDir;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_create_assigns_id_and_defaults() {
        let store = MemoryStore::new();
        let service = ExpenseService::with_store(&store);

        let created = service
            .create(&ExpenseInput::new("2024-01-05", 10.0).note("  dinner  "))
            .unwrap();

        assert!(!created.id.as_str().is_empty());
        assert_eq!(created.category, "Other");
        assert_eq!(created.note, "dinner");
        assert_eq!(store.load(), vec![created]);
    }

    #[test]
    fn test_create_rejects_invalid_input() {
        let store = MemoryStore::new();
        let service = ExpenseService::with_store(&store);

        let err = service.create(&ExpenseInput::new("2024-01-05", 0.0)).unwrap_err();
        assert!(err.is_validation());
        let err = service.create(&ExpenseInput::new("", 5.0)).unwrap_err();
        assert!(err.is_validation());
        let err = service.create(&ExpenseInput::new("2024-13-01", 5.0)).unwrap_err();
        assert!(err.is_validation());

        assert!(store.load().is_empty());
    }

    #[test]
    fn test_update_replaces_fields_but_not_id() {
        let store = MemoryStore::new();
        let service = ExpenseService::with_store(&store);
        let created = service
            .create(&ExpenseInput::new("2024-01-05", 10.0).category("Food"))
            .unwrap();

        let updated = service
            .update(
                &created.id,
                &ExpenseInput::new("2024-01-06", 12.5).category("Fuel"),
            )
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.category, "Fuel");
        assert_eq!(service.get(&created.id), Some(updated));
        assert_eq!(store.load().len(), 1);
    }

    #[test]
    fn test_update_unknown_is_not_found() {
        let store = MemoryStore::new();
        let service = ExpenseService::with_store(&store);
        let err = service
            .update(&ExpenseId::from("nope"), &ExpenseInput::new("2024-01-06", 1.0))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_invalid_update_leaves_record_untouched() {
        let store = MemoryStore::new();
        let service = ExpenseService::with_store(&store);
        let created = service.create(&ExpenseInput::new("2024-01-05", 10.0)).unwrap();

        assert!(service
            .update(&created.id, &ExpenseInput::new("2024-01-05", -3.0))
            .is_err());
        assert_eq!(service.get(&created.id), Some(created));
    }

    #[test]
    fn test_delete() {
        let store = MemoryStore::new();
        let service = ExpenseService::with_store(&store);
        let created = service.create(&ExpenseInput::new("2024-01-05", 10.0)).unwrap();

        assert!(service.delete(&created.id).unwrap());
        assert!(!service.delete(&created.id).unwrap());
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_resolve_by_prefix() {
        let store = MemoryStore::new();
        let service = ExpenseService::with_store(&store);
        let created = service.create(&ExpenseInput::new("2024-01-05", 10.0)).unwrap();

        let found = service.resolve(created.id.short()).unwrap();
        assert_eq!(found, created);
        assert!(service.resolve("zzzz-no-such").unwrap_err().is_not_found());
        assert!(service.resolve("  ").unwrap_err().is_validation());
    }

    #[test]
    fn test_resolve_ambiguous_prefix() {
        let store = MemoryStore::with_expenses(vec![
            ExpenseInput::new("2024-01-05", 1.0)
                .accept_as(&ExpenseId::from("abc1"))
                .unwrap(),
            ExpenseInput::new("2024-01-05", 2.0)
                .accept_as(&ExpenseId::from("abc2"))
                .unwrap(),
        ]);
        let service = ExpenseService::with_store(&store);

        assert!(service.resolve("abc").unwrap_err().is_validation());
        assert_eq!(service.resolve("abc2").unwrap().amount.value(), 2.0);
    }

    #[test]
    fn test_submit_creates_then_edits() {
        let store = MemoryStore::new();
        let service = ExpenseService::with_store(&store);
        let mut session = EditSession::new();

        let first = service
            .submit(&mut session, &ExpenseInput::new("2024-01-05", 10.0))
            .unwrap();
        assert!(session.editing().is_none());

        session.begin_edit(&first);
        let edited = service
            .submit(&mut session, &ExpenseInput::new("2024-01-05", 20.0))
            .unwrap();
        assert_eq!(edited.id, first.id);
        assert!(session.editing().is_none());
        assert_eq!(store.load().len(), 1);
    }

    #[test]
    fn test_submit_rejected_keeps_session() {
        let store = MemoryStore::new();
        let service = ExpenseService::with_store(&store);
        let mut session = EditSession::new();
        let first = service.create(&ExpenseInput::new("2024-01-05", 10.0)).unwrap();

        session.begin_edit(&first);
        assert!(service
            .submit(&mut session, &ExpenseInput::new("bad", 10.0))
            .is_err());
        assert_eq!(session.editing(), Some(&first.id));
    }

    #[test]
    fn test_discard_resets_session() {
        let store = MemoryStore::new();
        let service = ExpenseService::with_store(&store);
        let mut session = EditSession::new();
        let first = service.create(&ExpenseInput::new("2024-01-05", 10.0)).unwrap();

        session.begin_edit(&first);
        assert!(service.discard(&mut session, &first.id).unwrap());
        assert!(session.editing().is_none());
    }

    #[test]
    fn test_list_summary_and_breakdown() {
        let store = MemoryStore::new();
        let service = ExpenseService::with_store(&store);
        for (d, amount, category, note) in [
            ("2024-01-05", 10.0, "Food", "Lunch"),
            ("2024-01-05", 5.0, "Fuel", ""),
            ("2024-01-20", 20.0, "Food", "dinner"),
            ("2024-02-01", 7.0, "Food", ""),
        ] {
            service
                .create(&ExpenseInput::new(d, amount).category(category).note(note))
                .unwrap();
        }

        let listed = service.list(&ViewOptions::new().search("LUNCH"));
        assert_eq!(listed.len(), 1);

        let by_amount = service.list(&ViewOptions::new().sorted(SortMode::AmountDesc));
        assert_eq!(by_amount[0].amount.value(), 20.0);

        let summary = service.summary(date("2024-01-05"));
        assert_relative_eq!(summary.today_total, 15.0);
        assert_relative_eq!(summary.month_total, 35.0);
        assert_eq!(summary.unique_days, 2);

        let breakdown = service.breakdown(date("2024-01-05"));
        assert_eq!(breakdown[0].category, "Food");
        assert_relative_eq!(breakdown[0].total, 30.0);
        assert_eq!(breakdown.len(), 2);
    }

    #[test]
    fn test_file_storage_writes_audit_log() {
        let temp_dir = TempDir::new().unwrap();
        let storage =
            Storage::new(LedgerPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();
        let service = ExpenseService::new(&storage);

        let created = service.create(&ExpenseInput::new("2024-01-05", 10.0)).unwrap();
        service
            .update(&created.id, &ExpenseInput::new("2024-01-05", 11.0))
            .unwrap();
        service.delete(&created.id).unwrap();

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[1].summary.as_deref(), Some("amount: 10 -> 11"));
    }
}
