//! Export and import of the ledger as interchange text

use std::fs;
use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::audit::{AuditEntry, AuditLogger};
use crate::error::{LedgerError, LedgerResult};
use crate::interchange::{decode, merge, to_text, write_text, DroppedRow};
use crate::storage::{LedgerStore, Storage};

/// Outcome of an import
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportResult {
    /// Rows that became valid expenses
    pub decoded: usize,
    /// Rows that were skipped
    pub dropped: Vec<DroppedRow>,
    /// Expenses whose id was new
    pub inserted: usize,
    /// Existing expenses overwritten by an imported row
    pub replaced: usize,
}

impl ImportResult {
    /// Check whether the import changed the ledger
    pub fn changed(&self) -> bool {
        self.decoded > 0
    }
}

/// Service for moving the ledger in and out as text
pub struct InterchangeService<'a> {
    store: &'a dyn LedgerStore,
    audit: Option<&'a AuditLogger>,
}

impl<'a> InterchangeService<'a> {
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

    /// Encode the whole ledger
    pub fn export_text(&self) -> LedgerResult<String> {
        to_text(&self.store.load())
    }

    /// Encode the whole ledger into `writer`; returns the number of records
    pub fn export_to<W: Write>(&self, writer: &mut W) -> LedgerResult<usize> {
        let expenses = self.store.load();
        write_text(&expenses, writer)?;
        Ok(expenses.len())
    }

    /// Encode the whole ledger into a file at `path`
    pub fn export_file(&self, path: &Path) -> LedgerResult<usize> {
        let mut file = fs::File::create(path).map_err(|e| {
            LedgerError::Export(format!("Failed to create {}: {}", path.display(), e))
        })?;
        let count = self.export_to(&mut file)?;
        info!(path = %path.display(), count, "Exported ledger");
        Ok(count)
    }

    /// Decode `text` and merge it into the ledger by id
    ///
    /// When no row decodes the ledger is left untouched.
    pub fn import_text(&self, text: &str, source: &str) -> LedgerResult<ImportResult> {
        let decoded = decode(text);
        let mut result = ImportResult {
            decoded: decoded.expenses.len(),
            dropped: decoded.dropped,
            ..ImportResult::default()
        };

        if decoded.expenses.is_empty() {
            info!(source, dropped = result.dropped.len(), "Nothing to import");
            return Ok(result);
        }

        let merged = merge(self.store.load(), decoded.expenses);
        self.store.save(&merged.expenses)?;

        result.inserted = merged.inserted;
        result.replaced = merged.replaced;

        info!(
            source,
            inserted = result.inserted,
            replaced = result.replaced,
            dropped = result.dropped.len(),
            "Imported expenses"
        );
        if let Some(audit) = self.audit {
            audit.record(&AuditEntry::import(
                source,
                format!(
                    "{} inserted, {} replaced, {} dropped",
                    result.inserted,
                    result.replaced,
                    result.dropped.len()
                ),
            ));
        }

        Ok(result)
    }

    /// Read a whole file and import it
    pub fn import_file(&self, path: &Path) -> LedgerResult<ImportResult> {
        let text = fs::read_to_string(path).map_err(|e| {
            LedgerError::Import(format!("Failed to read {}: {}", path.display(), e))
        })?;
        self.import_text(&text, &path.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::LedgerPaths;
    use crate::services::ExpenseService;
    use crate::storage::MemoryStore;
    use crate::validation::ExpenseInput;
    use tempfile::TempDir;

    const ROWS: &str = "id,date,amount,category,note\n\
        \"a\",\"2024-01-01\",\"10\",\"Food\",\"\"\n\
        \"b\",\"2024-01-02\",\"oops\",\"Food\",\"\"\n\
        \"c\",\"2024-01-03\",\"3.5\",\"\",\"tea\"";

    #[test]
    fn test_import_merges_and_reports() {
        let store = MemoryStore::new();
        let service = InterchangeService::with_store(&store);

        let result = service.import_text(ROWS, "test").unwrap();
        assert_eq!(result.decoded, 2);
        assert_eq!(result.inserted, 2);
        assert_eq!(result.replaced, 0);
        assert_eq!(result.dropped.len(), 1);
        assert_eq!(result.dropped[0].line, 3);

        let again = service.import_text(ROWS, "test").unwrap();
        assert_eq!(again.inserted, 0);
        assert_eq!(again.replaced, 2);
        assert_eq!(store.load().len(), 2);
    }

    #[test]
    fn test_empty_import_does_not_save() {
        let store = MemoryStore::new();
        let expenses = ExpenseService::with_store(&store);
        expenses.create(&ExpenseInput::new("2024-01-01", 1.0)).unwrap();

        let service = InterchangeService::with_store(&store);
        let result = service.import_text("id,date,amount,category,note\n", "x").unwrap();
        assert!(!result.changed());
        assert_eq!(store.load().len(), 1);
    }

    #[test]
    fn test_export_then_import_is_identity() {
        let store = MemoryStore::new();
        let expenses = ExpenseService::with_store(&store);
        expenses
            .create(&ExpenseInput::new("2024-01-01", 1.25).note("a, \"quoted\" note"))
            .unwrap();
        expenses.create(&ExpenseInput::new("2024-01-02", 3.0)).unwrap();
        let before = store.load();

        let service = InterchangeService::with_store(&store);
        let text = service.export_text().unwrap();
        let result = service.import_text(&text, "self").unwrap();

        assert_eq!(result.replaced, 2);
        assert_eq!(store.load(), before);
    }

    #[test]
    fn test_export_to_writer() {
        let store = MemoryStore::new();
        ExpenseService::with_store(&store)
            .create(&ExpenseInput::new("2024-01-01", 1.0))
            .unwrap();

        let mut out = Vec::new();
        let count = InterchangeService::with_store(&store)
            .export_to(&mut out)
            .unwrap();
        assert_eq!(count, 1);
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 2);
    }

    #[test]
    fn test_file_round_trip_with_audit() {
        let temp_dir = TempDir::new().unwrap();
        let storage =
            Storage::new(LedgerPaths::with_base_dir(temp_dir.path().join("ledger"))).unwrap();
        let file = temp_dir.path().join("out.csv");
        std::fs::write(&file, ROWS).unwrap();

        let service = InterchangeService::new(&storage);
        let result = service.import_file(&file).unwrap();
        assert_eq!(result.inserted, 2);

        let exported = temp_dir.path().join("back.csv");
        assert_eq!(service.export_file(&exported).unwrap(), 2);
        assert!(std::fs::read_to_string(&exported)
            .unwrap()
            .starts_with("id,date,amount,category,note"));

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_missing_import_file() {
        let store = MemoryStore::new();
        let err = InterchangeService::with_store(&store)
            .import_file(Path::new("/definitely/not/here.csv"))
            .unwrap_err();
        assert!(matches!(err, LedgerError::Import(_)));
    }
}
