//! Merge-by-identity of imported records
//!
//! Imported records replace existing records with the same id in full, or are
//! added when the id is new. Importing the same file twice is the same as
//! importing it once.

use std::collections::HashMap;

use crate::models::{Expense, ExpenseId};

/// Result of merging imported records into a snapshot
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Merged {
    /// The merged snapshot: existing records first, then new ones in import order
    pub expenses: Vec<Expense>,
    /// Number of records whose id was not present before
    pub inserted: usize,
    /// Number of existing records that were overwritten
    pub replaced: usize,
}

/// Merge `incoming` into `existing` keyed by id
///
/// A later record wins over an earlier one with the same id, including
/// duplicates within `incoming` itself.
pub fn merge(existing: Vec<Expense>, incoming: Vec<Expense>) -> Merged {
    let mut index: HashMap<ExpenseId, usize> = HashMap::with_capacity(existing.len());
    let mut expenses: Vec<Expense> = Vec::with_capacity(existing.len() + incoming.len());

    for expense in existing {
        upsert(&mut expenses, &mut index, expense);
    }

    let mut inserted = 0;
    let mut replaced = 0;
    for expense in incoming {
        if upsert(&mut expenses, &mut index, expense) {
            replaced += 1;
        } else {
            inserted += 1;
        }
    }

    Merged {
        expenses,
        inserted,
        replaced,
    }
}

/// Returns true when an existing entry was overwritten
fn upsert(
    expenses: &mut Vec<Expense>,
    index: &mut HashMap<ExpenseId, usize>,
    expense: Expense,
) -> bool {
    match index.get(&expense.id) {
        Some(&pos) => {
            expenses[pos] = expense;
            true
        }
        None => {
            index.insert(expense.id.clone(), expenses.len());
            expenses.push(expense);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interchange::csv::{from_text, to_text};
    use crate::models::Amount;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn expense(id: &str, day: u32, amount: f64, category: &str) -> Expense {
        Expense::with_id(
            ExpenseId::from(id),
            NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            Amount::new(amount).unwrap(),
            category,
            "",
        )
    }

    fn sorted(mut items: Vec<Expense>) -> Vec<Expense> {
        items.sort_by(|a, b| a.id.cmp(&b.id));
        items
    }

    #[test]
    fn test_inserts_new_and_replaces_existing() {
        let existing = vec![expense("a", 1, 10.0, "Food"), expense("b", 2, 5.0, "Food")];
        let incoming = vec![expense("b", 3, 7.0, "Fuel"), expense("c", 4, 1.0, "Fun")];

        let merged = merge(existing, incoming);
        assert_eq!(merged.inserted, 1);
        assert_eq!(merged.replaced, 1);
        assert_eq!(
            merged.expenses,
            vec![
                expense("a", 1, 10.0, "Food"),
                expense("b", 3, 7.0, "Fuel"),
                expense("c", 4, 1.0, "Fun"),
            ]
        );
    }

    #[test]
    fn test_replacement_is_whole_record() {
        let mut old = expense("a", 1, 10.0, "Food");
        old.note = "keep me?".into();
        let merged = merge(vec![old], vec![expense("a", 2, 3.0, "Fuel")]);
        assert_eq!(merged.expenses[0].note, "");
        assert_eq!(merged.expenses[0].category, "Fuel");
    }

    #[test]
    fn test_later_duplicate_in_import_wins() {
        let merged = merge(
            Vec::new(),
            vec![expense("a", 1, 1.0, "Food"), expense("a", 2, 2.0, "Fuel")],
        );
        assert_eq!(merged.expenses, vec![expense("a", 2, 2.0, "Fuel")]);
        assert_eq!(merged.inserted, 1);
        assert_eq!(merged.replaced, 1);
    }

    #[test]
    fn test_merge_with_nothing() {
        let existing = vec![expense("a", 1, 1.0, "Food")];
        let merged = merge(existing.clone(), Vec::new());
        assert_eq!(merged.expenses, existing);
        assert_eq!(merged.inserted + merged.replaced, 0);
    }

    fn arb_snapshot() -> impl Strategy<Value = Vec<Expense>> {
        prop::collection::btree_map(
            "[a-z0-9]{1,6}",
            (1u32..=31, 1u32..100_000, "[A-Za-z]{0,8}", "[ -~]{0,20}"),
            0..20,
        )
        .prop_map(|rows| {
            rows.into_iter()
                .map(|(id, (day, cents, category, note))| {
                    Expense::with_id(
                        ExpenseId::from(id),
                        NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
                        Amount::new(cents as f64 / 100.0).unwrap(),
                        category,
                        note.trim().to_string(),
                    )
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_round_trip_reproduces_snapshot(snapshot in arb_snapshot()) {
            let text = to_text(&snapshot).unwrap();
            prop_assert_eq!(sorted(from_text(&text)), sorted(snapshot));
        }

        #[test]
        fn prop_importing_own_export_is_identity(snapshot in arb_snapshot()) {
            let decoded = from_text(&to_text(&snapshot).unwrap());
            let merged = merge(snapshot.clone(), decoded);
            prop_assert_eq!(sorted(merged.expenses), sorted(snapshot));
        }

        #[test]
        fn prop_merge_is_idempotent(existing in arb_snapshot(), incoming in arb_snapshot()) {
            let once = merge(existing, incoming.clone()).expenses;
            let twice = merge(once.clone(), incoming).expenses;
            prop_assert_eq!(sorted(twice), sorted(once));
        }
    }
}
