//! Change summaries for expense edits

use crate::models::Expense;

const MAX_NOTE_CHARS: usize = 40;

/// Describe which fields differ between two versions of an expense
///
/// Returns `None` when nothing changed.
pub fn describe_changes(before: &Expense, after: &Expense) -> Option<String> {
    let mut changes = Vec::new();

    if before.date != after.date {
        changes.push(format!("date: {} -> {}", before.date_text(), after.date_text()));
    }
    if before.amount != after.amount {
        changes.push(format!("amount: {} -> {}", before.amount, after.amount));
    }
    if before.category != after.category {
        changes.push(format!(
            "category: \"{}\" -> \"{}\"",
            before.category, after.category
        ));
    }
    if before.note != after.note {
        changes.push(format!(
            "note: \"{}\" -> \"{}\"",
            clip(&before.note),
            clip(&after.note)
        ));
    }

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

fn clip(text: &str) -> String {
    if text.chars().count() > MAX_NOTE_CHARS {
        let head: String = text.chars().take(MAX_NOTE_CHARS - 3).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}
