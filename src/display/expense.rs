//! Expense list and detail formatting

use crate::models::Expense;

use super::money::format_money;

/// Format one expense as a list row
pub fn format_expense_row(expense: &Expense, prefix: &str) -> String {
    format!(
        "{:8}  {}  {:>14}  {:16}  {}",
        expense.id.short(),
        expense.date_text(),
        format_money(expense.amount.value(), prefix),
        truncate(&expense.category, 16),
        expense.note
    )
    .trim_end()
    .to_string()
}

/// Format a listing of expenses, in the order given
pub fn format_expense_list(expenses: &[Expense], prefix: &str) -> String {
    if expenses.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:8}  {:10}  {:>14}  {:16}  {}\n",
        "ID", "Date", "Amount", "Category", "Note"
    ));
    output.push_str(&"-".repeat(64));
    output.push('\n');

    for expense in expenses {
        output.push_str(&format_expense_row(expense, prefix));
        output.push('\n');
    }

    output.push_str(&format!("{} expense(s)\n", expenses.len()));
    output
}

/// Format every field of one expense
pub fn format_expense_details(expense: &Expense, prefix: &str) -> String {
    let mut output = String::new();
    output.push_str(&format!("Expense:  {}\n", expense.id));
    output.push_str(&format!("Date:     {}\n", expense.date_text()));
    output.push_str(&format!(
        "Amount:   {}\n",
        format_money(expense.amount.value(), prefix)
    ));
    output.push_str(&format!("Category: {}\n", expense.category));
    if !expense.note.is_empty() {
        output.push_str(&format!("Note:     {}\n", expense.note));
    }
    output
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{}…", head)
    }
}
