//! Expense CLI commands
//!
//! Recording, editing and browsing expenses, plus the dashboard totals.

use chrono::NaiveDate;
use clap::Subcommand;

use crate::config::Settings;
use crate::display::{
    format_breakdown, format_budget, format_expense_details, format_expense_list,
    format_summary,
};
use crate::error::LedgerResult;
use crate::models::DATE_FORMAT;
use crate::services::{BudgetService, ExpenseService};
use crate::session::EditSession;
use crate::storage::Storage;
use crate::validation::ExpenseInput;
use crate::view::{SortMode, ViewOptions};

use super::{parse_date_arg, today};

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record a new expense
    Add {
        /// Amount spent (e.g. "250" or "12.50")
        #[arg(allow_negative_numbers = true)]
        amount: f64,
        /// Category (defaults to "Other")
        #[arg(short, long, default_value = "")]
        category: String,
        /// Date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
        /// Free-text note
        #[arg(short, long, default_value = "")]
        note: String,
    },

    /// Change an expense; omitted fields keep their current value
    Edit {
        /// Expense ID or unique ID prefix
        id: String,
        /// New amount
        #[arg(short, long, allow_negative_numbers = true)]
        amount: Option<f64>,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
        /// New date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
        /// New note
        #[arg(short, long)]
        note: Option<String>,
    },

    /// Delete an expense
    Delete {
        /// Expense ID or unique ID prefix
        id: String,
    },

    /// Show one expense in full
    Show {
        /// Expense ID or unique ID prefix
        id: String,
    },

    /// List expenses
    List {
        /// Only expenses on this date (YYYY-MM-DD)
        #[arg(short, long, value_parser = parse_date_arg)]
        date: Option<NaiveDate>,
        /// Only expenses whose note contains this text (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,
        /// Order: date_desc, date_asc, amount_desc, amount_asc
        #[arg(long)]
        sort: Option<SortMode>,
    },

    /// Today's and this month's totals with budget status
    Summary {
        /// Reference date (YYYY-MM-DD, defaults to today)
        #[arg(short, long, value_parser = parse_date_arg)]
        date: Option<NaiveDate>,
    },

    /// Spending per category for the month
    Breakdown {
        /// Any date in the month (YYYY-MM-DD, defaults to today)
        #[arg(short, long, value_parser = parse_date_arg)]
        date: Option<NaiveDate>,
    },
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> LedgerResult<()> {
    let service = ExpenseService::new(storage);
    let prefix = settings.currency_prefix.as_str();

    match cmd {
        ExpenseCommands::Add {
            amount,
            category,
            date,
            note,
        } => {
            let date = date.unwrap_or_else(|| today().format(DATE_FORMAT).to_string());
            let input = ExpenseInput::new(date, amount).category(category).note(note);
            let expense = service.create(&input)?;

            println!("Added expense {}", expense.id.short());
            print!("{}", format_expense_details(&expense, prefix));
        }

        ExpenseCommands::Edit {
            id,
            amount,
            category,
            date,
            note,
        } => {
            let existing = service.resolve(&id)?;

            let input = ExpenseInput::new(
                date.unwrap_or_else(|| existing.date_text()),
                amount.unwrap_or(existing.amount.value()),
            )
            .category(category.unwrap_or_else(|| existing.category.clone()))
            .note(note.unwrap_or_else(|| existing.note.clone()));

            let mut session = EditSession::new();
            session.begin_edit(&existing);
            let expense = service.submit(&mut session, &input)?;

            println!("Updated expense {}", expense.id.short());
            print!("{}", format_expense_details(&expense, prefix));
        }

        ExpenseCommands::Delete { id } => {
            let expense = service.resolve(&id)?;
            if service.delete(&expense.id)? {
                println!("Deleted expense {} ({})", expense.id.short(), expense);
            }
        }

        ExpenseCommands::Show { id } => {
            let expense = service.resolve(&id)?;
            print!("{}", format_expense_details(&expense, prefix));
        }

        ExpenseCommands::List { date, search, sort } => {
            let mut options = ViewOptions::new().sorted(sort.unwrap_or(settings.default_sort));
            if let Some(date) = date {
                options = options.on_date(date);
            }
            if let Some(query) = search {
                options = options.search(query);
            }

            print!("{}", format_expense_list(&service.list(&options), prefix));
        }

        ExpenseCommands::Summary { date } => {
            let summary = service.summary(date.unwrap_or_else(today));
            let evaluation = BudgetService::new(storage).evaluate(summary.month_total);

            print!("{}", format_summary(&summary, prefix));
            println!();
            print!("{}", format_budget(&evaluation, prefix));
        }

        ExpenseCommands::Breakdown { date } => {
            let date = date.unwrap_or_else(today);
            println!("Spending by category, {}", date.format("%B %Y"));
            print!("{}", format_breakdown(&service.breakdown(date), prefix));
        }
    }

    Ok(())
}
