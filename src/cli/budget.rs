//! Monthly budget CLI commands

use chrono::NaiveDate;
use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_budget, format_money};
use crate::error::LedgerResult;
use crate::services::{BudgetService, ExpenseService};
use crate::storage::Storage;

use super::{parse_date_arg, today};

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Set the monthly spending ceiling
    Set {
        /// Budget amount (must be greater than zero)
        #[arg(allow_negative_numbers = true)]
        amount: f64,
    },

    /// Remove the monthly budget
    Clear,

    /// Show the budget and this month's progress against it
    Show {
        /// Any date in the month (YYYY-MM-DD, defaults to today)
        #[arg(short, long, value_parser = parse_date_arg)]
        date: Option<NaiveDate>,
    },
}

/// Handle a budget command
pub fn handle_budget_command(
    storage: &Storage,
    settings: &Settings,
    cmd: BudgetCommands,
) -> LedgerResult<()> {
    let service = BudgetService::new(storage);
    let prefix = settings.currency_prefix.as_str();

    match cmd {
        BudgetCommands::Set { amount } => {
            let budget = service.set(amount)?;
            println!(
                "Monthly budget set to {}",
                format_money(budget.value(), prefix)
            );
        }

        BudgetCommands::Clear => {
            if service.clear()? {
                println!("Monthly budget cleared.");
            } else {
                println!("No monthly budget was set.");
            }
        }

        BudgetCommands::Show { date } => {
            let date = date.unwrap_or_else(today);
            let month_total = ExpenseService::new(storage).summary(date).month_total;

            match service.get() {
                Some(budget) => println!(
                    "Monthly budget: {}",
                    format_money(budget.value(), prefix)
                ),
                None => println!("Monthly budget: not set"),
            }
            println!(
                "Spent in {}: {}",
                date.format("%B %Y"),
                format_money(month_total, prefix)
            );
            print!("{}", format_budget(&service.evaluate(month_total), prefix));
        }
    }

    Ok(())
}
