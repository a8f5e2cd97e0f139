//! ledger - daily expense tracker
//!
//! Usage:
//!   ledger add 250 -c Food -n lunch     Record an expense
//!   ledger list --sort amount_desc      List expenses
//!   ledger summary                      Today's and this month's totals
//!   ledger budget set 15000             Set the monthly budget
//!   ledger export / ledger import FILE  CSV interchange

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use daily_ledger::cli::{
    handle_budget_command, handle_expense_command, handle_interchange_command, BudgetCommands,
    ExpenseCommands, InterchangeCommands,
};
use daily_ledger::config::{LedgerPaths, Settings};
use daily_ledger::storage::Storage;
use daily_ledger::view::SortMode;

/// Environment variable holding the log filter
const LOG_ENV: &str = "LEDGER_LOG";

#[derive(Parser)]
#[command(
    name = "ledger",
    version,
    about = "Track daily expenses against a monthly budget",
    long_about = "Records dated expenses, summarizes spending by day, month and \
                  category, tracks the month against an optional budget, and \
                  exchanges the ledger with other tools as CSV."
)]
struct Cli {
    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Expense(ExpenseCommands),

    /// Monthly budget commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    #[command(flatten)]
    Interchange(InterchangeCommands),

    /// Show paths and settings, optionally changing settings
    Config {
        /// Text placed before money values (e.g. "Rs " or "$")
        #[arg(long)]
        currency: Option<String>,
        /// Default listing order
        #[arg(long)]
        default_sort: Option<SortMode>,
    },

    /// Show recent changes from the audit log
    History {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        count: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Priority: LEDGER_LOG > --verbose > warn
    let filter = match EnvFilter::try_from_env(LOG_ENV) {
        Ok(filter) => filter,
        Err(_) if cli.verbose => EnvFilter::new("debug"),
        Err(_) => EnvFilter::new("warn"),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();

    let paths = LedgerPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;
    let storage = Storage::new(paths.clone())?;

    match cli.command {
        Some(Commands::Expense(cmd)) => handle_expense_command(&storage, &settings, cmd)?,
        Some(Commands::Budget(cmd)) => handle_budget_command(&storage, &settings, cmd)?,
        Some(Commands::Interchange(cmd)) => handle_interchange_command(&storage, cmd)?,
        Some(Commands::Config {
            currency,
            default_sort,
        }) => {
            let changed = currency.is_some() || default_sort.is_some();
            if let Some(currency) = currency {
                settings.currency_prefix = currency;
            }
            if let Some(sort) = default_sort {
                settings.default_sort = sort;
            }
            if changed {
                settings.save(&paths)?;
                println!("Settings saved.");
                println!();
            }

            println!("Ledger Configuration");
            println!("====================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Expenses file:  {}", paths.expenses_file().display());
            println!("Budget file:    {}", paths.budget_file().display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency prefix: {:?}", settings.currency_prefix);
            println!("  Default sort:    {}", settings.default_sort);
        }
        Some(Commands::History { count }) => {
            let entries = storage.audit().read_recent(count)?;
            if entries.is_empty() {
                println!("No changes recorded yet.");
            }
            for entry in entries {
                println!("{}", entry.format_human_readable());
            }
        }
        None => {
            println!("ledger - daily expense tracker");
            println!();
            println!("Run 'ledger --help' for usage information.");
        }
    }

    Ok(())
}
