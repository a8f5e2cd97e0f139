//! CSV export and import commands

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Subcommand;

use crate::error::{LedgerError, LedgerResult};
use crate::services::InterchangeService;
use crate::storage::Storage;

use super::today;

/// Interchange subcommands
#[derive(Subcommand)]
pub enum InterchangeCommands {
    /// Export all expenses as CSV
    Export {
        /// Output file (defaults to expenses_<today>.csv)
        output: Option<PathBuf>,
        /// Write to standard output instead of a file
        #[arg(long, conflicts_with = "output")]
        stdout: bool,
    },

    /// Import expenses from a CSV file, merging by id
    Import {
        /// CSV file to read
        file: PathBuf,
        /// Also list the rows that were skipped
        #[arg(long)]
        show_skipped: bool,
    },
}

/// Default export file name for a given day
pub fn default_export_name(date: chrono::NaiveDate) -> String {
    format!("expenses_{}.csv", date.format("%Y-%m-%d"))
}

/// Handle an interchange command
pub fn handle_interchange_command(storage: &Storage, cmd: InterchangeCommands) -> LedgerResult<()> {
    let service = InterchangeService::new(storage);

    match cmd {
        InterchangeCommands::Export { output, stdout } => {
            if stdout {
                let mut out = io::stdout().lock();
                service.export_to(&mut out)?;
                writeln!(out).map_err(|e| LedgerError::Export(e.to_string()))?;
            } else {
                let path = output.unwrap_or_else(|| PathBuf::from(default_export_name(today())));
                let count = service.export_file(&path)?;
                println!("Exported {} expense(s) to {}", count, path.display());
            }
        }

        InterchangeCommands::Import { file, show_skipped } => {
            let result = service.import_file(&file)?;

            if !result.changed() {
                println!("No valid rows found in {}; nothing imported.", file.display());
            } else {
                println!(
                    "Imported {} row(s): {} new, {} replaced.",
                    result.decoded, result.inserted, result.replaced
                );
            }
            if !result.dropped.is_empty() {
                println!("Skipped {} invalid row(s).", result.dropped.len());
                if show_skipped {
                    for row in &result.dropped {
                        println!("  line {}: {}", row.line, row.reason);
                    }
                }
            }
        }
    }

    Ok(())
}
