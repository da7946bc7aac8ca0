//! One-shot fleet commands
//!
//! Each command loads the saved fleet, applies one change or query, and
//! saves again when something changed.

use std::path::PathBuf;

use clap::Subcommand;

use crate::display::{format_dollars, format_fleet_report};
use crate::error::{FleetError, FleetResult};
use crate::models::Money;
use crate::services::{ExpenseOutcome, FleetRegistry, FleetService};
use crate::storage::Storage;

/// Fleet subcommands
#[derive(Subcommand)]
pub enum FleetCommands {
    /// Print the fleet report
    Report,
    /// Add a boat from a CSV line: type,name,year,make/model,length,price[,expenses]
    Add {
        /// Boat data, e.g. "SAILING,Serenity,2015,Catalina 350,35,75000"
        line: String,
    },
    /// Append every boat from a CSV file to the saved fleet
    Import {
        /// Path to the CSV file
        file: PathBuf,
    },
    /// Remove a boat by name
    Remove {
        /// Boat name (case-insensitive)
        name: String,
    },
    /// Authorize an expense against a boat
    Expense {
        /// Boat name (case-insensitive)
        name: String,
        /// Amount to spend (e.g., "1500.00")
        amount: String,
    },
    /// List snapshot backups
    Backups,
    /// Show recent audit log entries
    History {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

/// Handle a fleet command
pub fn handle_fleet_command(storage: &Storage, cmd: FleetCommands) -> FleetResult<()> {
    match cmd {
        FleetCommands::Report => {
            let registry = load_saved_fleet(storage)?;
            print!("{}", format_fleet_report(&registry.report()));
        }

        FleetCommands::Add { line } => {
            let mut registry = load_saved_fleet(storage)?;
            let boat = FleetService::new(storage, &mut registry).add(&line)?;
            storage.save_fleet(&registry)?;
            println!("Added boat: {}", boat.name());
        }

        FleetCommands::Import { file } => {
            let mut registry = load_saved_fleet(storage)?;
            let count = registry.load_from_delimited_text(&file)?;
            storage.save_fleet(&registry)?;
            println!("Imported {} boat(s) from {}", count, file.display());
        }

        FleetCommands::Remove { name } => {
            let mut registry = load_saved_fleet(storage)?;
            let removed = FleetService::new(storage, &mut registry)
                .remove(&name)
                .ok_or_else(|| FleetError::boat_not_found(&name))?;
            storage.save_fleet(&registry)?;
            println!("Removed boat: {}", removed.name());
        }

        FleetCommands::Expense { name, amount } => {
            let amount = Money::parse(&amount).map_err(|e| {
                FleetError::Validation(format!(
                    "Invalid amount. Use a format like '1500.00' or '1500'. Error: {}",
                    e
                ))
            })?;

            let mut registry = load_saved_fleet(storage)?;
            let outcome = FleetService::new(storage, &mut registry).authorize_expense(&name, amount)?;

            match outcome {
                ExpenseOutcome::Authorized { spent, remaining } => {
                    storage.save_fleet(&registry)?;
                    println!("Expense authorized, {} spent.", format_dollars(spent));
                    println!("  Remaining budget: {}", format_dollars(remaining));
                }
                ExpenseOutcome::BudgetExceeded { remaining } => {
                    println!(
                        "Expense not permitted, only {} left to spend.",
                        format_dollars(remaining)
                    );
                }
                ExpenseOutcome::NotFound => return Err(FleetError::boat_not_found(&name)),
            }
        }

        FleetCommands::Backups => {
            let backups = storage.backups().list_backups()?;
            if backups.is_empty() {
                println!("No backups found.");
            }
            for backup in backups {
                println!(
                    "{}  {:>8} bytes  {}",
                    backup.created_at.format("%Y-%m-%d %H:%M:%S"),
                    backup.size_bytes,
                    backup.filename
                );
            }
        }

        FleetCommands::History { limit } => {
            let entries = storage.audit().read_recent(limit)?;
            if entries.is_empty() {
                println!("No audit entries found.");
            }
            for entry in entries {
                println!("{}", entry.format_human_readable());
            }
        }
    }

    Ok(())
}

/// Load the saved fleet, treating a missing snapshot as an empty fleet
pub fn load_saved_fleet(storage: &Storage) -> FleetResult<FleetRegistry> {
    let mut registry = FleetRegistry::new();
    if storage.paths().snapshot_file().exists() {
        storage.load_fleet(&mut registry)?;
    }
    Ok(registry)
}
