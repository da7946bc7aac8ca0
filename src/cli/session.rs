//! Interactive fleet session
//!
//! Menu-driven prompt loop: print, add, remove, expense, exit. The snapshot is
//! saved exactly once, when the loop ends.

use std::io::{BufRead, Write};

use crate::display::{format_dollars, format_fleet_report};
use crate::error::{FleetError, FleetResult};
use crate::models::Money;
use crate::services::{ExpenseOutcome, FleetRegistry, FleetService};
use crate::storage::Storage;

const MENU_PROMPT: &str = "(P)rint, (A)dd, (R)emove, (E)xpense, e(X)it : ";

/// A menu selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Print,
    Add,
    Remove,
    Expense,
    Exit,
}

impl MenuChoice {
    /// Parse a menu letter (case-insensitive, whitespace ignored)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "P" => Some(Self::Print),
            "A" => Some(Self::Add),
            "R" => Some(Self::Remove),
            "E" => Some(Self::Expense),
            "X" => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Run the interactive loop until exit or end of input, then save the fleet
pub fn run_session<R, W>(
    registry: &mut FleetRegistry,
    storage: &Storage,
    mut input: R,
    output: &mut W,
) -> FleetResult<()>
where
    R: BufRead,
    W: Write,
{
    writeln!(output, "Welcome to the Fleet Management System")?;
    writeln!(output, "--------------------------------------")?;

    {
        let mut service = FleetService::new(storage, registry);

        loop {
            write!(output, "{}", MENU_PROMPT)?;
            output.flush()?;

            let Some(line) = read_line(&mut input)? else {
                writeln!(output)?;
                break;
            };

            match MenuChoice::parse(&line) {
                Some(MenuChoice::Print) => {
                    writeln!(output, "Fleet report:")?;
                    write!(output, "{}", format_fleet_report(&service.registry().report()))?;
                }
                Some(MenuChoice::Add) => add_boat(&mut service, &mut input, output)?,
                Some(MenuChoice::Remove) => remove_boat(&mut service, &mut input, output)?,
                Some(MenuChoice::Expense) => spend(&mut service, &mut input, output)?,
                Some(MenuChoice::Exit) => break,
                None => writeln!(output, "Invalid menu option, try again")?,
            }
        }
    }

    tracing::debug!(boats = registry.len(), "session ended, saving fleet");
    if let Err(e) = storage.save_fleet(registry) {
        writeln!(output, "Error saving data: {}", e)?;
    }

    writeln!(output)?;
    writeln!(output, "Exiting the Fleet Management System")?;
    Ok(())
}

fn add_boat<R: BufRead, W: Write>(
    service: &mut FleetService<'_>,
    input: &mut R,
    output: &mut W,
) -> FleetResult<()> {
    let line = prompt(input, output, "Please enter the new boat CSV data : ")?;
    if let Err(e) = service.add(&line) {
        writeln!(output, "Cannot add boat: {}", e)?;
    }
    Ok(())
}

fn remove_boat<R: BufRead, W: Write>(
    service: &mut FleetService<'_>,
    input: &mut R,
    output: &mut W,
) -> FleetResult<()> {
    let name = prompt(input, output, "Which boat do you want to remove? : ")?;
    if service.remove(&name).is_none() {
        writeln!(output, "Cannot find boat {}", name)?;
    }
    Ok(())
}

fn spend<R: BufRead, W: Write>(
    service: &mut FleetService<'_>,
    input: &mut R,
    output: &mut W,
) -> FleetResult<()> {
    let name = prompt(input, output, "Which boat do you want to spend on? : ")?;
    if service.registry().find_by_name(&name).is_none() {
        writeln!(output, "Cannot find boat {}", name)?;
        return Ok(());
    }

    let raw_amount = prompt(input, output, "How much do you want to spend? : ")?;
    let amount = match Money::parse(&raw_amount) {
        Ok(amount) => amount,
        Err(e) => {
            writeln!(output, "{}", e)?;
            return Ok(());
        }
    };

    match service.authorize_expense(&name, amount) {
        Ok(ExpenseOutcome::Authorized { spent, .. }) => {
            writeln!(output, "Expense authorized, {} spent.", format_dollars(spent))?;
        }
        Ok(ExpenseOutcome::BudgetExceeded { remaining }) => {
            writeln!(
                output,
                "Expense not permitted, only {} left to spend.",
                format_dollars(remaining)
            )?;
        }
        Ok(ExpenseOutcome::NotFound) => writeln!(output, "Cannot find boat {}", name)?,
        Err(e) => writeln!(output, "{}", e)?,
    }

    Ok(())
}

/// Show a prompt and read the reply; end of input reads as an empty reply
fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, text: &str) -> FleetResult<String> {
    write!(output, "{}", text)?;
    output.flush()?;
    Ok(read_line(input)?.unwrap_or_default())
}

/// Read one trimmed line, or `None` at end of input
fn read_line<R: BufRead>(input: &mut R) -> FleetResult<Option<String>> {
    let mut line = String::new();
    let bytes = input
        .read_line(&mut line)
        .map_err(|e| FleetError::Io(format!("Failed to read input: {}", e)))?;

    if bytes == 0 {
        Ok(None)
    } else {
        Ok(Some(line.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FleetPaths, Settings};
    use tempfile::TempDir;

    fn create_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FleetPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths, Settings::default()).unwrap();
        (temp_dir, storage)
    }

    fn run(registry: &mut FleetRegistry, storage: &Storage, script: &str) -> String {
        let mut output = Vec::new();
        run_session(registry, storage, script.as_bytes(), &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_menu_choice_parsing() {
        assert_eq!(MenuChoice::parse("p"), Some(MenuChoice::Print));
        assert_eq!(MenuChoice::parse(" X "), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::parse("e"), Some(MenuChoice::Expense));
        assert_eq!(MenuChoice::parse("Q"), None);
        assert_eq!(MenuChoice::parse(""), None);
    }

    #[test]
    fn test_full_session() {
        let (_temp_dir, storage) = create_storage();
        let mut registry = FleetRegistry::new();

        let script = "\
a
SAILING, Serenity, 2015, Catalina 350, 35, 75000.00, 12000.00
e
serenity
60000
e
Serenity
5000
p
x
";
        let output = run(&mut registry, &storage, script);

        assert!(output.starts_with("Welcome to the Fleet Management System\n"));
        assert!(output.contains("Expense authorized, $60000.00 spent."));
        assert!(output.contains("Expense not permitted, only $3000.00 left to spend."));
        assert!(output.contains("Fleet report:\nSAILING  Serenity"));
        assert!(output.ends_with("\nExiting the Fleet Management System\n"));

        let mut reloaded = FleetRegistry::new();
        storage.load_fleet(&mut reloaded).unwrap();
        assert_eq!(reloaded.boats(), registry.boats());
        assert_eq!(
            reloaded.find_by_name("serenity").unwrap().expenses(),
            Money::from_dollars(72000)
        );
    }

    #[test]
    fn test_missing_boat_messages() {
        let (_temp_dir, storage) = create_storage();
        let mut registry = FleetRegistry::new();

        let output = run(&mut registry, &storage, "r\nGhost\ne\nGhost\nx\n");

        assert_eq!(output.matches("Cannot find boat Ghost").count(), 2);
        assert!(!output.contains("How much do you want to spend?"));
    }

    #[test]
    fn test_bad_input_keeps_session_alive() {
        let (_temp_dir, storage) = create_storage();
        let mut registry = FleetRegistry::new();

        let script = "\
z
a
BOAT, Nope
a
POWER, Sea Ray, 2008, Sundancer, 28, 12000
e
sea ray
lots
e
sea ray
-5
x
";
        let output = run(&mut registry, &storage, script);

        assert!(output.contains("Invalid menu option, try again"));
        assert!(output.contains("Cannot add boat:"));
        assert!(output.contains("Invalid money format: 'lots'"));
        assert!(output.contains("Expense amount cannot be negative"));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.boats()[0].expenses(), Money::zero());
    }

    #[test]
    fn test_end_of_input_exits_and_saves() {
        let (_temp_dir, storage) = create_storage();
        let mut registry = FleetRegistry::new();
        registry
            .add_boat("POWER, Sea Ray, 2008, Sundancer, 28, 12000")
            .unwrap();

        let output = run(&mut registry, &storage, "");

        assert!(output.ends_with("Exiting the Fleet Management System\n"));
        assert!(storage.paths().snapshot_file().exists());
    }

    #[test]
    fn test_remove_then_report() {
        let (_temp_dir, storage) = create_storage();
        let mut registry = FleetRegistry::new();
        registry
            .add_boat("SAILING, Serenity, 2015, Catalina 350, 35, 75000")
            .unwrap();
        registry
            .add_boat("POWER, Sea Ray, 2008, Sundancer, 28, 12000")
            .unwrap();

        let output = run(&mut registry, &storage, "R\nSERENITY\nP\nX\n");

        assert!(!output.contains("Cannot find boat"));
        assert!(!output.contains("SAILING  Serenity"));
        assert!(output.contains("POWER    Sea Ray"));
        assert_eq!(registry.len(), 1);
    }
}
