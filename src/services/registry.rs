//! Fleet registry
//!
//! Owns the ordered list of boats and every operation on it: loading from
//! delimited text or a snapshot, saving, adding, removing, lookups, expense
//! authorization and the totals report.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::{FleetError, FleetResult};
use crate::models::{Boat, Money};
use crate::storage::snapshot::{read_snapshot, write_snapshot};

use super::import::{parse_boat_line, parse_boats};

/// Result of asking the registry to authorize an expense
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpenseOutcome {
    /// The expense was recorded in full
    Authorized { spent: Money, remaining: Money },
    /// No boat with that name
    NotFound,
    /// The expense would push the boat past its purchase price
    BudgetExceeded { remaining: Money },
}

impl ExpenseOutcome {
    pub fn is_authorized(&self) -> bool {
        matches!(self, Self::Authorized { .. })
    }
}

/// Sums across the whole fleet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FleetTotals {
    pub total_paid: Money,
    pub total_spent: Money,
}

/// Report lines plus fleet totals, in registry order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FleetReport {
    pub lines: Vec<String>,
    pub totals: FleetTotals,
}

/// In-memory ordered collection of boats
#[derive(Debug, Clone, Default)]
pub struct FleetRegistry {
    boats: Vec<Boat>,
}

impl FleetRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Boats in insertion order
    pub fn boats(&self) -> &[Boat] {
        &self.boats
    }

    pub fn len(&self) -> usize {
        self.boats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boats.is_empty()
    }

    /// Append every boat from a delimited text file
    ///
    /// Loads accumulate: existing boats are kept. If any line is malformed
    /// nothing is appended.
    pub fn load_from_delimited_text(&mut self, path: &Path) -> FleetResult<usize> {
        let file = File::open(path).map_err(|e| {
            FleetError::Io(format!("Failed to open {}: {}", path.display(), e))
        })?;
        let count = self.load_from_reader(BufReader::new(file))?;
        tracing::info!(path = %path.display(), count, "loaded boats from delimited text");
        Ok(count)
    }

    /// Append every boat read from `reader`, all or nothing
    pub fn load_from_reader<R: Read>(&mut self, reader: R) -> FleetResult<usize> {
        let parsed = parse_boats(reader)?;
        let count = parsed.len();
        self.boats.extend(parsed);
        Ok(count)
    }

    /// Replace the whole registry with the contents of a snapshot
    ///
    /// On failure the registry is left as it was.
    pub fn load_snapshot(&mut self, path: &Path) -> FleetResult<()> {
        let boats = read_snapshot(path)?;
        tracing::info!(path = %path.display(), count = boats.len(), "loaded fleet snapshot");
        self.boats = boats;
        Ok(())
    }

    /// Persist the whole registry, atomically replacing any previous snapshot
    pub fn save_snapshot(&self, path: &Path) -> FleetResult<()> {
        write_snapshot(path, &self.boats)?;
        tracing::info!(path = %path.display(), count = self.boats.len(), "saved fleet snapshot");
        Ok(())
    }

    /// Parse one delimited line and append the boat
    pub fn add_boat(&mut self, line: &str) -> FleetResult<&Boat> {
        let boat = parse_boat_line(line)?;
        tracing::debug!(name = boat.name(), "adding boat");
        self.boats.push(boat);
        let index = self.boats.len() - 1;
        Ok(&self.boats[index])
    }

    /// Remove the first boat whose name matches, ignoring case
    pub fn remove_by_name(&mut self, name: &str) -> Option<Boat> {
        let index = self.position_of(name)?;
        let removed = self.boats.remove(index);
        tracing::debug!(name = removed.name(), "removed boat");
        Some(removed)
    }

    /// Find the first boat whose name matches, ignoring case
    pub fn find_by_name(&self, name: &str) -> Option<&Boat> {
        self.boats.iter().find(|b| b.name_matches(name))
    }

    /// Authorize an expense against the named boat
    ///
    /// Negative amounts are rejected outright; a miss and a budget rejection
    /// are reported as distinct outcomes.
    pub fn authorize_expense(&mut self, name: &str, amount: Money) -> FleetResult<ExpenseOutcome> {
        if amount.is_negative() {
            return Err(FleetError::Validation(format!(
                "Expense amount cannot be negative ({})",
                amount
            )));
        }

        let Some(index) = self.position_of(name) else {
            return Ok(ExpenseOutcome::NotFound);
        };

        let boat = &mut self.boats[index];
        if boat.authorize_expense(amount) {
            tracing::debug!(name = boat.name(), %amount, "expense authorized");
            Ok(ExpenseOutcome::Authorized {
                spent: amount,
                remaining: boat.remaining_budget(),
            })
        } else {
            tracing::debug!(name = boat.name(), %amount, "expense rejected");
            Ok(ExpenseOutcome::BudgetExceeded {
                remaining: boat.remaining_budget(),
            })
        }
    }

    /// Total purchase price and expenses across the fleet
    pub fn totals(&self) -> FleetTotals {
        FleetTotals {
            total_paid: self.boats.iter().map(Boat::purchase_price).sum(),
            total_spent: self.boats.iter().map(Boat::expenses).sum(),
        }
    }

    /// One summary line per boat followed by fleet totals
    pub fn report(&self) -> FleetReport {
        FleetReport {
            lines: self.boats.iter().map(Boat::describe).collect(),
            totals: self.totals(),
        }
    }

    fn position_of(&self, name: &str) -> Option<usize> {
        self.boats.iter().position(|b| b.name_matches(name))
    }
}
