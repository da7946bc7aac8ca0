//! Boat model
//!
//! Represents a single boat in the fleet together with its running expense
//! total. The purchase price is the lifetime spending ceiling.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// Kind of boat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BoatType {
    /// Sailboat
    Sailing,
    /// Motor boat
    Power,
}

impl BoatType {
    /// Parse boat type from string (case-insensitive, surrounding whitespace ignored)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "SAILING" => Some(Self::Sailing),
            "POWER" => Some(Self::Power),
            _ => None,
        }
    }
}

impl fmt::Display for BoatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Pad so that `{:<8}` width specifiers apply
        let label = match self {
            Self::Sailing => "SAILING",
            Self::Power => "POWER",
        };
        f.pad(label)
    }
}

/// A boat in the fleet
///
/// Fields are private: once created, the only mutation is
/// [`Boat::authorize_expense`], which never lets expenses exceed the
/// purchase price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Boat {
    /// Sailing or power
    #[serde(rename = "type")]
    boat_type: BoatType,

    /// Boat name, matched case-insensitively
    name: String,

    /// Year built
    year: i32,

    /// Make and model (e.g., "Catalina 350")
    make_model: String,

    /// Length in feet
    length_feet: u32,

    /// What was paid for the boat
    purchase_price: Money,

    /// Total expenses authorized so far
    expenses: Money,
}

impl Boat {
    /// Create a new boat, checking the spending invariant
    pub fn new(
        boat_type: BoatType,
        name: impl Into<String>,
        year: i32,
        make_model: impl Into<String>,
        length_feet: u32,
        purchase_price: Money,
        expenses: Money,
    ) -> Result<Self, BoatValidationError> {
        let boat = Self {
            boat_type,
            name: name.into(),
            year,
            make_model: make_model.into(),
            length_feet,
            purchase_price,
            expenses,
        };
        boat.validate()?;
        Ok(boat)
    }

    pub fn boat_type(&self) -> BoatType {
        self.boat_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn make_model(&self) -> &str {
        &self.make_model
    }

    pub fn length_feet(&self) -> u32 {
        self.length_feet
    }

    pub fn purchase_price(&self) -> Money {
        self.purchase_price
    }

    pub fn expenses(&self) -> Money {
        self.expenses
    }

    /// Check whether this boat's name matches, ignoring case
    pub fn name_matches(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }

    /// Purchase price minus expenses to date
    pub fn remaining_budget(&self) -> Money {
        self.purchase_price - self.expenses
    }

    /// Authorize an expense against the remaining budget
    ///
    /// Either the full amount is accepted or none of it is. Negative amounts
    /// are always refused.
    pub fn authorize_expense(&mut self, amount: Money) -> bool {
        if amount.is_negative() {
            return false;
        }

        match self.expenses.checked_add(amount) {
            Some(total) if total <= self.purchase_price => {
                self.expenses = total;
                true
            }
            _ => false,
        }
    }

    /// Fixed-column summary line used by the fleet report
    pub fn describe(&self) -> String {
        format!(
            "{:<8} {:<15} {:>4} {:<12} {:>3}' : Paid $ {:>10} : Spent $ {:>10}",
            self.boat_type,
            self.name,
            self.year,
            self.make_model,
            self.length_feet,
            self.purchase_price.amount_string(),
            self.expenses.amount_string(),
        )
    }

    /// Validate the boat
    pub fn validate(&self) -> Result<(), BoatValidationError> {
        if self.name.trim().is_empty() {
            return Err(BoatValidationError::EmptyName);
        }

        if self.purchase_price.is_negative() {
            return Err(BoatValidationError::NegativePrice(self.purchase_price));
        }

        if self.expenses.is_negative() {
            return Err(BoatValidationError::NegativeExpenses(self.expenses));
        }

        if self.expenses > self.purchase_price {
            return Err(BoatValidationError::ExpensesExceedPrice {
                expenses: self.expenses,
                price: self.purchase_price,
            });
        }

        Ok(())
    }
}

impl fmt::Display for Boat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.describe())
    }
}

/// Validation errors for boats
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoatValidationError {
    EmptyName,
    NegativePrice(Money),
    NegativeExpenses(Money),
    ExpensesExceedPrice { expenses: Money, price: Money },
}

impl fmt::Display for BoatValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Boat name cannot be empty"),
            Self::NegativePrice(price) => {
                write!(f, "Purchase price cannot be negative ({})", price)
            }
            Self::NegativeExpenses(expenses) => {
                write!(f, "Expenses cannot be negative ({})", expenses)
            }
            Self::ExpensesExceedPrice { expenses, price } => write!(
                f,
                "Expenses ({}) exceed purchase price ({})",
                expenses, price
            ),
        }
    }
}

impl std::error::Error for BoatValidationError {}
