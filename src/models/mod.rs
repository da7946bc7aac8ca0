//! Core data models for Fleet CLI
//!
//! This module contains the data structures that represent the fleet domain:
//! boats and the money amounts attached to them.

pub mod boat;
pub mod money;

pub use boat::{Boat, BoatType, BoatValidationError};
pub use money::{Money, MoneyParseError};
