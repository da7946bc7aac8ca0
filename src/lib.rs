//! Fleet CLI - Terminal-based fleet registry
//!
//! This library provides the core functionality for tracking a fleet of boats:
//! their details, purchase prices, and the expenses authorized against them.
//! Lifetime spending on a boat can never exceed what was paid for it.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (boats, money)
//! - `storage`: JSON snapshot storage layer
//! - `services`: Fleet registry, delimited import and audited operations
//! - `audit`: Audit logging system
//! - `backup`: Snapshot backup management
//! - `display`: Report formatting
//! - `cli`: Interactive session and one-shot commands
//!
//! # Example
//!
//! ```rust
//! use fleet_cli::models::Money;
//! use fleet_cli::services::{ExpenseOutcome, FleetRegistry};
//!
//! let mut fleet = FleetRegistry::new();
//! fleet.add_boat("SAILING, Serenity, 2015, Catalina 350, 35, 75000.00, 12000.00")?;
//!
//! let outcome = fleet.authorize_expense("serenity", Money::from_dollars(60000))?;
//! assert!(outcome.is_authorized());
//! # Ok::<(), fleet_cli::FleetError>(())
//! ```

pub mod audit;
pub mod backup;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{FleetError, FleetResult};
