//! Service layer for Fleet CLI
//!
//! The registry holds the fleet in memory; the fleet service layers audit
//! logging on top of its mutations.

pub mod fleet;
pub mod import;
pub mod registry;

pub use fleet::FleetService;
pub use import::{parse_boat_line, parse_boats};
pub use registry::{ExpenseOutcome, FleetRegistry, FleetReport, FleetTotals};
