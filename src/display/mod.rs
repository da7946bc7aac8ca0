//! Display formatting for terminal output

pub mod report;

pub use report::{format_dollars, format_fleet_report, format_totals_line};
