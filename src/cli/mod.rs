//! CLI command handlers
//!
//! This module contains the interactive session and the one-shot commands,
//! bridging clap argument parsing with the service layer.

pub mod commands;
pub mod session;

pub use commands::{handle_fleet_command, load_saved_fleet, FleetCommands};
pub use session::{run_session, MenuChoice};
