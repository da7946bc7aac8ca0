//! Configuration module for Fleet CLI
//!
//! This module provides configuration management including:
//! - Data directory and file path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::FleetPaths;
pub use settings::Settings;
