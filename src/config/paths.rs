//! Path management for Fleet CLI
//!
//! Resolves where settings, the fleet snapshot, the audit log and backups live.
//!
//! ## Path Resolution Order
//!
//! 1. `--data-dir` flag / `FLEET_CLI_DATA_DIR` environment variable (if set)
//! 2. The platform config directory for `fleet-cli` (e.g. `~/.config/fleet-cli`)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::FleetError;

/// Conventional snapshot filename
pub const SNAPSHOT_FILE_NAME: &str = "FleetData.json";

/// Manages all paths used by Fleet CLI
#[derive(Debug, Clone)]
pub struct FleetPaths {
    /// Base directory for all Fleet CLI data
    base_dir: PathBuf,
}

impl FleetPaths {
    /// Create a new FleetPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no platform config directory can be determined.
    pub fn new() -> Result<Self, FleetError> {
        let base_dir = match std::env::var("FLEET_CLI_DATA_DIR") {
            Ok(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create FleetPaths with a custom base directory
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (<base>/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the backup directory (<base>/backups/)
    pub fn backup_dir(&self) -> PathBuf {
        self.base_dir.join("backups")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Get the path to the fleet snapshot
    pub fn snapshot_file(&self) -> PathBuf {
        self.data_dir().join(SNAPSHOT_FILE_NAME)
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<(), FleetError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| FleetError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| FleetError::Io(format!("Failed to create data directory: {}", e)))?;

        std::fs::create_dir_all(self.backup_dir())
            .map_err(|e| FleetError::Io(format!("Failed to create backup directory: {}", e)))?;

        Ok(())
    }
}

fn resolve_default_path() -> Result<PathBuf, FleetError> {
    ProjectDirs::from("", "", "fleet-cli")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| FleetError::Config("Could not determine a home directory".into()))
}
