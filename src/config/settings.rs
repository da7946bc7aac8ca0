//! User settings for Fleet CLI
//!
//! Manages user preferences such as backup retention and audit logging.

use serde::{Deserialize, Serialize};

use super::paths::FleetPaths;
use crate::error::FleetError;
use crate::storage::file_io::write_json_atomic;

/// User settings for Fleet CLI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version of the settings file
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Number of snapshot backups to keep
    #[serde(default = "default_backup_retention")]
    pub backup_retention: u32,

    /// Whether mutations are written to the audit log
    #[serde(default = "default_audit_enabled")]
    pub audit_enabled: bool,
}

/// Newest settings layout this build understands
pub const SETTINGS_SCHEMA_VERSION: u32 = 1;

fn default_schema_version() -> u32 {
    SETTINGS_SCHEMA_VERSION
}

fn default_backup_retention() -> u32 {
    10
}

fn default_audit_enabled() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            backup_retention: default_backup_retention(),
            audit_enabled: default_audit_enabled(),
        }
    }
}

impl Settings {
    /// Load settings from disk, writing the defaults on first run
    ///
    /// A settings file from a newer schema is refused rather than guessed at.
    pub fn load_or_create(paths: &FleetPaths) -> Result<Self, FleetError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            let settings = Settings::default();
            settings.save(paths)?;
            tracing::debug!(path = %settings_path.display(), "wrote default settings");
            return Ok(settings);
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| FleetError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| FleetError::Config(format!("Failed to parse settings file: {}", e)))?;

        if settings.schema_version > SETTINGS_SCHEMA_VERSION {
            return Err(FleetError::Config(format!(
                "Settings schema version {} is newer than supported version {}",
                settings.schema_version, SETTINGS_SCHEMA_VERSION
            )));
        }

        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &FleetPaths) -> Result<(), FleetError> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }
}
