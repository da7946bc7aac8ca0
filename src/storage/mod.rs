//! Storage layer for Fleet CLI
//!
//! Provides the JSON snapshot with atomic writes, plus the coordinator that
//! ties the snapshot to backups and the audit log.

pub mod file_io;
pub mod snapshot;

pub use file_io::{read_json_required, write_json_atomic};
pub use snapshot::{read_snapshot, write_snapshot};

use crate::audit::{AuditEntry, AuditLogger};
use crate::backup::BackupManager;
use crate::config::{FleetPaths, Settings};
use crate::error::FleetError;
use crate::services::FleetRegistry;

/// Coordinates the snapshot file, its backups and the audit log
pub struct Storage {
    paths: FleetPaths,
    settings: Settings,
    audit: AuditLogger,
    backups: BackupManager,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: FleetPaths, settings: Settings) -> Result<Self, FleetError> {
        paths.ensure_directories()?;

        Ok(Self {
            audit: AuditLogger::new(paths.audit_log()),
            backups: BackupManager::new(&paths, settings.backup_retention),
            paths,
            settings,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &FleetPaths {
        &self.paths
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    pub fn backups(&self) -> &BackupManager {
        &self.backups
    }

    /// Load the registry from the conventional snapshot
    pub fn load_fleet(&self, registry: &mut FleetRegistry) -> Result<(), FleetError> {
        registry.load_snapshot(&self.paths.snapshot_file())
    }

    /// Back up the previous snapshot, then save the registry over it
    ///
    /// A failed backup is logged and does not block the save.
    pub fn save_fleet(&self, registry: &FleetRegistry) -> Result<(), FleetError> {
        if let Err(e) = self.backups.backup_with_retention() {
            tracing::warn!(error = %e, "snapshot backup failed");
        }

        registry.save_snapshot(&self.paths.snapshot_file())
    }

    /// Record an audit entry if auditing is enabled
    ///
    /// Audit failures are logged rather than returned so that they never undo
    /// a mutation that already happened in memory.
    pub fn record(&self, entry: &AuditEntry) {
        if !self.settings.audit_enabled {
            return;
        }

        if let Err(e) = self.audit.log(entry) {
            tracing::warn!(error = %e, "failed to write audit entry");
        }
    }
}
