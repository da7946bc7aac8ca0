//! Snapshot backups for Fleet CLI
//!
//! Before the fleet snapshot is overwritten, the previous copy is saved as
//! `backups/FleetData-YYYYMMDD-HHMMSS-mmm.json`. Only the newest backups, up to
//! the configured retention count, are kept.

mod manager;

pub use manager::{BackupInfo, BackupManager};
