//! Snapshot backup manager
//!
//! Copies the current snapshot aside before it is overwritten and prunes
//! old copies down to the configured retention count.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::config::paths::FleetPaths;
use crate::error::{FleetError, FleetResult};

const BACKUP_PREFIX: &str = "FleetData-";
const BACKUP_SUFFIX: &str = ".json";

/// Metadata about a backup
#[derive(Debug, Clone)]
pub struct BackupInfo {
    /// Backup filename
    pub filename: String,
    /// Full path to backup
    pub path: PathBuf,
    /// When the backup was created
    pub created_at: DateTime<Utc>,
    /// Size in bytes
    pub size_bytes: u64,
}

/// Manages snapshot backups and their retention
pub struct BackupManager {
    backup_dir: PathBuf,
    snapshot_path: PathBuf,
    retention: u32,
}

impl BackupManager {
    /// Create a new BackupManager keeping at most `retention` backups
    pub fn new(paths: &FleetPaths, retention: u32) -> Self {
        Self {
            backup_dir: paths.backup_dir(),
            snapshot_path: paths.snapshot_file(),
            retention,
        }
    }

    /// Copy the current snapshot into the backup directory
    ///
    /// Returns `None` when there is no snapshot yet.
    pub fn backup_snapshot(&self) -> FleetResult<Option<PathBuf>> {
        if !self.snapshot_path.exists() {
            return Ok(None);
        }

        fs::create_dir_all(&self.backup_dir).map_err(|e| {
            FleetError::Io(format!("Failed to create backup directory: {}", e))
        })?;

        let now = Utc::now();
        let filename = format!(
            "{}{}-{:03}{}",
            BACKUP_PREFIX,
            now.format("%Y%m%d-%H%M%S"),
            now.timestamp_subsec_millis(),
            BACKUP_SUFFIX
        );
        let backup_path = self.backup_dir.join(filename);

        fs::copy(&self.snapshot_path, &backup_path)
            .map_err(|e| FleetError::Io(format!("Failed to write backup file: {}", e)))?;

        tracing::debug!(path = %backup_path.display(), "created snapshot backup");
        Ok(Some(backup_path))
    }

    /// List all available backups, newest first
    pub fn list_backups(&self) -> FleetResult<Vec<BackupInfo>> {
        if !self.backup_dir.exists() {
            return Ok(Vec::new());
        }

        let mut backups = Vec::new();

        for entry in fs::read_dir(&self.backup_dir)
            .map_err(|e| FleetError::Io(format!("Failed to read backup directory: {}", e)))?
        {
            let entry = entry
                .map_err(|e| FleetError::Io(format!("Failed to read directory entry: {}", e)))?;

            if let Some(info) = parse_backup_info(&entry.path()) {
                backups.push(info);
            }
        }

        backups.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(backups)
    }

    /// Delete all but the newest `retention` backups
    pub fn enforce_retention(&self) -> FleetResult<Vec<PathBuf>> {
        let mut deleted = Vec::new();

        for backup in self
            .list_backups()?
            .into_iter()
            .skip(self.retention as usize)
        {
            fs::remove_file(&backup.path)
                .map_err(|e| FleetError::Io(format!("Failed to delete old backup: {}", e)))?;
            deleted.push(backup.path);
        }

        if !deleted.is_empty() {
            tracing::debug!(count = deleted.len(), "pruned old snapshot backups");
        }

        Ok(deleted)
    }

    /// Back up the snapshot and then enforce retention
    pub fn backup_with_retention(&self) -> FleetResult<Option<PathBuf>> {
        let backup = self.backup_snapshot()?;
        self.enforce_retention()?;
        Ok(backup)
    }
}

fn parse_backup_info(path: &Path) -> Option<BackupInfo> {
    let filename = path.file_name()?.to_string_lossy().to_string();
    let stamp = filename
        .strip_prefix(BACKUP_PREFIX)?
        .strip_suffix(BACKUP_SUFFIX)?;
    let created_at = parse_backup_timestamp(stamp)?;
    let size_bytes = fs::metadata(path).ok()?.len();

    Some(BackupInfo {
        filename,
        path: path.to_path_buf(),
        created_at,
        size_bytes,
    })
}

/// Parse `YYYYMMDD-HHMMSS-mmm` into a UTC timestamp
fn parse_backup_timestamp(stamp: &str) -> Option<DateTime<Utc>> {
    let parts: Vec<&str> = stamp.split('-').collect();
    let [date_part, time_part, millis_part] = parts.as_slice() else {
        return None;
    };

    if date_part.len() != 8
        || time_part.len() != 6
        || !date_part.bytes().all(|b| b.is_ascii_digit())
        || !time_part.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }

    let year: i32 = date_part[0..4].parse().ok()?;
    let month: u32 = date_part[4..6].parse().ok()?;
    let day: u32 = date_part[6..8].parse().ok()?;
    let hour: u32 = time_part[0..2].parse().ok()?;
    let minute: u32 = time_part[2..4].parse().ok()?;
    let second: u32 = time_part[4..6].parse().ok()?;
    let millis: u32 = millis_part.parse().ok()?;

    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    let time = NaiveTime::from_hms_milli_opt(hour, minute, second, millis)?;

    Some(DateTime::from_naive_utc_and_offset(
        NaiveDateTime::new(date, time),
        Utc,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use std::time::Duration;
    use tempfile::TempDir;

    fn create_test_manager(retention: u32) -> (BackupManager, FleetPaths, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FleetPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();

        let manager = BackupManager::new(&paths, retention);
        (manager, paths, temp_dir)
    }

    #[test]
    fn test_no_snapshot_no_backup() {
        let (manager, _paths, _temp) = create_test_manager(3);
        assert!(manager.backup_snapshot().unwrap().is_none());
        assert!(manager.list_backups().unwrap().is_empty());
    }

    #[test]
    fn test_backup_copies_snapshot() {
        let (manager, paths, _temp) = create_test_manager(3);
        fs::write(paths.snapshot_file(), "{\"schema_version\": 1}").unwrap();

        let backup = manager.backup_snapshot().unwrap().unwrap();
        assert!(backup.exists());
        assert_eq!(
            fs::read_to_string(&backup).unwrap(),
            "{\"schema_version\": 1}"
        );

        let listed = manager.list_backups().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].path, backup);
    }

    #[test]
    fn test_retention_keeps_newest() {
        let (manager, paths, _temp) = create_test_manager(3);
        fs::write(paths.snapshot_file(), "{}").unwrap();

        let mut created = Vec::new();
        for _ in 0..5 {
            created.push(manager.backup_snapshot().unwrap().unwrap());
            std::thread::sleep(Duration::from_millis(20));
        }

        let deleted = manager.enforce_retention().unwrap();
        assert_eq!(deleted.len(), 2);

        let remaining = manager.list_backups().unwrap();
        assert_eq!(remaining.len(), 3);
        assert_eq!(remaining[0].path, created[4]);
        assert!(remaining[0].created_at >= remaining[1].created_at);
    }

    #[test]
    fn test_unrelated_files_ignored() {
        let (manager, paths, _temp) = create_test_manager(1);
        fs::write(paths.backup_dir().join("notes.txt"), "keep me").unwrap();

        assert!(manager.list_backups().unwrap().is_empty());
        manager.enforce_retention().unwrap();
        assert!(paths.backup_dir().join("notes.txt").exists());
    }

    #[test]
    fn test_parse_backup_timestamp() {
        let timestamp = parse_backup_timestamp("20251127-143022-456").unwrap();
        assert_eq!(timestamp.year(), 2025);
        assert_eq!(timestamp.month(), 11);
        assert_eq!(timestamp.day(), 27);
        assert_eq!(timestamp.timestamp_subsec_millis(), 456);

        assert!(parse_backup_timestamp("20251127-143022").is_none());
        assert!(parse_backup_timestamp("garbage").is_none());
    }
}
