//! Append-only audit log of fleet changes
//!
//! Every add, removal and authorized expense produces one [`AuditEntry`],
//! serialized as a single JSON line. Lines are never rewritten, so the file
//! doubles as a history of the fleet across sessions.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use crate::error::{FleetError, FleetResult};

use super::entry::AuditEntry;

/// Appends boat audit entries to a JSONL file and reads them back
///
/// The file is opened per call rather than held open, so several one-shot
/// invocations can share one log without coordinating.
pub struct AuditLogger {
    /// Path to the JSONL log file
    log_path: PathBuf,
}

impl AuditLogger {
    /// Create a logger for the log file at `log_path`
    ///
    /// The file is created lazily on the first [`AuditLogger::log`] call.
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append one entry as a JSON line
    ///
    /// The line is serialized before the file is touched, so an entry that
    /// cannot be encoded leaves the log unchanged.
    pub fn log(&self, entry: &AuditEntry) -> FleetResult<()> {
        let mut line = serde_json::to_string(entry)
            .map_err(|e| FleetError::Json(format!("Failed to serialize audit entry: {}", e)))?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| FleetError::Io(format!("Failed to open audit log: {}", e)))?;

        file.write_all(line.as_bytes())
            .and_then(|()| file.flush())
            .map_err(|e| FleetError::Io(format!("Failed to write audit entry: {}", e)))
    }

    /// Read every entry, oldest first
    ///
    /// A missing log reads as empty. Blank lines are ignored; any other line
    /// that does not decode fails the read with its 1-based line number.
    pub fn read_all(&self) -> FleetResult<Vec<AuditEntry>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.log_path)
            .map_err(|e| FleetError::Io(format!("Failed to open audit log: {}", e)))?;

        BufReader::new(file)
            .lines()
            .enumerate()
            .filter_map(|(index, line)| match line {
                Ok(text) if text.trim().is_empty() => None,
                other => Some(decode_line(index + 1, other)),
            })
            .collect()
    }

    /// Read the newest `count` entries, oldest of those first
    pub fn read_recent(&self, count: usize) -> FleetResult<Vec<AuditEntry>> {
        let mut entries = self.read_all()?;
        let start = entries.len().saturating_sub(count);
        Ok(entries.split_off(start))
    }

    /// Location of the log file
    pub fn path(&self) -> &PathBuf {
        &self.log_path
    }
}

fn decode_line(line_number: usize, line: std::io::Result<String>) -> FleetResult<AuditEntry> {
    let text = line.map_err(|e| {
        FleetError::Io(format!("Failed to read audit log line {}: {}", line_number, e))
    })?;

    serde_json::from_str(&text).map_err(|e| {
        FleetError::Json(format!(
            "Failed to parse audit entry at line {}: {}",
            line_number, e
        ))
    })
}
