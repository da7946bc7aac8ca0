//! Fleet snapshot persistence
//!
//! The snapshot is the full ordered list of boats written as one JSON
//! document. Reads verify the schema version and every boat's invariants
//! before handing anything back.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::FleetError;
use crate::models::Boat;

use super::file_io::{read_json_required, write_json_atomic};

/// Schema version written by this build
pub const SNAPSHOT_SCHEMA_VERSION: u32 = 1;

/// On-disk snapshot layout
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SnapshotData {
    schema_version: u32,
    boats: Vec<Boat>,
}

/// Read a snapshot, returning the boats in their saved order
pub fn read_snapshot(path: &Path) -> Result<Vec<Boat>, FleetError> {
    let data: SnapshotData = read_json_required(path)?;

    if data.schema_version != SNAPSHOT_SCHEMA_VERSION {
        return Err(FleetError::Storage(format!(
            "Unrecognized snapshot schema version {} in {} (expected {})",
            data.schema_version,
            path.display(),
            SNAPSHOT_SCHEMA_VERSION
        )));
    }

    for boat in &data.boats {
        boat.validate().map_err(|e| {
            FleetError::Storage(format!(
                "Invalid boat '{}' in {}: {}",
                boat.name(),
                path.display(),
                e
            ))
        })?;
    }

    tracing::debug!(path = %path.display(), boats = data.boats.len(), "read snapshot");
    Ok(data.boats)
}

/// Write a snapshot atomically, replacing any existing file
pub fn write_snapshot(path: &Path, boats: &[Boat]) -> Result<(), FleetError> {
    let data = SnapshotData {
        schema_version: SNAPSHOT_SCHEMA_VERSION,
        boats: boats.to_vec(),
    };

    write_json_atomic(path, &data)?;
    tracing::debug!(path = %path.display(), boats = boats.len(), "wrote snapshot");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BoatType, Money};
    use tempfile::TempDir;

    fn sample_boats() -> Vec<Boat> {
        vec![
            Boat::new(
                BoatType::Sailing,
                "Serenity",
                2015,
                "Catalina 350",
                35,
                Money::from_dollars(75000),
                Money::from_dollars(12000),
            )
            .unwrap(),
            Boat::new(
                BoatType::Power,
                "Sea Ray",
                2008,
                "Sundancer",
                28,
                Money::from_cents(1_200_050),
                Money::zero(),
            )
            .unwrap(),
        ]
    }

    #[test]
    fn test_round_trip_preserves_order_and_fields() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("FleetData.json");
        let boats = sample_boats();

        write_snapshot(&path, &boats).unwrap();
        let loaded = read_snapshot(&path).unwrap();

        assert_eq!(loaded, boats);
    }

    #[test]
    fn test_missing_snapshot_is_storage_error() {
        let temp_dir = TempDir::new().unwrap();
        let err = read_snapshot(&temp_dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, FleetError::Storage(_)));
    }

    #[test]
    fn test_unknown_schema_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("FleetData.json");
        std::fs::write(&path, r#"{"schema_version": 99, "boats": []}"#).unwrap();

        let err = read_snapshot(&path).unwrap_err();
        assert!(err.to_string().contains("schema version 99"));
    }

    #[test]
    fn test_invariant_violation_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("FleetData.json");
        std::fs::write(
            &path,
            r#"{"schema_version": 1, "boats": [{"type": "POWER", "name": "Leaky",
                "year": 1999, "make_model": "Skiff", "length_feet": 12,
                "purchase_price": 100, "expenses": 500}]}"#,
        )
        .unwrap();

        let err = read_snapshot(&path).unwrap_err();
        assert!(matches!(err, FleetError::Storage(_)));
    }
}
