//! Audit entry data structures
//!
//! Defines the operations that are audited and the entry format itself.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Boat;

/// Types of operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Boat was added to the fleet
    Create,
    /// Boat's expenses changed
    Update,
    /// Boat was removed from the fleet
    Delete,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Update => write!(f, "UPDATE"),
            Operation::Delete => write!(f, "DELETE"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    /// Type of operation performed
    pub operation: Operation,

    /// Name of the boat affected
    pub boat_name: String,

    /// Boat state before the operation (updates/deletes)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    /// Boat state after the operation (creates/updates)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,

    /// Human-readable change summary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_summary: Option<String>,
}

impl AuditEntry {
    /// Entry for a boat added to the fleet
    pub fn create(boat: &Boat) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Create,
            boat_name: boat.name().to_string(),
            before: None,
            after: serde_json::to_value(boat).ok(),
            diff_summary: None,
        }
    }

    /// Entry for an authorized expense
    pub fn expense(before: &Boat, after: &Boat) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Update,
            boat_name: after.name().to_string(),
            before: serde_json::to_value(before).ok(),
            after: serde_json::to_value(after).ok(),
            diff_summary: Some(format!(
                "expenses: {} -> {}",
                before.expenses(),
                after.expenses()
            )),
        }
    }

    /// Entry for a boat removed from the fleet
    pub fn delete(boat: &Boat) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Delete,
            boat_name: boat.name().to_string(),
            before: serde_json::to_value(boat).ok(),
            after: None,
            diff_summary: None,
        }
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} Boat {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.boat_name
        );

        if let Some(diff) = &self.diff_summary {
            output.push_str(&format!("\n  Changes: {}", diff));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BoatType, Money};

    fn boat(expenses: i64) -> Boat {
        Boat::new(
            BoatType::Sailing,
            "Serenity",
            2015,
            "Catalina 350",
            35,
            Money::from_dollars(75000),
            Money::from_dollars(expenses),
        )
        .unwrap()
    }

    #[test]
    fn test_operation_display() {
        assert_eq!(Operation::Create.to_string(), "CREATE");
        assert_eq!(Operation::Update.to_string(), "UPDATE");
        assert_eq!(Operation::Delete.to_string(), "DELETE");
    }

    #[test]
    fn test_create_entry() {
        let entry = AuditEntry::create(&boat(0));

        assert_eq!(entry.operation, Operation::Create);
        assert_eq!(entry.boat_name, "Serenity");
        assert!(entry.before.is_none());
        assert!(entry.after.is_some());
    }

    #[test]
    fn test_expense_entry() {
        let entry = AuditEntry::expense(&boat(12000), &boat(72000));

        assert_eq!(entry.operation, Operation::Update);
        assert!(entry.before.is_some());
        assert!(entry.after.is_some());
        assert_eq!(
            entry.diff_summary,
            Some("expenses: $12000.00 -> $72000.00".to_string())
        );
    }

    #[test]
    fn test_delete_entry() {
        let entry = AuditEntry::delete(&boat(0));

        assert_eq!(entry.operation, Operation::Delete);
        assert!(entry.before.is_some());
        assert!(entry.after.is_none());
    }

    #[test]
    fn test_serialization() {
        let entry = AuditEntry::create(&boat(0));

        let json = serde_json::to_string(&entry).unwrap();
        let deserialized: AuditEntry = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.operation, Operation::Create);
        assert_eq!(deserialized.boat_name, "Serenity");
    }

    #[test]
    fn test_human_readable_format() {
        let entry = AuditEntry::expense(&boat(0), &boat(100));

        let formatted = entry.format_human_readable();
        assert!(formatted.contains("UPDATE"));
        assert!(formatted.contains("Serenity"));
        assert!(formatted.contains("Changes: expenses: $0.00 -> $100.00"));
    }
}
