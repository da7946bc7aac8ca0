//! Fleet service
//!
//! Runs registry mutations and records each successful one in the audit log.

use crate::audit::AuditEntry;
use crate::error::FleetResult;
use crate::models::{Boat, Money};
use crate::storage::Storage;

use super::registry::{ExpenseOutcome, FleetRegistry};

/// Service for audited fleet changes
pub struct FleetService<'a> {
    storage: &'a Storage,
    registry: &'a mut FleetRegistry,
}

impl<'a> FleetService<'a> {
    /// Create a new fleet service
    pub fn new(storage: &'a Storage, registry: &'a mut FleetRegistry) -> Self {
        Self { storage, registry }
    }

    /// Read-only access to the registry
    pub fn registry(&self) -> &FleetRegistry {
        &*self.registry
    }

    /// Add a boat from a delimited line
    pub fn add(&mut self, line: &str) -> FleetResult<Boat> {
        let boat = self.registry.add_boat(line)?.clone();
        self.storage.record(&AuditEntry::create(&boat));
        Ok(boat)
    }

    /// Remove the first boat with this name, if any
    pub fn remove(&mut self, name: &str) -> Option<Boat> {
        let removed = self.registry.remove_by_name(name)?;
        self.storage.record(&AuditEntry::delete(&removed));
        Some(removed)
    }

    /// Authorize an expense and audit it when accepted
    pub fn authorize_expense(&mut self, name: &str, amount: Money) -> FleetResult<ExpenseOutcome> {
        let before = self.registry.find_by_name(name).cloned();
        let outcome = self.registry.authorize_expense(name, amount)?;

        if outcome.is_authorized() {
            if let (Some(before), Some(after)) = (before, self.registry.find_by_name(name)) {
                self.storage.record(&AuditEntry::expense(&before, after));
            }
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::config::{FleetPaths, Settings};
    use tempfile::TempDir;

    fn create_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FleetPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths, Settings::default()).unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_mutations_are_audited() {
        let (_temp_dir, storage) = create_storage();
        let mut registry = FleetRegistry::new();
        let mut service = FleetService::new(&storage, &mut registry);

        service
            .add("SAILING, Serenity, 2015, Catalina 350, 35, 75000.00, 12000.00")
            .unwrap();
        service
            .authorize_expense("serenity", Money::from_dollars(60000))
            .unwrap();
        service
            .authorize_expense("serenity", Money::from_dollars(5000))
            .unwrap();
        assert!(service.remove("SERENITY").is_some());
        assert!(service.registry().is_empty());

        let entries = storage.audit().read_all().unwrap();
        let operations: Vec<Operation> = entries.iter().map(|e| e.operation).collect();
        assert_eq!(
            operations,
            vec![Operation::Create, Operation::Update, Operation::Delete]
        );
        assert_eq!(
            entries[1].diff_summary.as_deref(),
            Some("expenses: $12000.00 -> $72000.00")
        );
    }

    #[test]
    fn test_failures_are_not_audited() {
        let (_temp_dir, storage) = create_storage();
        let mut registry = FleetRegistry::new();
        let mut service = FleetService::new(&storage, &mut registry);

        assert!(service.add("JETSKI, Zoom, 2020, Yamaha, 10, 9000").is_err());
        assert!(service.remove("Nobody").is_none());
        assert_eq!(
            service
                .authorize_expense("Nobody", Money::from_dollars(1))
                .unwrap(),
            ExpenseOutcome::NotFound
        );

        assert!(storage.audit().read_all().unwrap().is_empty());
    }
}
