//! Audit logging for Fleet CLI
//!
//! Records every add, remove and authorized expense with before/after boat
//! state in an append-only JSONL file.

mod entry;
mod logger;

pub use entry::{AuditEntry, Operation};
pub use logger::AuditLogger;
