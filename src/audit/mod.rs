//! Audit log of ledger changes
//!
//! Every mutation made through the services is appended to `audit.log` as
//! one JSON object per line, with the affected record before and after the
//! change.
//!
//! - `AuditEntry`: one logged change
//! - `AuditLogger`: appends entries and reads them back
//! - `describe_changes`: field-level summary of an expense edit

mod diff;
mod entry;
mod logger;

pub use diff::describe_changes;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
