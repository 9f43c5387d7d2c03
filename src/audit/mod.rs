//! Audit logging for document changes
//!
//! Records every classified change with before/after payloads in an
//! append-only audit log.
//!
//! # Architecture
//!
//! - `AuditLogRecord`: one immutable log entry with collection, document id,
//!   operation, actor, timestamp, and the sanitized payloads.
//! - `AuditStore`: the append-only persistence seam. The bundled
//!   `JsonlAuditStore` writes line-delimited JSON; `MemoryAuditStore` backs
//!   tests and embedders.
//! - `AuditLogWriter`: the swallow boundary. A store failure is logged and
//!   dropped; it can never abort the mutation that triggered the event.
//! - `summarize_changes`: human-readable changed-field summary for the
//!   inspection commands.

pub mod diff;
pub mod record;
pub mod store;
pub mod writer;

pub use diff::{changed_fields, summarize_changes};
pub use record::AuditLogRecord;
pub use store::{AuditStore, JsonlAuditStore, MemoryAuditStore};
pub use writer::{AuditLogWriter, WriteOutcome};
