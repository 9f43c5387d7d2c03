//! Audit log writer
//!
//! The writer is the sole error boundary of the pipeline. Audit logging is
//! best-effort: a store failure is logged for operator visibility and
//! swallowed, so it can never abort or fail the primary document mutation
//! that triggered the event. The outcome enum is informational; callers are
//! free to ignore it.

use tracing::{debug, warn};

use super::record::AuditLogRecord;
use super::store::AuditStore;

/// What happened to a record at the writer boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The store accepted the record
    Persisted,
    /// The store failed; the record was dropped (no retry)
    Dropped,
}

impl WriteOutcome {
    pub fn is_persisted(&self) -> bool {
        matches!(self, WriteOutcome::Persisted)
    }
}

/// Writes audit records through an [`AuditStore`], swallowing failures
pub struct AuditLogWriter<S: AuditStore> {
    store: S,
}

impl<S: AuditStore> AuditLogWriter<S> {
    /// Create a writer over the given store
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Access the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Persist one record, exactly one append per call
    ///
    /// Failures are logged at warn level and reported as
    /// [`WriteOutcome::Dropped`]; nothing propagates past this boundary.
    pub fn write(&self, record: AuditLogRecord) -> WriteOutcome {
        let operation = record.operation;
        let collection = record.collection;
        let document_id = record.document_id.clone();

        match self.store.append(record) {
            Ok(()) => {
                debug!(
                    %operation,
                    %collection,
                    %document_id,
                    "audit record persisted"
                );
                WriteOutcome::Persisted
            }
            Err(error) => {
                warn!(
                    %operation,
                    %collection,
                    %document_id,
                    %error,
                    "audit record dropped"
                );
                WriteOutcome::Dropped
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::store::MemoryAuditStore;
    use crate::error::{ClubwatchError, ClubwatchResult};
    use crate::event::{Actor, Collection, Operation};

    /// A store that rejects every append
    struct FailingStore;

    impl AuditStore for FailingStore {
        fn append(&self, _record: AuditLogRecord) -> ClubwatchResult<()> {
            Err(ClubwatchError::Store("store unavailable".to_string()))
        }
    }

    fn create_test_record() -> AuditLogRecord {
        AuditLogRecord::new(
            Collection::Events,
            "evt-1",
            Operation::CreateEvent,
            Actor::system(),
            None,
            Some(serde_json::Map::new()),
        )
    }

    #[test]
    fn test_successful_write_is_persisted() {
        let writer = AuditLogWriter::new(MemoryAuditStore::new());

        let outcome = writer.write(create_test_record());

        assert_eq!(outcome, WriteOutcome::Persisted);
        assert!(outcome.is_persisted());
        assert_eq!(writer.store().records().len(), 1);
    }

    #[test]
    fn test_store_failure_is_swallowed() {
        let writer = AuditLogWriter::new(FailingStore);

        // Must not panic or propagate; the outcome reports the drop
        let outcome = writer.write(create_test_record());

        assert_eq!(outcome, WriteOutcome::Dropped);
        assert!(!outcome.is_persisted());
    }

    #[test]
    fn test_one_append_per_invocation() {
        let writer = AuditLogWriter::new(MemoryAuditStore::new());

        writer.write(create_test_record());
        writer.write(create_test_record());

        assert_eq!(writer.store().records().len(), 2);
    }
}
