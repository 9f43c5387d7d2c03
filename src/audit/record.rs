//! Audit record data structure
//!
//! One record per change event, persisted as camelCase JSON. Records are
//! created exactly once by the writer and never mutated afterward; there is
//! no update or delete path.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::event::{Actor, Collection, Operation, Snapshot};

/// A single audit log record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogRecord {
    /// Opaque system-generated id; there is no natural key
    pub id: Uuid,

    /// The collection the change occurred in
    pub collection: Collection,

    /// The affected document
    pub document_id: String,

    /// The classified operation label
    pub operation: Operation,

    /// Assigned by the persistence layer at write time; absent until the
    /// record has been stamped by a store
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,

    /// Resolved actor id, `"system"` when no actor was resolvable
    pub user_id: String,

    /// Resolved actor email, `"system"` when no actor was resolvable
    pub user_email: String,

    /// Sanitized document state before the change
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before_data: Option<Snapshot>,

    /// Sanitized document state after the change
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after_data: Option<Snapshot>,
}

impl AuditLogRecord {
    /// Assemble a new, not-yet-persisted record
    pub fn new(
        collection: Collection,
        document_id: impl Into<String>,
        operation: Operation,
        actor: Actor,
        before_data: Option<Snapshot>,
        after_data: Option<Snapshot>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            collection,
            document_id: document_id.into(),
            operation,
            timestamp: None,
            user_id: actor.user_id,
            user_email: actor.user_email,
            before_data,
            after_data,
        }
    }

    /// Stamp the record with the store clock; called by stores at append time
    pub fn stamped(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Format the record as a one-line human-readable summary
    pub fn format_human_readable(&self) -> String {
        let timestamp = self
            .timestamp
            .map(|ts| ts.format("%Y-%m-%d %H:%M:%S UTC").to_string())
            .unwrap_or_else(|| "(unstamped)".to_string());

        format!(
            "[{}] {} {}/{} by {} <{}>",
            timestamp,
            self.operation,
            self.collection,
            self.document_id,
            self.user_id,
            self.user_email
        )
    }
}
