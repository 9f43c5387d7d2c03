//! Change-handling pipeline
//!
//! Ties the core together: classify the change, extract the new announcement
//! when one was added, resolve the actor, sanitize user payloads, and hand
//! the assembled record to the writer. Each invocation is independent and
//! stateless; nothing here can fail the caller.

use serde_json::Value;
use tracing::warn;

use crate::audit::{AuditLogRecord, AuditLogWriter, AuditStore, WriteOutcome};
use crate::event::{
    classify, new_announcement, resolve, sanitize_user_snapshot, Actor, ChangeEvent, Collection,
    Operation,
};

/// The handled result of one change event
#[derive(Debug, Clone)]
pub struct ChangeOutcome {
    /// The classified operation label
    pub operation: Operation,

    /// The resolved actor
    pub actor: Actor,

    /// Whether the audit record reached the store
    pub write: WriteOutcome,

    /// The newly added announcement, when the operation is
    /// `add_announcement`; consumed by the notification collaborator
    pub new_announcement: Option<Value>,
}

/// Stateless handler for incoming change events
pub struct ChangePipeline<S: AuditStore> {
    writer: AuditLogWriter<S>,
}

impl<S: AuditStore> ChangePipeline<S> {
    /// Create a pipeline writing to the given store
    pub fn new(store: S) -> Self {
        Self {
            writer: AuditLogWriter::new(store),
        }
    }

    /// Access the writer (and through it, the store)
    pub fn writer(&self) -> &AuditLogWriter<S> {
        &self.writer
    }

    /// Handle one change event: classify, resolve, sanitize, persist
    ///
    /// Never returns an error: classification is total, resolution falls back
    /// to the sentinel actor, and the writer swallows store failures.
    pub fn handle(&self, event: ChangeEvent) -> ChangeOutcome {
        let ChangeEvent {
            collection,
            document_id,
            mut before,
            mut after,
            context,
        } = event;

        let operation = classify(collection, before.as_ref(), after.as_ref());
        if operation == Operation::Unknown {
            // Both snapshots absent; not a valid invocation, but still logged
            warn!(%collection, %document_id, "change event carried no snapshots");
        }

        let new_announcement = new_announcement(collection, before.as_ref(), after.as_ref());

        let actor = resolve(context.auth.as_ref(), &mut before, &mut after, operation);

        if collection == Collection::Users {
            before = before.as_ref().map(sanitize_user_snapshot);
            after = after.as_ref().map(sanitize_user_snapshot);
        }

        let record = AuditLogRecord::new(
            collection,
            document_id,
            operation,
            actor.clone(),
            before,
            after,
        );
        let write = self.writer.write(record);

        ChangeOutcome {
            operation,
            actor,
            write,
            new_announcement,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::MemoryAuditStore;
    use crate::event::{AuthActor, InvocationContext, Snapshot};
    use serde_json::json;

    fn snap(value: serde_json::Value) -> Snapshot {
        match value {
            Value::Object(map) => map,
            _ => panic!("snapshot literal must be a JSON object"),
        }
    }

    fn pipeline() -> ChangePipeline<MemoryAuditStore> {
        ChangePipeline::new(MemoryAuditStore::new())
    }

    fn event(
        collection: Collection,
        document_id: &str,
        before: Option<serde_json::Value>,
        after: Option<serde_json::Value>,
    ) -> ChangeEvent {
        ChangeEvent {
            collection,
            document_id: document_id.to_string(),
            before: before.map(snap),
            after: after.map(snap),
            context: InvocationContext::default(),
        }
    }

    #[test]
    fn test_create_event_end_to_end() {
        let pipeline = pipeline();

        let outcome = pipeline.handle(event(
            Collection::Events,
            "evt-1",
            None,
            Some(json!({"title": "Robotics Demo"})),
        ));

        assert_eq!(outcome.operation, Operation::CreateEvent);
        assert!(outcome.actor.is_system());
        assert_eq!(outcome.write, WriteOutcome::Persisted);
        assert!(outcome.new_announcement.is_none());

        let records = pipeline.writer().store().records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].operation, Operation::CreateEvent);
        assert!(records[0].before_data.is_none());
        assert!(records[0].after_data.is_some());
        assert!(records[0].timestamp.is_some());
        assert_eq!(records[0].user_id, "system");
    }

    #[test]
    fn test_announcement_addition_exposes_head_item() {
        let pipeline = pipeline();

        let outcome = pipeline.handle(event(
            Collection::Announcements,
            "club-1",
            Some(json!({"announcementsList": []})),
            Some(json!({"announcementsList": [{"title": "Hi"}]})),
        ));

        assert_eq!(outcome.operation, Operation::AddAnnouncement);
        assert_eq!(outcome.new_announcement, Some(json!({"title": "Hi"})));
    }

    #[test]
    fn test_auth_actor_recorded() {
        let pipeline = pipeline();

        let mut event = event(
            Collection::Clubs,
            "club-1",
            Some(json!({"name": "Chess"})),
            Some(json!({"name": "Chess Club"})),
        );
        event.context = InvocationContext {
            auth: Some(AuthActor {
                uid: "u-1".to_string(),
                email: Some("u1@example.com".to_string()),
            }),
            event_id: None,
        };

        let outcome = pipeline.handle(event);

        assert_eq!(outcome.actor.user_id, "u-1");
        let records = pipeline.writer().store().records();
        assert_eq!(records[0].user_email, "u1@example.com");
    }

    #[test]
    fn test_annotation_stripped_from_persisted_payload() {
        let pipeline = pipeline();

        let outcome = pipeline.handle(event(
            Collection::Clubs,
            "club-1",
            Some(json!({"name": "Chess"})),
            Some(json!({
                "name": "Chess Club",
                "_metadata": {"userId": "u-2", "userEmail": "u2@x.com"}
            })),
        ));

        assert_eq!(outcome.actor.user_id, "u-2");

        let records = pipeline.writer().store().records();
        let after = records[0].after_data.as_ref().unwrap();
        assert!(!after.contains_key("_metadata"));
        assert_eq!(after.get("name"), Some(&json!("Chess Club")));
    }

    #[test]
    fn test_user_payloads_sanitized() {
        let pipeline = pipeline();

        let outcome = pipeline.handle(event(
            Collection::Users,
            "user-1",
            Some(json!({
                "photoURL": "p1",
                "authProviders": ["google.com"],
                "phoneNumber": "+1-555-0100"
            })),
            Some(json!({
                "photoURL": "p2",
                "authProviders": ["google.com"],
                "phoneNumber": "+1-555-0100"
            })),
        ));

        assert_eq!(outcome.operation, Operation::UpdateUserPhoto);

        let records = pipeline.writer().store().records();
        for payload in [
            records[0].before_data.as_ref().unwrap(),
            records[0].after_data.as_ref().unwrap(),
        ] {
            assert!(!payload.contains_key("authProviders"));
            assert!(!payload.contains_key("phoneNumber"));
        }
    }

    #[test]
    fn test_invalid_invocation_still_writes_unknown() {
        let pipeline = pipeline();

        let outcome = pipeline.handle(event(Collection::Events, "evt-x", None, None));

        assert_eq!(outcome.operation, Operation::Unknown);
        assert_eq!(outcome.write, WriteOutcome::Persisted);

        let records = pipeline.writer().store().records();
        assert_eq!(records[0].operation, Operation::Unknown);
    }

    #[test]
    fn test_store_failure_yields_dropped_outcome() {
        use crate::error::{ClubwatchError, ClubwatchResult};

        struct FailingStore;
        impl AuditStore for FailingStore {
            fn append(&self, _record: AuditLogRecord) -> ClubwatchResult<()> {
                Err(ClubwatchError::Store("store unavailable".to_string()))
            }
        }

        let pipeline = ChangePipeline::new(FailingStore);

        let outcome = pipeline.handle(event(
            Collection::Events,
            "evt-1",
            None,
            Some(json!({"title": "x"})),
        ));

        // The invocation completes; the drop is visible only in the outcome
        assert_eq!(outcome.operation, Operation::CreateEvent);
        assert_eq!(outcome.write, WriteOutcome::Dropped);
    }

    #[test]
    fn test_at_least_once_redelivery_duplicates_records() {
        let pipeline = pipeline();

        let make = || {
            event(
                Collection::MapMarkers,
                "marker-1",
                Some(json!({"label": "Gym"})),
                Some(json!({"label": "Gymnasium"})),
            )
        };
        pipeline.handle(make());
        pipeline.handle(make());

        // Duplicates are an accepted consequence; no deduplication happens
        let records = pipeline.writer().store().records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].operation, Operation::UpdateMapMarker);
        assert_eq!(records[1].operation, Operation::UpdateMapMarker);
    }
}
