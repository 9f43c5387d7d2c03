//! Actor resolution
//!
//! Determines the identity responsible for a change. The preferred source is
//! the authenticated actor carried first-class on the invocation context.
//! Legacy dispatchers embedded actor identity inside the document payloads
//! instead; those annotations are honored as a fallback and stripped from the
//! snapshot so they never reach the persisted log.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::change::Snapshot;
use super::classify::{ChangeKind, Operation};

/// Default identity used when no real actor can be resolved
pub const SENTINEL_ACTOR: &str = "system";

/// Annotation field carrying the actor of a document deletion, embedded in
/// the before snapshot by legacy dispatchers
pub const DELETE_ANNOTATION: &str = "_deleteMetadata";

/// Annotation field carrying the actor of a create/update, embedded in the
/// after snapshot by legacy dispatchers
pub const CHANGE_ANNOTATION: &str = "_metadata";

/// An authenticated actor from the invocation context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthActor {
    /// Stable user identifier
    pub uid: String,

    /// Email claim; not every authenticated principal carries one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// The resolved identity persisted on an audit record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    pub user_id: String,
    pub user_email: String,
}

impl Actor {
    /// The sentinel actor used when nothing else resolves
    pub fn system() -> Self {
        Self {
            user_id: SENTINEL_ACTOR.to_string(),
            user_email: SENTINEL_ACTOR.to_string(),
        }
    }

    /// Whether this is the sentinel identity
    pub fn is_system(&self) -> bool {
        self.user_id == SENTINEL_ACTOR && self.user_email == SENTINEL_ACTOR
    }
}

/// Resolve the actor responsible for a change
///
/// Priority order, first match wins:
/// 1. The authenticated actor from the invocation context.
/// 2. For document deletions, the `_deleteMetadata` annotation on `before`.
/// 3. The `_metadata` annotation on `after`.
/// 4. The sentinel `"system"` identity.
///
/// When an annotation is the source (cases 2 and 3), it is removed from the
/// snapshot it was read from: the annotation is a carrier for identity, not
/// log content. Snapshots are untouched when the context actor wins.
pub fn resolve(
    auth: Option<&AuthActor>,
    before: &mut Option<Snapshot>,
    after: &mut Option<Snapshot>,
    operation: Operation,
) -> Actor {
    if let Some(auth) = auth {
        return Actor {
            user_id: auth.uid.clone(),
            user_email: auth
                .email
                .clone()
                .unwrap_or_else(|| SENTINEL_ACTOR.to_string()),
        };
    }

    if operation.kind() == ChangeKind::Delete {
        if let Some(actor) = take_annotation(before, DELETE_ANNOTATION) {
            return actor;
        }
    }

    if let Some(actor) = take_annotation(after, CHANGE_ANNOTATION) {
        return actor;
    }

    Actor::system()
}

/// Remove the named annotation object from the snapshot, if present, and
/// build an actor from its `userId`/`userEmail` keys. Missing keys fall back
/// to the sentinel individually. Non-object annotation values are left alone.
fn take_annotation(snapshot: &mut Option<Snapshot>, field: &str) -> Option<Actor> {
    let map = snapshot.as_mut()?;
    if !matches!(map.get(field), Some(Value::Object(_))) {
        return None;
    }

    let meta = match map.remove(field) {
        Some(Value::Object(meta)) => meta,
        _ => return None,
    };

    Some(Actor {
        user_id: annotation_field(&meta, "userId"),
        user_email: annotation_field(&meta, "userEmail"),
    })
}

fn annotation_field(meta: &Snapshot, key: &str) -> String {
    meta.get(key)
        .and_then(Value::as_str)
        .unwrap_or(SENTINEL_ACTOR)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn snap(value: serde_json::Value) -> Snapshot {
        match value {
            Value::Object(map) => map,
            _ => panic!("snapshot literal must be a JSON object"),
        }
    }

    fn auth(uid: &str, email: Option<&str>) -> AuthActor {
        AuthActor {
            uid: uid.to_string(),
            email: email.map(String::from),
        }
    }

    #[test]
    fn test_auth_context_wins_over_annotations() {
        let mut before = None;
        let mut after = Some(snap(json!({
            "name": "x",
            "_metadata": {"userId": "smuggled", "userEmail": "smuggled@x.com"}
        })));

        let actor = resolve(
            Some(&auth("u-1", Some("u1@example.com"))),
            &mut before,
            &mut after,
            Operation::CreateClub,
        );

        assert_eq!(actor.user_id, "u-1");
        assert_eq!(actor.user_email, "u1@example.com");
        // The annotation was not the source, so it is left in place
        assert!(after.unwrap().contains_key(CHANGE_ANNOTATION));
    }

    #[test]
    fn test_auth_without_email_claim() {
        let actor = resolve(
            Some(&auth("u-2", None)),
            &mut None,
            &mut Some(snap(json!({}))),
            Operation::UpdateUser,
        );

        assert_eq!(actor.user_id, "u-2");
        assert_eq!(actor.user_email, SENTINEL_ACTOR);
    }

    #[test]
    fn test_change_annotation_used_and_stripped() {
        let mut after = Some(snap(json!({
            "name": "Chess",
            "_metadata": {"userId": "u-3", "userEmail": "u3@x.com"}
        })));

        let actor = resolve(None, &mut None, &mut after, Operation::UpdateClub);

        assert_eq!(actor.user_id, "u-3");
        assert_eq!(actor.user_email, "u3@x.com");
        assert!(!after.unwrap().contains_key(CHANGE_ANNOTATION));
    }

    #[test]
    fn test_delete_annotation_used_and_stripped() {
        let mut before = Some(snap(json!({
            "name": "Chess",
            "_deleteMetadata": {"userId": "u-4", "userEmail": "u4@x.com"}
        })));

        let actor = resolve(None, &mut before, &mut None, Operation::DeleteClub);

        assert_eq!(actor.user_id, "u-4");
        assert_eq!(actor.user_email, "u4@x.com");
        assert!(!before.unwrap().contains_key(DELETE_ANNOTATION));
    }

    #[test]
    fn test_delete_annotation_ignored_for_updates() {
        // The before-side annotation only applies to document deletions
        let mut before = Some(snap(json!({
            "_deleteMetadata": {"userId": "u-5", "userEmail": "u5@x.com"}
        })));
        let mut after = Some(snap(json!({"name": "x"})));

        let actor = resolve(None, &mut before, &mut after, Operation::UpdateClub);

        assert!(actor.is_system());
        assert!(before.unwrap().contains_key(DELETE_ANNOTATION));
    }

    #[test]
    fn test_annotation_with_missing_keys_falls_back_per_key() {
        let mut after = Some(snap(json!({
            "_metadata": {"userId": "u-6"}
        })));

        let actor = resolve(None, &mut None, &mut after, Operation::UpdateUser);

        assert_eq!(actor.user_id, "u-6");
        assert_eq!(actor.user_email, SENTINEL_ACTOR);
    }

    #[test]
    fn test_non_object_annotation_is_left_alone() {
        let mut after = Some(snap(json!({"_metadata": "not an object"})));

        let actor = resolve(None, &mut None, &mut after, Operation::UpdateUser);

        assert!(actor.is_system());
        assert!(after.unwrap().contains_key(CHANGE_ANNOTATION));
    }

    #[test]
    fn test_no_source_defaults_to_system() {
        let actor = resolve(
            None,
            &mut Some(snap(json!({"name": "x"}))),
            &mut None,
            Operation::DeleteEvent,
        );

        assert!(actor.is_system());
        assert_eq!(actor.user_id, "system");
    }
}
