//! Change event data structures
//!
//! Defines the shape of an incoming document mutation: the watched collection,
//! the affected document id, the before/after snapshots, and the invocation
//! context. The wire format is camelCase JSON, matching what the upstream
//! dispatcher emits.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::actor::AuthActor;

/// An untyped document snapshot: field name to JSON value
pub type Snapshot = serde_json::Map<String, Value>;

/// The fixed set of watched collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Collection {
    Events,
    Announcements,
    Clubs,
    Users,
    MapMarkers,
}

impl Collection {
    /// The collection name as it appears on the wire and in audit records
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Events => "events",
            Collection::Announcements => "announcements",
            Collection::Clubs => "clubs",
            Collection::Users => "users",
            Collection::MapMarkers => "mapMarkers",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Invocation metadata delivered alongside a change event
///
/// The authenticated actor travels here as a first-class field. Earlier
/// revisions of the upstream dispatcher smuggled actor identity inside the
/// document payloads (`_metadata` / `_deleteMetadata`); those annotations are
/// still honored as a fallback by [`super::resolve`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationContext {
    /// The authenticated actor, when the mutation came through an
    /// authenticated request path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<AuthActor>,

    /// Dispatcher-assigned delivery id. Deliveries are at-least-once, so the
    /// same id may be seen twice; duplicates are logged as-is.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
}

/// One create/update/delete mutation on a single document
///
/// At least one of `before`/`after` is expected to be present. A violation is
/// not rejected: classification answers [`super::Operation::Unknown`] and the
/// record is still written.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeEvent {
    /// The watched collection this mutation belongs to
    pub collection: Collection,

    /// Document identifier, unique within the collection
    pub document_id: String,

    /// Document state before the mutation; absent for creations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<Snapshot>,

    /// Document state after the mutation; absent for deletions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<Snapshot>,

    /// Invocation metadata
    #[serde(default)]
    pub context: InvocationContext,
}
