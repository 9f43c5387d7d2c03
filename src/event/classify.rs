//! Operation classification
//!
//! Derives the operation label for a change event from its before/after
//! snapshot pair. Classification is a pure function: absence of a field is
//! treated as "no value", never as a fault, and the same pair always yields
//! the same label.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::change::{Collection, Snapshot};

/// The fixed operation vocabulary, one label per classifiable change
///
/// Serialized labels are the snake_case variant names (e.g.
/// `update_club_admins`), which is the form persisted in audit records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    CreateEvent,
    UpdateEvent,
    DeleteEvent,

    CreateClubAnnouncements,
    AddAnnouncement,
    DeleteAnnouncement,
    UpdateAnnouncement,
    DeleteClubAnnouncements,

    CreateClub,
    UpdateClubAdmins,
    UpdateClubLogo,
    UpdateClubBackground,
    UpdateClub,
    DeleteClub,

    CreateUser,
    UpdateUserPhoto,
    UpdateUserBackground,
    UpdateUser,
    DeleteUser,

    CreateMapMarker,
    UpdateMapMarker,
    DeleteMapMarker,

    /// No rule matched. Only reachable when both snapshots are absent, which
    /// is not a valid invocation, but the classifier stays total.
    Unknown,
}

/// The coarse nature of a change, independent of collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Create,
    Update,
    Delete,
    Unknown,
}

impl Operation {
    /// The label as persisted in audit records
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::CreateEvent => "create_event",
            Operation::UpdateEvent => "update_event",
            Operation::DeleteEvent => "delete_event",
            Operation::CreateClubAnnouncements => "create_club_announcements",
            Operation::AddAnnouncement => "add_announcement",
            Operation::DeleteAnnouncement => "delete_announcement",
            Operation::UpdateAnnouncement => "update_announcement",
            Operation::DeleteClubAnnouncements => "delete_club_announcements",
            Operation::CreateClub => "create_club",
            Operation::UpdateClubAdmins => "update_club_admins",
            Operation::UpdateClubLogo => "update_club_logo",
            Operation::UpdateClubBackground => "update_club_background",
            Operation::UpdateClub => "update_club",
            Operation::DeleteClub => "delete_club",
            Operation::CreateUser => "create_user",
            Operation::UpdateUserPhoto => "update_user_photo",
            Operation::UpdateUserBackground => "update_user_background",
            Operation::UpdateUser => "update_user",
            Operation::DeleteUser => "delete_user",
            Operation::CreateMapMarker => "create_map_marker",
            Operation::UpdateMapMarker => "update_map_marker",
            Operation::DeleteMapMarker => "delete_map_marker",
            Operation::Unknown => "unknown",
        }
    }

    /// The coarse kind of this operation
    ///
    /// Announcement list add/delete are updates to the announcements document,
    /// not document-level deletions; only `delete_club_announcements` removes
    /// the document itself.
    pub fn kind(&self) -> ChangeKind {
        match self {
            Operation::CreateEvent
            | Operation::CreateClubAnnouncements
            | Operation::CreateClub
            | Operation::CreateUser
            | Operation::CreateMapMarker => ChangeKind::Create,

            Operation::DeleteEvent
            | Operation::DeleteClubAnnouncements
            | Operation::DeleteClub
            | Operation::DeleteUser
            | Operation::DeleteMapMarker => ChangeKind::Delete,

            Operation::Unknown => ChangeKind::Unknown,

            _ => ChangeKind::Update,
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a change event by its snapshot pair
///
/// General shape for every collection: `before` absent and `after` present is
/// a creation, the reverse is a deletion, both present defers to the
/// per-collection update rules. Both absent yields `Unknown`.
pub fn classify(
    collection: Collection,
    before: Option<&Snapshot>,
    after: Option<&Snapshot>,
) -> Operation {
    match (before, after) {
        (None, Some(_)) => created(collection),
        (Some(_), None) => deleted(collection),
        (Some(before), Some(after)) => updated(collection, before, after),
        (None, None) => Operation::Unknown,
    }
}

/// When an announcement addition is detected, the new item sits at the head
/// of the after list by producer convention. Returns it for the notification
/// collaborator; `None` when the event is not an announcement addition.
pub fn new_announcement(
    collection: Collection,
    before: Option<&Snapshot>,
    after: Option<&Snapshot>,
) -> Option<Value> {
    if classify(collection, before, after) != Operation::AddAnnouncement {
        return None;
    }
    after.and_then(|snapshot| announcements_list(snapshot).first().cloned())
}

fn created(collection: Collection) -> Operation {
    match collection {
        Collection::Events => Operation::CreateEvent,
        Collection::Announcements => Operation::CreateClubAnnouncements,
        Collection::Clubs => Operation::CreateClub,
        Collection::Users => Operation::CreateUser,
        Collection::MapMarkers => Operation::CreateMapMarker,
    }
}

fn deleted(collection: Collection) -> Operation {
    match collection {
        Collection::Events => Operation::DeleteEvent,
        Collection::Announcements => Operation::DeleteClubAnnouncements,
        Collection::Clubs => Operation::DeleteClub,
        Collection::Users => Operation::DeleteUser,
        Collection::MapMarkers => Operation::DeleteMapMarker,
    }
}

fn updated(collection: Collection, before: &Snapshot, after: &Snapshot) -> Operation {
    match collection {
        Collection::Events => Operation::UpdateEvent,
        Collection::MapMarkers => Operation::UpdateMapMarker,
        Collection::Announcements => announcement_update(before, after),
        Collection::Clubs => club_update(before, after),
        Collection::Users => user_update(before, after),
    }
}

/// Announcements live as an ordered list inside one document per club, so an
/// update is sub-classified by comparing list lengths. A missing list reads
/// as empty.
fn announcement_update(before: &Snapshot, after: &Snapshot) -> Operation {
    let before_len = announcements_list(before).len();
    let after_len = announcements_list(after).len();

    if after_len > before_len {
        Operation::AddAnnouncement
    } else if after_len < before_len {
        Operation::DeleteAnnouncement
    } else {
        Operation::UpdateAnnouncement
    }
}

/// Club updates are disambiguated in priority order: admin roster first, then
/// logo, then background image, then the general label.
fn club_update(before: &Snapshot, after: &Snapshot) -> Operation {
    if field_differs(before, after, "adminEmails") {
        Operation::UpdateClubAdmins
    } else if field_differs(before, after, "logoUrl") {
        Operation::UpdateClubLogo
    } else if field_differs(before, after, "backgroundImageUrl") {
        Operation::UpdateClubBackground
    } else {
        Operation::UpdateClub
    }
}

fn user_update(before: &Snapshot, after: &Snapshot) -> Operation {
    if field_differs(before, after, "photoURL") {
        Operation::UpdateUserPhoto
    } else if field_differs(before, after, "backgroundImageUrl") {
        Operation::UpdateUserBackground
    } else {
        Operation::UpdateUser
    }
}

/// Deep inequality on a single field; a field absent on both sides is equal
fn field_differs(before: &Snapshot, after: &Snapshot, field: &str) -> bool {
    before.get(field) != after.get(field)
}

fn announcements_list(snapshot: &Snapshot) -> &[Value] {
    snapshot
        .get("announcementsList")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}
