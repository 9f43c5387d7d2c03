//! Snapshot sanitization
//!
//! User documents carry fields that must never reach the audit log. The
//! sanitizer removes them from a copy of the snapshot; fields absent from the
//! input are simply absent from the output.

use super::change::Snapshot;

/// Fields removed from user snapshots before logging
pub const SENSITIVE_FIELDS: [&str; 2] = ["authProviders", "phoneNumber"];

/// Return a copy of the snapshot with sensitive fields removed
///
/// Applies to the users collection only; other collections are logged as-is.
pub fn sanitize_user_snapshot(snapshot: &Snapshot) -> Snapshot {
    let mut sanitized = snapshot.clone();
    for field in SENSITIVE_FIELDS {
        sanitized.remove(field);
    }
    sanitized
}
