//! Changed-field summaries for audit records
//!
//! Generates the human-readable "what changed" line shown by the inspection
//! commands. Only top-level fields are compared; payloads are logged in full
//! anyway, so the summary exists for scanning, not fidelity.

use serde_json::Value;

use crate::event::Snapshot;

/// Names of top-level fields that differ between the two snapshots, in the
/// order they appear in `before` (removed/changed) then `after` (added)
pub fn changed_fields(before: &Snapshot, after: &Snapshot) -> Vec<String> {
    let mut fields = Vec::new();

    for (key, before_val) in before {
        match after.get(key) {
            Some(after_val) if after_val == before_val => {}
            _ => fields.push(key.clone()),
        }
    }

    for key in after.keys() {
        if !before.contains_key(key) {
            fields.push(key.clone());
        }
    }

    fields
}

/// One-line summary of the changes between two snapshots, `None` when they
/// are identical
pub fn summarize_changes(before: &Snapshot, after: &Snapshot) -> Option<String> {
    let mut changes = Vec::new();

    for (key, before_val) in before {
        match after.get(key) {
            Some(after_val) if after_val == before_val => {}
            Some(after_val) => changes.push(format!(
                "{}: {} -> {}",
                key,
                format_value(before_val),
                format_value(after_val)
            )),
            None => changes.push(format!("{}: {} -> (removed)", key, format_value(before_val))),
        }
    }

    for (key, after_val) in after {
        if !before.contains_key(key) {
            changes.push(format!("{}: (added) -> {}", key, format_value(after_val)));
        }
    }

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

/// Compact display form of a field value; long strings are truncated and
/// containers are shown by size
fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => {
            if s.chars().count() > 50 {
                let truncated: String = s.chars().take(47).collect();
                format!("\"{}...\"", truncated)
            } else {
                format!("\"{}\"", s)
            }
        }
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
    }
}
