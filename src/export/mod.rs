//! CSV export of the audit log
//!
//! Flattens records into one CSV row each, payloads serialized as compact
//! JSON so the export stays one-row-per-record.

use std::io::Write;

use crate::audit::AuditLogRecord;
use crate::error::{ClubwatchError, ClubwatchResult};
use crate::event::Snapshot;

/// Export audit records to CSV
pub fn export_records_csv<W: Write>(records: &[AuditLogRecord], writer: W) -> ClubwatchResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record([
            "id",
            "timestamp",
            "collection",
            "documentId",
            "operation",
            "userId",
            "userEmail",
            "beforeData",
            "afterData",
        ])
        .map_err(|e| ClubwatchError::Export(e.to_string()))?;

    for record in records {
        let timestamp = record
            .timestamp
            .map(|ts| ts.to_rfc3339())
            .unwrap_or_default();

        csv_writer
            .write_record([
                record.id.to_string(),
                timestamp,
                record.collection.to_string(),
                record.document_id.clone(),
                record.operation.to_string(),
                record.user_id.clone(),
                record.user_email.clone(),
                payload_json(record.before_data.as_ref())?,
                payload_json(record.after_data.as_ref())?,
            ])
            .map_err(|e| ClubwatchError::Export(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| ClubwatchError::Export(e.to_string()))?;

    Ok(())
}

fn payload_json(payload: Option<&Snapshot>) -> ClubwatchResult<String> {
    match payload {
        Some(snapshot) => serde_json::to_string(snapshot)
            .map_err(|e| ClubwatchError::Export(e.to_string())),
        None => Ok(String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{Actor, Collection, Operation};
    use chrono::Utc;
    use serde_json::{json, Value};

    fn snap(value: serde_json::Value) -> Snapshot {
        match value {
            Value::Object(map) => map,
            _ => panic!("snapshot literal must be a JSON object"),
        }
    }

    #[test]
    fn test_export_header_and_rows() {
        let record = AuditLogRecord::new(
            Collection::Users,
            "user-1",
            Operation::UpdateUserPhoto,
            Actor::system(),
            Some(snap(json!({"photoURL": "p1"}))),
            Some(snap(json!({"photoURL": "p2"}))),
        )
        .stamped(Utc::now());

        let mut buffer = Vec::new();
        export_records_csv(&[record], &mut buffer).unwrap();

        let output = String::from_utf8(buffer).unwrap();
        let mut lines = output.lines();

        let header = lines.next().unwrap();
        assert!(header.starts_with("id,timestamp,collection,documentId,operation"));

        let row = lines.next().unwrap();
        assert!(row.contains("users"));
        assert!(row.contains("user-1"));
        assert!(row.contains("update_user_photo"));
        assert!(row.contains("photoURL"));
    }

    #[test]
    fn test_export_empty_log_writes_header_only() {
        let mut buffer = Vec::new();
        export_records_csv(&[], &mut buffer).unwrap();

        let output = String::from_utf8(buffer).unwrap();
        assert_eq!(output.lines().count(), 1);
    }

    #[test]
    fn test_missing_payloads_export_as_empty_cells() {
        let record = AuditLogRecord::new(
            Collection::Events,
            "evt-1",
            Operation::CreateEvent,
            Actor::system(),
            None,
            Some(snap(json!({"title": "x"}))),
        );

        let mut buffer = Vec::new();
        export_records_csv(&[record], &mut buffer).unwrap();

        let output = String::from_utf8(buffer).unwrap();
        assert_eq!(output.lines().count(), 2);
    }
}
