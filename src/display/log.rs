//! Audit log display formatting

use crate::audit::{summarize_changes, AuditLogRecord};
use crate::event::ChangeKind;

/// Format a list of audit records as a table, oldest first
pub fn format_record_list(records: &[AuditLogRecord]) -> String {
    if records.is_empty() {
        return "No audit records found.\n".to_string();
    }

    let op_width = records
        .iter()
        .map(|r| r.operation.as_str().len())
        .max()
        .unwrap_or(9)
        .max(9);

    let doc_width = records
        .iter()
        .map(|r| format!("{}/{}", r.collection, r.document_id).len())
        .max()
        .unwrap_or(8)
        .max(8);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<8}  {:<19}  {:<op_width$}  {:<doc_width$}  {}\n",
        "Id",
        "Timestamp",
        "Operation",
        "Document",
        "Actor",
        op_width = op_width,
        doc_width = doc_width,
    ));
    output.push_str(&format!(
        "{:-<8}  {:-<19}  {:-<op_width$}  {:-<doc_width$}  {:-<20}\n",
        "",
        "",
        "",
        "",
        "",
        op_width = op_width,
        doc_width = doc_width,
    ));

    for record in records {
        let id = record.id.to_string();
        let timestamp = record
            .timestamp
            .map(|ts| ts.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "(unstamped)".to_string());

        output.push_str(&format!(
            "{:<8}  {:<19}  {:<op_width$}  {:<doc_width$}  {}\n",
            &id[..8],
            timestamp,
            record.operation.as_str(),
            format!("{}/{}", record.collection, record.document_id),
            record.user_email,
            op_width = op_width,
            doc_width = doc_width,
        ));
    }

    output
}

/// Format one audit record in detail
pub fn format_record_details(record: &AuditLogRecord) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}\n", record.format_human_readable()));
    output.push_str(&format!("Id: {}\n", record.id));

    if record.operation.kind() == ChangeKind::Update {
        if let (Some(before), Some(after)) = (&record.before_data, &record.after_data) {
            if let Some(summary) = summarize_changes(before, after) {
                output.push_str(&format!("Changes: {}\n", summary));
            }
        }
    }

    if let Some(before) = &record.before_data {
        output.push_str("Before:\n");
        output.push_str(&indent(&pretty(before)));
    }
    if let Some(after) = &record.after_data {
        output.push_str("After:\n");
        output.push_str(&indent(&pretty(after)));
    }

    output
}

fn pretty(snapshot: &crate::event::Snapshot) -> String {
    serde_json::to_string_pretty(snapshot).unwrap_or_else(|_| "(unprintable)".to_string())
}

fn indent(text: &str) -> String {
    let mut output = String::new();
    for line in text.lines() {
        output.push_str("  ");
        output.push_str(line);
        output.push('\n');
    }
    output
}
