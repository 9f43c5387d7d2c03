//! Process CLI command
//!
//! Reads one serialized change event, runs it through the pipeline, and
//! prints the handled outcome. With `--notify`, announcement additions also
//! dispatch emails through the default mailer.

use std::io::Read;

use crate::audit::JsonlAuditStore;
use crate::config::{ClubwatchPaths, Settings};
use crate::error::{ClubwatchError, ClubwatchResult};
use crate::event::ChangeEvent;
use crate::notify::{AnnouncementNotifier, LogMailer};
use crate::pipeline::ChangePipeline;

/// Handle the `process` command
pub fn handle_process_command(
    paths: &ClubwatchPaths,
    settings: &Settings,
    file: &str,
    notify: bool,
) -> ClubwatchResult<()> {
    let raw = read_event_source(file)?;

    let event: ChangeEvent = serde_json::from_str(&raw)
        .map_err(|e| ClubwatchError::Validation(format!("Malformed change event: {}", e)))?;

    let document_id = event.document_id.clone();

    paths.ensure_directories()?;
    let pipeline = ChangePipeline::new(JsonlAuditStore::new(paths.audit_log_file()));
    let outcome = pipeline.handle(event);

    println!("Operation: {}", outcome.operation);
    println!(
        "Actor:     {} <{}>",
        outcome.actor.user_id, outcome.actor.user_email
    );
    println!(
        "Audit:     {}",
        if outcome.write.is_persisted() {
            "persisted"
        } else {
            "dropped (see logs)"
        }
    );

    if let Some(announcement) = &outcome.new_announcement {
        println!("New announcement detected.");
        if notify {
            let mailer = LogMailer;
            let notifier = AnnouncementNotifier::new(&mailer, &settings.notifications);
            let summary = notifier.notify(&document_id, announcement);
            println!(
                "Notified:  {} attempted, {} delivered, {} failed",
                summary.attempted, summary.delivered, summary.failed
            );
        }
    }

    Ok(())
}

fn read_event_source(file: &str) -> ClubwatchResult<String> {
    if file == "-" {
        let mut raw = String::new();
        std::io::stdin()
            .read_to_string(&mut raw)
            .map_err(|e| ClubwatchError::Io(format!("Failed to read stdin: {}", e)))?;
        Ok(raw)
    } else {
        std::fs::read_to_string(file)
            .map_err(|e| ClubwatchError::Io(format!("Failed to read {}: {}", file, e)))
    }
}
