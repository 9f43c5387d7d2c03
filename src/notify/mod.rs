//! Announcement notifications
//!
//! Optional collaborator that reacts to `add_announcement` outcomes: it
//! builds one email per configured recipient and dispatches the batch with
//! bounded parallelism through a pluggable [`Mailer`]. Delivery transport is
//! an external concern; the default mailer only records the send.
//!
//! Like the audit writer, the notifier is best-effort: per-recipient failures
//! are logged and counted, never propagated.

pub mod mailer;

pub use mailer::{AnnouncementEmail, LogMailer, Mailer};

use std::thread;

use serde_json::Value;
use tracing::{info, warn};

use crate::config::settings::NotificationSettings;

/// Delivery summary for one announcement batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotifySummary {
    /// Emails built for this announcement
    pub attempted: usize,
    /// Sends the mailer accepted
    pub delivered: usize,
    /// Sends the mailer rejected
    pub failed: usize,
}

/// Dispatches announcement emails to the configured recipients
pub struct AnnouncementNotifier<'a, M: Mailer> {
    mailer: &'a M,
    settings: &'a NotificationSettings,
}

impl<'a, M: Mailer> AnnouncementNotifier<'a, M> {
    /// Create a notifier over the given mailer and settings
    pub fn new(mailer: &'a M, settings: &'a NotificationSettings) -> Self {
        Self { mailer, settings }
    }

    /// Notify every configured recipient about a new announcement
    ///
    /// Sends run at most `max_parallel_sends` at a time on scoped threads and
    /// join before returning. Every recipient is attempted even when earlier
    /// sends fail.
    pub fn notify(&self, club_id: &str, announcement: &Value) -> NotifySummary {
        if !self.settings.enabled || self.settings.recipients.is_empty() {
            return NotifySummary::default();
        }

        let emails: Vec<AnnouncementEmail> = self
            .settings
            .recipients
            .iter()
            .map(|recipient| build_email(recipient, club_id, announcement))
            .collect();

        let mut summary = NotifySummary {
            attempted: emails.len(),
            ..NotifySummary::default()
        };

        let limit = self.settings.max_parallel_sends.max(1);
        for batch in emails.chunks(limit) {
            let results: Vec<bool> = thread::scope(|scope| {
                let handles: Vec<_> = batch
                    .iter()
                    .map(|email| scope.spawn(move || self.send_one(email)))
                    .collect();

                handles
                    .into_iter()
                    .map(|handle| handle.join().unwrap_or(false))
                    .collect()
            });

            for delivered in results {
                if delivered {
                    summary.delivered += 1;
                } else {
                    summary.failed += 1;
                }
            }
        }

        info!(
            club_id,
            attempted = summary.attempted,
            delivered = summary.delivered,
            failed = summary.failed,
            "announcement notifications dispatched"
        );

        summary
    }

    fn send_one(&self, email: &AnnouncementEmail) -> bool {
        match self.mailer.send(email) {
            Ok(()) => true,
            Err(error) => {
                warn!(recipient = %email.recipient, %error, "announcement email failed");
                false
            }
        }
    }
}

/// Build the email for one recipient from the raw announcement item
fn build_email(recipient: &str, club_id: &str, announcement: &Value) -> AnnouncementEmail {
    let title = announcement
        .get("title")
        .and_then(Value::as_str)
        .unwrap_or("New announcement");

    let mut body = format!("A new announcement was posted for club {}.\n\n{}", club_id, title);
    if let Some(text) = announcement.get("body").and_then(Value::as_str) {
        body.push_str("\n\n");
        body.push_str(text);
    }

    AnnouncementEmail {
        recipient: recipient.to_string(),
        subject: format!("[{}] {}", club_id, title),
        body,
    }
}
