//! Mailer seam for announcement notifications
//!
//! Transport is external to this crate: embedders plug in whatever delivery
//! mechanism they run. The bundled `LogMailer` records each send through the
//! tracing facade and is what the CLI uses.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ClubwatchResult;

/// One announcement email, ready for delivery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnouncementEmail {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

/// Sends one email; implementations supply the transport
pub trait Mailer: Send + Sync {
    fn send(&self, email: &AnnouncementEmail) -> ClubwatchResult<()>;
}

/// Mailer that records sends without delivering anything
#[derive(Debug, Clone, Copy, Default)]
pub struct LogMailer;

impl Mailer for LogMailer {
    fn send(&self, email: &AnnouncementEmail) -> ClubwatchResult<()> {
        info!(
            recipient = %email.recipient,
            subject = %email.subject,
            "announcement email recorded (no transport configured)"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_mailer_accepts_sends() {
        let email = AnnouncementEmail {
            recipient: "a@x.com".to_string(),
            subject: "[club-1] Hi".to_string(),
            body: "body".to_string(),
        };

        assert!(LogMailer.send(&email).is_ok());
    }
}
