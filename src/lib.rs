//! clubwatch - Audit-log pipeline for club and event document changes
//!
//! This library implements the change-classification and audit-log-emission
//! pipeline for an event/club-management application: every create, update,
//! or delete on a watched collection arrives as a before/after snapshot pair,
//! gets classified into a fixed operation vocabulary, and is persisted as an
//! immutable audit record. Announcement additions additionally feed an email
//! notification collaborator.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `event`: Change events, classification, actor resolution, sanitization
//! - `audit`: Audit records, the append-only store, and the swallowing writer
//! - `pipeline`: The per-event handler tying the core together
//! - `notify`: Announcement email dispatch with bounded parallelism
//! - `display`: Terminal formatting for the inspection commands
//! - `export`: CSV export of the audit log
//! - `cli`: Command handlers for the `clubwatch` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use clubwatch::audit::JsonlAuditStore;
//! use clubwatch::event::ChangeEvent;
//! use clubwatch::pipeline::ChangePipeline;
//!
//! let pipeline = ChangePipeline::new(JsonlAuditStore::new(audit_log_path));
//! let event: ChangeEvent = serde_json::from_str(&raw)?;
//! let outcome = pipeline.handle(event);
//! println!("classified as {}", outcome.operation);
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod event;
pub mod export;
pub mod notify;
pub mod pipeline;

pub use error::{ClubwatchError, ClubwatchResult};
