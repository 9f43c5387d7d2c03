//! Display formatting for terminal output
//!
//! Formats audit records for the inspection commands: a compact table for
//! listings and a detailed view for single records.

pub mod log;

pub use log::{format_record_details, format_record_list};
