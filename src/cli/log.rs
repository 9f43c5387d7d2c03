//! Audit log CLI commands
//!
//! Implements the inspection commands over the JSONL audit store.

use std::fs::File;

use clap::Subcommand;

use crate::audit::JsonlAuditStore;
use crate::config::ClubwatchPaths;
use crate::display::{format_record_details, format_record_list};
use crate::error::{ClubwatchError, ClubwatchResult};
use crate::export::export_records_csv;

/// Audit log subcommands
#[derive(Subcommand)]
pub enum LogCommands {
    /// List recent audit records
    List {
        /// Number of records to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
    /// Show one record in detail
    Show {
        /// Record id (full UUID or a unique prefix)
        id: String,
    },
    /// Print the number of records in the log
    Count,
    /// Export the audit log to CSV
    Export {
        /// Output file path
        file: String,
    },
}

/// Handle a log command
pub fn handle_log_command(paths: &ClubwatchPaths, cmd: LogCommands) -> ClubwatchResult<()> {
    let store = JsonlAuditStore::new(paths.audit_log_file());

    match cmd {
        LogCommands::List { limit } => {
            let records = store.read_recent(limit)?;
            print!("{}", format_record_list(&records));
        }

        LogCommands::Show { id } => {
            let record = store
                .find(&id)?
                .ok_or(ClubwatchError::RecordNotFound(id))?;
            print!("{}", format_record_details(&record));
        }

        LogCommands::Count => {
            println!("{}", store.record_count()?);
        }

        LogCommands::Export { file } => {
            let records = store.read_all()?;
            let output = File::create(&file)
                .map_err(|e| ClubwatchError::Export(format!("Failed to create {}: {}", file, e)))?;
            export_records_csv(&records, output)?;
            println!("Exported {} records to {}", records.len(), file);
        }
    }

    Ok(())
}
