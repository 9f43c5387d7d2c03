//! Audit record persistence
//!
//! The `AuditStore` trait is the append-only seam between the writer and
//! whatever holds the log. It deliberately has no update or delete method.
//! The bundled `JsonlAuditStore` writes one JSON object per line and carries
//! the read paths used by the inspection commands; `MemoryAuditStore` backs
//! tests and library embedders.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::Utc;

use crate::error::{ClubwatchError, ClubwatchResult};

use super::record::AuditLogRecord;

/// Append-only persistence for audit records
///
/// Implementations stamp the record with their own clock at append time;
/// timestamp ties between concurrent appends are acceptable.
pub trait AuditStore: Send + Sync {
    /// Stamp and persist one record
    fn append(&self, record: AuditLogRecord) -> ClubwatchResult<()>;
}

/// Audit store backed by a line-delimited JSON file
///
/// Each line is a complete JSON object representing one record. Appends are
/// flushed immediately.
pub struct JsonlAuditStore {
    log_path: PathBuf,
}

impl JsonlAuditStore {
    /// Create a store that appends to the given path
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Read all records in append order (oldest first)
    pub fn read_all(&self) -> ClubwatchResult<Vec<AuditLogRecord>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.log_path)
            .map_err(|e| ClubwatchError::Store(format!("Failed to open audit log: {}", e)))?;

        let reader = BufReader::new(file);
        let mut records = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| {
                ClubwatchError::Store(format!(
                    "Failed to read audit log line {}: {}",
                    line_num + 1,
                    e
                ))
            })?;

            if line.trim().is_empty() {
                continue;
            }

            let record: AuditLogRecord = serde_json::from_str(&line).map_err(|e| {
                ClubwatchError::Store(format!(
                    "Failed to parse audit record at line {}: {}",
                    line_num + 1,
                    e
                ))
            })?;

            records.push(record);
        }

        Ok(records)
    }

    /// Read the most recent N records
    pub fn read_recent(&self, count: usize) -> ClubwatchResult<Vec<AuditLogRecord>> {
        let all = self.read_all()?;
        let start = all.len().saturating_sub(count);
        Ok(all[start..].to_vec())
    }

    /// Find a record by its id, matching on prefix so truncated ids from the
    /// table view resolve too
    pub fn find(&self, id: &str) -> ClubwatchResult<Option<AuditLogRecord>> {
        let all = self.read_all()?;
        Ok(all
            .into_iter()
            .find(|record| record.id.to_string().starts_with(id)))
    }

    /// Number of records in the log
    pub fn record_count(&self) -> ClubwatchResult<usize> {
        Ok(self.read_all()?.len())
    }

    /// Check if the log file exists
    pub fn exists(&self) -> bool {
        self.log_path.exists()
    }

    /// Path to the log file
    pub fn path(&self) -> &PathBuf {
        &self.log_path
    }
}

impl AuditStore for JsonlAuditStore {
    fn append(&self, record: AuditLogRecord) -> ClubwatchResult<()> {
        let record = record.stamped(Utc::now());

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| ClubwatchError::Store(format!("Failed to open audit log: {}", e)))?;

        let json = serde_json::to_string(&record)
            .map_err(|e| ClubwatchError::Store(format!("Failed to serialize record: {}", e)))?;

        writeln!(file, "{}", json)
            .map_err(|e| ClubwatchError::Store(format!("Failed to write record: {}", e)))?;

        file.flush()
            .map_err(|e| ClubwatchError::Store(format!("Failed to flush audit log: {}", e)))?;

        Ok(())
    }
}

/// In-memory audit store for tests and library embedders
#[derive(Default)]
pub struct MemoryAuditStore {
    records: Mutex<Vec<AuditLogRecord>>,
}

impl MemoryAuditStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all appended records, in append order
    pub fn records(&self) -> Vec<AuditLogRecord> {
        self.records.lock().expect("audit store lock poisoned").clone()
    }
}

impl AuditStore for MemoryAuditStore {
    fn append(&self, record: AuditLogRecord) -> ClubwatchResult<()> {
        let record = record.stamped(Utc::now());
        self.records
            .lock()
            .map_err(|_| ClubwatchError::Store("audit store lock poisoned".to_string()))?
            .push(record);
        Ok(())
    }
}
