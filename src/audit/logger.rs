//! Append-only audit log file
//!
//! One JSON-encoded [`AuditEntry`] per line. The host appends the entries a
//! command produced in a single batch after the ledger has been saved.

use std::collections::VecDeque;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

use crate::error::{BillsplitError, BillsplitResult};

use super::entry::AuditEntry;

/// Reads and appends the JSONL audit log
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    pub fn exists(&self) -> bool {
        self.log_path.exists()
    }

    /// Append entries in order; an empty batch does not create the file
    pub fn log_batch(&self, entries: &[AuditEntry]) -> BillsplitResult<()> {
        if entries.is_empty() {
            return Ok(());
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| BillsplitError::Io(format!("Failed to open audit log: {}", e)))?;
        let mut writer = BufWriter::new(file);

        for entry in entries {
            serde_json::to_writer(&mut writer, entry)?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;

        tracing::debug!(
            count = entries.len(),
            path = %self.log_path.display(),
            "audit entries appended"
        );
        Ok(())
    }

    /// The last `count` entries, oldest first
    ///
    /// Only `count` entries are held in memory while scanning. Blank lines
    /// are skipped; a line that does not parse is an error naming its line
    /// number.
    pub fn read_recent(&self, count: usize) -> BillsplitResult<Vec<AuditEntry>> {
        if count == 0 || !self.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.log_path)
            .map_err(|e| BillsplitError::Io(format!("Failed to open audit log: {}", e)))?;

        let mut recent = VecDeque::with_capacity(count);
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let entry: AuditEntry = serde_json::from_str(&line).map_err(|e| {
                BillsplitError::Json(format!(
                    "Failed to parse audit entry at line {}: {}",
                    index + 1,
                    e
                ))
            })?;

            if recent.len() == count {
                recent.pop_front();
            }
            recent.push_back(entry);
        }

        Ok(recent.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::AuditEvent;
    use crate::models::Participant;
    use tempfile::TempDir;

    fn logger_in(dir: &TempDir) -> AuditLogger {
        AuditLogger::new(dir.path().join("audit.log"))
    }

    fn joined(name: &str) -> AuditEntry {
        AuditEntry::participant_added(&Participant::new(name))
    }

    fn names(entries: &[AuditEntry]) -> Vec<String> {
        entries
            .iter()
            .map(|e| match &e.event {
                AuditEvent::ParticipantAdded { participant } => participant.name.clone(),
                other => panic!("unexpected event {:?}", other),
            })
            .collect()
    }

    #[test]
    fn test_read_recent_keeps_the_tail() {
        let dir = TempDir::new().unwrap();
        let logger = logger_in(&dir);

        let batch: Vec<_> = ["Ann", "Ben", "Cat", "Dan", "Eve"]
            .into_iter()
            .map(joined)
            .collect();
        logger.log_batch(&batch).unwrap();

        assert_eq!(names(&logger.read_recent(2).unwrap()), ["Dan", "Eve"]);
        assert_eq!(logger.read_recent(50).unwrap().len(), 5);
        assert!(logger.read_recent(0).unwrap().is_empty());
    }

    #[test]
    fn test_batches_append_across_instances() {
        let dir = TempDir::new().unwrap();
        logger_in(&dir).log_batch(&[joined("Ann")]).unwrap();
        logger_in(&dir).log_batch(&[joined("Ben")]).unwrap();

        assert_eq!(names(&logger_in(&dir).read_recent(10).unwrap()), ["Ann", "Ben"]);
    }

    #[test]
    fn test_missing_log_and_empty_batch() {
        let dir = TempDir::new().unwrap();
        let logger = logger_in(&dir);

        assert!(logger.read_recent(10).unwrap().is_empty());
        logger.log_batch(&[]).unwrap();
        assert!(!logger.exists());
    }

    #[test]
    fn test_corrupt_line_reports_position() {
        let dir = TempDir::new().unwrap();
        let logger = logger_in(&dir);
        logger.log_batch(&[joined("Ann")]).unwrap();

        let mut file = OpenOptions::new()
            .append(true)
            .open(dir.path().join("audit.log"))
            .unwrap();
        writeln!(file, "not json").unwrap();

        let err = logger.read_recent(10).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }
}
