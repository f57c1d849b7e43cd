//! Ledger snapshot documents
//!
//! A snapshot is a flat copy of the participants and bills. The CLI host
//! reads one at startup and writes it back after a mutation so consecutive
//! invocations share a session. Writes go to a temp file first and are
//! renamed into place.

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{BillsplitError, BillsplitResult};
use crate::models::{Bill, Participant};

/// Current snapshot schema version
pub const SNAPSHOT_SCHEMA_VERSION: u32 = 1;

fn default_schema_version() -> u32 {
    SNAPSHOT_SCHEMA_VERSION
}

/// Serializable copy of a ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    #[serde(default)]
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub bills: Vec<Bill>,
}

impl Default for LedgerSnapshot {
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new())
    }
}

impl LedgerSnapshot {
    pub fn new(participants: Vec<Participant>, bills: Vec<Bill>) -> Self {
        Self {
            schema_version: SNAPSHOT_SCHEMA_VERSION,
            participants,
            bills,
        }
    }

    /// Check the schema version and the integrity of the records
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version > SNAPSHOT_SCHEMA_VERSION {
            return Err(format!(
                "Snapshot schema version {} is newer than supported version {}",
                self.schema_version, SNAPSHOT_SCHEMA_VERSION
            ));
        }

        validate_records(&self.participants, &self.bills)
    }
}

/// Check id uniqueness, record validity and that every bill reference points
/// at one of the given participants
pub fn validate_records(participants: &[Participant], bills: &[Bill]) -> Result<(), String> {
    let mut participant_ids = HashSet::new();
    for p in participants {
        if !participant_ids.insert(p.id) {
            return Err(format!("Duplicate participant id: {}", p.id));
        }
        p.validate()
            .map_err(|e| format!("Participant {}: {}", p.id, e))?;
    }

    let mut bill_ids = HashSet::new();
    for bill in bills {
        if !bill_ids.insert(bill.id) {
            return Err(format!("Duplicate bill id: {}", bill.id));
        }
        bill.validate()
            .map_err(|e| format!("Bill '{}': {}", bill.title, e))?;

        if let Some(missing) = bill
            .referenced_participants()
            .into_iter()
            .find(|id| !participant_ids.contains(id))
        {
            return Err(format!(
                "Bill '{}' references unknown participant {}",
                bill.title, missing
            ));
        }
    }

    Ok(())
}

/// Read a snapshot, returning an empty one if the file does not exist
pub fn read_snapshot<P: AsRef<Path>>(path: P) -> BillsplitResult<LedgerSnapshot> {
    let path = path.as_ref();

    if !path.exists() {
        return Ok(LedgerSnapshot::default());
    }

    let file = File::open(path).map_err(|e| {
        BillsplitError::Io(format!("Failed to open {}: {}", path.display(), e))
    })?;

    serde_json::from_reader(BufReader::new(file)).map_err(|e| {
        BillsplitError::Json(format!("Failed to parse {}: {}", path.display(), e))
    })
}

/// Write a snapshot atomically (write to temp, then rename)
pub fn write_snapshot_atomic<P: AsRef<Path>>(
    path: P,
    snapshot: &LedgerSnapshot,
) -> BillsplitResult<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            BillsplitError::Io(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    let temp_path = path.with_extension("json.tmp");

    let file = File::create(&temp_path)
        .map_err(|e| BillsplitError::Io(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, snapshot)
        .map_err(|e| BillsplitError::Json(format!("Failed to serialize ledger: {}", e)))?;

    writer
        .flush()
        .map_err(|e| BillsplitError::Io(format!("Failed to flush ledger: {}", e)))?;

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| BillsplitError::Io(format!("Failed to sync ledger: {}", e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        BillsplitError::Io(format!("Failed to rename temp file: {}", e))
    })?;

    tracing::debug!(
        path = %path.display(),
        participants = snapshot.participants.len(),
        bills = snapshot.bills.len(),
        "ledger snapshot written"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, NewBill};
    use tempfile::TempDir;

    fn sample() -> LedgerSnapshot {
        let alice = Participant::new("Alice");
        let bill = Bill::from_new(
            NewBill::new("Coffee")
                .item("Latte", Money::from_cents(450))
                .participants([alice.id]),
        )
        .unwrap();
        LedgerSnapshot::new(vec![alice], vec![bill])
    }

    #[test]
    fn test_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let snapshot = read_snapshot(temp_dir.path().join("ledger.json")).unwrap();
        assert_eq!(snapshot, LedgerSnapshot::default());
    }

    #[test]
    fn test_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("ledger.json");
        let snapshot = sample();

        write_snapshot_atomic(&path, &snapshot).unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());

        let back = read_snapshot(&path).unwrap();
        assert_eq!(back, snapshot);
    }

    #[test]
    fn test_corrupt_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ledger.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            read_snapshot(&path),
            Err(BillsplitError::Json(_))
        ));
    }

    #[test]
    fn test_validate() {
        assert!(sample().validate().is_ok());

        let mut orphaned = sample();
        orphaned.participants.clear();
        assert!(orphaned
            .validate()
            .unwrap_err()
            .contains("unknown participant"));

        let mut future = sample();
        future.schema_version = SNAPSHOT_SCHEMA_VERSION + 1;
        assert!(future.validate().is_err());

        let mut duplicated = sample();
        let copy = duplicated.participants[0].clone();
        duplicated.participants.push(copy);
        assert!(duplicated.validate().unwrap_err().contains("Duplicate"));
    }
}
