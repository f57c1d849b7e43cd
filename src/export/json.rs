//! JSON Export functionality
//!
//! Exports the whole ledger to JSON with schema versioning, and reads such
//! an export back for import.

use std::io::Write;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{BillsplitError, BillsplitResult};
use crate::ledger::{validate_records, Ledger, LedgerSnapshot};
use crate::models::{Bill, Money, Participant};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full ledger export structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub participants: Vec<Participant>,

    pub bills: Vec<Bill>,

    /// Export metadata
    pub metadata: ExportMetadata,
}

/// Export metadata for reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub participant_count: usize,
    pub bill_count: usize,
    /// Sum of every bill total
    pub total_spent: Money,
    pub earliest_bill: Option<NaiveDate>,
    pub latest_bill: Option<NaiveDate>,
}

impl FullExport {
    /// Create an export from a ledger's current state
    pub fn from_ledger(ledger: &Ledger) -> BillsplitResult<Self> {
        let snapshot = ledger.snapshot()?;
        Ok(Self::from_snapshot(snapshot))
    }

    pub fn from_snapshot(snapshot: LedgerSnapshot) -> Self {
        let bills = snapshot.bills;
        let metadata = ExportMetadata {
            participant_count: snapshot.participants.len(),
            bill_count: bills.len(),
            total_spent: bills.iter().map(|b| b.total_amount).sum(),
            earliest_bill: bills.iter().map(|b| b.date).min(),
            latest_bill: bills.iter().map(|b| b.date).max(),
        };

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            participants: snapshot.participants,
            bills,
            metadata,
        }
    }

    /// Validate the export structure
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }

        validate_records(&self.participants, &self.bills)
    }

    /// Convert back into a ledger snapshot
    pub fn into_snapshot(self) -> LedgerSnapshot {
        LedgerSnapshot::new(self.participants, self.bills)
    }
}

/// Export the full ledger to JSON
pub fn export_full_json<W: Write>(
    ledger: &Ledger,
    writer: &mut W,
    pretty: bool,
) -> BillsplitResult<()> {
    let export = FullExport::from_ledger(ledger)?;

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| BillsplitError::Export(e.to_string()))?;

    Ok(())
}

/// Import from a JSON export
pub fn import_from_json(json_str: &str) -> BillsplitResult<FullExport> {
    let export: FullExport =
        serde_json::from_str(json_str).map_err(|e| BillsplitError::Import(e.to_string()))?;

    export.validate().map_err(BillsplitError::Import)?;

    Ok(export)
}
