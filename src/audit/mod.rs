//! Audit trail for ledger mutations
//!
//! Every participant and bill change is recorded as an [`AuditEvent`] in the
//! ledger's in-memory [`AuditJournal`]. Removing a participant is a single
//! event that also lists the bills it was detached from. The host drains
//! the journal into an append-only JSONL file with [`AuditLogger`].
//!
//! ```rust,ignore
//! let ledger = Ledger::new();
//! ledger.add_participant("Alice")?;
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! logger.log_batch(&ledger.drain_audit()?)?;
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, AuditEvent, DetachedBill};
pub use logger::AuditLogger;

/// In-memory list of audit entries not yet written anywhere
#[derive(Debug, Default)]
pub struct AuditJournal {
    entries: Vec<AuditEntry>,
}

impl AuditJournal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, entry: AuditEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[AuditEntry] {
        &self.entries
    }

    /// Take every pending entry, leaving the journal empty
    pub fn drain(&mut self) -> Vec<AuditEntry> {
        std::mem::take(&mut self.entries)
    }
}
