//! In-memory ledger of participants and bills
//!
//! The ledger owns all session state. Every mutation and every read used
//! for a balance or settlement computation goes through a single lock, so
//! a computation always sees a consistent snapshot even if the ledger is
//! shared behind a service.
//!
//! Mutations enforce referential integrity: bills may only reference
//! participants that exist, and removing a participant cascades into every
//! bill.

mod bills;
mod participants;
pub mod snapshot;

pub use snapshot::{
    read_snapshot, validate_records, write_snapshot_atomic, LedgerSnapshot, SNAPSHOT_SCHEMA_VERSION,
};

use std::collections::HashSet;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::audit::{AuditEntry, AuditJournal};
use crate::error::{BillsplitError, BillsplitResult};
use crate::models::{Bill, Participant, ParticipantId};

#[derive(Debug, Default)]
struct LedgerState {
    participants: Vec<Participant>,
    bills: Vec<Bill>,
    journal: AuditJournal,
}

impl LedgerState {
    fn participant_ids(&self) -> HashSet<ParticipantId> {
        self.participants.iter().map(|p| p.id).collect()
    }

    /// First participant referenced by the bill that is not in the ledger
    fn dangling_reference(&self, bill: &Bill) -> Option<ParticipantId> {
        let known = self.participant_ids();
        bill.referenced_participants()
            .into_iter()
            .find(|id| !known.contains(id))
    }
}

/// The group's participants and bills
#[derive(Debug, Default)]
pub struct Ledger {
    state: RwLock<LedgerState>,
}

impl Ledger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a ledger from a snapshot, rejecting dangling references
    pub fn from_snapshot(snapshot: LedgerSnapshot) -> BillsplitResult<Self> {
        snapshot.validate().map_err(BillsplitError::Import)?;

        let state = LedgerState {
            participants: snapshot.participants,
            bills: snapshot.bills,
            journal: AuditJournal::new(),
        };

        tracing::debug!(
            participants = state.participants.len(),
            bills = state.bills.len(),
            "ledger restored from snapshot"
        );

        Ok(Self {
            state: RwLock::new(state),
        })
    }

    /// Copy of the current participants and bills
    pub fn snapshot(&self) -> BillsplitResult<LedgerSnapshot> {
        let state = self.read()?;
        Ok(LedgerSnapshot::new(
            state.participants.clone(),
            state.bills.clone(),
        ))
    }

    /// Run a read-only computation against a consistent view of the ledger
    pub fn with_view<R>(&self, f: impl FnOnce(&[Participant], &[Bill]) -> R) -> BillsplitResult<R> {
        let state = self.read()?;
        Ok(f(&state.participants, &state.bills))
    }

    /// Pending audit entries, oldest first
    pub fn audit_entries(&self) -> BillsplitResult<Vec<AuditEntry>> {
        Ok(self.read()?.journal.entries().to_vec())
    }

    /// Take all pending audit entries
    pub fn drain_audit(&self) -> BillsplitResult<Vec<AuditEntry>> {
        Ok(self.write()?.journal.drain())
    }

    fn read(&self) -> BillsplitResult<RwLockReadGuard<'_, LedgerState>> {
        self.state
            .read()
            .map_err(|e| BillsplitError::Ledger(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> BillsplitResult<RwLockWriteGuard<'_, LedgerState>> {
        self.state
            .write()
            .map_err(|e| BillsplitError::Ledger(format!("Failed to acquire write lock: {}", e)))
    }
}
