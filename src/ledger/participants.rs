//! Participant mutations and lookups

use crate::audit::{AuditEntry, DetachedBill};
use crate::error::{BillsplitError, BillsplitResult};
use crate::models::{Participant, ParticipantId};

use super::Ledger;

impl Ledger {
    /// Add a participant to the group
    ///
    /// The name is trimmed and must not be blank. Two participants may share
    /// a name; they are told apart by id.
    pub fn add_participant(&self, name: &str) -> BillsplitResult<Participant> {
        let participant = Participant::new(name);
        participant
            .validate()
            .map_err(|e| BillsplitError::Validation(e.to_string()))?;

        let mut state = self.write()?;
        state.participants.push(participant.clone());
        state
            .journal
            .record(AuditEntry::participant_added(&participant));

        tracing::info!(participant = %participant.id, name = %participant.name, "participant added");
        Ok(participant)
    }

    /// Remove a participant and detach it from every bill
    ///
    /// The participant is dropped from each bill's participant list and all
    /// of its splits are deleted. Bill totals and the remaining splits are
    /// not touched, so an affected bill may no longer account for its full
    /// total.
    pub fn remove_participant(&self, id: ParticipantId) -> BillsplitResult<Participant> {
        let mut state = self.write()?;

        let index = state
            .participants
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| BillsplitError::participant_not_found(id.to_string()))?;
        let participant = state.participants.remove(index);

        let mut detached = Vec::new();
        for bill in state.bills.iter_mut() {
            let dropped: Vec<_> = bill
                .splits
                .iter()
                .filter(|s| s.participant_id == id)
                .copied()
                .collect();
            let snapshot = DetachedBill::capture(bill, dropped);
            if bill.detach_participant(id) {
                detached.push(snapshot);
            }
        }

        let cascaded = detached.len();
        state
            .journal
            .record(AuditEntry::participant_removed(&participant, detached));

        tracing::info!(
            participant = %participant.id,
            name = %participant.name,
            bills_touched = cascaded,
            "participant removed"
        );
        Ok(participant)
    }

    pub fn get_participant(&self, id: ParticipantId) -> BillsplitResult<Option<Participant>> {
        Ok(self.read()?.participants.iter().find(|p| p.id == id).cloned())
    }

    /// Find a participant by name (case-insensitive), full id, or display id
    ///
    /// A name shared by several participants is a validation error; those
    /// participants have to be addressed by id.
    pub fn find_participant(&self, identifier: &str) -> BillsplitResult<Option<Participant>> {
        let state = self.read()?;
        let identifier = identifier.trim();

        let mut named = state.participants.iter().filter(|p| p.matches_name(identifier));
        if let Some(first) = named.next() {
            let others = named.count();
            if others > 0 {
                return Err(BillsplitError::Validation(format!(
                    "{} participants are named '{}'; use an ID instead",
                    others + 1,
                    identifier
                )));
            }
            return Ok(Some(first.clone()));
        }

        if let Ok(id) = identifier.parse::<ParticipantId>() {
            return Ok(state.participants.iter().find(|p| p.id == id).cloned());
        }

        Ok(state
            .participants
            .iter()
            .find(|p| p.id.to_string() == identifier)
            .cloned())
    }

    /// Like [`Ledger::find_participant`] but missing is an error
    pub fn resolve_participant(&self, identifier: &str) -> BillsplitResult<Participant> {
        self.find_participant(identifier)?
            .ok_or_else(|| BillsplitError::participant_not_found(identifier))
    }

    /// All participants in the order they were added
    pub fn participants(&self) -> BillsplitResult<Vec<Participant>> {
        Ok(self.read()?.participants.clone())
    }

    pub fn participant_count(&self) -> BillsplitResult<usize> {
        Ok(self.read()?.participants.len())
    }
}

#[cfg(test)]
mod tests {
    use crate::audit::AuditEvent;
    use crate::ledger::Ledger;
    use crate::models::{Money, NewBill, ParticipantId};

    #[test]
    fn test_add_participant() {
        let ledger = Ledger::new();
        let alice = ledger.add_participant(" Alice ").unwrap();
        assert_eq!(alice.name, "Alice");
        assert_eq!(ledger.participant_count().unwrap(), 1);
    }

    #[test]
    fn test_add_participant_rejects_only_blank_names() {
        let ledger = Ledger::new();
        assert!(ledger.add_participant("  ").unwrap_err().is_validation());

        let first = ledger.add_participant("Alice").unwrap();
        let second = ledger.add_participant("alice").unwrap();
        assert_ne!(first.id, second.id);
        assert_eq!(ledger.participant_count().unwrap(), 2);
    }

    #[test]
    fn test_shared_name_needs_an_id() {
        let ledger = Ledger::new();
        let first = ledger.add_participant("Sam").unwrap();
        let second = ledger.add_participant("Sam").unwrap();

        let err = ledger.resolve_participant("sam").unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("2 participants are named 'sam'"));

        assert_eq!(
            ledger.resolve_participant(&second.id.to_string()).unwrap().id,
            second.id
        );
        ledger.remove_participant(first.id).unwrap();
        assert_eq!(ledger.resolve_participant("Sam").unwrap().id, second.id);
    }

    #[test]
    fn test_find_participant() {
        let ledger = Ledger::new();
        let alice = ledger.add_participant("Alice").unwrap();

        assert_eq!(ledger.find_participant("ALICE").unwrap().unwrap().id, alice.id);
        assert_eq!(
            ledger
                .find_participant(&alice.id.as_uuid().to_string())
                .unwrap()
                .unwrap()
                .id,
            alice.id
        );
        assert_eq!(
            ledger
                .find_participant(&alice.id.to_string())
                .unwrap()
                .unwrap()
                .id,
            alice.id
        );
        assert!(ledger.find_participant("Zed").unwrap().is_none());
        assert!(ledger.resolve_participant("Zed").unwrap_err().is_not_found());
    }

    #[test]
    fn test_remove_participant_cascades() {
        let ledger = Ledger::new();
        let a = ledger.add_participant("A").unwrap();
        let b = ledger.add_participant("B").unwrap();
        let c = ledger.add_participant("C").unwrap();

        let shared = ledger
            .add_bill(
                NewBill::new("Dinner")
                    .item("Food", Money::from_cents(9000))
                    .participants([a.id, b.id, c.id])
                    .paid_by(a.id),
            )
            .unwrap();
        let untouched = ledger
            .add_bill(
                NewBill::new("Snacks")
                    .item("Chips", Money::from_cents(600))
                    .participants([b.id, c.id]),
            )
            .unwrap();
        ledger.drain_audit().unwrap();

        let removed = ledger.remove_participant(a.id).unwrap();
        assert_eq!(removed.id, a.id);
        assert!(ledger.get_participant(a.id).unwrap().is_none());

        let shared = ledger.get_bill(shared.id).unwrap().unwrap();
        assert!(!shared.involves(a.id));
        assert_eq!(shared.participants, vec![b.id, c.id]);
        assert_eq!(shared.splits.len(), 2);
        assert_eq!(shared.total_amount, Money::from_cents(9000));

        let after = ledger.get_bill(untouched.id).unwrap().unwrap();
        assert_eq!(after.splits, untouched.splits);

        let audit = ledger.drain_audit().unwrap();
        assert_eq!(audit.len(), 1);
        match &audit[0].event {
            AuditEvent::ParticipantRemoved {
                participant,
                detached,
            } => {
                assert_eq!(participant.id, a.id);
                assert_eq!(detached.len(), 1);
                assert_eq!(detached[0].bill_id, shared.id);
                // A's 30 share and 90 advance
                assert_eq!(detached[0].dropped_splits.len(), 2);
                assert_eq!(detached[0].dropped_amount(), Money::from_cents(-6000));
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_remove_unknown_participant() {
        let ledger = Ledger::new();
        let err = ledger.remove_participant(ParticipantId::new()).unwrap_err();
        assert!(err.is_not_found());
    }
}
