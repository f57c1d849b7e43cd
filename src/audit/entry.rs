//! Audit entries for ledger changes
//!
//! Each entry carries the affected participant or bill itself rather than
//! an untyped JSON blob, so a history line can say who was removed and
//! which bills lost a share because of it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Bill, BillId, Money, Participant, Split};

/// A bill that lost a participant when that participant was removed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetachedBill {
    /// Bill the participant was taken out of
    pub bill_id: BillId,

    /// Bill title at the time of the removal
    pub title: String,

    /// Splits deleted together with the participant
    pub dropped_splits: Vec<Split>,
}

impl DetachedBill {
    /// Record what removing a participant is about to take out of `bill`
    pub fn capture(bill: &Bill, dropped_splits: Vec<Split>) -> Self {
        Self {
            bill_id: bill.id,
            title: bill.title.clone(),
            dropped_splits,
        }
    }

    /// Net amount of the deleted splits; negative when the participant had
    /// advanced money on this bill
    pub fn dropped_amount(&self) -> Money {
        self.dropped_splits.iter().map(|s| s.amount).sum()
    }
}

/// A single change to the ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditEvent {
    /// A participant joined the group
    ParticipantAdded { participant: Participant },

    /// A participant left the group and was detached from `detached`
    ParticipantRemoved {
        participant: Participant,
        detached: Vec<DetachedBill>,
    },

    /// A bill was recorded
    BillAdded { bill: Bill },

    /// A bill was edited; `changes` has one line per field that moved
    BillUpdated {
        before: Bill,
        after: Bill,
        changes: Vec<String>,
    },

    /// A bill was deleted
    BillRemoved { bill: Bill },
}

/// A timestamped [`AuditEvent`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the change was made
    pub timestamp: DateTime<Utc>,

    /// What changed
    pub event: AuditEvent,
}

impl AuditEntry {
    pub fn new(event: AuditEvent) -> Self {
        Self {
            timestamp: Utc::now(),
            event,
        }
    }

    pub fn participant_added(participant: &Participant) -> Self {
        Self::new(AuditEvent::ParticipantAdded {
            participant: participant.clone(),
        })
    }

    pub fn participant_removed(participant: &Participant, detached: Vec<DetachedBill>) -> Self {
        Self::new(AuditEvent::ParticipantRemoved {
            participant: participant.clone(),
            detached,
        })
    }

    pub fn bill_added(bill: &Bill) -> Self {
        Self::new(AuditEvent::BillAdded { bill: bill.clone() })
    }

    pub fn bill_updated(before: &Bill, after: &Bill, changes: Vec<String>) -> Self {
        Self::new(AuditEvent::BillUpdated {
            before: before.clone(),
            after: after.clone(),
            changes,
        })
    }

    pub fn bill_removed(bill: &Bill) -> Self {
        Self::new(AuditEvent::BillRemoved { bill: bill.clone() })
    }

    /// One-line description of the change, without the timestamp
    pub fn summary(&self) -> String {
        match &self.event {
            AuditEvent::ParticipantAdded { participant } => {
                format!("Added participant {} ({})", participant.name, participant.id)
            }
            AuditEvent::ParticipantRemoved {
                participant,
                detached,
            } => {
                let mut line = format!("Removed participant {} ({})", participant.name, participant.id);
                if !detached.is_empty() {
                    line.push_str(&format!(", detached from {} bill(s)", detached.len()));
                }
                line
            }
            AuditEvent::BillAdded { bill } => format!(
                "Added bill '{}' ({}) for {} among {} participant(s)",
                bill.title,
                bill.id,
                bill.total_amount,
                bill.participants.len()
            ),
            AuditEvent::BillUpdated { after, changes, .. } => format!(
                "Updated bill '{}' ({}): {} change(s)",
                after.title,
                after.id,
                changes.len()
            ),
            AuditEvent::BillRemoved { bill } => format!(
                "Removed bill '{}' ({}) for {}",
                bill.title, bill.id, bill.total_amount
            ),
        }
    }

    /// Summary line prefixed with the timestamp, followed by indented details
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.summary()
        );

        match &self.event {
            AuditEvent::ParticipantRemoved { detached, .. } => {
                for d in detached {
                    output.push_str(&format!(
                        "\n  {} '{}': dropped {} split(s), net {}",
                        d.bill_id,
                        d.title,
                        d.dropped_splits.len(),
                        d.dropped_amount()
                    ));
                }
            }
            AuditEvent::BillUpdated { changes, .. } => {
                for change in changes {
                    output.push_str(&format!("\n  {}", change));
                }
            }
            _ => {}
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewBill;

    fn dinner(payer: &Participant, other: &Participant) -> Bill {
        Bill::from_new(
            NewBill::new("Dinner")
                .item("Food", Money::from_cents(6000))
                .participants([payer.id, other.id])
                .paid_by(payer.id),
        )
        .unwrap()
    }

    #[test]
    fn test_participant_added_summary() {
        let alice = Participant::new("Alice");
        let entry = AuditEntry::participant_added(&alice);
        assert_eq!(
            entry.summary(),
            format!("Added participant Alice ({})", alice.id)
        );
    }

    #[test]
    fn test_removal_lists_detached_bills() {
        let alice = Participant::new("Alice");
        let bob = Participant::new("Bob");
        let bill = dinner(&alice, &bob);
        let dropped: Vec<Split> = bill
            .splits
            .iter()
            .filter(|s| s.participant_id == alice.id)
            .cloned()
            .collect();

        let detached = DetachedBill::capture(&bill, dropped);
        // Alice consumed 30 and advanced 60
        assert_eq!(detached.dropped_amount(), Money::from_cents(-3000));

        let entry = AuditEntry::participant_removed(&alice, vec![detached]);
        let text = entry.format_human_readable();
        assert!(text.contains("Removed participant Alice"));
        assert!(text.contains("detached from 1 bill(s)"));
        assert!(text.contains("'Dinner': dropped 2 split(s), net -$30.00"));
    }

    #[test]
    fn test_bill_update_lists_changes() {
        let alice = Participant::new("Alice");
        let bob = Participant::new("Bob");
        let before = dinner(&alice, &bob);
        let mut after = before.clone();
        after.title = "Late dinner".into();

        let entry = AuditEntry::bill_updated(
            &before,
            &after,
            vec!["title: 'Dinner' -> 'Late dinner'".into()],
        );
        let text = entry.format_human_readable();
        assert!(text.contains("Updated bill 'Late dinner'"));
        assert!(text.contains("\n  title: 'Dinner' -> 'Late dinner'"));
    }

    #[test]
    fn test_serialization_keeps_typed_payload() {
        let alice = Participant::new("Alice");
        let bob = Participant::new("Bob");
        let entry = AuditEntry::bill_removed(&dinner(&alice, &bob));

        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"bill_removed\""));

        let back: AuditEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }
}
