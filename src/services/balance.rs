//! Balance service
//!
//! Derives each participant's net balance from the bills' splits. A split
//! is subtracted from its holder's balance: consumption pushes a balance
//! negative (owes), an advance pushes it positive (is owed).

use crate::error::BillsplitResult;
use crate::ledger::Ledger;
use crate::models::{BalanceSheet, Bill, Money, Participant, ParticipantId};

/// Compute net balances for every participant
///
/// Every participant starts at zero, so participants with no splits still
/// appear in the sheet. Splits held by someone not in `participants` are
/// skipped and logged; the ledger never produces them.
pub fn compute_balances(participants: &[Participant], bills: &[Bill]) -> BalanceSheet {
    let mut sheet = BalanceSheet::new();
    for p in participants {
        sheet.open(p.id);
    }

    let mut splits = 0usize;
    for bill in bills {
        for split in &bill.splits {
            if !sheet.contains(split.participant_id) {
                tracing::warn!(
                    bill = %bill.id,
                    participant = %split.participant_id,
                    "split references unknown participant, skipping"
                );
                continue;
            }
            sheet.adjust(split.participant_id, -split.amount);
            splits += 1;
        }
    }

    tracing::debug!(
        participants = sheet.len(),
        bills = bills.len(),
        splits,
        total = %sheet.total(),
        "balances computed"
    );
    sheet
}

/// Service for balance queries against a ledger
pub struct BalanceService<'a> {
    ledger: &'a Ledger,
}

impl<'a> BalanceService<'a> {
    /// Create a new balance service
    pub fn new(ledger: &'a Ledger) -> Self {
        Self { ledger }
    }

    /// Balances for the whole group
    pub fn balances(&self) -> BillsplitResult<BalanceSheet> {
        self.ledger.with_view(compute_balances)
    }

    /// One participant's balance
    pub fn balance_of(&self, participant_id: ParticipantId) -> BillsplitResult<Option<Money>> {
        Ok(self.balances()?.get(participant_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewBill, Split, SplitPlan};

    fn people(names: &[&str]) -> Vec<Participant> {
        names.iter().map(|n| Participant::new(*n)).collect()
    }

    #[test]
    fn test_empty_inputs() {
        assert!(compute_balances(&[], &[]).is_empty());

        let group = people(&["A", "B"]);
        let sheet = compute_balances(&group, &[]);
        assert_eq!(sheet.len(), 2);
        assert!(sheet.is_settled());
    }

    #[test]
    fn test_splits_without_payer_only_subtract() {
        let group = people(&["A", "B", "C"]);
        let bill = Bill::from_new(
            NewBill::new("Dinner")
                .item("Food", Money::from_cents(9000))
                .participants(group.iter().map(|p| p.id)),
        )
        .unwrap();

        let sheet = compute_balances(&group, &[bill]);
        for p in &group {
            assert_eq!(sheet.get(p.id), Some(Money::from_cents(-3000)));
        }
        assert_eq!(sheet.total(), Money::from_cents(-9000));
    }

    #[test]
    fn test_payer_advance_offsets_consumption() {
        let group = people(&["A", "B", "C"]);
        let bill = Bill::from_new(
            NewBill::new("Dinner")
                .item("Food", Money::from_cents(9000))
                .participants(group.iter().map(|p| p.id))
                .paid_by(group[0].id),
        )
        .unwrap();

        let sheet = compute_balances(&group, &[bill]);
        assert_eq!(sheet.get(group[0].id), Some(Money::from_cents(6000)));
        assert_eq!(sheet.get(group[1].id), Some(Money::from_cents(-3000)));
        assert_eq!(sheet.get(group[2].id), Some(Money::from_cents(-3000)));
        assert!(sheet.is_zero_sum());
    }

    #[test]
    fn test_custom_splits_are_used_verbatim() {
        let group = people(&["A", "B"]);
        let (a, b) = (group[0].id, group[1].id);
        let bill = Bill::from_new(
            NewBill::new("Taxi")
                .item("Ride", Money::from_cents(1000))
                .participants([a, b])
                .split(SplitPlan::Custom(vec![
                    Split::new(a, Money::from_cents(700)),
                    Split::new(b, Money::from_cents(300)),
                    Split::advance(b, Money::from_cents(1000)),
                ])),
        )
        .unwrap();

        let sheet = compute_balances(&group, &[bill]);
        assert_eq!(sheet.get(a), Some(Money::from_cents(-700)));
        assert_eq!(sheet.get(b), Some(Money::from_cents(700)));
    }

    #[test]
    fn test_unknown_split_holder_is_skipped() {
        let group = people(&["A"]);
        let stranger = ParticipantId::new();
        let bill = Bill::from_new(
            NewBill::new("Odd")
                .item("Thing", Money::from_cents(500))
                .participants([group[0].id, stranger]),
        )
        .unwrap();

        let sheet = compute_balances(&group, &[bill]);
        assert_eq!(sheet.len(), 1);
        assert!(!sheet.contains(stranger));
        assert_eq!(sheet.get(group[0].id), Some(Money::from_cents(-250)));
    }

    #[test]
    fn test_is_deterministic() {
        let group = people(&["A", "B", "C"]);
        let bills = vec![
            Bill::from_new(
                NewBill::new("One")
                    .item("x", Money::from_cents(1000))
                    .participants(group.iter().map(|p| p.id))
                    .paid_by(group[1].id),
            )
            .unwrap(),
            Bill::from_new(
                NewBill::new("Two")
                    .item("y", Money::from_cents(333))
                    .participants([group[0].id, group[2].id])
                    .paid_by(group[2].id),
            )
            .unwrap(),
        ];

        assert_eq!(
            compute_balances(&group, &bills),
            compute_balances(&group, &bills)
        );
    }

    #[test]
    fn test_service_reads_ledger() {
        let ledger = Ledger::new();
        let a = ledger.add_participant("A").unwrap();
        let b = ledger.add_participant("B").unwrap();
        ledger
            .add_bill(
                NewBill::new("Lunch")
                    .item("Sandwiches", Money::from_cents(2000))
                    .participants([a.id, b.id])
                    .paid_by(b.id),
            )
            .unwrap();

        let service = BalanceService::new(&ledger);
        assert_eq!(service.balance_of(a.id).unwrap(), Some(Money::from_cents(-1000)));
        assert_eq!(service.balance_of(b.id).unwrap(), Some(Money::from_cents(1000)));
        assert!(service.balances().unwrap().is_zero_sum());
    }
}
