//! Net balances per participant
//!
//! A negative balance means the participant owes the group; a positive
//! balance means the group owes the participant.

use serde::{Deserialize, Serialize};

use super::ids::ParticipantId;
use super::money::Money;
use super::settlement::Settlement;

/// One participant's signed net balance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    /// Whose balance this is
    pub participant_id: ParticipantId,

    /// Negative when the participant owes, positive when owed
    pub amount: Money,
}

impl Balance {
    pub fn new(participant_id: ParticipantId, amount: Money) -> Self {
        Self {
            participant_id,
            amount,
        }
    }

    pub fn is_debtor(&self) -> bool {
        self.amount.is_negative()
    }

    pub fn is_creditor(&self) -> bool {
        self.amount.is_positive()
    }
}

/// Balances for a set of participants, kept in insertion order
///
/// Order matters: it is the tie-break when two participants owe or are
/// owed the same amount.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BalanceSheet {
    entries: Vec<Balance>,
}

impl BalanceSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a participant with a zero balance if not already present
    pub fn open(&mut self, participant_id: ParticipantId) {
        if self.position(participant_id).is_none() {
            self.entries.push(Balance::new(participant_id, Money::zero()));
        }
    }

    /// Add `delta` to a participant's balance, opening it if needed
    pub fn adjust(&mut self, participant_id: ParticipantId, delta: Money) {
        match self.position(participant_id) {
            Some(idx) => self.entries[idx].amount += delta,
            None => self.entries.push(Balance::new(participant_id, delta)),
        }
    }

    pub fn get(&self, participant_id: ParticipantId) -> Option<Money> {
        self.position(participant_id).map(|idx| self.entries[idx].amount)
    }

    pub fn contains(&self, participant_id: ParticipantId) -> bool {
        self.position(participant_id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Balance> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of every balance; zero for a consistent ledger
    pub fn total(&self) -> Money {
        self.entries.iter().map(|b| b.amount).sum()
    }

    pub fn is_zero_sum(&self) -> bool {
        self.total().is_zero()
    }

    /// Whether every balance is exactly zero
    pub fn is_settled(&self) -> bool {
        self.entries.iter().all(|b| b.amount.is_zero())
    }

    /// The balances that would remain after carrying out the transfers
    pub fn apply(&self, settlements: &[Settlement]) -> BalanceSheet {
        let mut after = self.clone();
        for s in settlements {
            after.adjust(s.from, s.amount);
            after.adjust(s.to, -s.amount);
        }
        after
    }

    fn position(&self, participant_id: ParticipantId) -> Option<usize> {
        self.entries
            .iter()
            .position(|b| b.participant_id == participant_id)
    }
}

impl FromIterator<(ParticipantId, Money)> for BalanceSheet {
    fn from_iter<I: IntoIterator<Item = (ParticipantId, Money)>>(iter: I) -> Self {
        let mut sheet = BalanceSheet::new();
        for (id, amount) in iter {
            sheet.adjust(id, amount);
        }
        sheet
    }
}

impl<'a> IntoIterator for &'a BalanceSheet {
    type Item = &'a Balance;
    type IntoIter = std::slice::Iter<'a, Balance>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
