//! Settlement model
//!
//! Settlements are transient: they are recomputed from the ledger on every
//! query and never stored.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::balance::Balance;
use super::ids::ParticipantId;
use super::money::Money;

/// A single transfer: `from` pays `amount` to `to`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    /// Participant who pays
    pub from: ParticipantId,

    /// Participant who receives
    pub to: ParticipantId,

    /// Always positive
    pub amount: Money,
}

impl Settlement {
    pub fn new(from: ParticipantId, to: ParticipantId, amount: Money) -> Self {
        Self { from, to, amount }
    }
}

impl fmt::Display for Settlement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} pays {} {}", self.from, self.to, self.amount)
    }
}

/// The outcome of settling a balance sheet
///
/// When the balances do not sum to zero one side runs out first. The
/// transfers are still returned, together with the net imbalance and the
/// participants whose balances could not be settled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementPlan {
    /// Transfers in the order they were matched
    pub settlements: Vec<Settlement>,
    /// Sum of all input balances
    pub imbalance: Money,
    /// Balances left over once one side was exhausted
    pub unsettled: Vec<Balance>,
}

impl SettlementPlan {
    /// True when every debt found a matching credit
    pub fn is_complete(&self) -> bool {
        self.unsettled.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.settlements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.settlements.len()
    }

    /// Total money moved by the plan
    pub fn total_transferred(&self) -> Money {
        self.settlements.iter().map(|s| s.amount).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Settlement> {
        self.settlements.iter()
    }
}
