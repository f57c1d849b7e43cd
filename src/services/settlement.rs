//! Settlement service
//!
//! Turns a balance sheet into a short list of transfers using greedy
//! largest-to-largest matching: both sides are ranked by amount, and the
//! debtor at the front of the ranking pays the creditor at the front, for
//! whichever of the two amounts is smaller. Every round fully settles at
//! least one side, so a group of `n` participants needs at most `n - 1`
//! transfers. The result is not guaranteed to be the global minimum.

use std::collections::VecDeque;

use serde::Serialize;

use crate::error::BillsplitResult;
use crate::ledger::Ledger;
use crate::models::{
    Balance, BalanceSheet, Bill, Money, Participant, ParticipantId, Settlement, SettlementPlan,
};

use super::balance::compute_balances;

/// Compute the transfers that bring every balance to zero
///
/// Debtors and creditors are each sorted once, largest first. The two
/// fronts are matched until one of them is paid off, which moves that
/// list on; a partly paid front stays where it is.
///
/// Never fails. If the balances do not sum to zero one side runs out first;
/// the leftovers are returned in [`SettlementPlan::unsettled`] and the sum
/// in [`SettlementPlan::imbalance`].
pub fn compute_settlements(balances: &BalanceSheet) -> SettlementPlan {
    // Magnitudes, both positive
    let mut debtors: Vec<(ParticipantId, Money)> = balances
        .iter()
        .filter(|b| b.is_debtor())
        .map(|b| (b.participant_id, -b.amount))
        .collect();
    let mut creditors: Vec<(ParticipantId, Money)> = balances
        .iter()
        .filter(|b| b.is_creditor())
        .map(|b| (b.participant_id, b.amount))
        .collect();

    // Stable, so equal amounts keep sheet order
    debtors.sort_by(|a, b| b.1.cmp(&a.1));
    creditors.sort_by(|a, b| b.1.cmp(&a.1));

    let mut debtors: VecDeque<_> = debtors.into();
    let mut creditors: VecDeque<_> = creditors.into();

    let mut settlements = Vec::new();
    while let (Some(debtor), Some(creditor)) = (debtors.front_mut(), creditors.front_mut()) {
        let amount = debtor.1.min(creditor.1);

        tracing::debug!(
            from = %debtor.0,
            to = %creditor.0,
            amount = %amount,
            "matched transfer"
        );
        settlements.push(Settlement::new(debtor.0, creditor.0, amount));

        debtor.1 -= amount;
        creditor.1 -= amount;
        let (debtor_done, creditor_done) = (debtor.1.is_zero(), creditor.1.is_zero());
        if debtor_done {
            debtors.pop_front();
        }
        if creditor_done {
            creditors.pop_front();
        }
    }

    let unsettled: Vec<Balance> = debtors
        .into_iter()
        .map(|(id, owed)| Balance::new(id, -owed))
        .chain(creditors.into_iter().map(|(id, due)| Balance::new(id, due)))
        .collect();

    let imbalance = balances.total();
    if !unsettled.is_empty() {
        tracing::warn!(
            imbalance = %imbalance,
            unsettled = unsettled.len(),
            "balances do not sum to zero; settlement is incomplete"
        );
    }

    SettlementPlan {
        settlements,
        imbalance,
        unsettled,
    }
}

/// Balances and settlements straight from participants and bills
pub fn settle_bills(participants: &[Participant], bills: &[Bill]) -> SettlementPlan {
    compute_settlements(&compute_balances(participants, bills))
}

/// Balances together with the plan computed from them
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettleUp {
    pub balances: BalanceSheet,
    pub plan: SettlementPlan,
}

/// Service for settle-up queries against a ledger
pub struct SettlementService<'a> {
    ledger: &'a Ledger,
}

impl<'a> SettlementService<'a> {
    /// Create a new settlement service
    pub fn new(ledger: &'a Ledger) -> Self {
        Self { ledger }
    }

    /// Compute balances and settlements from one consistent view
    pub fn settle_up(&self) -> BillsplitResult<SettleUp> {
        self.ledger.with_view(|participants, bills| {
            let balances = compute_balances(participants, bills);
            let plan = compute_settlements(&balances);
            SettleUp { balances, plan }
        })
    }

    /// Only the transfers
    pub fn settlements(&self) -> BillsplitResult<SettlementPlan> {
        Ok(self.settle_up()?.plan)
    }
}
