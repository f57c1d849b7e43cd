//! Bill mutations and lookups

use crate::audit::AuditEntry;
use crate::error::{BillsplitError, BillsplitResult};
use crate::models::{Bill, BillId, BillUpdate, NewBill};

use super::Ledger;

impl Ledger {
    /// Record a new bill and assign it an id
    ///
    /// Every participant and split holder must already be in the ledger.
    /// Split problems (shares not matching the total, splits not netting to
    /// zero) are logged as warnings but do not reject the bill; use
    /// [`Bill::split_warnings`] to surface them.
    pub fn add_bill(&self, input: NewBill) -> BillsplitResult<Bill> {
        let bill = Bill::from_new(input).map_err(|e| BillsplitError::Validation(e.to_string()))?;

        let mut state = self.write()?;

        if let Some(missing) = state.dangling_reference(&bill) {
            return Err(BillsplitError::participant_not_found(missing.to_string()));
        }

        for warning in bill.split_warnings() {
            tracing::warn!(bill = %bill.id, title = %bill.title, "{}", warning);
        }

        state.bills.push(bill.clone());
        state.journal.record(AuditEntry::bill_added(&bill));

        tracing::info!(
            bill = %bill.id,
            title = %bill.title,
            total = %bill.total_amount,
            participants = bill.participants.len(),
            "bill added"
        );
        Ok(bill)
    }

    /// Apply a partial update to a bill
    ///
    /// The update is applied to a copy; the stored bill only changes if the
    /// result validates and references known participants.
    pub fn update_bill(&self, id: BillId, update: BillUpdate) -> BillsplitResult<Bill> {
        let mut state = self.write()?;

        let index = state
            .bills
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| BillsplitError::bill_not_found(id.to_string()))?;

        let before = state.bills[index].clone();
        let mut updated = before.clone();
        let changes = updated
            .apply(update)
            .map_err(|e| BillsplitError::Validation(e.to_string()))?;

        if let Some(missing) = state.dangling_reference(&updated) {
            return Err(BillsplitError::participant_not_found(missing.to_string()));
        }

        if changes.is_empty() {
            return Ok(updated);
        }

        for warning in updated.split_warnings() {
            tracing::warn!(bill = %updated.id, title = %updated.title, "{}", warning);
        }

        tracing::info!(bill = %updated.id, changes = changes.len(), "bill updated");
        state.bills[index] = updated.clone();
        state
            .journal
            .record(AuditEntry::bill_updated(&before, &updated, changes));
        Ok(updated)
    }

    /// Remove a bill
    pub fn remove_bill(&self, id: BillId) -> BillsplitResult<Bill> {
        let mut state = self.write()?;

        let index = state
            .bills
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| BillsplitError::bill_not_found(id.to_string()))?;
        let bill = state.bills.remove(index);

        state.journal.record(AuditEntry::bill_removed(&bill));

        tracing::info!(bill = %bill.id, title = %bill.title, "bill removed");
        Ok(bill)
    }

    pub fn get_bill(&self, id: BillId) -> BillsplitResult<Option<Bill>> {
        Ok(self.read()?.bills.iter().find(|b| b.id == id).cloned())
    }

    /// Find a bill by full id or display id (`bill-xxxxxxxx`)
    pub fn find_bill(&self, identifier: &str) -> BillsplitResult<Option<Bill>> {
        let state = self.read()?;
        let identifier = identifier.trim();

        if let Ok(id) = identifier.parse::<BillId>() {
            return Ok(state.bills.iter().find(|b| b.id == id).cloned());
        }

        Ok(state
            .bills
            .iter()
            .find(|b| b.id.to_string() == identifier)
            .cloned())
    }

    /// Like [`Ledger::find_bill`] but missing is an error
    pub fn resolve_bill(&self, identifier: &str) -> BillsplitResult<Bill> {
        self.find_bill(identifier)?
            .ok_or_else(|| BillsplitError::bill_not_found(identifier))
    }

    /// All bills in the order they were added
    pub fn bills(&self) -> BillsplitResult<Vec<Bill>> {
        Ok(self.read()?.bills.clone())
    }

    pub fn bill_count(&self) -> BillsplitResult<usize> {
        Ok(self.read()?.bills.len())
    }
}
