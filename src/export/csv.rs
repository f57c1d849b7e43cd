//! CSV Export functionality
//!
//! Exports bills, balances and settlements in a spreadsheet-friendly form.
//! Amounts are written as plain decimals without a currency symbol.

use std::io::Write;

use crate::display::participant_name;
use crate::error::{BillsplitError, BillsplitResult};
use crate::models::{BalanceSheet, Bill, Money, Participant, SettlementPlan};

fn export_err(e: ::csv::Error) -> BillsplitError {
    BillsplitError::Export(e.to_string())
}

fn amount(money: Money) -> String {
    money.format_with_symbol("")
}

/// Export bills, one row per bill
pub fn export_bills_csv<W: Write>(
    bills: &[Bill],
    participants: &[Participant],
    writer: W,
) -> BillsplitResult<()> {
    let mut csv = ::csv::Writer::from_writer(writer);

    csv.write_record([
        "ID",
        "Date",
        "Title",
        "Category",
        "Tags",
        "Items",
        "Participants",
        "Total",
    ])
    .map_err(export_err)?;

    for bill in bills {
        let items = bill
            .items
            .iter()
            .map(|i| format!("{}={}", i.description, amount(i.amount)))
            .collect::<Vec<_>>()
            .join("; ");
        let names = bill
            .participants
            .iter()
            .map(|&id| participant_name(participants, id))
            .collect::<Vec<_>>()
            .join("; ");

        csv.write_record([
            bill.id.as_uuid().to_string(),
            bill.date.to_string(),
            bill.title.clone(),
            bill.category.clone().unwrap_or_default(),
            bill.tags.join("; "),
            items,
            names,
            amount(bill.total_amount),
        ])
        .map_err(export_err)?;
    }

    csv.flush()
        .map_err(|e| BillsplitError::Export(e.to_string()))?;
    Ok(())
}

/// Export each participant's net balance
pub fn export_balances_csv<W: Write>(
    balances: &BalanceSheet,
    participants: &[Participant],
    writer: W,
) -> BillsplitResult<()> {
    let mut csv = ::csv::Writer::from_writer(writer);

    csv.write_record(["Participant", "Balance"])
        .map_err(export_err)?;
    for b in balances {
        csv.write_record([participant_name(participants, b.participant_id), amount(b.amount)])
            .map_err(export_err)?;
    }

    csv.flush()
        .map_err(|e| BillsplitError::Export(e.to_string()))?;
    Ok(())
}

/// Export settle-up transfers in the order they were matched
pub fn export_settlements_csv<W: Write>(
    plan: &SettlementPlan,
    participants: &[Participant],
    writer: W,
) -> BillsplitResult<()> {
    let mut csv = ::csv::Writer::from_writer(writer);

    csv.write_record(["From", "To", "Amount"])
        .map_err(export_err)?;
    for s in plan.iter() {
        csv.write_record([
            participant_name(participants, s.from),
            participant_name(participants, s.to),
            amount(s.amount),
        ])
        .map_err(export_err)?;
    }

    csv.flush()
        .map_err(|e| BillsplitError::Export(e.to_string()))?;
    Ok(())
}
