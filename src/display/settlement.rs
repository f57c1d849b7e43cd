//! Balance and settlement display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::participant_name;
use crate::config::Settings;
use crate::models::{BalanceSheet, Participant, SettlementPlan};

#[derive(Tabled)]
struct BalanceRow {
    #[tabled(rename = "Participant")]
    name: String,
    #[tabled(rename = "Balance")]
    balance: String,
    #[tabled(rename = "Status")]
    status: &'static str,
}

#[derive(Tabled)]
struct SettlementRow {
    #[tabled(rename = "From")]
    from: String,
    #[tabled(rename = "To")]
    to: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Format each participant's net balance as a table
pub fn format_balances(
    balances: &BalanceSheet,
    participants: &[Participant],
    settings: &Settings,
) -> String {
    if balances.is_empty() {
        return "No participants found.".to_string();
    }

    let rows = balances.iter().map(|b| BalanceRow {
        name: participant_name(participants, b.participant_id),
        balance: settings.format_money(b.amount),
        status: if b.is_debtor() {
            "owes"
        } else if b.is_creditor() {
            "is owed"
        } else {
            "settled"
        },
    });

    Table::new(rows).with(Style::psql()).to_string()
}

/// Format a settlement plan, with a note when it could not fully settle
pub fn format_settlement_plan(
    plan: &SettlementPlan,
    participants: &[Participant],
    settings: &Settings,
) -> String {
    let mut output = String::new();

    if plan.is_empty() && plan.is_complete() {
        output.push_str("Everyone is settled up.\n");
    } else if plan.is_empty() {
        output.push_str("No transfers can be made.\n");
    } else {
        let rows = plan.iter().map(|s| SettlementRow {
            from: participant_name(participants, s.from),
            to: participant_name(participants, s.to),
            amount: settings.format_money(s.amount),
        });
        output.push_str(&Table::new(rows).with(Style::psql()).to_string());
        output.push('\n');
        output.push_str(&format!(
            "\n{} transfer(s), {} in total\n",
            plan.len(),
            settings.format_money(plan.total_transferred())
        ));
    }

    if !plan.is_complete() {
        output.push_str(&format!(
            "\nWarning: balances are off by {}; these amounts could not be settled:\n",
            settings.format_money(plan.imbalance)
        ));
        for b in &plan.unsettled {
            output.push_str(&format!(
                "  {:<30} {:>12}\n",
                participant_name(participants, b.participant_id),
                settings.format_money(b.amount)
            ));
        }
    }

    output
}
