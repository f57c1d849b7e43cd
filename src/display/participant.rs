//! Participant display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::config::Settings;
use crate::models::{BalanceSheet, Participant};

#[derive(Tabled)]
struct ParticipantRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Balance")]
    balance: String,
}

/// Format participants with their current balances as a table
pub fn format_participant_list(
    participants: &[Participant],
    balances: &BalanceSheet,
    settings: &Settings,
) -> String {
    if participants.is_empty() {
        return "No participants found.".to_string();
    }

    let rows = participants.iter().map(|p| ParticipantRow {
        name: p.name.clone(),
        id: p.id.to_string(),
        balance: balances
            .get(p.id)
            .map(|b| settings.format_money(b))
            .unwrap_or_default(),
    });

    Table::new(rows).with(Style::psql()).to_string()
}
