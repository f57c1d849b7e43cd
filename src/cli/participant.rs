//! Participant CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::format_participant_list;
use crate::error::{BillsplitError, BillsplitResult};
use crate::ledger::Ledger;
use crate::services::BalanceService;

/// Participant subcommands
#[derive(Subcommand)]
pub enum ParticipantCommands {
    /// Add a participant to the group
    Add {
        /// Participant name (must be unique so it can be used in other commands)
        name: String,
    },
    /// List participants with their balances
    List,
    /// Remove a participant and drop them from every bill
    Remove {
        /// Participant name or ID
        participant: String,
    },
}

/// Handle a participant command
pub fn handle_participant_command(
    ledger: &Ledger,
    settings: &Settings,
    cmd: ParticipantCommands,
) -> BillsplitResult<()> {
    match cmd {
        ParticipantCommands::Add { name } => {
            // Other commands take names, so the CLI keeps them unambiguous
            if ledger.participants()?.iter().any(|p| p.matches_name(&name)) {
                return Err(BillsplitError::Duplicate {
                    entity_type: "Participant",
                    identifier: name.trim().to_string(),
                });
            }

            let participant = ledger.add_participant(&name)?;
            println!("Added participant: {}", participant.name);
            println!("  ID: {}", participant.id);
        }

        ParticipantCommands::List => {
            let participants = ledger.participants()?;
            let balances = BalanceService::new(ledger).balances()?;
            println!("{}", format_participant_list(&participants, &balances, settings));
        }

        ParticipantCommands::Remove { participant } => {
            let found = ledger.resolve_participant(&participant)?;
            let affected = ledger
                .bills()?
                .iter()
                .filter(|b| b.involves(found.id))
                .count();

            let removed = ledger.remove_participant(found.id)?;
            println!("Removed participant: {}", removed.name);
            if affected > 0 {
                println!("  Also removed from {} bill(s)", affected);
            }
        }
    }

    Ok(())
}
