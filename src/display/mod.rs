//! Display formatting for terminal output
//!
//! List views are rendered as tables with `tabled`; detail views are plain
//! indented text. Amounts and dates follow the user's [`Settings`].
//!
//! [`Settings`]: crate::config::Settings

pub mod bill;
pub mod participant;
pub mod settlement;

pub use bill::{format_bill_details, format_bill_list};
pub use participant::format_participant_list;
pub use settlement::{format_balances, format_settlement_plan};

use crate::models::{Participant, ParticipantId};

/// Name of a participant, or its display id if it is not in the list
pub fn participant_name(participants: &[Participant], id: ParticipantId) -> String {
    participants
        .iter()
        .find(|p| p.id == id)
        .map(|p| p.name.clone())
        .unwrap_or_else(|| id.to_string())
}
