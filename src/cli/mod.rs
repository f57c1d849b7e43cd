//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the ledger and services.

pub mod bill;
pub mod export;
pub mod participant;
pub mod search;
pub mod settle;

pub use bill::{handle_bill_command, BillCommands};
pub use export::{handle_export_command, handle_import_command, CsvData, ExportFormat};
pub use participant::{handle_participant_command, ParticipantCommands};
pub use search::{handle_categories_command, handle_search_command, handle_tags_command};
pub use settle::{handle_balances_command, handle_settle_command};
