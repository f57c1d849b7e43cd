//! billsplit - split group bills and settle up
//!
//! A group of participants records shared bills. Each bill lists its line
//! items, the participants sharing it and how it is split between them.
//! From those splits the crate derives each participant's net balance and
//! a short list of transfers that settles the group.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `models`: Core data models (participants, bills, money, balances, settlements)
//! - `ledger`: The in-memory ledger that owns all state, plus its snapshot document
//! - `services`: Balance, settlement and search logic
//! - `audit`: Audit trail of ledger mutations
//! - `config`: Configuration and path management
//! - `display`: Terminal formatting
//! - `export`: JSON, YAML and CSV export and import
//! - `cli`: Command handlers for the `billsplit` binary
//! - `error`: Custom error types
//!
//! # Example
//!
//! ```
//! use billsplit::ledger::Ledger;
//! use billsplit::models::{Money, NewBill};
//! use billsplit::services::SettlementService;
//!
//! let ledger = Ledger::new();
//! let alice = ledger.add_participant("Alice").unwrap();
//! let bob = ledger.add_participant("Bob").unwrap();
//!
//! ledger
//!     .add_bill(
//!         NewBill::new("Dinner")
//!             .item("Pizza", Money::from_cents(3000))
//!             .participants([alice.id, bob.id])
//!             .paid_by(alice.id),
//!     )
//!     .unwrap();
//!
//! let plan = SettlementService::new(&ledger).settlements().unwrap();
//! assert_eq!(plan.len(), 1);
//! assert_eq!(plan.settlements[0].from, bob.id);
//! assert_eq!(plan.settlements[0].amount, Money::from_cents(1500));
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod ledger;
pub mod models;
pub mod services;

pub use error::BillsplitError;
