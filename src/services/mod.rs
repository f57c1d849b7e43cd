//! Service layer for billsplit
//!
//! Pure computations over participants and bills (balances, settlements,
//! filters), plus thin services that run them against a [`Ledger`] under a
//! single consistent view.
//!
//! [`Ledger`]: crate::ledger::Ledger

pub mod balance;
pub mod search;
pub mod settlement;

pub use balance::{compute_balances, BalanceService};
pub use search::{all_tags, bills_by_category, bills_by_tag, filter_bills, BillQuery};
pub use settlement::{compute_settlements, settle_bills, SettleUp, SettlementService};
