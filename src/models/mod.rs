//! Core data models for billsplit
//!
//! Participants, bills with their items and splits, and the transient
//! balance and settlement values computed from them.

pub mod balance;
pub mod bill;
pub mod category;
pub mod ids;
pub mod money;
pub mod participant;
pub mod settlement;

pub use balance::{Balance, BalanceSheet};
pub use bill::{
    Bill, BillItem, BillUpdate, BillValidationError, NewBill, Split, SplitPlan, SplitWarning,
};
pub use category::DEFAULT_CATEGORIES;
pub use ids::{BillId, BillItemId, ParticipantId};
pub use money::{Money, MoneyParseError};
pub use participant::{Participant, ParticipantValidationError};
pub use settlement::{Settlement, SettlementPlan};
