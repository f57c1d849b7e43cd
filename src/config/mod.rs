//! Configuration module for billsplit
//!
//! Path resolution for the data directory and user settings persistence.

pub mod paths;
pub mod settings;

pub use paths::BillsplitPaths;
pub use settings::Settings;
