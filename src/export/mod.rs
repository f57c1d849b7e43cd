//! Export module for billsplit
//!
//! - CSV: bills, balances and settlements (spreadsheet-compatible)
//! - JSON: machine-readable full ledger export, importable
//! - YAML: human-readable full ledger export, importable

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::{export_balances_csv, export_bills_csv, export_settlements_csv};
pub use json::{export_full_json, import_from_json, FullExport, EXPORT_SCHEMA_VERSION};
pub use yaml::{export_full_yaml, import_from_yaml};
