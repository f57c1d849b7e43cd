//! YAML Export functionality
//!
//! Exports the whole ledger to YAML for a human-readable copy.

use std::io::Write;

use crate::error::{BillsplitError, BillsplitResult};
use crate::export::json::FullExport;
use crate::ledger::Ledger;

/// Export the full ledger to YAML format
pub fn export_full_yaml<W: Write>(ledger: &Ledger, writer: &mut W) -> BillsplitResult<()> {
    let export = FullExport::from_ledger(ledger)?;

    let header = format!(
        "# billsplit ledger export\n\
         # Generated: {}\n\
         # App Version: {}\n\
         #\n\
         # Import with `billsplit import <FILE>`.\n\n",
        export.exported_at, export.app_version
    );
    writer
        .write_all(header.as_bytes())
        .map_err(|e| BillsplitError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export).map_err(|e| BillsplitError::Export(e.to_string()))?;

    Ok(())
}

/// Import from a YAML export
///
/// Comment lines are ignored by the YAML parser, so the header written by
/// [`export_full_yaml`] does not need stripping.
pub fn import_from_yaml(yaml_str: &str) -> BillsplitResult<FullExport> {
    let export: FullExport =
        serde_yaml::from_str(yaml_str).map_err(|e| BillsplitError::Import(e.to_string()))?;

    export.validate().map_err(BillsplitError::Import)?;

    Ok(export)
}
