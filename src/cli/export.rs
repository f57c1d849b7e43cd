//! CLI commands for data export and import

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use clap::ValueEnum;

use crate::error::{BillsplitError, BillsplitResult};
use crate::export::{csv, json, yaml};
use crate::ledger::Ledger;
use crate::services::SettlementService;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// CSV format (one table, see --data)
    Csv,
    /// JSON format (full ledger)
    Json,
    /// YAML format (full ledger, human-readable)
    Yaml,
}

/// Which table a CSV export contains
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CsvData {
    Bills,
    Balances,
    Settlements,
}

/// Handle the export command
pub fn handle_export_command(
    ledger: &Ledger,
    output: &Path,
    format: ExportFormat,
    data: CsvData,
    pretty: bool,
) -> BillsplitResult<()> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let file = File::create(output).map_err(|e| {
        BillsplitError::Export(format!(
            "Failed to create file {}: {}",
            output.display(),
            e
        ))
    })?;
    let mut writer = BufWriter::new(file);

    match format {
        ExportFormat::Json => {
            json::export_full_json(ledger, &mut writer, pretty)?;
            println!("Ledger exported to: {}", output.display());
        }
        ExportFormat::Yaml => {
            yaml::export_full_yaml(ledger, &mut writer)?;
            println!("Ledger exported to: {}", output.display());
        }
        ExportFormat::Csv => {
            let participants = ledger.participants()?;
            match data {
                CsvData::Bills => {
                    let bills = ledger.bills()?;
                    csv::export_bills_csv(&bills, &participants, &mut writer)?;
                    println!("Exported {} bills to: {}", bills.len(), output.display());
                }
                CsvData::Balances => {
                    let result = SettlementService::new(ledger).settle_up()?;
                    csv::export_balances_csv(&result.balances, &participants, &mut writer)?;
                    println!("Balances exported to: {}", output.display());
                }
                CsvData::Settlements => {
                    let result = SettlementService::new(ledger).settle_up()?;
                    csv::export_settlements_csv(&result.plan, &participants, &mut writer)?;
                    println!(
                        "Exported {} settlements to: {}",
                        result.plan.len(),
                        output.display()
                    );
                }
            }
        }
    }

    writer.flush()?;
    Ok(())
}

/// Read a JSON or YAML export and build a ledger from it
///
/// The format is taken from `format` or, failing that, the file extension.
pub fn handle_import_command(file: &Path, format: Option<ExportFormat>) -> BillsplitResult<Ledger> {
    let format = match format {
        Some(format) => format,
        None => match file.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => ExportFormat::Yaml,
            _ => ExportFormat::Json,
        },
    };

    let contents = fs::read_to_string(file).map_err(|e| {
        BillsplitError::Import(format!("Failed to read {}: {}", file.display(), e))
    })?;

    let export = match format {
        ExportFormat::Json => json::import_from_json(&contents)?,
        ExportFormat::Yaml => yaml::import_from_yaml(&contents)?,
        ExportFormat::Csv => {
            return Err(BillsplitError::Import(
                "CSV exports cannot be imported; use JSON or YAML".into(),
            ))
        }
    };

    let ledger = Ledger::from_snapshot(export.into_snapshot())?;
    println!(
        "Imported {} participants and {} bills from: {}",
        ledger.participant_count()?,
        ledger.bill_count()?,
        file.display()
    );
    Ok(ledger)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, NewBill};
    use tempfile::TempDir;

    fn sample_ledger() -> Ledger {
        let ledger = Ledger::new();
        let a = ledger.add_participant("Alice").unwrap();
        let b = ledger.add_participant("Bob").unwrap();
        ledger
            .add_bill(
                NewBill::new("Taxi")
                    .item("Ride", Money::from_cents(2000))
                    .participants([a.id, b.id])
                    .paid_by(a.id),
            )
            .unwrap();
        ledger
    }

    #[test]
    fn test_export_and_import_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out").join("ledger.yaml");
        let ledger = sample_ledger();

        handle_export_command(&ledger, &path, ExportFormat::Yaml, CsvData::Bills, false).unwrap();
        let imported = handle_import_command(&path, None).unwrap();

        assert_eq!(imported.snapshot().unwrap(), ledger.snapshot().unwrap());
    }

    #[test]
    fn test_export_settlements_csv() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settle.csv");

        handle_export_command(
            &sample_ledger(),
            &path,
            ExportFormat::Csv,
            CsvData::Settlements,
            false,
        )
        .unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "From,To,Amount\nBob,Alice,10.00\n");
    }

    #[test]
    fn test_import_csv_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bills.csv");
        std::fs::write(&path, "ID\n").unwrap();

        let err = handle_import_command(&path, Some(ExportFormat::Csv)).unwrap_err();
        assert!(matches!(err, BillsplitError::Import(_)));
    }
}
