use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use billsplit::audit::AuditLogger;
use billsplit::cli::{
    handle_balances_command, handle_bill_command, handle_categories_command,
    handle_export_command, handle_import_command, handle_participant_command,
    handle_search_command, handle_settle_command, handle_tags_command, BillCommands, CsvData,
    ExportFormat, ParticipantCommands,
};
use billsplit::config::{paths::BillsplitPaths, settings::Settings};
use billsplit::ledger::{read_snapshot, write_snapshot_atomic, Ledger, LedgerSnapshot};

#[derive(Parser)]
#[command(
    name = "billsplit",
    author = "Kaylee Beyene",
    version,
    about = "Split group bills and settle up with as few transfers as possible",
    long_about = "billsplit keeps a ledger of shared bills for a group of people. \
                  Record who took part in each bill and who paid, then ask for the \
                  short list of transfers that leaves everyone even."
)]
struct Cli {
    /// Ledger document to use instead of the one in the data directory
    #[arg(long, global = true, env = "BILLSPLIT_LEDGER", value_name = "FILE")]
    ledger: Option<PathBuf>,

    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Participant management commands
    #[command(subcommand, alias = "p")]
    Participant(ParticipantCommands),

    /// Bill management commands
    #[command(subcommand, alias = "b")]
    Bill(BillCommands),

    /// Search bills by text, category and tags
    Search {
        /// Text to find in titles, item descriptions or totals
        text: Option<String>,
        /// Only bills in this category
        #[arg(short, long)]
        category: Option<String>,
        /// Only bills with this tag (repeatable; all must match)
        #[arg(short, long = "tag")]
        tags: Vec<String>,
    },

    /// List tags in use
    Tags,

    /// List categories with bill counts
    Categories,

    /// Show each participant's net balance
    Balances,

    /// Show the transfers that settle the group
    Settle,

    /// Export the ledger or one of its tables
    Export {
        /// Output file path
        output: PathBuf,
        /// Export format
        #[arg(short, long, value_enum, default_value = "json")]
        format: ExportFormat,
        /// Table to write for CSV exports
        #[arg(long, value_enum, default_value = "bills")]
        data: CsvData,
        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Replace the ledger with a JSON or YAML export
    Import {
        /// Export file to read
        file: PathBuf,
        /// Format (guessed from the extension when omitted)
        #[arg(short, long, value_enum)]
        format: Option<ExportFormat>,
    },

    /// Show recent changes from the audit log
    History {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,
    },

    /// Create the data directory, settings and an empty ledger
    Init,

    /// Show current configuration and paths
    Config,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("billsplit=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Initialize paths and settings
    let paths = BillsplitPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    let ledger_path = cli.ledger.clone().unwrap_or_else(|| paths.ledger_file());

    let mut ledger = Ledger::from_snapshot(read_snapshot(&ledger_path)?)?;
    let mut replaced = false;

    match cli.command {
        Some(Commands::Participant(cmd)) => handle_participant_command(&ledger, &settings, cmd)?,
        Some(Commands::Bill(cmd)) => handle_bill_command(&ledger, &settings, cmd)?,
        Some(Commands::Search {
            text,
            category,
            tags,
        }) => handle_search_command(&ledger, &settings, text, category, tags)?,
        Some(Commands::Tags) => handle_tags_command(&ledger)?,
        Some(Commands::Categories) => handle_categories_command(&ledger)?,
        Some(Commands::Balances) => handle_balances_command(&ledger, &settings)?,
        Some(Commands::Settle) => handle_settle_command(&ledger, &settings)?,
        Some(Commands::Export {
            output,
            format,
            data,
            pretty,
        }) => handle_export_command(&ledger, &output, format, data, pretty)?,
        Some(Commands::Import { file, format }) => {
            ledger = handle_import_command(&file, format)?;
            replaced = true;
        }
        Some(Commands::History { limit }) => {
            let logger = AuditLogger::new(paths.audit_log());
            if !logger.exists() {
                println!("No history recorded yet.");
            }
            for entry in logger.read_recent(limit)? {
                println!("{}", entry.format_human_readable());
            }
        }
        Some(Commands::Init) => {
            println!("Initializing billsplit at: {}", paths.base_dir().display());
            paths.ensure_directories()?;
            if !paths.is_initialized() {
                settings.save(&paths)?;
            }
            if !ledger_path.exists() {
                write_snapshot_atomic(&ledger_path, &LedgerSnapshot::default())?;
            }
            println!("Initialization complete!");
            println!();
            println!("Run 'billsplit participant add <NAME>' to add people to the group.");
        }
        Some(Commands::Config) => {
            println!("billsplit Configuration");
            println!("=======================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Settings file:   {}", paths.settings_file().display());
            println!("Ledger file:     {}", ledger_path.display());
            println!("Audit log:       {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:   {}", settings.currency_symbol);
            println!("  Date format:       {}", settings.date_format);
            println!(
                "  Default category:  {}",
                settings.default_category.as_deref().unwrap_or("(none)")
            );
            println!("  Audit log enabled: {}", settings.audit_enabled);
            println!("  Warn on imbalance: {}", settings.warn_on_imbalance);
        }
        None => {
            println!("billsplit - split group bills and settle up");
            println!();
            println!("Run 'billsplit --help' for usage information.");
        }
    }

    let entries = ledger.drain_audit()?;
    if replaced || !entries.is_empty() {
        write_snapshot_atomic(&ledger_path, &ledger.snapshot()?)?;

        if settings.audit_enabled && !entries.is_empty() {
            paths.ensure_directories()?;
            AuditLogger::new(paths.audit_log()).log_batch(&entries)?;
        }
    }

    Ok(())
}
