//! Bill CLI commands
//!
//! Items and custom splits are given as `LABEL=AMOUNT` pairs, for example
//! `--item "Pizza=24.50"` or `--split "Alice=12.25"`.

use chrono::NaiveDate;
use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_bill_details, format_bill_list};
use crate::error::{BillsplitError, BillsplitResult};
use crate::ledger::Ledger;
use crate::models::{Bill, BillItem, BillUpdate, Money, NewBill, Split, SplitPlan};

/// Bill subcommands
#[derive(Subcommand)]
pub enum BillCommands {
    /// Record a new bill
    Add {
        /// Bill title
        #[arg(long)]
        title: String,
        /// Line item as DESCRIPTION=AMOUNT (repeatable)
        #[arg(short, long = "item", value_name = "DESC=AMOUNT", required = true)]
        items: Vec<String>,
        /// Participant sharing the bill (repeatable; defaults to everyone)
        #[arg(short, long = "participant", value_name = "NAME")]
        participants: Vec<String>,
        /// Participant who paid the whole bill
        #[arg(long, value_name = "NAME")]
        paid_by: Option<String>,
        /// Custom share as NAME=AMOUNT instead of an even split (repeatable)
        #[arg(short, long = "split", value_name = "NAME=AMOUNT")]
        splits: Vec<String>,
        /// Bill date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
        /// Category
        #[arg(short, long)]
        category: Option<String>,
        /// Tag (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    /// List all bills
    List,
    /// Show bill details
    Show {
        /// Bill ID
        bill: String,
    },
    /// Change fields of a bill
    Update {
        /// Bill ID
        bill: String,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
        /// Replace the line items (repeatable)
        #[arg(short, long = "item", value_name = "DESC=AMOUNT")]
        items: Vec<String>,
        /// New category
        #[arg(short, long, conflicts_with = "clear_category")]
        category: Option<String>,
        /// Remove the category
        #[arg(long)]
        clear_category: bool,
        /// Replace the tags (repeatable)
        #[arg(long = "tag", conflicts_with = "clear_tags")]
        tags: Vec<String>,
        /// Remove all tags
        #[arg(long)]
        clear_tags: bool,
    },
    /// Remove a bill
    Remove {
        /// Bill ID
        bill: String,
    },
}

/// Handle a bill command
pub fn handle_bill_command(
    ledger: &Ledger,
    settings: &Settings,
    cmd: BillCommands,
) -> BillsplitResult<()> {
    match cmd {
        BillCommands::Add {
            title,
            items,
            participants,
            paid_by,
            splits,
            date,
            category,
            tags,
        } => {
            let mut input = NewBill::new(title);

            if let Some(date) = date {
                input = input.date(parse_date(&date)?);
            }
            for item in &items {
                let (description, amount) = parse_pair(item, "item")?;
                input = input.item(description, amount);
            }

            input = if participants.is_empty() {
                input.participants(ledger.participants()?.iter().map(|p| p.id))
            } else {
                let mut ids = Vec::with_capacity(participants.len());
                for name in &participants {
                    ids.push(ledger.resolve_participant(name)?.id);
                }
                input.participants(ids)
            };

            if !splits.is_empty() {
                let mut custom = Vec::with_capacity(splits.len());
                for split in &splits {
                    let (name, amount) = parse_pair(split, "split")?;
                    custom.push(Split::new(ledger.resolve_participant(name)?.id, amount));
                }
                input = input.split(SplitPlan::Custom(custom));
            }

            if let Some(payer) = paid_by {
                input = input.paid_by(ledger.resolve_participant(&payer)?.id);
            }

            if let Some(category) = category.or_else(|| settings.default_category.clone()) {
                input = input.category(category);
            }
            for tag in tags {
                input = input.tag(tag);
            }

            let bill = ledger.add_bill(input)?;
            println!("Added bill: {}", bill.title);
            println!("  Total: {}", settings.format_money(bill.total_amount));
            println!("  ID: {}", bill.id);
            report_warnings(&bill, settings);
        }

        BillCommands::List => {
            let bills = ledger.bills()?;
            let refs: Vec<&Bill> = bills.iter().collect();
            println!("{}", format_bill_list(&refs, settings));
        }

        BillCommands::Show { bill } => {
            let found = ledger.resolve_bill(&bill)?;
            print!(
                "{}",
                format_bill_details(&found, &ledger.participants()?, settings)
            );
        }

        BillCommands::Update {
            bill,
            title,
            date,
            items,
            category,
            clear_category,
            tags,
            clear_tags,
        } => {
            let found = ledger.resolve_bill(&bill)?;

            let mut update = BillUpdate {
                title,
                ..Default::default()
            };
            if let Some(date) = date {
                update.date = Some(parse_date(&date)?);
            }
            if !items.is_empty() {
                let mut parsed = Vec::with_capacity(items.len());
                for item in &items {
                    let (description, amount) = parse_pair(item, "item")?;
                    parsed.push(BillItem::new(description, amount));
                }
                update.items = Some(parsed);
            }
            if clear_category {
                update.category = Some(None);
            } else if category.is_some() {
                update.category = Some(category);
            }
            if clear_tags {
                update.tags = Some(Vec::new());
            } else if !tags.is_empty() {
                update.tags = Some(tags);
            }

            if update.is_empty() {
                println!("No changes specified. Use --help to see what can be updated.");
                return Ok(());
            }

            let updated = ledger.update_bill(found.id, update)?;
            println!("Updated bill: {}", updated.title);
            report_warnings(&updated, settings);
        }

        BillCommands::Remove { bill } => {
            let found = ledger.resolve_bill(&bill)?;
            let removed = ledger.remove_bill(found.id)?;
            println!("Removed bill: {}", removed.title);
        }
    }

    Ok(())
}

fn report_warnings(bill: &Bill, settings: &Settings) {
    if !settings.warn_on_imbalance {
        return;
    }
    for warning in bill.split_warnings() {
        eprintln!("Warning: {}", warning);
    }
}

/// Parse a YYYY-MM-DD date
pub(crate) fn parse_date(s: &str) -> BillsplitResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
        BillsplitError::Validation(format!("Invalid date: '{}'. Use YYYY-MM-DD", s))
    })
}

/// Split `LABEL=AMOUNT` at the last `=`
pub(crate) fn parse_pair<'a>(s: &'a str, what: &str) -> BillsplitResult<(&'a str, Money)> {
    let (label, amount) = s.rsplit_once('=').ok_or_else(|| {
        BillsplitError::Validation(format!(
            "Invalid {}: '{}'. Use LABEL=AMOUNT, e.g. \"Pizza=12.50\"",
            what, s
        ))
    })?;

    let amount = Money::parse(amount).map_err(|e| {
        BillsplitError::Validation(format!("Invalid amount in {} '{}': {}", what, s, e))
    })?;

    Ok((label.trim(), amount))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pair() {
        let (label, amount) = parse_pair("Pizza=12.50", "item").unwrap();
        assert_eq!(label, "Pizza");
        assert_eq!(amount, Money::from_cents(1250));

        let (label, amount) = parse_pair(" a=b = 3 ", "item").unwrap();
        assert_eq!(label, "a=b");
        assert_eq!(amount, Money::from_cents(300));

        assert!(parse_pair("Pizza", "item").unwrap_err().is_validation());
        assert!(parse_pair("Pizza=lots", "item").unwrap_err().is_validation());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2025-03-14").unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
        );
        assert!(parse_date("14/03/2025").is_err());
    }

    #[test]
    fn test_add_and_update() {
        let ledger = Ledger::new();
        ledger.add_participant("Alice").unwrap();
        ledger.add_participant("Bob").unwrap();
        let settings = Settings::default();

        handle_bill_command(
            &ledger,
            &settings,
            BillCommands::Add {
                title: "Dinner".into(),
                items: vec!["Pizza=30".into()],
                participants: Vec::new(),
                paid_by: Some("alice".into()),
                splits: Vec::new(),
                date: Some("2025-03-14".into()),
                category: None,
                tags: vec!["friends".into()],
            },
        )
        .unwrap();

        let bill = ledger.bills().unwrap().remove(0);
        assert_eq!(bill.participants.len(), 2);
        assert_eq!(bill.splits.len(), 3);
        assert!(bill.split_warnings().is_empty());

        handle_bill_command(
            &ledger,
            &settings,
            BillCommands::Update {
                bill: bill.id.to_string(),
                title: None,
                date: None,
                items: Vec::new(),
                category: Some("Food & Dining".into()),
                clear_category: false,
                tags: Vec::new(),
                clear_tags: true,
            },
        )
        .unwrap();

        let bill = ledger.get_bill(bill.id).unwrap().unwrap();
        assert_eq!(bill.category.as_deref(), Some("Food & Dining"));
        assert!(bill.tags.is_empty());
    }

    #[test]
    fn test_add_with_unknown_participant_fails() {
        let ledger = Ledger::new();
        let err = handle_bill_command(
            &ledger,
            &Settings::default(),
            BillCommands::Add {
                title: "Dinner".into(),
                items: vec!["Pizza=30".into()],
                participants: vec!["Ghost".into()],
                paid_by: None,
                splits: Vec::new(),
                date: None,
                category: None,
                tags: Vec::new(),
            },
        )
        .unwrap_err();

        assert!(err.is_not_found());
    }
}
