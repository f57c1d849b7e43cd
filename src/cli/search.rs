//! Search, tag and category CLI commands

use crate::config::Settings;
use crate::display::format_bill_list;
use crate::error::BillsplitResult;
use crate::ledger::Ledger;
use crate::models::category::{canonical_category, is_default_category, DEFAULT_CATEGORIES};
use crate::services::{all_tags, bills_by_category, filter_bills, BillQuery};

/// Handle the search command
pub fn handle_search_command(
    ledger: &Ledger,
    settings: &Settings,
    text: Option<String>,
    category: Option<String>,
    tags: Vec<String>,
) -> BillsplitResult<()> {
    let mut query = BillQuery::new().tags(tags);
    if let Some(text) = text {
        query = query.text(text);
    }
    // Stored categories are canonicalised, so the filter value is too
    if let Some(category) = category {
        query = query.category(canonical_category(&category));
    }

    let bills = ledger.bills()?;
    let found = filter_bills(&bills, &query);
    println!("{}", format_bill_list(&found, settings));
    if !found.is_empty() {
        println!("{} of {} bill(s) match", found.len(), bills.len());
    }

    Ok(())
}

/// List every tag in use
pub fn handle_tags_command(ledger: &Ledger) -> BillsplitResult<()> {
    let tags = all_tags(&ledger.bills()?);
    if tags.is_empty() {
        println!("No tags in use.");
    }
    for tag in tags {
        println!("  {}", tag);
    }
    Ok(())
}

/// List the predefined categories and any custom ones in use, with bill counts
pub fn handle_categories_command(ledger: &Ledger) -> BillsplitResult<()> {
    let bills = ledger.bills()?;

    for category in DEFAULT_CATEGORIES {
        let count = bills_by_category(&bills, Some(category)).len();
        println!("  {:<20} {:>4}", category, count);
    }

    let mut custom: Vec<&str> = Vec::new();
    for c in bills.iter().filter_map(|b| b.category.as_deref()) {
        if !is_default_category(c) && !custom.contains(&c) {
            custom.push(c);
        }
    }
    if !custom.is_empty() {
        println!();
        for category in custom {
            let count = bills_by_category(&bills, Some(category)).len();
            println!("  {:<20} {:>4}  (custom)", category, count);
        }
    }

    Ok(())
}
