//! Bill display formatting
//!
//! Formats bills for terminal output in table and detail views.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::participant_name;
use crate::config::Settings;
use crate::models::{Bill, Participant};

#[derive(Tabled)]
struct BillRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Tags")]
    tags: String,
    #[tabled(rename = "Total")]
    total: String,
}

/// Format a list of bills as a table
pub fn format_bill_list(bills: &[&Bill], settings: &Settings) -> String {
    if bills.is_empty() {
        return "No bills found.".to_string();
    }

    let rows = bills.iter().map(|bill| BillRow {
        date: settings.format_date(bill.date),
        id: bill.id.to_string(),
        title: bill.title.clone(),
        category: bill.category.clone().unwrap_or_default(),
        tags: bill.tags.join(", "),
        total: settings.format_money(bill.total_amount),
    });

    Table::new(rows).with(Style::psql()).to_string()
}

/// Format a single bill's details
pub fn format_bill_details(bill: &Bill, participants: &[Participant], settings: &Settings) -> String {
    let mut output = String::new();

    output.push_str(&format!("Bill: {}\n", bill.title));
    output.push_str(&format!("  ID:        {}\n", bill.id));
    output.push_str(&format!("  Date:      {}\n", settings.format_date(bill.date)));
    output.push_str(&format!(
        "  Total:     {}\n",
        settings.format_money(bill.total_amount)
    ));
    if let Some(category) = &bill.category {
        output.push_str(&format!("  Category:  {}\n", category));
    }
    if !bill.tags.is_empty() {
        output.push_str(&format!("  Tags:      {}\n", bill.tags.join(", ")));
    }

    output.push_str("\n  Items:\n");
    if bill.items.is_empty() {
        output.push_str("    (none)\n");
    }
    for item in &bill.items {
        output.push_str(&format!(
            "    {:<30} {:>12}\n",
            item.description,
            settings.format_money(item.amount)
        ));
    }

    let names: Vec<String> = bill
        .participants
        .iter()
        .map(|&id| participant_name(participants, id))
        .collect();
    output.push_str(&format!("\n  Participants: {}\n", names.join(", ")));

    output.push_str("\n  Splits:\n");
    for split in &bill.splits {
        let name = participant_name(participants, split.participant_id);
        if split.is_advance() {
            output.push_str(&format!(
                "    {:<30} {:>12}  (paid)\n",
                name,
                settings.format_money(-split.amount)
            ));
        } else {
            output.push_str(&format!(
                "    {:<30} {:>12}\n",
                name,
                settings.format_money(split.amount)
            ));
        }
    }

    let warnings = bill.split_warnings();
    if !warnings.is_empty() {
        output.push('\n');
        for warning in warnings {
            output.push_str(&format!("  Warning: {}\n", warning));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, NewBill, Split, SplitPlan};
    use chrono::NaiveDate;

    fn dinner(alice: &Participant, bob: &Participant) -> Bill {
        Bill::from_new(
            NewBill::new("Dinner")
                .date(NaiveDate::from_ymd_opt(2025, 3, 14).unwrap())
                .item("Pasta", Money::from_cents(3000))
                .participants([alice.id, bob.id])
                .paid_by(alice.id)
                .category("Food & Dining")
                .tag("friends"),
        )
        .unwrap()
    }

    #[test]
    fn test_format_empty_list() {
        assert!(format_bill_list(&[], &Settings::default()).contains("No bills found"));
    }

    #[test]
    fn test_format_bill_list() {
        let (alice, bob) = (Participant::new("Alice"), Participant::new("Bob"));
        let bill = dinner(&alice, &bob);

        let output = format_bill_list(&[&bill], &Settings::default());
        assert!(output.contains("2025-03-14"));
        assert!(output.contains("Dinner"));
        assert!(output.contains("Food & Dining"));
        assert!(output.contains("friends"));
        assert!(output.contains("$30.00"));
    }

    #[test]
    fn test_format_bill_details() {
        let (alice, bob) = (Participant::new("Alice"), Participant::new("Bob"));
        let bill = dinner(&alice, &bob);

        let output = format_bill_details(&bill, &[alice, bob], &Settings::default());
        assert!(output.contains("Bill: Dinner"));
        assert!(output.contains("Pasta"));
        assert!(output.contains("Participants: Alice, Bob"));
        assert!(output.contains("(paid)"));
        assert!(!output.contains("Warning"));
    }

    #[test]
    fn test_details_show_split_warnings() {
        let alice = Participant::new("Alice");
        let bill = Bill::from_new(
            NewBill::new("Odd")
                .item("Thing", Money::from_cents(1000))
                .participants([alice.id])
                .split(SplitPlan::Custom(vec![Split::new(alice.id, Money::from_cents(400))])),
        )
        .unwrap();

        let output = format_bill_details(&bill, &[alice], &Settings::default());
        assert!(output.contains("Warning"));
    }
}
