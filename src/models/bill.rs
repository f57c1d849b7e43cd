//! Bill model
//!
//! A bill is a dated list of items shared by a set of participants. Its
//! splits say how much each participant is accountable for.
//!
//! # Sign convention
//!
//! A positive split amount is consumption: the participant owes that much
//! toward the bill. A negative split amount is an advance: the participant
//! paid that much on the group's behalf. Balances are the negated sum of a
//! participant's splits, so a bill whose splits net to zero moves money from
//! consumers to whoever advanced it. There is no separate payer field; a
//! payer is recorded as an advance split.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::canonical_category;
use super::ids::{BillId, BillItemId, ParticipantId};
use super::money::Money;

/// A single line on a bill
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillItem {
    /// Unique identifier
    pub id: BillItemId,

    /// What the line is for
    pub description: String,

    /// Non-negative item amount
    pub amount: Money,
}

impl BillItem {
    pub fn new(description: impl Into<String>, amount: Money) -> Self {
        Self {
            id: BillItemId::new(),
            description: description.into().trim().to_string(),
            amount,
        }
    }
}

/// The portion of a bill attributed to one participant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Split {
    /// Participant the share belongs to
    pub participant_id: ParticipantId,

    /// Positive for consumption, negative for money advanced to the group
    pub amount: Money,
}

impl Split {
    /// A consumption share
    pub fn new(participant_id: ParticipantId, amount: Money) -> Self {
        Self {
            participant_id,
            amount,
        }
    }

    /// An advance: the participant paid `amount` for the group
    pub fn advance(participant_id: ParticipantId, amount: Money) -> Self {
        Self {
            participant_id,
            amount: -amount.abs(),
        }
    }

    pub fn is_advance(&self) -> bool {
        self.amount.is_negative()
    }
}

/// How the splits of a new bill are produced
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SplitPlan {
    /// Divide the total among the bill's participants, each share rounded to the cent
    #[default]
    Even,
    /// Caller-supplied amounts, taken as-is
    Custom(Vec<Split>),
}

/// Input for creating a bill (a bill without an id)
#[derive(Debug, Clone)]
pub struct NewBill {
    /// Bill title
    pub title: String,

    /// Day the expense happened
    pub date: NaiveDate,

    /// Line items; their sum becomes the total
    pub items: Vec<BillItem>,

    /// Who shares the bill (duplicates are dropped)
    pub participants: Vec<ParticipantId>,

    /// How the consumption splits are produced
    pub split: SplitPlan,

    /// Records an advance of the full total for this participant
    pub paid_by: Option<ParticipantId>,

    /// Optional category, canonicalised against the predefined list
    pub category: Option<String>,

    /// Free-form tags
    pub tags: Vec<String>,
}

impl NewBill {
    /// Start a bill with the given title, dated today, split evenly
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            date: Utc::now().date_naive(),
            items: Vec::new(),
            participants: Vec::new(),
            split: SplitPlan::Even,
            paid_by: None,
            category: None,
            tags: Vec::new(),
        }
    }

    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    pub fn item(mut self, description: impl Into<String>, amount: Money) -> Self {
        self.items.push(BillItem::new(description, amount));
        self
    }

    pub fn participants(mut self, participants: impl IntoIterator<Item = ParticipantId>) -> Self {
        self.participants.extend(participants);
        self
    }

    pub fn split(mut self, split: SplitPlan) -> Self {
        self.split = split;
        self
    }

    pub fn paid_by(mut self, participant_id: ParticipantId) -> Self {
        self.paid_by = Some(participant_id);
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }
}

/// Partial update of a bill; `None` fields are left untouched
#[derive(Debug, Clone, Default)]
pub struct BillUpdate {
    /// New title
    pub title: Option<String>,

    /// New date
    pub date: Option<NaiveDate>,

    /// Replacing the items recomputes the total
    pub items: Option<Vec<BillItem>>,

    /// New participant list
    pub participants: Option<Vec<ParticipantId>>,

    /// New splits, taken as-is
    pub splits: Option<Vec<Split>>,

    /// `Some(None)` clears the category
    pub category: Option<Option<String>>,

    /// Replacement tag list; an empty list clears the tags
    pub tags: Option<Vec<String>>,
}

impl BillUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.date.is_none()
            && self.items.is_none()
            && self.participants.is_none()
            && self.splits.is_none()
            && self.category.is_none()
            && self.tags.is_none()
    }
}

/// A shared bill
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bill {
    /// Unique identifier
    pub id: BillId,

    /// Bill title
    pub title: String,

    /// Day the expense happened
    pub date: NaiveDate,

    /// Line items in entry order
    #[serde(default)]
    pub items: Vec<BillItem>,

    /// Participants sharing the bill, in the order they were selected
    #[serde(default)]
    pub participants: Vec<ParticipantId>,

    /// Consumption shares and advances
    #[serde(default)]
    pub splits: Vec<Split>,

    /// Sum of item amounts, fixed at construction
    pub total_amount: Money,

    /// Optional category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Tags, trimmed and without duplicates
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// When the bill was recorded
    pub created_at: DateTime<Utc>,

    /// When the bill was last modified
    pub updated_at: DateTime<Utc>,
}

impl Bill {
    /// Build a bill from creation input, deriving the total from the items
    /// and the splits from the split plan.
    pub fn from_new(input: NewBill) -> Result<Self, BillValidationError> {
        let participants = dedup_ordered(input.participants);
        let total_amount: Money = input.items.iter().map(|i| i.amount).sum();

        let mut splits = match input.split {
            SplitPlan::Even => {
                let share = total_amount.split_evenly(participants.len());
                participants
                    .iter()
                    .map(|&id| Split::new(id, share))
                    .collect()
            }
            SplitPlan::Custom(splits) => splits,
        };

        if let Some(payer) = input.paid_by {
            splits.push(Split::advance(payer, total_amount));
        }

        let now = Utc::now();
        let bill = Self {
            id: BillId::new(),
            title: input.title.trim().to_string(),
            date: input.date,
            items: input.items,
            participants,
            splits,
            total_amount,
            category: normalize_category(input.category),
            tags: normalize_tags(input.tags),
            created_at: now,
            updated_at: now,
        };

        bill.validate()?;
        Ok(bill)
    }

    /// Sum of the item amounts
    pub fn items_total(&self) -> Money {
        self.items.iter().map(|i| i.amount).sum()
    }

    /// Sum of consumption (positive) splits
    pub fn shares_total(&self) -> Money {
        self.splits
            .iter()
            .filter(|s| s.amount.is_positive())
            .map(|s| s.amount)
            .sum()
    }

    /// Sum of advances, as a positive amount
    pub fn advances_total(&self) -> Money {
        -self
            .splits
            .iter()
            .filter(|s| s.is_advance())
            .map(|s| s.amount)
            .sum::<Money>()
    }

    /// Signed sum of every split
    pub fn net_split_total(&self) -> Money {
        self.splits.iter().map(|s| s.amount).sum()
    }

    /// Whether the participant is listed on the bill or holds a split in it
    pub fn involves(&self, participant_id: ParticipantId) -> bool {
        self.participants.contains(&participant_id)
            || self.splits.iter().any(|s| s.participant_id == participant_id)
    }

    /// Every participant referenced by this bill, participants first, then
    /// split holders not already listed
    pub fn referenced_participants(&self) -> Vec<ParticipantId> {
        dedup_ordered(
            self.participants
                .iter()
                .copied()
                .chain(self.splits.iter().map(|s| s.participant_id))
                .collect(),
        )
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Drop a participant from the participant list and remove its splits.
    ///
    /// The total and the remaining splits are left exactly as they were, so
    /// a bill may stop accounting for its full total. Returns whether
    /// anything changed.
    pub fn detach_participant(&mut self, participant_id: ParticipantId) -> bool {
        let before = (self.participants.len(), self.splits.len());
        self.participants.retain(|&p| p != participant_id);
        self.splits.retain(|s| s.participant_id != participant_id);

        let changed = before != (self.participants.len(), self.splits.len());
        if changed {
            self.updated_at = Utc::now();
        }
        changed
    }

    /// Apply a partial update, returning a summary of what changed.
    ///
    /// The bill is validated afterwards; callers should apply to a copy and
    /// discard it on error.
    pub fn apply(&mut self, update: BillUpdate) -> Result<Vec<String>, BillValidationError> {
        let mut changes = Vec::new();

        if let Some(title) = update.title {
            let title = title.trim().to_string();
            if title != self.title {
                changes.push(format!("title: '{}' -> '{}'", self.title, title));
                self.title = title;
            }
        }

        if let Some(date) = update.date {
            if date != self.date {
                changes.push(format!("date: {} -> {}", self.date, date));
                self.date = date;
            }
        }

        if let Some(items) = update.items {
            let total: Money = items.iter().map(|i| i.amount).sum();
            changes.push(format!("items: {} -> {}", self.items.len(), items.len()));
            if total != self.total_amount {
                changes.push(format!("total: {} -> {}", self.total_amount, total));
            }
            self.items = items;
            self.total_amount = total;
        }

        if let Some(participants) = update.participants {
            let participants = dedup_ordered(participants);
            if participants != self.participants {
                changes.push(format!(
                    "participants: {} -> {}",
                    self.participants.len(),
                    participants.len()
                ));
                self.participants = participants;
            }
        }

        if let Some(splits) = update.splits {
            if splits != self.splits {
                changes.push(format!("splits: {} -> {}", self.splits.len(), splits.len()));
                self.splits = splits;
            }
        }

        if let Some(category) = update.category {
            let category = normalize_category(category);
            if category != self.category {
                changes.push(format!("category: {:?} -> {:?}", self.category, category));
                self.category = category;
            }
        }

        if let Some(tags) = update.tags {
            let tags = normalize_tags(tags);
            if tags != self.tags {
                changes.push(format!("tags: {:?} -> {:?}", self.tags, tags));
                self.tags = tags;
            }
        }

        if !changes.is_empty() {
            self.updated_at = Utc::now();
        }

        self.validate()?;
        Ok(changes)
    }

    /// Largest drift even splitting can introduce: one cent per share
    fn rounding_tolerance(&self) -> Money {
        let shares = self.splits.iter().filter(|s| s.amount.is_positive()).count();
        Money::from_cents(shares as i64)
    }

    /// Problems with the splits that do not block the bill but keep the
    /// settlement from fully draining.
    pub fn split_warnings(&self) -> Vec<SplitWarning> {
        let mut warnings = Vec::new();
        let tolerance = self.rounding_tolerance();

        let shares = self.shares_total();
        if (shares - self.total_amount).abs() > tolerance {
            warnings.push(SplitWarning::SharesMismatch {
                expected: self.total_amount,
                actual: shares,
            });
        }

        let net = self.net_split_total();
        if net.abs() > tolerance {
            warnings.push(SplitWarning::Unfunded { net });
        }

        warnings
    }

    /// Validate the bill
    pub fn validate(&self) -> Result<(), BillValidationError> {
        if self.title.trim().is_empty() {
            return Err(BillValidationError::EmptyTitle);
        }

        let title_chars = self.title.chars().count();
        if title_chars > 200 {
            return Err(BillValidationError::TitleTooLong(title_chars));
        }

        if let Some(item) = self.items.iter().find(|i| i.amount.is_negative()) {
            return Err(BillValidationError::NegativeItemAmount {
                description: item.description.clone(),
                amount: item.amount,
            });
        }

        let items_total = self.items_total();
        if items_total != self.total_amount {
            return Err(BillValidationError::TotalMismatch {
                total_amount: self.total_amount,
                items_total,
            });
        }

        Ok(())
    }
}

impl fmt::Display for Bill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date.format("%Y-%m-%d"),
            self.title,
            self.total_amount
        )
    }
}

fn dedup_ordered(ids: Vec<ParticipantId>) -> Vec<ParticipantId> {
    let mut seen = std::collections::HashSet::new();
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}

fn normalize_category(category: Option<String>) -> Option<String> {
    category
        .map(|c| canonical_category(&c))
        .filter(|c| !c.is_empty())
}

fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim();
        if !tag.is_empty() && !out.iter().any(|t| t == tag) {
            out.push(tag.to_string());
        }
    }
    out
}

/// Non-fatal findings about a bill's splits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SplitWarning {
    /// Consumption shares do not add up to the bill total
    SharesMismatch { expected: Money, actual: Money },
    /// The splits do not net to zero, so no one is recorded as covering the bill
    Unfunded { net: Money },
}

impl fmt::Display for SplitWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SharesMismatch { expected, actual } => write!(
                f,
                "Split shares total {} but the bill totals {}",
                actual, expected
            ),
            Self::Unfunded { net } => write!(
                f,
                "Splits net to {} instead of zero; settle-up will leave a remainder",
                net
            ),
        }
    }
}

/// Validation errors for bills
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BillValidationError {
    /// Title is blank after trimming
    EmptyTitle,
    /// Title is longer than 200 characters; carries the character count
    TitleTooLong(usize),
    /// An item has an amount below zero
    NegativeItemAmount { description: String, amount: Money },
    /// The stored total differs from the sum of the items
    TotalMismatch { total_amount: Money, items_total: Money },
}

impl fmt::Display for BillValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "Bill title cannot be empty"),
            Self::TitleTooLong(len) => write!(f, "Bill title too long ({} chars, max 200)", len),
            Self::NegativeItemAmount {
                description,
                amount,
            } => write!(f, "Item '{}' has a negative amount ({})", description, amount),
            Self::TotalMismatch {
                total_amount,
                items_total,
            } => write!(
                f,
                "Bill total ({}) does not match its items ({})",
                total_amount, items_total
            ),
        }
    }
}

impl std::error::Error for BillValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
    }

    #[test]
    fn test_even_split() {
        let a = ParticipantId::new();
        let b = ParticipantId::new();
        let c = ParticipantId::new();

        let bill = Bill::from_new(
            NewBill::new("Dinner")
                .date(date())
                .item("Pizza", Money::from_cents(6000))
                .item("Drinks", Money::from_cents(3000))
                .participants([a, b, c]),
        )
        .unwrap();

        assert_eq!(bill.total_amount, Money::from_cents(9000));
        assert_eq!(bill.splits.len(), 3);
        assert!(bill.splits.iter().all(|s| s.amount == Money::from_cents(3000)));
        assert_eq!(bill.net_split_total(), Money::from_cents(9000));
    }

    #[test]
    fn test_paid_by_records_advance() {
        let a = ParticipantId::new();
        let b = ParticipantId::new();

        let bill = Bill::from_new(
            NewBill::new("Taxi")
                .item("Ride", Money::from_cents(2000))
                .participants([a, b])
                .paid_by(a),
        )
        .unwrap();

        assert_eq!(bill.splits.len(), 3);
        assert_eq!(bill.shares_total(), Money::from_cents(2000));
        assert_eq!(bill.advances_total(), Money::from_cents(2000));
        assert!(bill.net_split_total().is_zero());
        assert!(bill.split_warnings().is_empty());
    }

    #[test]
    fn test_even_split_rounding_is_tolerated() {
        let ids = [ParticipantId::new(), ParticipantId::new(), ParticipantId::new()];
        let bill = Bill::from_new(
            NewBill::new("Groceries")
                .item("Basket", Money::from_cents(1000))
                .participants(ids)
                .paid_by(ids[0]),
        )
        .unwrap();

        assert_eq!(bill.shares_total(), Money::from_cents(999));
        assert!(bill.split_warnings().is_empty());
    }

    #[test]
    fn test_custom_split_mismatch_warns() {
        let a = ParticipantId::new();
        let b = ParticipantId::new();

        let bill = Bill::from_new(
            NewBill::new("Concert")
                .item("Tickets", Money::from_cents(10000))
                .participants([a, b])
                .split(SplitPlan::Custom(vec![
                    Split::new(a, Money::from_cents(4000)),
                    Split::new(b, Money::from_cents(4000)),
                ])),
        )
        .unwrap();

        let warnings = bill.split_warnings();
        assert!(warnings.contains(&SplitWarning::SharesMismatch {
            expected: Money::from_cents(10000),
            actual: Money::from_cents(8000),
        }));
        assert!(warnings.contains(&SplitWarning::Unfunded {
            net: Money::from_cents(8000)
        }));
    }

    #[test]
    fn test_normalizes_input() {
        let a = ParticipantId::new();
        let bill = Bill::from_new(
            NewBill::new("  Lunch  ")
                .participants([a, a])
                .category(" groceries ")
                .tag(" work ")
                .tag("work")
                .tag("  "),
        )
        .unwrap();

        assert_eq!(bill.title, "Lunch");
        assert_eq!(bill.participants, vec![a]);
        assert_eq!(bill.category.as_deref(), Some("Groceries"));
        assert_eq!(bill.tags, vec!["work".to_string()]);
        assert!(bill.total_amount.is_zero());
    }

    #[test]
    fn test_validation_errors() {
        assert_eq!(
            Bill::from_new(NewBill::new("   ")).unwrap_err(),
            BillValidationError::EmptyTitle
        );

        assert!(Bill::from_new(NewBill::new("ü".repeat(200))).is_ok());
        assert_eq!(
            Bill::from_new(NewBill::new("ü".repeat(201))).unwrap_err(),
            BillValidationError::TitleTooLong(201)
        );

        let err = Bill::from_new(NewBill::new("Refund").item("Credit", Money::from_cents(-100)))
            .unwrap_err();
        assert!(matches!(err, BillValidationError::NegativeItemAmount { .. }));

        let mut bill = Bill::from_new(NewBill::new("Snacks").item("Chips", Money::from_cents(300)))
            .unwrap();
        bill.total_amount = Money::from_cents(1);
        assert!(matches!(
            bill.validate(),
            Err(BillValidationError::TotalMismatch { .. })
        ));
    }

    #[test]
    fn test_detach_participant_keeps_total() {
        let a = ParticipantId::new();
        let b = ParticipantId::new();
        let mut bill = Bill::from_new(
            NewBill::new("Dinner")
                .item("Meal", Money::from_cents(5000))
                .participants([a, b]),
        )
        .unwrap();

        assert!(bill.detach_participant(a));
        assert_eq!(bill.participants, vec![b]);
        assert_eq!(bill.splits.len(), 1);
        assert_eq!(bill.total_amount, Money::from_cents(5000));
        assert!(!bill.involves(a));

        assert!(!bill.detach_participant(a));
    }

    #[test]
    fn test_apply_update() {
        let a = ParticipantId::new();
        let mut bill = Bill::from_new(
            NewBill::new("Dinner")
                .item("Meal", Money::from_cents(5000))
                .participants([a])
                .category("Food & Dining"),
        )
        .unwrap();

        let changes = bill
            .apply(BillUpdate {
                title: Some("Late dinner".into()),
                items: Some(vec![BillItem::new("Meal", Money::from_cents(6500))]),
                category: Some(None),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(bill.title, "Late dinner");
        assert_eq!(bill.total_amount, Money::from_cents(6500));
        assert_eq!(bill.category, None);
        assert!(changes.iter().any(|c| c.starts_with("total:")));

        let mut copy = bill.clone();
        assert!(copy
            .apply(BillUpdate {
                title: Some(" ".into()),
                ..Default::default()
            })
            .is_err());
    }

    #[test]
    fn test_serialization() {
        let a = ParticipantId::new();
        let bill = Bill::from_new(
            NewBill::new("Hotel")
                .date(date())
                .item("Room", Money::from_cents(24000))
                .participants([a])
                .tag("trip"),
        )
        .unwrap();

        let json = serde_json::to_string(&bill).unwrap();
        let back: Bill = serde_json::from_str(&json).unwrap();
        assert_eq!(bill, back);
    }

    #[test]
    fn test_display() {
        let bill = Bill::from_new(
            NewBill::new("Hotel")
                .date(date())
                .item("Room", Money::from_cents(24000)),
        )
        .unwrap();
        assert_eq!(bill.to_string(), "2025-03-14 Hotel $240.00");
    }
}
