//! Bill search and filtering
//!
//! Filters are plain conjunctions over the bill list and keep the ledger's
//! order; there is no ranking.

use crate::models::Bill;

/// Search criteria for bills
///
/// An empty query matches every bill.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BillQuery {
    /// Case-insensitive substring of the title, an item description or the
    /// total; an empty string matches everything
    pub text: Option<String>,

    /// Exact category
    pub category: Option<String>,

    /// Every tag must be present on the bill
    pub tags: Vec<String>,
}

impl BillQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
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

    pub fn tags(mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Whether a single bill satisfies every criterion
    pub fn matches(&self, bill: &Bill) -> bool {
        self.matches_text(bill) && self.matches_category(bill) && self.matches_tags(bill)
    }

    fn matches_text(&self, bill: &Bill) -> bool {
        let needle = match self.text.as_deref() {
            Some(t) if !t.is_empty() => t.to_lowercase(),
            _ => return true,
        };

        bill.title.to_lowercase().contains(&needle)
            || bill
                .items
                .iter()
                .any(|i| i.description.to_lowercase().contains(&needle))
            || bill.total_amount.to_plain_string().contains(&needle)
    }

    fn matches_category(&self, bill: &Bill) -> bool {
        match &self.category {
            Some(category) => bill.category.as_deref() == Some(category.as_str()),
            None => true,
        }
    }

    fn matches_tags(&self, bill: &Bill) -> bool {
        self.tags.iter().all(|t| bill.has_tag(t))
    }
}

/// Bills matching the query, in their original order
pub fn filter_bills<'a>(bills: &'a [Bill], query: &BillQuery) -> Vec<&'a Bill> {
    bills.iter().filter(|b| query.matches(b)).collect()
}

/// Every tag used by any bill, in order of first appearance
pub fn all_tags(bills: &[Bill]) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in bills.iter().flat_map(|b| b.tags.iter()) {
        if !tags.contains(tag) {
            tags.push(tag.clone());
        }
    }
    tags
}

/// Bills in a category; `None` returns every bill
pub fn bills_by_category<'a>(bills: &'a [Bill], category: Option<&str>) -> Vec<&'a Bill> {
    match category {
        Some(category) => bills
            .iter()
            .filter(|b| b.category.as_deref() == Some(category))
            .collect(),
        None => bills.iter().collect(),
    }
}

/// Bills carrying a tag
pub fn bills_by_tag<'a>(bills: &'a [Bill], tag: &str) -> Vec<&'a Bill> {
    bills.iter().filter(|b| b.has_tag(tag)).collect()
}
