//! Bill categories
//!
//! Bills carry a free-form optional category string. The predefined list is
//! what the host offers by default.

/// Categories offered for new bills
pub const DEFAULT_CATEGORIES: [&str; 10] = [
    "Food & Dining",
    "Groceries",
    "Transportation",
    "Utilities",
    "Entertainment",
    "Housing",
    "Travel",
    "Shopping",
    "Health",
    "Other",
];

/// Check whether a category is one of the predefined ones (case-insensitive)
pub fn is_default_category(category: &str) -> bool {
    DEFAULT_CATEGORIES
        .iter()
        .any(|c| c.eq_ignore_ascii_case(category.trim()))
}

/// Resolve user input to the canonical spelling of a predefined category,
/// or return the trimmed input unchanged.
pub fn canonical_category(category: &str) -> String {
    let trimmed = category.trim();
    DEFAULT_CATEGORIES
        .iter()
        .find(|c| c.eq_ignore_ascii_case(trimmed))
        .map(|c| c.to_string())
        .unwrap_or_else(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_categories() {
        assert!(is_default_category("Groceries"));
        assert!(is_default_category("food & dining"));
        assert!(!is_default_category("Pets"));
    }

    #[test]
    fn test_canonical_category() {
        assert_eq!(canonical_category(" travel "), "Travel");
        assert_eq!(canonical_category("Pets"), "Pets");
    }
}
