//! Canonicalization of free-text store and category names.
//!
//! Two static alias tables map lower-cased, trimmed input to a canonical
//! form. Store names that match no alias keep the caller's casing; category
//! names that match neither an alias nor the canonical set are rejected, so
//! the closed [`Category`] enum never silently absorbs arbitrary strings.
//!
//! This alias lookup is one of two deliberately separate categorization
//! paths: manual adds resolve aliases here, while the sync merger guesses
//! categories from keywords (see [`crate::sync::categorize`]).

use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::error::Result;
use crate::model::Category;

static CATEGORY_ALIASES: Lazy<HashMap<&'static str, Category>> = Lazy::new(|| {
    HashMap::from([
        ("grocery", Category::Groceries),
        ("food", Category::Groceries),
        ("home", Category::Household),
        ("house", Category::Household),
        ("clothes", Category::Clothing),
        ("apparel", Category::Clothing),
        ("tech", Category::Electronics),
        ("gadget", Category::Electronics),
        ("gift", Category::Gifts),
        ("present", Category::Gifts),
    ])
});

static STORE_ALIASES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("amazon", "Amazon"),
        ("costco", "Costco"),
        ("target", "Target"),
        ("walmart", "Walmart"),
        ("whole foods", "Whole Foods"),
        ("wholefoods", "Whole Foods"),
        ("trader joes", "Trader Joe's"),
        ("traderjoes", "Trader Joe's"),
        ("tj", "Trader Joe's"),
        ("safeway", "Safeway"),
        ("cvs", "CVS"),
        ("walgreens", "Walgreens"),
        ("home depot", "Home Depot"),
        ("homedepot", "Home Depot"),
        ("lowes", "Lowe's"),
        ("ikea", "IKEA"),
        ("nordstrom", "Nordstrom"),
        ("rei", "REI"),
    ])
});

/// Canonical spelling for a store name. Unknown stores pass through with the
/// caller's casing, trimmed.
pub fn store_name(input: &str) -> String {
    let key = input.trim().to_lowercase();
    match STORE_ALIASES.get(key.as_str()) {
        Some(canonical) => (*canonical).to_string(),
        None => input.trim().to_string(),
    }
}

/// Resolve a category name or alias to the closed enum. Unknown values are a
/// validation error rather than being stored as-is.
pub fn category(input: &str) -> Result<Category> {
    let key = input.trim().to_lowercase();
    if let Some(category) = CATEGORY_ALIASES.get(key.as_str()) {
        return Ok(*category);
    }
    key.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_aliases_resolve_case_insensitively() {
        assert_eq!(store_name("costco"), "Costco");
        assert_eq!(store_name("COSTCO"), "Costco");
        assert_eq!(store_name("  tj "), "Trader Joe's");
    }

    #[test]
    fn unknown_stores_keep_caller_casing() {
        assert_eq!(store_name("Bob's Hardware"), "Bob's Hardware");
        assert_eq!(store_name("  Bob's Hardware  "), "Bob's Hardware");
    }

    #[test]
    fn category_aliases_resolve() {
        assert_eq!(category("food").unwrap(), Category::Groceries);
        assert_eq!(category("Tech").unwrap(), Category::Electronics);
        assert_eq!(category("present").unwrap(), Category::Gifts);
    }

    #[test]
    fn canonical_categories_pass_through() {
        assert_eq!(category("household").unwrap(), Category::Household);
        assert_eq!(category(" GIFTS ").unwrap(), Category::Gifts);
    }

    #[test]
    fn unknown_categories_are_rejected() {
        assert!(category("toys").is_err());
    }
}
