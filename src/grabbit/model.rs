use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::GrabbitError;

/// Where an item sits in its lifecycle. Archived items stay in the
/// collection and remain queryable; only deletion removes a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Needed,
    Bought,
    Archived,
}

impl FromStr for Status {
    type Err = GrabbitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "needed" => Ok(Status::Needed),
            "bought" => Ok(Status::Bought),
            "archived" => Ok(Status::Archived),
            other => Err(GrabbitError::Validation(format!(
                "Unknown status: '{}' (expected needed, bought or archived)",
                other
            ))),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Status::Needed => "needed",
            Status::Bought => "bought",
            Status::Archived => "archived",
        };
        write!(f, "{}", s)
    }
}

/// Closed category set. Free-text inputs go through
/// [`crate::normalize::category`], which also resolves aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Groceries,
    Household,
    Clothing,
    Electronics,
    Gifts,
    Other,
}

impl FromStr for Category {
    type Err = GrabbitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "groceries" => Ok(Category::Groceries),
            "household" => Ok(Category::Household),
            "clothing" => Ok(Category::Clothing),
            "electronics" => Ok(Category::Electronics),
            "gifts" => Ok(Category::Gifts),
            "other" => Ok(Category::Other),
            other => Err(GrabbitError::Validation(format!(
                "Unknown category: '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Category::Groceries => "groceries",
            Category::Household => "household",
            Category::Clothing => "clothing",
            Category::Electronics => "electronics",
            Category::Gifts => "gifts",
            Category::Other => "other",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Priority {
    /// Sort rank: urgent items first, low-priority items last.
    pub fn rank(&self) -> u8 {
        match self {
            Priority::Urgent => 0,
            Priority::High => 1,
            Priority::Medium => 2,
            Priority::Low => 3,
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

impl FromStr for Priority {
    type Err = GrabbitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            "urgent" => Ok(Priority::Urgent),
            other => Err(GrabbitError::Validation(format!(
                "Unknown priority: '{}' (expected low, medium, high or urgent)",
                other
            ))),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        };
        write!(f, "{}", s)
    }
}

/// Provenance tag recording how an item entered the system. The sync merger
/// scopes its cross-run dedup to items tagged with its own source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Source {
    Manual,
    ExternalSync,
    Messaging,
}

impl FromStr for Source {
    type Err = GrabbitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "manual" => Ok(Source::Manual),
            "external-sync" => Ok(Source::ExternalSync),
            "messaging" => Ok(Source::Messaging),
            other => Err(GrabbitError::Validation(format!(
                "Unknown source: '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Source::Manual => "manual",
            Source::ExternalSync => "external-sync",
            Source::Messaging => "messaging",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: Uuid,
    pub name: String,
    pub status: Status,
    pub store: Option<String>,
    pub category: Category,
    pub recipient: String,
    pub notes: Option<String>,
    pub priority: Priority,
    pub url: Option<String>,
    pub price: Option<f64>,
    pub added_at: DateTime<Utc>,
    pub bought_at: Option<DateTime<Utc>>,
    pub recurring: bool,
    pub source: Source,
}

impl Item {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            status: Status::Needed,
            store: None,
            category: Category::Other,
            recipient: "self".to_string(),
            notes: None,
            priority: Priority::default(),
            url: None,
            price: None,
            added_at: Utc::now(),
            bought_at: None,
            recurring: false,
            source: Source::Manual,
        }
    }

    /// A non-self recipient means the item is a gift.
    pub fn is_gift(&self) -> bool {
        !self.recipient.eq_ignore_ascii_case("self")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_rank_orders_urgent_first() {
        assert!(Priority::Urgent.rank() < Priority::High.rank());
        assert!(Priority::High.rank() < Priority::Medium.rank());
        assert!(Priority::Medium.rank() < Priority::Low.rank());
    }

    #[test]
    fn source_uses_kebab_case_tags() {
        let json = serde_json::to_string(&Source::ExternalSync).unwrap();
        assert_eq!(json, "\"external-sync\"");
        let parsed: Source = serde_json::from_str("\"external-sync\"").unwrap();
        assert_eq!(parsed, Source::ExternalSync);
    }

    #[test]
    fn unknown_enum_strings_are_rejected() {
        assert!("pending".parse::<Status>().is_err());
        assert!("toys".parse::<Category>().is_err());
        assert!("asap".parse::<Priority>().is_err());
        assert!("google_keep".parse::<Source>().is_err());
    }

    #[test]
    fn new_item_defaults() {
        let item = Item::new("oat milk");
        assert_eq!(item.status, Status::Needed);
        assert_eq!(item.category, Category::Other);
        assert_eq!(item.priority, Priority::Medium);
        assert_eq!(item.recipient, "self");
        assert!(item.bought_at.is_none());
        assert!(!item.is_gift());
    }
}
