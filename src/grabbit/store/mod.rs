//! # Storage Layer
//!
//! The [`ItemStore`] trait abstracts persistence of the item collection so
//! the command layer can run against different backends:
//!
//! - [`fs::FileStore`]: production storage, one JSON array in `items.json`,
//!   replaced atomically (write-temp-then-rename) on every mutation
//! - [`memory::InMemoryStore`]: in-memory storage for testing
//!
//! Backends implement the five primitive operations; the query methods
//! (`list`, `search`, `stores_in_use`, `bought_since`) are provided on the
//! trait so filtering semantics are identical everywhere.
//!
//! The collection preserves insertion order, which keeps sort-tie behavior
//! predictable for the stable priority sort in the list command. Every query
//! re-reads the current state, so readers always see the latest committed
//! write. At most one mutating call may execute at a time against a given
//! store; concurrent writers must be serialized by the caller.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::error::Result;
use crate::model::{Category, Item, Priority, Status};

pub mod fs;
pub mod memory;

/// Optional equality predicates for [`ItemStore::list`]. An absent field
/// applies no restriction; store and recipient compare case-insensitively.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemFilter {
    pub status: Option<Status>,
    pub store: Option<String>,
    pub category: Option<Category>,
    pub recipient: Option<String>,
    pub priority: Option<Priority>,
}

impl ItemFilter {
    pub fn matches(&self, item: &Item) -> bool {
        if let Some(status) = self.status {
            if item.status != status {
                return false;
            }
        }
        if let Some(store) = &self.store {
            match &item.store {
                Some(s) if s.to_lowercase() == store.to_lowercase() => {}
                _ => return false,
            }
        }
        if let Some(category) = self.category {
            if item.category != category {
                return false;
            }
        }
        if let Some(recipient) = &self.recipient {
            if item.recipient.to_lowercase() != recipient.to_lowercase() {
                return false;
            }
        }
        if let Some(priority) = self.priority {
            if item.priority != priority {
                return false;
            }
        }
        true
    }
}

/// Partial update applied by [`ItemStore::update`]. An outer `None` leaves
/// the field untouched; for the item's own optional fields, `Some(None)`
/// clears the stored value.
#[derive(Debug, Clone, Default)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub status: Option<Status>,
    pub store: Option<Option<String>>,
    pub category: Option<Category>,
    pub recipient: Option<String>,
    pub notes: Option<Option<String>>,
    pub priority: Option<Priority>,
    pub url: Option<Option<String>>,
    pub price: Option<Option<f64>>,
    pub bought_at: Option<Option<DateTime<Utc>>>,
    pub recurring: Option<bool>,
}

impl ItemPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.status.is_none()
            && self.store.is_none()
            && self.category.is_none()
            && self.recipient.is_none()
            && self.notes.is_none()
            && self.priority.is_none()
            && self.url.is_none()
            && self.price.is_none()
            && self.bought_at.is_none()
            && self.recurring.is_none()
    }

    pub fn apply(&self, item: &mut Item) {
        if let Some(name) = &self.name {
            item.name = name.clone();
        }
        if let Some(status) = self.status {
            item.status = status;
        }
        if let Some(store) = &self.store {
            item.store = store.clone();
        }
        if let Some(category) = self.category {
            item.category = category;
        }
        if let Some(recipient) = &self.recipient {
            item.recipient = recipient.clone();
        }
        if let Some(notes) = &self.notes {
            item.notes = notes.clone();
        }
        if let Some(priority) = self.priority {
            item.priority = priority;
        }
        if let Some(url) = &self.url {
            item.url = url.clone();
        }
        if let Some(price) = self.price {
            item.price = price;
        }
        if let Some(bought_at) = self.bought_at {
            item.bought_at = bought_at;
        }
        if let Some(recurring) = self.recurring {
            item.recurring = recurring;
        }
    }
}

/// Abstract interface for item storage.
///
/// Mutating calls persist the entire updated collection before returning, so
/// a successful return means the change is durable.
pub trait ItemStore {
    /// Append a new item. Ids are caller-generated and must be unique at
    /// call time; a duplicate id is an error, never an overwrite.
    fn add(&mut self, item: Item) -> Result<Item>;

    /// Get an item by id.
    fn get(&self, id: &Uuid) -> Result<Item>;

    /// Merge the provided fields into an item. Fields absent from the patch
    /// are untouched.
    fn update(&mut self, id: &Uuid, patch: &ItemPatch) -> Result<Item>;

    /// Remove an item permanently, independent of its status. Returns true
    /// if a record was removed.
    fn delete(&mut self, id: &Uuid) -> Result<bool>;

    /// The full collection, in insertion order.
    fn all(&self) -> Result<Vec<Item>>;

    /// Items matching the given predicates, in stored order.
    fn list(&self, filter: &ItemFilter) -> Result<Vec<Item>> {
        Ok(self
            .all()?
            .into_iter()
            .filter(|item| filter.matches(item))
            .collect())
    }

    /// Case-insensitive substring match against name or notes.
    fn search(&self, query: &str) -> Result<Vec<Item>> {
        let query = query.to_lowercase();
        Ok(self
            .all()?
            .into_iter()
            .filter(|item| {
                item.name.to_lowercase().contains(&query)
                    || item
                        .notes
                        .as_deref()
                        .map(|notes| notes.to_lowercase().contains(&query))
                        .unwrap_or(false)
            })
            .collect())
    }

    /// Sorted distinct store names present on any item, any status.
    fn stores_in_use(&self) -> Result<Vec<String>> {
        let mut stores: Vec<String> = self
            .all()?
            .into_iter()
            .filter_map(|item| item.store)
            .collect();
        stores.sort();
        stores.dedup();
        Ok(stores)
    }

    /// Bought items within the window ending now.
    fn recently_bought(&self, window: Duration) -> Result<Vec<Item>> {
        self.bought_since(Utc::now() - window)
    }

    /// Bought items whose `bought_at` is at or after the cutoff. Items
    /// without a `bought_at` are excluded, not errored.
    fn bought_since(&self, cutoff: DateTime<Utc>) -> Result<Vec<Item>> {
        Ok(self
            .all()?
            .into_iter()
            .filter(|item| item.status == Status::Bought)
            .filter(|item| item.bought_at.map(|at| at >= cutoff).unwrap_or(false))
            .collect())
    }
}
