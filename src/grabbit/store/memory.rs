use uuid::Uuid;

use super::{ItemPatch, ItemStore};
use crate::error::{GrabbitError, Result};
use crate::model::Item;

/// In-memory storage for testing and development.
/// Does NOT persist data.
#[derive(Default)]
pub struct InMemoryStore {
    items: Vec<Item>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ItemStore for InMemoryStore {
    fn add(&mut self, item: Item) -> Result<Item> {
        if self.items.iter().any(|existing| existing.id == item.id) {
            return Err(GrabbitError::DuplicateId(item.id));
        }
        self.items.push(item.clone());
        Ok(item)
    }

    fn get(&self, id: &Uuid) -> Result<Item> {
        self.items
            .iter()
            .find(|item| item.id == *id)
            .cloned()
            .ok_or(GrabbitError::ItemNotFound(*id))
    }

    fn update(&mut self, id: &Uuid, patch: &ItemPatch) -> Result<Item> {
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id == *id)
            .ok_or(GrabbitError::ItemNotFound(*id))?;
        patch.apply(item);
        Ok(item.clone())
    }

    fn delete(&mut self, id: &Uuid) -> Result<bool> {
        let original_len = self.items.len();
        self.items.retain(|item| item.id != *id);
        Ok(self.items.len() < original_len)
    }

    fn all(&self) -> Result<Vec<Item>> {
        Ok(self.items.clone())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{Priority, Source, Status};
    use chrono::{DateTime, Utc};

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        pub fn with_needed_item(mut self, name: &str, shop: Option<&str>) -> Self {
            let mut item = Item::new(name);
            item.store = shop.map(|s| s.to_string());
            self.store.add(item).unwrap();
            self
        }

        pub fn with_priority_item(mut self, name: &str, priority: Priority) -> Self {
            let mut item = Item::new(name);
            item.priority = priority;
            self.store.add(item).unwrap();
            self
        }

        pub fn with_bought_item(mut self, name: &str, bought_at: DateTime<Utc>) -> Self {
            let mut item = Item::new(name);
            item.status = Status::Bought;
            item.bought_at = Some(bought_at);
            self.store.add(item).unwrap();
            self
        }

        pub fn with_synced_item(mut self, name: &str, status: Status) -> Self {
            let mut item = Item::new(name);
            item.status = status;
            item.source = Source::ExternalSync;
            self.store.add(item).unwrap();
            self
        }
    }
}
