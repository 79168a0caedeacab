//! # API Facade
//!
//! The API layer is a thin facade over the command layer: the single entry
//! point for all grabbit operations, regardless of the UI being used.
//!
//! It dispatches to command functions and returns structured
//! `Result<CmdResult>` values. Business logic belongs in `commands/*.rs`;
//! I/O and presentation belong to the caller.
//!
//! `GrabbitApi<S: ItemStore>` is generic over the storage backend:
//! production wires a `FileStore`, tests an `InMemoryStore`. There is no
//! process-wide default instance; callers construct the API against an
//! explicit store.

use uuid::Uuid;

use crate::commands;
use crate::error::Result;
use crate::store::ItemStore;
use crate::sync::{self, DocumentFetcher};

pub struct GrabbitApi<S: ItemStore> {
    store: S,
}

impl<S: ItemStore> GrabbitApi<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn add(&mut self, new_item: NewItem) -> Result<commands::CmdResult> {
        commands::add::run(&mut self.store, new_item)
    }

    pub fn list(&self, query: &ListQuery) -> Result<commands::CmdResult> {
        commands::list::run(&self.store, query)
    }

    /// What to grab at this store: needed items only.
    pub fn at_store(&self, store_name: &str) -> Result<commands::CmdResult> {
        self.list(&ListQuery {
            store: Some(store_name.to_string()),
            ..ListQuery::default()
        })
    }

    /// Gift ideas for a person: needed items only.
    pub fn for_recipient(&self, recipient: &str) -> Result<commands::CmdResult> {
        self.list(&ListQuery {
            recipient: Some(recipient.to_string()),
            ..ListQuery::default()
        })
    }

    pub fn urgent(&self) -> Result<commands::CmdResult> {
        self.list(&ListQuery {
            priority: Some("urgent".to_string()),
            ..ListQuery::default()
        })
    }

    pub fn search(&self, query: &str) -> Result<commands::CmdResult> {
        commands::search::run(&self.store, query)
    }

    pub fn mark_bought(
        &mut self,
        id: Option<Uuid>,
        name: Option<&str>,
    ) -> Result<commands::CmdResult> {
        commands::buy::run(&mut self.store, id, name)
    }

    pub fn archive(&mut self, id: &Uuid) -> Result<commands::CmdResult> {
        commands::archive::archive(&mut self.store, id)
    }

    pub fn restore(&mut self, id: &Uuid) -> Result<commands::CmdResult> {
        commands::archive::restore(&mut self.store, id)
    }

    pub fn delete(&mut self, id: &Uuid) -> Result<commands::CmdResult> {
        commands::delete::run(&mut self.store, id)
    }

    pub fn update(&mut self, id: &Uuid, request: &UpdateRequest) -> Result<commands::CmdResult> {
        commands::update::run(&mut self.store, id, request)
    }

    pub fn recently_bought(&self, days: u32) -> Result<commands::CmdResult> {
        commands::recent::run(&self.store, days)
    }

    pub fn summary(&self) -> Result<commands::CmdResult> {
        commands::summary::run(&self.store)
    }

    pub fn stores(&self) -> Result<commands::CmdResult> {
        commands::summary::stores(&self.store)
    }

    /// Merge already-fetched document text into the list.
    pub fn sync_text(&mut self, text: &str) -> Result<commands::CmdResult> {
        sync::run(&mut self.store, text)
    }

    /// Fetch the external document and merge it into the list.
    pub fn sync(&mut self, fetcher: &dyn DocumentFetcher) -> Result<commands::CmdResult> {
        sync::run_with_fetcher(&mut self.store, fetcher)
    }
}

pub use commands::add::NewItem;
pub use commands::list::ListQuery;
pub use commands::update::UpdateRequest;
pub use commands::{CmdMessage, CmdResult, MessageLevel};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Status;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn full_lifecycle_scenario() {
        let mut api = GrabbitApi::new(InMemoryStore::new());

        let added = api.add(NewItem::named("oat milk")).unwrap();
        assert!(added.success);
        let id = added.item.unwrap().id;

        let bought = api.mark_bought(Some(id), None).unwrap();
        assert_eq!(bought.item.as_ref().unwrap().status, Status::Bought);
        assert!(bought.item.unwrap().bought_at.is_some());

        let archived = api.archive(&id).unwrap();
        assert_eq!(archived.item.unwrap().status, Status::Archived);

        let all = api
            .list(&ListQuery {
                status: "all".to_string(),
                ..ListQuery::default()
            })
            .unwrap();
        assert_eq!(all.count(), 1);

        let deleted = api.delete(&id).unwrap();
        assert!(deleted.success);
        assert!(!api.delete(&id).unwrap().success);
    }

    #[test]
    fn shorthand_queries_restrict_to_needed() {
        let mut api = GrabbitApi::new(InMemoryStore::new());
        let mut gift = NewItem::named("Kindle");
        gift.recipient = Some("Sowmya".to_string());
        gift.store = Some("amazon".to_string());
        api.add(gift).unwrap();

        assert_eq!(api.at_store("Amazon").unwrap().count(), 1);
        assert_eq!(api.for_recipient("sowmya").unwrap().count(), 1);
        assert_eq!(api.urgent().unwrap().count(), 0);
    }
}
