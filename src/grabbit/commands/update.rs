use uuid::Uuid;

use crate::commands::{helpers, CmdResult};
use crate::error::{GrabbitError, Result};
use crate::normalize;
use crate::store::{ItemPatch, ItemStore};

/// Raw field patch from the presentation layer. Category and store are
/// re-normalized before the patch is applied; absent fields are untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateRequest {
    pub name: Option<String>,
    pub status: Option<String>,
    pub store: Option<String>,
    pub category: Option<String>,
    pub recipient: Option<String>,
    pub notes: Option<String>,
    pub priority: Option<String>,
    pub url: Option<String>,
    pub price: Option<f64>,
    pub recurring: Option<bool>,
}

fn build_patch(request: &UpdateRequest) -> Result<ItemPatch> {
    Ok(ItemPatch {
        name: request.name.clone(),
        status: request.status.as_deref().map(str::parse).transpose()?,
        store: request
            .store
            .as_deref()
            .map(|s| Some(normalize::store_name(s))),
        category: request
            .category
            .as_deref()
            .map(normalize::category)
            .transpose()?,
        recipient: request.recipient.clone(),
        notes: request.notes.clone().map(Some),
        priority: request.priority.as_deref().map(str::parse).transpose()?,
        url: request.url.clone().map(Some),
        price: request.price.map(Some),
        bought_at: None,
        recurring: request.recurring,
    })
}

pub fn run<S: ItemStore>(store: &mut S, id: &Uuid, request: &UpdateRequest) -> Result<CmdResult> {
    let patch = match build_patch(request) {
        Ok(patch) => patch,
        Err(GrabbitError::Validation(msg)) => return Ok(CmdResult::fail(msg)),
        Err(e) => return Err(e),
    };

    if patch.is_empty() {
        return Ok(CmdResult::fail("Nothing to update"));
    }

    helpers::patch_item(store, id, &patch, |item| {
        format!("Updated '{}'", item.name)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::add::{self, NewItem};
    use crate::model::{Category, Priority};
    use crate::store::memory::InMemoryStore;

    fn added_id(store: &mut InMemoryStore, name: &str) -> Uuid {
        add::run(store, NewItem::named(name))
            .unwrap()
            .item
            .unwrap()
            .id
    }

    #[test]
    fn updates_only_the_provided_fields() {
        let mut store = InMemoryStore::new();
        let id = added_id(&mut store, "milk");

        let result = run(
            &mut store,
            &id,
            &UpdateRequest {
                priority: Some("high".to_string()),
                notes: Some("organic".to_string()),
                ..UpdateRequest::default()
            },
        )
        .unwrap();
        assert!(result.success);

        let item = store.get(&id).unwrap();
        assert_eq!(item.priority, Priority::High);
        assert_eq!(item.notes.as_deref(), Some("organic"));
        assert_eq!(item.name, "milk");
    }

    #[test]
    fn category_and_store_are_renormalized() {
        let mut store = InMemoryStore::new();
        let id = added_id(&mut store, "milk");

        run(
            &mut store,
            &id,
            &UpdateRequest {
                store: Some("tj".to_string()),
                category: Some("food".to_string()),
                ..UpdateRequest::default()
            },
        )
        .unwrap();

        let item = store.get(&id).unwrap();
        assert_eq!(item.store.as_deref(), Some("Trader Joe's"));
        assert_eq!(item.category, Category::Groceries);
    }

    #[test]
    fn invalid_priority_string_fails_without_mutation() {
        let mut store = InMemoryStore::new();
        let id = added_id(&mut store, "milk");

        let result = run(
            &mut store,
            &id,
            &UpdateRequest {
                priority: Some("asap".to_string()),
                ..UpdateRequest::default()
            },
        )
        .unwrap();
        assert!(!result.success);
        assert_eq!(store.get(&id).unwrap().priority, Priority::Medium);
    }

    #[test]
    fn empty_patch_is_rejected() {
        let mut store = InMemoryStore::new();
        let id = added_id(&mut store, "milk");
        let result = run(&mut store, &id, &UpdateRequest::default()).unwrap();
        assert!(!result.success);
    }

    #[test]
    fn unknown_id_is_a_failure_envelope() {
        let mut store = InMemoryStore::new();
        let result = run(
            &mut store,
            &Uuid::new_v4(),
            &UpdateRequest {
                name: Some("x".to_string()),
                ..UpdateRequest::default()
            },
        )
        .unwrap();
        assert!(!result.success);
    }
}
