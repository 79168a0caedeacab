use crate::commands::{CmdMessage, CmdResult};
use crate::error::{GrabbitError, Result};
use crate::model::Item;
use crate::normalize;
use crate::store::ItemStore;

/// Raw input for a new item. Store, category, priority and source arrive as
/// free text from the presentation layer and are normalized or rejected
/// here.
#[derive(Debug, Clone, Default)]
pub struct NewItem {
    pub name: String,
    pub store: Option<String>,
    pub category: Option<String>,
    pub recipient: Option<String>,
    pub notes: Option<String>,
    pub priority: Option<String>,
    pub url: Option<String>,
    pub price: Option<f64>,
    pub recurring: bool,
    pub source: Option<String>,
}

impl NewItem {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

fn build_item(new_item: NewItem) -> Result<Item> {
    let mut item = Item::new(new_item.name.trim());
    if let Some(raw) = &new_item.store {
        item.store = Some(normalize::store_name(raw));
    }
    if let Some(raw) = &new_item.category {
        item.category = normalize::category(raw)?;
    }
    if let Some(recipient) = &new_item.recipient {
        item.recipient = recipient.trim().to_string();
    }
    if let Some(raw) = &new_item.priority {
        item.priority = raw.parse()?;
    }
    if let Some(raw) = &new_item.source {
        item.source = raw.parse()?;
    }
    item.notes = new_item.notes;
    item.url = new_item.url;
    item.price = new_item.price;
    item.recurring = new_item.recurring;
    Ok(item)
}

pub fn run<S: ItemStore>(store: &mut S, new_item: NewItem) -> Result<CmdResult> {
    if new_item.name.trim().is_empty() {
        return Ok(CmdResult::fail("Item name cannot be empty"));
    }

    let item = match build_item(new_item) {
        Ok(item) => item,
        Err(GrabbitError::Validation(msg)) => return Ok(CmdResult::fail(msg)),
        Err(e) => return Err(e),
    };

    let created = store.add(item)?;
    let at_store = created
        .store
        .as_deref()
        .map(|s| format!(" ({})", s))
        .unwrap_or_default();
    let mut result = CmdResult::ok();
    result.add_message(CmdMessage::success(format!(
        "Added '{}'{}",
        created.name, at_store
    )));
    Ok(result.with_item(created))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, Priority, Source, Status};
    use crate::store::memory::InMemoryStore;

    #[test]
    fn add_round_trips_normalized_fields() {
        let mut store = InMemoryStore::new();
        let result = run(
            &mut store,
            NewItem {
                name: "diapers".to_string(),
                store: Some("costco".to_string()),
                category: Some("home".to_string()),
                priority: Some("urgent".to_string()),
                ..NewItem::default()
            },
        )
        .unwrap();

        assert!(result.success);
        let item = result.item.unwrap();
        assert_eq!(item.store.as_deref(), Some("Costco"));
        assert_eq!(item.category, Category::Household);
        assert_eq!(item.priority, Priority::Urgent);
        assert_eq!(item.status, Status::Needed);
        assert!(item.bought_at.is_none());

        let stored = store.get(&item.id).unwrap();
        assert_eq!(stored.name, "diapers");
    }

    #[test]
    fn store_casing_normalizes_to_one_canonical_form() {
        let mut store = InMemoryStore::new();
        let lower = run(&mut store, {
            let mut n = NewItem::named("a");
            n.store = Some("costco".to_string());
            n
        })
        .unwrap();
        let upper = run(&mut store, {
            let mut n = NewItem::named("b");
            n.store = Some("COSTCO".to_string());
            n
        })
        .unwrap();

        assert_eq!(lower.item.unwrap().store.as_deref(), Some("Costco"));
        assert_eq!(upper.item.unwrap().store.as_deref(), Some("Costco"));
    }

    #[test]
    fn defaults_apply_when_fields_are_absent() {
        let mut store = InMemoryStore::new();
        let result = run(&mut store, NewItem::named("oat milk")).unwrap();

        let item = result.item.unwrap();
        assert_eq!(item.category, Category::Other);
        assert_eq!(item.priority, Priority::Medium);
        assert_eq!(item.recipient, "self");
        assert_eq!(item.source, Source::Manual);
    }

    #[test]
    fn unknown_category_is_a_failure_envelope() {
        let mut store = InMemoryStore::new();
        let result = run(&mut store, {
            let mut n = NewItem::named("kite");
            n.category = Some("toys".to_string());
            n
        })
        .unwrap();

        assert!(!result.success);
        assert!(store.all().unwrap().is_empty());
    }

    #[test]
    fn empty_name_is_rejected() {
        let mut store = InMemoryStore::new();
        let result = run(&mut store, NewItem::named("   ")).unwrap();
        assert!(!result.success);
    }
}
