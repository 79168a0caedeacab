use uuid::Uuid;

use crate::commands::{helpers, CmdResult};
use crate::error::Result;
use crate::model::Status;
use crate::store::{ItemPatch, ItemStore};

/// Remove an item from the active list without deleting it. Any status can
/// be archived; the record stays queryable under the "all" filter.
pub fn archive<S: ItemStore>(store: &mut S, id: &Uuid) -> Result<CmdResult> {
    let patch = ItemPatch {
        status: Some(Status::Archived),
        ..ItemPatch::default()
    };
    helpers::patch_item(store, id, &patch, |item| {
        format!("Archived '{}'", item.name)
    })
}

/// Put an item back on the needed list, clearing any bought timestamp.
pub fn restore<S: ItemStore>(store: &mut S, id: &Uuid) -> Result<CmdResult> {
    let patch = ItemPatch {
        status: Some(Status::Needed),
        bought_at: Some(None),
        ..ItemPatch::default()
    };
    helpers::patch_item(store, id, &patch, |item| {
        format!("Restored '{}' to needed", item.name)
    })
}
