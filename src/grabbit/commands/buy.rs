use chrono::Utc;
use uuid::Uuid;

use crate::commands::{helpers, CmdResult};
use crate::error::Result;
use crate::model::Status;
use crate::store::{ItemPatch, ItemStore};

/// Mark an item as bought, resolved by id or by a name search over needed
/// items. An ambiguous name mutates nothing and returns the candidates for
/// the caller to disambiguate.
pub fn run<S: ItemStore>(store: &mut S, id: Option<Uuid>, name: Option<&str>) -> Result<CmdResult> {
    match (id, name) {
        (Some(_), Some(_)) => Ok(CmdResult::fail(
            "Provide either an id or a name, not both",
        )),
        (None, None) => Ok(CmdResult::fail("Provide an item id or a name")),
        (Some(id), None) => mark(store, &id),
        (None, Some(name)) => {
            let needed: Vec<_> = store
                .search(name)?
                .into_iter()
                .filter(|item| item.status == Status::Needed)
                .collect();
            match needed.len() {
                0 => Ok(CmdResult::fail(format!(
                    "No needed item matches '{}'",
                    name
                ))),
                1 => mark(store, &needed[0].id),
                n => Ok(CmdResult::fail(format!(
                    "Found {} items matching '{}'. Be more specific or use the id.",
                    n, name
                ))
                .with_matches(needed)),
            }
        }
    }
}

fn mark<S: ItemStore>(store: &mut S, id: &Uuid) -> Result<CmdResult> {
    let patch = ItemPatch {
        status: Some(Status::Bought),
        bought_at: Some(Some(Utc::now())),
        ..ItemPatch::default()
    };
    helpers::patch_item(store, id, &patch, |item| {
        format!("Marked '{}' as bought", item.name)
    })
}
