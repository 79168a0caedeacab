use uuid::Uuid;

use crate::commands::{CmdMessage, CmdResult};
use crate::error::{GrabbitError, Result};
use crate::model::Item;
use crate::store::{ItemPatch, ItemStore};

pub(crate) fn not_found(id: &Uuid) -> CmdResult {
    CmdResult::fail(format!("No item with id {}", id))
}

/// Apply a patch and shape the success/not-found envelope shared by the
/// status-transition commands.
pub(crate) fn patch_item<S: ItemStore>(
    store: &mut S,
    id: &Uuid,
    patch: &ItemPatch,
    message: impl FnOnce(&Item) -> String,
) -> Result<CmdResult> {
    match store.update(id, patch) {
        Ok(item) => {
            let mut result = CmdResult::ok();
            result.add_message(CmdMessage::success(message(&item)));
            Ok(result.with_item(item))
        }
        Err(GrabbitError::ItemNotFound(_)) => Ok(not_found(id)),
        Err(e) => Err(e),
    }
}
