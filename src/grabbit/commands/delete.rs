use uuid::Uuid;

use crate::commands::{helpers, CmdMessage, CmdResult};
use crate::error::{GrabbitError, Result};
use crate::store::ItemStore;

/// Permanently remove an item, whatever its status. The only operation that
/// destroys a record.
pub fn run<S: ItemStore>(store: &mut S, id: &Uuid) -> Result<CmdResult> {
    let item = match store.get(id) {
        Ok(item) => item,
        Err(GrabbitError::ItemNotFound(_)) => return Ok(helpers::not_found(id)),
        Err(e) => return Err(e),
    };

    if !store.delete(id)? {
        return Ok(helpers::not_found(id));
    }

    let mut result = CmdResult::ok();
    result.add_message(CmdMessage::success(format!("Deleted '{}'", item.name)));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::add::{self, NewItem};
    use crate::commands::archive;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn deleted_items_are_gone_for_good() {
        let mut store = InMemoryStore::new();
        let added = add::run(&mut store, NewItem::named("milk")).unwrap();
        let id = added.item.unwrap().id;

        let result = run(&mut store, &id).unwrap();
        assert!(result.success);
        assert!(matches!(
            store.get(&id),
            Err(GrabbitError::ItemNotFound(_))
        ));
    }

    #[test]
    fn delete_works_regardless_of_status() {
        let mut store = InMemoryStore::new();
        let added = add::run(&mut store, NewItem::named("milk")).unwrap();
        let id = added.item.unwrap().id;
        archive::archive(&mut store, &id).unwrap();

        assert!(run(&mut store, &id).unwrap().success);
    }

    #[test]
    fn unknown_id_is_a_failure_envelope() {
        let mut store = InMemoryStore::new();
        assert!(!run(&mut store, &Uuid::new_v4()).unwrap().success);
    }
}
