use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::ItemStore;

/// Case-insensitive substring search over name and notes, no status filter.
pub fn run<S: ItemStore>(store: &S, query: &str) -> Result<CmdResult> {
    let items = store.search(query)?;
    Ok(CmdResult::ok().with_listed_items(items))
}
