use std::collections::BTreeMap;

use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::{Category, Priority, Status};
use crate::store::ItemStore;

/// Aggregate counts over the full collection, recomputed on every call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    pub total_needed: usize,
    pub total_bought: usize,
    pub urgent: usize,
    pub by_category: BTreeMap<Category, usize>,
    pub stores: BTreeMap<String, usize>,
}

/// Needed-item count per store in use. Stores only present on bought or
/// archived items still appear, with a count of zero.
fn store_counts<S: ItemStore>(store: &S) -> Result<BTreeMap<String, usize>> {
    let items = store.all()?;
    let mut counts = BTreeMap::new();
    for name in store.stores_in_use()? {
        let needed = items
            .iter()
            .filter(|item| item.status == Status::Needed)
            .filter(|item| item.store.as_deref() == Some(name.as_str()))
            .count();
        counts.insert(name, needed);
    }
    Ok(counts)
}

pub fn stores<S: ItemStore>(store: &S) -> Result<CmdResult> {
    Ok(CmdResult::ok().with_store_counts(store_counts(store)?))
}

pub fn run<S: ItemStore>(store: &S) -> Result<CmdResult> {
    let items = store.all()?;

    let mut summary = Summary {
        stores: store_counts(store)?,
        ..Summary::default()
    };
    for item in &items {
        match item.status {
            Status::Needed => {
                summary.total_needed += 1;
                if item.priority == Priority::Urgent {
                    summary.urgent += 1;
                }
                *summary.by_category.entry(item.category).or_insert(0) += 1;
            }
            Status::Bought => summary.total_bought += 1,
            Status::Archived => {}
        }
    }

    Ok(CmdResult::ok().with_summary(summary))
}
