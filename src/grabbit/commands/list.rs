use crate::commands::CmdResult;
use crate::error::{GrabbitError, Result};
use crate::normalize;
use crate::store::{ItemFilter, ItemStore};

/// Raw list query. `status` accepts the three lifecycle states or `"all"`,
/// which lifts the status restriction entirely.
#[derive(Debug, Clone)]
pub struct ListQuery {
    pub status: String,
    pub store: Option<String>,
    pub category: Option<String>,
    pub recipient: Option<String>,
    pub priority: Option<String>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            status: "needed".to_string(),
            store: None,
            category: None,
            recipient: None,
            priority: None,
        }
    }
}

fn build_filter(query: &ListQuery) -> Result<ItemFilter> {
    let status = if query.status.trim().eq_ignore_ascii_case("all") {
        None
    } else {
        Some(query.status.parse()?)
    };
    Ok(ItemFilter {
        status,
        store: query.store.as_deref().map(normalize::store_name),
        category: query
            .category
            .as_deref()
            .map(normalize::category)
            .transpose()?,
        recipient: query.recipient.clone(),
        priority: query.priority.as_deref().map(str::parse).transpose()?,
    })
}

pub fn run<S: ItemStore>(store: &S, query: &ListQuery) -> Result<CmdResult> {
    let filter = match build_filter(query) {
        Ok(filter) => filter,
        Err(GrabbitError::Validation(msg)) => return Ok(CmdResult::fail(msg)),
        Err(e) => return Err(e),
    };

    let mut items = store.list(&filter)?;
    // Stable: ties keep the collection's stored order.
    items.sort_by_key(|item| item.priority.rank());

    Ok(CmdResult::ok().with_filter(filter).with_listed_items(items))
}
