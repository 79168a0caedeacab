use std::collections::BTreeMap;

use crate::model::Item;
use crate::store::ItemFilter;

pub mod add;
pub mod archive;
pub mod buy;
pub mod delete;
pub mod helpers;
pub mod list;
pub mod recent;
pub mod search;
pub mod summary;
pub mod update;

#[derive(Debug, Clone)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// Structured result of every operation. Domain failures (not-found,
/// ambiguous match, validation) come back as `success == false` with a
/// human-readable message; `Err` is reserved for storage faults.
#[derive(Debug, Default)]
pub struct CmdResult {
    pub success: bool,
    pub item: Option<Item>,
    pub listed_items: Vec<Item>,
    pub matches: Vec<Item>,
    pub summary: Option<summary::Summary>,
    pub store_counts: Option<BTreeMap<String, usize>>,
    pub filter: Option<ItemFilter>,
    pub added_count: Option<usize>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn ok() -> Self {
        Self {
            success: true,
            ..Self::default()
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        let mut result = Self::default();
        result.add_message(CmdMessage::error(message));
        result
    }

    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_item(mut self, item: Item) -> Self {
        self.item = Some(item);
        self
    }

    pub fn with_listed_items(mut self, items: Vec<Item>) -> Self {
        self.listed_items = items;
        self
    }

    pub fn with_matches(mut self, matches: Vec<Item>) -> Self {
        self.matches = matches;
        self
    }

    pub fn with_summary(mut self, summary: summary::Summary) -> Self {
        self.summary = Some(summary);
        self
    }

    pub fn with_store_counts(mut self, counts: BTreeMap<String, usize>) -> Self {
        self.store_counts = Some(counts);
        self
    }

    pub fn with_filter(mut self, filter: ItemFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn with_added_count(mut self, count: usize) -> Self {
        self.added_count = Some(count);
        self
    }

    pub fn count(&self) -> usize {
        self.listed_items.len()
    }
}
