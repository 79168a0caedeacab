//! Merges an external note document into the tracked list.
//!
//! The document is a plain-text export of a shopping note: one candidate
//! item per line, sometimes decorated with bullet markers, a header line,
//! and divider rows. Parsing is forgiving; merging is idempotent — a name
//! already tracked under the sync provenance is never re-added, whatever
//! its current status, so repeated runs over unchanged text add nothing.
//!
//! Fetching the document is a black box behind [`DocumentFetcher`]. A
//! failed fetch skips the merge for that run and is reported in the result
//! envelope; the caller decides whether to try again later.

use std::collections::HashSet;
use std::process::Command;

use crate::commands::add::{self, NewItem};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{GrabbitError, Result};
use crate::model::{Category, Source};
use crate::store::ItemStore;

const HEADER_LITERAL: &str = "grocery";
const DIVIDER_PREFIX: char = '_';
const BULLET_MARKERS: [char; 3] = ['*', '-', '•'];

const HOUSEHOLD_KEYWORDS: [&str; 9] = [
    "soap", "towel", "scrub", "floss", "batteries", "bags", "brush", "cleaner", "sponge",
];

/// Fetches the raw text of the external document.
pub trait DocumentFetcher {
    fn fetch(&self) -> Result<String>;
}

/// Runs a configured command and returns its stdout as the document text.
pub struct CommandFetcher {
    program: String,
    args: Vec<String>,
}

impl CommandFetcher {
    pub fn new(command: &[String]) -> Result<Self> {
        let (program, args) = command
            .split_first()
            .ok_or_else(|| GrabbitError::Fetch("Sync command is empty".to_string()))?;
        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }
}

impl DocumentFetcher for CommandFetcher {
    fn fetch(&self) -> Result<String> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .output()
            .map_err(|e| GrabbitError::Fetch(format!("Failed to run {}: {}", self.program, e)))?;
        if !output.status.success() {
            return Err(GrabbitError::Fetch(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        String::from_utf8(output.stdout)
            .map_err(|e| GrabbitError::Fetch(format!("Document is not valid UTF-8: {}", e)))
    }
}

/// Clean the document's lines into candidate names: whitespace and leading
/// bullets trimmed, header and divider rows dropped, first occurrence of
/// each name wins case-insensitively within the batch.
pub fn parse_candidates(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut candidates = Vec::new();

    for line in text.lines() {
        let name = line.trim().trim_start_matches(&BULLET_MARKERS[..]).trim();
        if name.is_empty() || name == HEADER_LITERAL || name.starts_with(DIVIDER_PREFIX) {
            continue;
        }
        if !seen.insert(name.to_lowercase()) {
            continue;
        }
        candidates.push(name.to_string());
    }

    candidates
}

/// Keyword guess for a synced line. Distinct on purpose from the alias-table
/// normalization used for manual adds.
pub fn categorize(name: &str) -> Category {
    let name = name.to_lowercase();
    if HOUSEHOLD_KEYWORDS.iter().any(|kw| name.contains(kw)) {
        Category::Household
    } else {
        Category::Groceries
    }
}

/// Merge the document text into the store and report the net-added count.
pub fn run<S: ItemStore>(store: &mut S, text: &str) -> Result<CmdResult> {
    let already_synced: HashSet<String> = store
        .all()?
        .into_iter()
        .filter(|item| item.source == Source::ExternalSync)
        .map(|item| item.name.to_lowercase())
        .collect();

    let mut added = 0;
    for name in parse_candidates(text) {
        if already_synced.contains(&name.to_lowercase()) {
            continue;
        }
        let category = categorize(&name);
        let mut new_item = NewItem::named(name);
        new_item.category = Some(category.to_string());
        new_item.source = Some(Source::ExternalSync.to_string());
        if add::run(store, new_item)?.success {
            added += 1;
        }
    }

    let mut result = CmdResult::ok().with_added_count(added);
    result.add_message(CmdMessage::success(format!(
        "Sync complete, added {} new item(s)",
        added
    )));
    Ok(result)
}

/// Fetch, then merge. A fetch failure yields an empty merge and a failure
/// envelope rather than aborting the caller.
pub fn run_with_fetcher<S: ItemStore>(
    store: &mut S,
    fetcher: &dyn DocumentFetcher,
) -> Result<CmdResult> {
    match fetcher.fetch() {
        Ok(text) => run(store, &text),
        Err(GrabbitError::Fetch(msg)) => {
            let mut result = CmdResult::fail(format!("Sync skipped: {}", msg));
            result.added_count = Some(0);
            Ok(result)
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::buy;
    use crate::model::Status;
    use crate::store::memory::{fixtures::StoreFixture, InMemoryStore};
    use crate::store::ItemStore;

    const DOC: &str = "grocery\n____\n* Milk\n- eggs\n\n  Dish Soap\nmilk\n";

    #[test]
    fn parses_lines_skipping_header_dividers_and_batch_duplicates() {
        let candidates = parse_candidates(DOC);
        assert_eq!(candidates, vec!["Milk", "eggs", "Dish Soap"]);
    }

    #[test]
    fn case_insensitive_batch_dedup_keeps_first_occurrence() {
        let candidates = parse_candidates("Milk\nmilk\nMILK\n");
        assert_eq!(candidates, vec!["Milk"]);
    }

    #[test]
    fn categorize_uses_household_keywords() {
        assert_eq!(categorize("Dish Soap"), Category::Household);
        assert_eq!(categorize("AA batteries"), Category::Household);
        assert_eq!(categorize("oat milk"), Category::Groceries);
    }

    #[test]
    fn merge_tags_items_with_the_sync_source() {
        let mut store = InMemoryStore::new();
        let result = run(&mut store, DOC).unwrap();
        assert!(result.success);
        assert_eq!(result.added_count, Some(3));

        let items = store.all().unwrap();
        assert!(items.iter().all(|item| item.source == Source::ExternalSync));
        let soap = items.iter().find(|i| i.name == "Dish Soap").unwrap();
        assert_eq!(soap.category, Category::Household);
        let milk = items.iter().find(|i| i.name == "Milk").unwrap();
        assert_eq!(milk.category, Category::Groceries);
    }

    #[test]
    fn second_run_over_identical_text_adds_nothing() {
        let mut store = InMemoryStore::new();
        let first = run(&mut store, DOC).unwrap();
        assert_eq!(first.added_count, Some(3));

        let second = run(&mut store, DOC).unwrap();
        assert_eq!(second.added_count, Some(0));
        assert_eq!(store.all().unwrap().len(), 3);
    }

    #[test]
    fn bought_synced_items_are_not_re_added() {
        let mut store = InMemoryStore::new();
        run(&mut store, "Milk\n").unwrap();
        let id = store.all().unwrap()[0].id;
        buy::run(&mut store, Some(id), None).unwrap();

        let again = run(&mut store, "Milk\n").unwrap();
        assert_eq!(again.added_count, Some(0));
        assert_eq!(store.get(&id).unwrap().status, Status::Bought);
    }

    #[test]
    fn manually_added_names_do_not_block_the_merge() {
        let fixture = StoreFixture::new().with_needed_item("Milk", None);
        let mut store = fixture.store;

        // Dedup is scoped to the sync provenance; the manual item stays
        // alongside the synced one.
        let result = run(&mut store, "Milk\n").unwrap();
        assert_eq!(result.added_count, Some(1));
        assert_eq!(store.all().unwrap().len(), 2);
    }

    struct FailingFetcher;

    impl DocumentFetcher for FailingFetcher {
        fn fetch(&self) -> crate::error::Result<String> {
            Err(GrabbitError::Fetch("document unavailable".to_string()))
        }
    }

    #[test]
    fn fetch_failure_skips_the_merge_and_reports_it() {
        let mut store = InMemoryStore::new();
        let result = run_with_fetcher(&mut store, &FailingFetcher).unwrap();
        assert!(!result.success);
        assert_eq!(result.added_count, Some(0));
        assert!(store.all().unwrap().is_empty());
    }

    #[test]
    fn empty_sync_command_is_rejected() {
        assert!(CommandFetcher::new(&[]).is_err());
    }
}
