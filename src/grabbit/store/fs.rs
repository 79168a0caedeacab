use std::fs;
use std::path::PathBuf;

use uuid::Uuid;

use super::{ItemPatch, ItemStore};
use crate::error::{GrabbitError, Result};
use crate::model::Item;

const ITEMS_FILENAME: &str = "items.json";

/// File-backed store: the whole collection lives in one JSON array, loaded
/// on every call and replaced atomically on every mutation.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn items_path(&self) -> PathBuf {
        self.root.join(ITEMS_FILENAME)
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(GrabbitError::Io)?;
        }
        Ok(())
    }

    fn load(&self) -> Result<Vec<Item>> {
        let path = self.items_path();
        if !path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(path).map_err(GrabbitError::Io)?;
        let items: Vec<Item> =
            serde_json::from_str(&content).map_err(GrabbitError::Serialization)?;
        Ok(items)
    }

    // Write to a sibling temp file and rename over items.json, so a failed
    // write never leaves a truncated collection behind.
    fn save(&self, items: &[Item]) -> Result<()> {
        self.ensure_dir()?;
        let content = serde_json::to_string_pretty(items).map_err(GrabbitError::Serialization)?;
        let tmp = self.root.join(format!("{}.tmp", ITEMS_FILENAME));
        fs::write(&tmp, content).map_err(GrabbitError::Io)?;
        fs::rename(&tmp, self.items_path()).map_err(GrabbitError::Io)?;
        Ok(())
    }
}

impl ItemStore for FileStore {
    fn add(&mut self, item: Item) -> Result<Item> {
        let mut items = self.load()?;
        if items.iter().any(|existing| existing.id == item.id) {
            return Err(GrabbitError::DuplicateId(item.id));
        }
        items.push(item.clone());
        self.save(&items)?;
        Ok(item)
    }

    fn get(&self, id: &Uuid) -> Result<Item> {
        self.load()?
            .into_iter()
            .find(|item| item.id == *id)
            .ok_or(GrabbitError::ItemNotFound(*id))
    }

    fn update(&mut self, id: &Uuid, patch: &ItemPatch) -> Result<Item> {
        let mut items = self.load()?;
        let item = items
            .iter_mut()
            .find(|item| item.id == *id)
            .ok_or(GrabbitError::ItemNotFound(*id))?;
        patch.apply(item);
        let updated = item.clone();
        self.save(&items)?;
        Ok(updated)
    }

    fn delete(&mut self, id: &Uuid) -> Result<bool> {
        let mut items = self.load()?;
        let original_len = items.len();
        items.retain(|item| item.id != *id);
        if items.len() == original_len {
            return Ok(false);
        }
        self.save(&items)?;
        Ok(true)
    }

    fn all(&self) -> Result<Vec<Item>> {
        self.load()
    }
}
