//! Item list persistence.
//!
//! The whole list is stored as one JSON array under [`ITEMS_KEY`]. Every
//! operation reads the full array, changes it, and writes it back.

use crate::models::Item;

use super::{KeyValueStore, StorageError};

/// Storage key holding the serialized item list.
pub const ITEMS_KEY: &str = "items";

/// Mirrors the item list into a [`KeyValueStore`].
#[derive(Debug, Clone)]
pub struct ItemStorage<S> {
    backend: S,
}

impl<S: KeyValueStore> ItemStorage<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Loads the persisted list. An absent key reads as an empty list.
    pub fn get_items(&self) -> Result<Vec<Item>, StorageError> {
        match self.backend.get_item(ITEMS_KEY)? {
            Some(json) => {
                let items: Vec<Item> =
                    serde_json::from_str(&json).map_err(|source| StorageError::Malformed {
                        key: ITEMS_KEY.to_string(),
                        source,
                    })?;
                tracing::debug!("Loaded {} item(s) from storage", items.len());
                Ok(items)
            }
            None => Ok(Vec::new()),
        }
    }

    fn write_items(&mut self, items: &[Item]) -> Result<(), StorageError> {
        let json = serde_json::to_string(items).map_err(|source| StorageError::Serialize {
            key: ITEMS_KEY.to_string(),
            source,
        })?;
        self.backend.set_item(ITEMS_KEY, &json)?;
        tracing::debug!("Wrote {} item(s) to storage", items.len());
        Ok(())
    }

    /// Appends `item` to the persisted list.
    pub fn store_item(&mut self, item: &Item) -> Result<(), StorageError> {
        let mut items = self.get_items()?;
        items.push(item.clone());
        self.write_items(&items)
    }

    /// Replaces the persisted copy of `item`. The item moves to the end.
    pub fn update_item_storage(&mut self, item: &Item) -> Result<(), StorageError> {
        let mut items = self.get_items()?;
        items.retain(|stored| stored.id != item.id);
        items.push(item.clone());
        self.write_items(&items)
    }

    pub fn delete_item_from_storage(&mut self, item: &Item) -> Result<(), StorageError> {
        let mut items = self.get_items()?;
        items.retain(|stored| stored.id != item.id);
        self.write_items(&items)
    }

    /// Removes the stored list entirely.
    pub fn clear_items_from_storage(&mut self) -> Result<(), StorageError> {
        self.backend.remove_item(ITEMS_KEY)
    }
}
