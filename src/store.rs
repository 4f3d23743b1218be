//! In-memory item store.
//!
//! Holds the ordered item list and the item currently selected for editing.

use crate::models::{parse_calories, Item, ItemError};

/// The item list plus the current selection.
///
/// The selection is kept as an id into `items`, so updates made through
/// [`ItemStore::update_item`] land on the list entry itself.
#[derive(Debug, Clone, Default)]
pub struct ItemStore {
    items: Vec<Item>,
    current: Option<u32>,
}

impl ItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with previously persisted items.
    pub fn from_items(items: Vec<Item>) -> Self {
        Self {
            items,
            current: None,
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Next id: one past the largest id in the list, or 1 when empty.
    fn next_id(&self) -> Result<u32, ItemError> {
        match self.items.iter().map(|item| item.id).max() {
            Some(max) => max.checked_add(1).ok_or(ItemError::IdExhausted),
            None => Ok(1),
        }
    }

    /// Parses the calories, assigns the next id and appends the item.
    pub fn add_item(&mut self, name: &str, raw_calories: &str) -> Result<Item, ItemError> {
        let calories = parse_calories(raw_calories)?;
        let item = Item::new(self.next_id()?, name, calories);
        tracing::debug!("Adding item {} ({})", item.id, item);
        self.items.push(item.clone());
        Ok(item)
    }

    /// Overwrites the name and calories of the current item in place.
    pub fn update_item(&mut self, name: &str, raw_calories: &str) -> Result<Item, ItemError> {
        let id = self.current.ok_or(ItemError::NoCurrentItem)?;
        let calories = parse_calories(raw_calories)?;
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or(ItemError::NoCurrentItem)?;
        item.name = name.to_string();
        item.calories = calories;
        tracing::debug!("Updated item {} ({})", item.id, item);
        Ok(item.clone())
    }

    /// Removes the item with `id`. Does nothing if it is not present.
    pub fn delete_item(&mut self, id: u32) {
        self.items.retain(|item| item.id != id);
        if self.current == Some(id) {
            self.current = None;
        }
    }

    pub fn clear_all_items(&mut self) {
        self.items.clear();
        self.current = None;
    }

    /// Sum of calories over all items, recomputed on every call.
    ///
    /// Saturates at the bounds of `i64` instead of wrapping.
    pub fn total_calories(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |total, item| total.saturating_add(item.calories))
    }

    pub fn get_item_by_id(&self, id: u32) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn current_item(&self) -> Option<&Item> {
        self.current.and_then(|id| self.get_item_by_id(id))
    }

    /// Selects the item with `id` for editing, returning it.
    ///
    /// The selection is left unchanged when no such item exists.
    pub fn set_current_item(&mut self, id: u32) -> Option<&Item> {
        if self.get_item_by_id(id).is_some() {
            self.current = Some(id);
        }
        self.current_item()
    }

    pub fn clear_current_item(&mut self) {
        self.current = None;
    }
}
