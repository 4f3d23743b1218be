//! Presentation of the item list, the form and the calorie total.
//!
//! The coordinator talks to the page only through [`View`]. Implementations
//! render state they are handed and report what the user typed; they never
//! touch the item store or storage.

mod html;
mod page;

use crate::models::{element_id, parse_element_id, Item, ItemInput};

pub use html::escape_html;
pub use page::{ListRow, Page, Visibility};

/// Marker class carried by the edit icon of each list row.
pub const EDIT_MARKER: &str = "edit-item";

/// Fixed table of element locators on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selectors {
    pub item_list: &'static str,
    pub item_name_input: &'static str,
    pub item_calories_input: &'static str,
    pub list_items: &'static str,
    pub add_btn: &'static str,
    pub clear_btn: &'static str,
    pub update_btn: &'static str,
    pub delete_btn: &'static str,
    pub back_btn: &'static str,
    pub total_calories: &'static str,
}

pub const SELECTORS: Selectors = Selectors {
    item_list: "#item-list",
    item_name_input: "#item-name",
    item_calories_input: "#item-calories",
    list_items: "#item-list li",
    add_btn: ".add-btn",
    clear_btn: ".clear-btn",
    update_btn: ".update-btn",
    delete_btn: ".delete-btn",
    back_btn: ".back-btn",
    total_calories: ".total-calories",
};

/// Which set of form buttons is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Only the add button; inputs start empty.
    Add,
    /// Update, delete and back buttons; inputs hold the current item.
    Edit,
}

/// The element a click landed on inside the item list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClickTarget {
    /// Classes on the clicked element.
    pub classes: Vec<String>,
    /// Element id of the list row containing the clicked element.
    pub row_id: Option<String>,
}

impl ClickTarget {
    /// A click on the edit icon inside the row with `row_id`.
    pub fn edit_icon_in(row_id: impl Into<String>) -> Self {
        Self {
            classes: vec![EDIT_MARKER.to_string(), "fa".to_string(), "fa-pencil".to_string()],
            row_id: Some(row_id.into()),
        }
    }

    /// A click on the edit icon of the row for item `id`.
    pub fn edit_icon(id: u32) -> Self {
        Self::edit_icon_in(element_id(id))
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn is_edit(&self) -> bool {
        self.has_class(EDIT_MARKER)
    }

    /// Item id encoded in the containing row's element id.
    pub fn item_id(&self) -> Option<u32> {
        self.row_id.as_deref().and_then(parse_element_id)
    }
}

/// Rendering surface driven by the coordinator.
pub trait View {
    /// Replaces all list rows with one row per item.
    fn populate_item_list(&mut self, items: &[Item]);

    /// Appends a row for `item` and makes the list visible.
    fn add_list_item(&mut self, item: &Item);

    /// Re-renders the row for `item`, if present.
    fn update_list_item(&mut self, item: &Item);

    fn delete_list_item(&mut self, id: u32);

    fn remove_all_list_items(&mut self);

    fn hide_list(&mut self);

    fn show_total_calories(&mut self, total: i64);

    /// Empties both form inputs.
    fn clear_input(&mut self);

    /// Fills the form inputs from `item`.
    fn add_item_to_form(&mut self, item: &Item);

    /// Switches to edit mode.
    fn show_edit_state(&mut self);

    /// Switches to add mode and clears the inputs.
    fn clear_edit_state(&mut self);

    /// Current raw values of the form inputs.
    fn get_item_input(&self) -> ItemInput;

    fn selectors(&self) -> &'static Selectors {
        &SELECTORS
    }
}
