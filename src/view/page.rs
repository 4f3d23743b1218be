//! Retained page model.
//!
//! `Page` holds exactly what a browser page would show: input values,
//! button visibility, list rows and the total text. It is the view used by
//! the CLI and the test double for the coordinator.

use std::fmt;

use crate::models::{element_id, Item, ItemInput};

use super::{ClickTarget, Mode, View};

/// CSS `display` state of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Shown,
    Hidden,
}

impl Visibility {
    pub fn is_shown(self) -> bool {
        self == Visibility::Shown
    }
}

/// One rendered row of the item list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRow {
    /// Element id, `item-<id>`.
    pub id: String,
    pub class: String,
    pub name: String,
    pub calories: i64,
}

impl ListRow {
    pub fn from_item(item: &Item) -> Self {
        Self {
            id: item.element_id(),
            class: "collection-item".to_string(),
            name: item.name.clone(),
            calories: item.calories,
        }
    }
}

/// The rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub name_input: String,
    pub calories_input: String,
    pub add_btn: Visibility,
    pub update_btn: Visibility,
    pub delete_btn: Visibility,
    pub back_btn: Visibility,
    pub list: Visibility,
    pub rows: Vec<ListRow>,
    pub total_calories: String,
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

impl Page {
    /// A freshly loaded page: every element shown, nothing rendered yet.
    pub fn new() -> Self {
        Self {
            name_input: String::new(),
            calories_input: String::new(),
            add_btn: Visibility::Shown,
            update_btn: Visibility::Shown,
            delete_btn: Visibility::Shown,
            back_btn: Visibility::Shown,
            list: Visibility::Shown,
            rows: Vec::new(),
            total_calories: "0".to_string(),
        }
    }

    /// Types into the form inputs.
    pub fn set_input(&mut self, name: impl Into<String>, calories: impl Into<String>) {
        self.name_input = name.into();
        self.calories_input = calories.into();
    }

    pub fn set_name_input(&mut self, name: impl Into<String>) {
        self.name_input = name.into();
    }

    pub fn set_calories_input(&mut self, calories: impl Into<String>) {
        self.calories_input = calories.into();
    }

    pub fn mode(&self) -> Mode {
        if self.add_btn.is_shown() {
            Mode::Add
        } else {
            Mode::Edit
        }
    }

    pub fn row(&self, element_id: &str) -> Option<&ListRow> {
        self.rows.iter().find(|row| row.id == element_id)
    }

    /// The edit icon inside the row with `element_id`, if the row exists.
    pub fn edit_target(&self, element_id: &str) -> Option<ClickTarget> {
        self.row(element_id)
            .map(|row| ClickTarget::edit_icon_in(row.id.clone()))
    }
}

impl View for Page {
    fn populate_item_list(&mut self, items: &[Item]) {
        self.rows = items.iter().map(ListRow::from_item).collect();
    }

    fn add_list_item(&mut self, item: &Item) {
        self.list = Visibility::Shown;
        self.rows.push(ListRow::from_item(item));
    }

    fn update_list_item(&mut self, item: &Item) {
        let element_id = item.element_id();
        if let Some(row) = self.rows.iter_mut().find(|row| row.id == element_id) {
            *row = ListRow::from_item(item);
        }
    }

    fn delete_list_item(&mut self, id: u32) {
        let element_id = element_id(id);
        self.rows.retain(|row| row.id != element_id);
    }

    fn remove_all_list_items(&mut self) {
        self.rows.clear();
    }

    fn hide_list(&mut self) {
        self.list = Visibility::Hidden;
    }

    fn show_total_calories(&mut self, total: i64) {
        self.total_calories = total.to_string();
    }

    fn clear_input(&mut self) {
        self.name_input.clear();
        self.calories_input.clear();
    }

    fn add_item_to_form(&mut self, item: &Item) {
        self.name_input = item.name.clone();
        self.calories_input = item.calories.to_string();
    }

    fn show_edit_state(&mut self) {
        self.delete_btn = Visibility::Shown;
        self.update_btn = Visibility::Shown;
        self.back_btn = Visibility::Shown;
        self.add_btn = Visibility::Hidden;
    }

    fn clear_edit_state(&mut self) {
        self.clear_input();
        self.delete_btn = Visibility::Hidden;
        self.update_btn = Visibility::Hidden;
        self.back_btn = Visibility::Hidden;
        self.add_btn = Visibility::Shown;
    }

    fn get_item_input(&self) -> ItemInput {
        ItemInput::new(self.name_input.clone(), self.calories_input.clone())
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Tracalorie")?;
        writeln!(f, "{}", "=".repeat(40))?;
        writeln!(f, "Meal:     [{}]", self.name_input)?;
        writeln!(f, "Calories: [{}]", self.calories_input)?;

        let buttons: Vec<&str> = [
            ("Add Meal", self.add_btn),
            ("Update Meal", self.update_btn),
            ("Delete Meal", self.delete_btn),
            ("Back", self.back_btn),
        ]
        .iter()
        .filter(|(_, visibility)| visibility.is_shown())
        .map(|(label, _)| *label)
        .collect();
        writeln!(f, "Buttons:  {}", buttons.join(" | "))?;
        writeln!(f)?;

        writeln!(f, "Total Calories: {}", self.total_calories)?;
        writeln!(f, "{}", "-".repeat(40))?;

        if self.list.is_shown() && !self.rows.is_empty() {
            for row in &self.rows {
                writeln!(f, "{:<10} {}: {} Calories", row.id, row.name, row.calories)?;
            }
        } else {
            writeln!(f, "No items")?;
        }

        Ok(())
    }
}
