use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A food entry with its calorie count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: u32,
    pub name: String,
    pub calories: i64,
}

impl Item {
    pub fn new(id: u32, name: impl Into<String>, calories: i64) -> Self {
        Self {
            id,
            name: name.into(),
            calories,
        }
    }

    /// Element id of the list row rendering this item.
    pub fn element_id(&self) -> String {
        element_id(self.id)
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} Calories", self.name, self.calories)
    }
}

/// Prefix of list row element ids (`item-3`).
pub const ELEMENT_ID_PREFIX: &str = "item-";

pub fn element_id(id: u32) -> String {
    format!("{}{}", ELEMENT_ID_PREFIX, id)
}

/// Extracts the item id from a list row element id such as `item-3`.
pub fn parse_element_id(element_id: &str) -> Option<u32> {
    element_id
        .strip_prefix(ELEMENT_ID_PREFIX)
        .and_then(|rest| rest.parse().ok())
}

/// Errors raised while building or changing an item.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ItemError {
    #[error("Invalid calories '{0}': expected a whole number")]
    InvalidCalories(String),

    #[error("No item is selected for editing")]
    NoCurrentItem,

    #[error("No item ids left to assign")]
    IdExhausted,
}

/// Parses raw form input into a calorie count.
///
/// Surrounding whitespace is ignored. Anything else that is not a whole
/// number in range is rejected.
pub fn parse_calories(raw: &str) -> Result<i64, ItemError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ItemError::InvalidCalories(raw.to_string()))
}

/// Raw values read from the item form, before any parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemInput {
    pub name: String,
    pub calories: String,
}

impl ItemInput {
    pub fn new(name: impl Into<String>, calories: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            calories: calories.into(),
        }
    }

    /// True when both fields hold something.
    pub fn is_complete(&self) -> bool {
        !self.name.is_empty() && !self.calories.is_empty()
    }
}
