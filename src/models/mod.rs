mod item;

pub use item::{
    element_id, parse_calories, parse_element_id, Item, ItemError, ItemInput, ELEMENT_ID_PREFIX,
};
