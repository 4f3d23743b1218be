//! Tracalorie
//!
//! Tracks food items and their calories. Items live in an in-memory store,
//! are mirrored to local key-value storage, and are presented through a view.

pub mod app;
pub mod config;
pub mod models;
pub mod storage;
pub mod store;
pub mod view;

pub use app::{App, AppError, Event, EventOutcome};
pub use config::{Config, ConfigError, ConfigSource, ConfigValue};
pub use models::{Item, ItemError, ItemInput};
pub use storage::{FileStore, ItemStorage, KeyValueStore, MemoryStore, StorageError, ITEMS_KEY};
pub use store::ItemStore;
pub use view::{ClickTarget, Mode, Page, Selectors, View, SELECTORS};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
