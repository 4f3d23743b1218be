//! Local key-value storage and the item persistence built on it.
//!
//! Storage follows the browser `localStorage` contract: string keys map to
//! string values, every call is synchronous, and a missing key reads as
//! `None`. The item list lives under a single key as one JSON array.

mod file;
mod items;
mod memory;

use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub use file::FileStore;
pub use items::{ItemStorage, ITEMS_KEY};
pub use memory::MemoryStore;

/// Errors that can occur during storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error for {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Malformed data under key '{key}': {source}")]
    Malformed {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize data for key '{key}': {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Synchronous string key-value storage.
pub trait KeyValueStore {
    /// Returns the value stored under `key`, or `None` when absent.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes `key`. Removing an absent key is not an error.
    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;
}
