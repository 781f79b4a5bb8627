//! Durable key/value storage for the session snapshot.
//!
//! [`SessionStorage`] mirrors the browser `localStorage` surface: string
//! values under string keys, read back verbatim. Interpreting the value is
//! the session store's job.
//!
//! # Backends
//!
//! - [`MemoryStorage`]: in-process map, lost on exit
//! - [`FileStorage`]: one file per key inside a data directory

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::error::Result;

/// Key under which the session snapshot is stored.
pub const SESSION_KEY: &str = "ecoTraceUser";

/// String key/value storage that outlives the process (or pretends to).
pub trait SessionStorage {
    /// Returns the value stored under `key`, or `None` if there is none.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;

    /// Removes the value under `key`. Removing a missing key is not an error.
    fn remove_item(&mut self, key: &str) -> Result<()>;
}

impl<T: SessionStorage + ?Sized> SessionStorage for Box<T> {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        (**self).remove_item(key)
    }
}
