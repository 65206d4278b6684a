//! Durable per-key string storage.
//!
//! The store is a keyed string map with two distinct lifetimes: the
//! profile scope survives across sessions (favorites, theme, language)
//! while the session scope is cleared when the browsing session ends
//! (search history, last viewed, filters). Backends only move strings;
//! callers own the JSON encoding of the values they persist.

mod filesystem;
mod memory;

pub use filesystem::FileStore;
pub use memory::MemoryStore;

use crate::Result;

/// Lifetime scope of a stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreScope {
    /// Survives across sessions.
    Profile,
    /// Cleared when the browsing session ends.
    Session,
}

impl StoreScope {
    /// Directory name used by filesystem-backed stores.
    #[must_use]
    pub const fn dir_name(self) -> &'static str {
        match self {
            Self::Profile => "profile",
            Self::Session => "session",
        }
    }
}

/// Trait for durable key-value backends.
///
/// Implementations are the sole owners of their medium; concurrent
/// mutations to the same key are last-write-wins by contract.
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the medium cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the medium cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the medium cannot be written.
    fn remove(&self, key: &str) -> Result<()>;
}
