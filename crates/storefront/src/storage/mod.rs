//! Key-value persistence for client state.
//!
//! The session token and the local cart survive restarts by living in a
//! [`KeyValueStore`]. Store logic only ever sees this trait, so it can be
//! exercised against [`MemoryStore`] in tests and backed by [`FileStore`] in
//! the terminal front end.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use thiserror::Error;

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A previous writer panicked while holding the store lock.
    #[error("storage lock poisoned")]
    Poisoned,

    /// The key cannot be mapped onto the backend.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),
}

/// A string-to-string persistent store, in the manner of browser local storage.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns a `StorageError` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a `StorageError` if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns a `StorageError` if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Storage keys for persisted client state.
pub mod keys {
    /// Key for the bearer token issued at login.
    pub const TOKEN: &str = "token";

    /// Key for the JSON-serialized local cart.
    pub const CART: &str = "cart";
}
