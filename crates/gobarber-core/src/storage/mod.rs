//! Device-local key-value storage.
//!
//! The session store only needs a handful of string values that survive a
//! restart. All operations are batched: one call reads, writes or removes
//! several keys at once.
//!
//! - `FileStore`: JSON document on disk, written atomically
//! - `MemoryStore`: process-local map, used for `--ephemeral` runs and tests

pub mod error;
pub mod file;
pub mod memory;

use async_trait::async_trait;

pub use error::StorageError;
pub use file::FileStore;
pub use memory::MemoryStore;

/// Batched string key-value storage.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read several keys. The result has one slot per requested key, in order.
    async fn multi_get(&self, keys: &[&str]) -> Result<Vec<Option<String>>, StorageError>;

    /// Write several key/value pairs in one operation.
    async fn multi_set(&self, entries: &[(&str, &str)]) -> Result<(), StorageError>;

    /// Remove several keys. Missing keys are ignored.
    async fn multi_remove(&self, keys: &[&str]) -> Result<(), StorageError>;
}
