//! Persistence for the session-expiry record.
//!
//! Provides an [`ExpiryStore`] trait with two implementations:
//! - [`FileStore`] - JSON file on disk, the local-storage stand-in
//! - [`MemoryStore`] - ephemeral store for tests/disabled persistence

mod file_store;
mod memory_store;
mod store;

pub use file_store::FileStore;
pub use memory_store::MemoryStore;
pub use store::{ExpiryStore, StoreError, StoreResult};

#[cfg(test)]
pub use store::MockExpiryStore;
