//! Expiry store trait and error types.

use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("store serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Key-value persistence for the session-expiry record, standing in for
/// browser local storage.
///
/// Operations are synchronous and cheap; implementations must be
/// thread-safe. A failed write on the login path is logged and never blocks
/// the flow.
///
/// # Implementations
///
/// - [`crate::infrastructure::storage::FileStore`] - JSON file on disk
/// - [`crate::infrastructure::storage::MemoryStore`] - ephemeral, for tests
///   and runs without persistence
#[cfg_attr(test, mockall::automock)]
pub trait ExpiryStore: Send + Sync {
    /// Reads the value stored under `key`, if any.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Removes `key`; removing an absent key is not an error.
    fn remove(&self, key: &str) -> StoreResult<()>;
}
