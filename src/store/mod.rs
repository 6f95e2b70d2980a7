//! Key-value store capability.
//!
//! The gateway consumes the external backend only through the [`Store`]
//! trait. The production backend speaks RESP to a Redis-compatible server;
//! the memory backend keeps a HashMap in-process for local development and
//! tests.

use std::future::Future;

use thiserror::Error;

pub mod memory;
pub mod redis;

pub use self::memory::MemoryStore;
pub use self::redis::RedisStore;

/// Error type for store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// IO error on the store connection.
    #[error("store io error: {0}")]
    Io(#[from] std::io::Error),

    /// The backend sent something the client cannot make sense of.
    #[error("store protocol error: {0}")]
    Protocol(String),

    /// The backend refused the operation; the message is forwarded as-is.
    #[error("{0}")]
    Rejected(String),
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Capability contract for the external key-value backend.
///
/// `get` never mutates; `set` is idempotent for a fixed key/value pair.
/// Handles must be cheaply cloneable so every connection task can hold one;
/// the backend serializes its own operations, so no locking happens here.
pub trait Store: Clone + Send + Sync + 'static {
    /// Reads the value stored under `key`, `None` when absent.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>>> + Send;

    /// Writes `value` under `key`, overwriting any previous value.
    fn set(&self, key: &str, value: &str) -> impl Future<Output = Result<()>> + Send;
}
