use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::store::{Result, Store};

/// In-process store backend.
///
/// Holds entries for the lifetime of the process only. Selected through
/// configuration for local development; integration tests lean on it too.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
