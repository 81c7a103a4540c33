use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::Result;
use crate::host::traits::ReplyStore;
use crate::host::MessageId;
use crate::models::PendingSelection;

/// In-process reply store for hosts that do not bring their own, and for
/// tests.
#[derive(Debug, Default)]
pub struct MemoryReplyStore {
    entries: RwLock<HashMap<String, PendingSelection>>,
}

impl MemoryReplyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl ReplyStore for MemoryReplyStore {
    async fn set(&self, key: &MessageId, value: PendingSelection) -> Result<()> {
        self.entries
            .write()
            .await
            .insert(key.as_str().to_string(), value);
        Ok(())
    }

    async fn get(&self, key: &MessageId) -> Result<Option<PendingSelection>> {
        Ok(self.entries.read().await.get(key.as_str()).cloned())
    }

    async fn delete(&self, key: &MessageId) -> Result<()> {
        self.entries.write().await.remove(key.as_str());
        Ok(())
    }
}
