use std::path::Path;

use async_trait::async_trait;

use crate::error::Result;
use crate::host::MessageId;
use crate::models::PendingSelection;

/// Outbound messaging surface of the host bot framework.
///
/// A successful reply resolves to the identifier of the sent message,
/// which is what pending selections are keyed by.
#[async_trait]
pub trait Messenger: Send + Sync {
    async fn reply(&self, body: &str) -> Result<MessageId>;

    async fn reply_with_attachment(&self, body: &str, attachment: &Path) -> Result<MessageId>;

    /// React to a message with an emoji. Best effort; hosts that do not
    /// support reactions may no-op.
    async fn reaction(&self, emoji: &str, target: &MessageId) -> Result<()>;

    /// Retract a previously sent message.
    async fn unsend(&self, id: &MessageId) -> Result<()>;
}

/// Reply-registration store owned by the host framework, keyed by the
/// identifier of the sent grid message. Must be safe for concurrent
/// registration and lookup.
#[async_trait]
pub trait ReplyStore: Send + Sync {
    async fn set(&self, key: &MessageId, value: PendingSelection) -> Result<()>;
    async fn get(&self, key: &MessageId) -> Result<Option<PendingSelection>>;
    async fn delete(&self, key: &MessageId) -> Result<()>;
}

// Lets a host share one store between its own dispatcher and the command.
#[async_trait]
impl<S: ReplyStore + ?Sized> ReplyStore for std::sync::Arc<S> {
    async fn set(&self, key: &MessageId, value: PendingSelection) -> Result<()> {
        (**self).set(key, value).await
    }

    async fn get(&self, key: &MessageId) -> Result<Option<PendingSelection>> {
        (**self).get(key).await
    }

    async fn delete(&self, key: &MessageId) -> Result<()> {
        (**self).delete(key).await
    }
}
