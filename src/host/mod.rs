pub mod memory;
pub mod traits;

pub use memory::MemoryReplyStore;
pub use traits::{Messenger, ReplyStore};

use serde::{Deserialize, Serialize};

/// Opaque message identifier minted by the host framework.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub String);

impl MessageId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for MessageId {
    fn from(s: &str) -> Self {
        MessageId(s.to_string())
    }
}

impl From<String> for MessageId {
    fn from(s: String) -> Self {
        MessageId(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachmentKind {
    Photo,
    Video,
    Audio,
    File,
}

#[derive(Debug, Clone)]
pub struct Attachment {
    pub kind: AttachmentKind,
    pub url: String,
}

/// The message being replied to, as far as this command cares about it.
#[derive(Debug, Clone, Default)]
pub struct RepliedMessage {
    pub id: Option<MessageId>,
    pub attachments: Vec<Attachment>,
}

impl RepliedMessage {
    /// First photo attachment, if any.
    pub fn image_attachment(&self) -> Option<&Attachment> {
        self.attachments
            .iter()
            .find(|att| att.kind == AttachmentKind::Photo)
    }
}

/// Inbound message context handed over by the host framework.
#[derive(Debug, Clone)]
pub struct IncomingMessage {
    pub id: MessageId,
    pub sender_id: String,
    /// Raw argument line after the command prefix, untrimmed.
    pub body: String,
    pub replied_to: Option<RepliedMessage>,
}

impl IncomingMessage {
    pub fn new(id: impl Into<MessageId>, sender_id: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            sender_id: sender_id.into(),
            body: body.into(),
            replied_to: None,
        }
    }

    pub fn with_reply_context(mut self, replied_to: RepliedMessage) -> Self {
        self.replied_to = Some(replied_to);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_attachment_skips_non_photos() {
        let replied = RepliedMessage {
            id: None,
            attachments: vec![
                Attachment {
                    kind: AttachmentKind::Video,
                    url: "http://x/clip.mp4".to_string(),
                },
                Attachment {
                    kind: AttachmentKind::Photo,
                    url: "http://x/pic.png".to_string(),
                },
            ],
        };
        assert_eq!(replied.image_attachment().unwrap().url, "http://x/pic.png");
    }

    #[test]
    fn test_no_image_attachment() {
        let replied = RepliedMessage::default();
        assert!(replied.image_attachment().is_none());
    }
}
