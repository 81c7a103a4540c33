pub mod api;
pub mod cache;
pub mod command;
pub mod config;
pub mod error;
pub mod host;
pub mod logger;
pub mod models;

pub use api::{GenerationApi, MidjourneyClient};
pub use cache::{CacheDir, ScratchFile};
pub use command::{CommandInfo, ImageCommand, COMMAND_INFO};
pub use config::MjConfig;
pub use error::{MjError, Result};
pub use host::{
    Attachment, AttachmentKind, IncomingMessage, MemoryReplyStore, MessageId, Messenger,
    RepliedMessage, ReplyStore,
};
pub use models::{
    GenerateResponse, GenerationRequest, GenerationResult, PendingSelection, ReferenceImage,
    SelectionToken,
};
