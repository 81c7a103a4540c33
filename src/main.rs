use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mjbot::{
    ImageCommand, IncomingMessage, MemoryReplyStore, MessageId, Messenger, MidjourneyClient,
    MjConfig, MjError, RepliedMessage, ReplyStore, Result, COMMAND_INFO,
};
use uuid::Uuid;

/// Messenger that talks to the terminal instead of a chat platform.
/// Replies are printed, attachments reported by path and size, and every
/// sent message gets a fresh uuid as its identifier.
struct ConsoleMessenger {
    last_sent: Mutex<Option<MessageId>>,
}

impl ConsoleMessenger {
    fn new() -> Self {
        Self {
            last_sent: Mutex::new(None),
        }
    }

    fn mint_id(&self) -> MessageId {
        let id = MessageId(Uuid::new_v4().to_string());
        if let Ok(mut last) = self.last_sent.lock() {
            *last = Some(id.clone());
        }
        id
    }

    fn last_sent(&self) -> Option<MessageId> {
        self.last_sent.lock().ok().and_then(|l| l.clone())
    }
}

#[async_trait]
impl Messenger for ConsoleMessenger {
    async fn reply(&self, body: &str) -> Result<MessageId> {
        println!("{}", body);
        Ok(self.mint_id())
    }

    async fn reply_with_attachment(&self, body: &str, attachment: &Path) -> Result<MessageId> {
        let size = tokio::fs::metadata(attachment)
            .await
            .map_err(|e| MjError::Host(format!("Attachment missing: {}", e)))?
            .len();
        println!("{}", body);
        println!("[attachment: {} ({} bytes)]", attachment.display(), size);
        Ok(self.mint_id())
    }

    async fn reaction(&self, emoji: &str, target: &MessageId) -> Result<()> {
        log::debug!("Reaction {} on message {}", emoji, target);
        Ok(())
    }

    async fn unsend(&self, id: &MessageId) -> Result<()> {
        log::debug!("Unsent message {}", id);
        Ok(())
    }
}

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    match dotenv::dotenv() {
        Ok(_) => log::info!("✅ .env file loaded successfully"),
        Err(_) => log::warn!("⚠️  No .env file found, using system environment variables"),
    }

    mjbot::logger::init_with_config(
        mjbot::logger::LoggerConfig::development().with_level(mjbot::logger::LogLevel::Debug),
    )?;

    let prompt_line: String = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    if prompt_line.trim().is_empty() {
        log::error!(
            "Usage: mjbot <prompt> [--cref <url>]  ({} / aliases: {})",
            COMMAND_INFO.name,
            COMMAND_INFO.aliases.join(", ")
        );
        return Ok(());
    }

    let config = MjConfig::from_env();
    log::info!("⚙️  Generation endpoint: {}", config.endpoint);
    log::info!("⚙️  Cache directory: {}", config.cache_dir.display());

    let client = MidjourneyClient::new(&config);
    let store = Arc::new(MemoryReplyStore::new());
    let command = ImageCommand::new(client, store.clone(), &config);
    let messenger = ConsoleMessenger::new();

    log::info!("🎨 Generating for prompt: {}", prompt_line);
    let request = IncomingMessage::new(Uuid::new_v4().to_string(), "console-user", prompt_line);
    command.handle_generate(&request, &messenger).await?;

    let Some(grid_id) = messenger.last_sent() else {
        return Ok(());
    };
    if store.get(&grid_id).await?.is_none() {
        // Generation failed; nothing to select from.
        return Ok(());
    }

    println!("Reply with U1, U2, U3, or U4:");
    let mut selection = String::new();
    std::io::stdin().read_line(&mut selection)?;

    let reply = IncomingMessage::new(Uuid::new_v4().to_string(), "console-user", selection.trim())
        .with_reply_context(RepliedMessage {
            id: Some(grid_id),
            attachments: vec![],
        });
    command.handle_select(&reply, &messenger).await?;

    log::info!("🎉 Done");
    Ok(())
}
