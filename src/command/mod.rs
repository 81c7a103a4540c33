pub mod parser;

pub use parser::{CrefDirective, ResolvedPrompt};

use crate::api::GenerationApi;
use crate::cache::CacheDir;
use crate::config::MjConfig;
use crate::error::Result;
use crate::host::traits::{Messenger, ReplyStore};
use crate::host::IncomingMessage;
use crate::models::{GenerationRequest, PendingSelection, ReferenceImage, SelectionToken};

/// Command metadata consumed by the host framework's dispatcher.
#[derive(Debug, Clone, Copy)]
pub struct CommandInfo {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub version: &'static str,
    pub category: &'static str,
    /// Minimum role allowed to run the command (0 = everyone).
    pub role: u8,
    pub description: &'static str,
    pub guide: &'static str,
}

pub const COMMAND_INFO: CommandInfo = CommandInfo {
    name: "midjourney",
    aliases: &["mj", "imagine"],
    version: "2.1",
    category: "ai-image",
    role: 0,
    description: "Generate images using the Midjourney API with an optional image reference (--cref).",
    guide: "{pn} [prompt] --cref [imgurl] OR reply to an image.",
};

const EMOJI_PENDING: &str = "⏳";
const EMOJI_DONE: &str = "✅";
const EMOJI_FAILED: &str = "❌";

const MSG_EMPTY_PROMPT: &str = "❌ Please provide a detailed prompt to generate images.";
const MSG_ENCODING_REFERENCE: &str = "🔄 Processing reference image (Base64 encoding)...";
const MSG_INVALID_SELECTION: &str = "❌ Invalid selection. Please reply with U1, U2, U3, or U4.";

/// The midjourney command: one generation cycle per invocation, one
/// selection cycle per reply to a sent grid.
///
/// Holds no mutable state of its own; pending selections live in the
/// injected [`ReplyStore`].
pub struct ImageCommand<A: GenerationApi, S: ReplyStore> {
    api: A,
    store: S,
    cache: CacheDir,
}

impl<A: GenerationApi, S: ReplyStore> ImageCommand<A, S> {
    pub fn new(api: A, store: S, config: &MjConfig) -> Self {
        Self {
            api,
            store,
            cache: CacheDir::new(config.cache_dir.clone()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Entry point for a command invocation. Every failure is surfaced to
    /// the user inside this call; the returned error covers only the
    /// host transport itself.
    pub async fn handle_generate(
        &self,
        msg: &IncomingMessage,
        messenger: &dyn Messenger,
    ) -> Result<()> {
        let parsed = parser::resolve(&msg.body, msg.replied_to.as_ref());

        if parsed.prompt.is_empty() {
            messenger.reply(MSG_EMPTY_PROMPT).await?;
            return Ok(());
        }

        let _ = messenger.reaction(EMOJI_PENDING, &msg.id).await;

        match self.run_generate(&parsed, msg, messenger).await {
            Ok(()) => {
                let _ = messenger.reaction(EMOJI_DONE, &msg.id).await;
            }
            Err(e) => {
                log::error!("Midjourney command error: {}", e);
                let _ = messenger.reaction(EMOJI_FAILED, &msg.id).await;
                messenger
                    .reply(&format!("❌ Image generation failed: {}", e.user_message()))
                    .await?;
            }
        }
        Ok(())
    }

    async fn run_generate(
        &self,
        parsed: &ResolvedPrompt,
        msg: &IncomingMessage,
        messenger: &dyn Messenger,
    ) -> Result<()> {
        let mut request = GenerationRequest::new(parsed.prompt.clone());

        if let Some(reference_url) = &parsed.reference {
            let _ = messenger.reply(MSG_ENCODING_REFERENCE).await;
            let data_uri = self.api.fetch_data_uri(reference_url).await?;
            request = request.with_reference(ReferenceImage::DataUri(data_uri));
        }

        let result = self.api.generate(&request).await?;
        log::info!(
            "Generated grid for prompt '{}' (task {})",
            parsed.prompt,
            result.task_id
        );

        let tag = if result.task_id.is_empty() {
            msg.id.as_str()
        } else {
            result.task_id.as_str()
        };
        let scratch = self.cache.scratch(&CacheDir::grid_file_name(tag)).await?;
        self.api.download_to(&result.grid_url, scratch.path()).await?;

        let body = format!(
            "✨ Midjourney image generated\n{}Please reply U1, U2, U3, or U4 for viewing the exact image.",
            if parsed.reference.is_some() {
                "[Ref: Included]\n"
            } else {
                ""
            }
        );

        let send_result = messenger.reply_with_attachment(&body, scratch.path()).await;
        // The scratch file goes away as soon as the send resolves,
        // whatever the outcome.
        drop(scratch);
        let sent_id = send_result?;

        let pending = PendingSelection {
            command_name: COMMAND_INFO.name.to_string(),
            message_id: sent_id.as_str().to_string(),
            author: msg.sender_id.clone(),
            image_urls: result.image_urls,
            prompt: parsed.prompt.clone(),
        };
        self.store.set(&sent_id, pending).await?;
        log::debug!("Registered pending selection for message {}", sent_id);

        Ok(())
    }

    /// Entry point for a reply to a previously sent grid message.
    ///
    /// The pending entry is consumed and the grid prompt retracted on any
    /// reply, valid token or not. Replies to untracked messages are
    /// ignored.
    pub async fn handle_select(
        &self,
        msg: &IncomingMessage,
        messenger: &dyn Messenger,
    ) -> Result<()> {
        let Some(grid_id) = msg.replied_to.as_ref().and_then(|r| r.id.clone()) else {
            return Ok(());
        };

        let Some(pending) = self.store.get(&grid_id).await? else {
            log::debug!("No pending selection for message {}", grid_id);
            return Ok(());
        };
        self.store.delete(&grid_id).await?;
        let _ = messenger.unsend(&grid_id).await;

        let Some(token) = SelectionToken::parse(&msg.body) else {
            messenger.reply(MSG_INVALID_SELECTION).await?;
            return Ok(());
        };

        let _ = messenger.reaction(EMOJI_PENDING, &msg.id).await;

        match self.run_select(&pending, token, messenger).await {
            Ok(()) => {
                let _ = messenger.reaction(EMOJI_DONE, &msg.id).await;
            }
            Err(e) => {
                log::error!("Selection download error: {}", e);
                let _ = messenger.reaction(EMOJI_FAILED, &msg.id).await;
                messenger
                    .reply(&format!(
                        "❌ Failed to download selected image. Error: {}",
                        e.user_message()
                    ))
                    .await?;
            }
        }
        Ok(())
    }

    async fn run_select(
        &self,
        pending: &PendingSelection,
        token: SelectionToken,
        messenger: &dyn Messenger,
    ) -> Result<()> {
        let url = &pending.image_urls[token.index()];
        let scratch = self
            .cache
            .scratch(&CacheDir::single_file_name(&pending.message_id, token.code()))
            .await?;
        self.api.download_to(url, scratch.path()).await?;

        messenger
            .reply_with_attachment(
                &format!(
                    "✅ Here is your image {} (Prompt: {})",
                    token.code(),
                    pending.prompt
                ),
                scratch.path(),
            )
            .await?;
        Ok(())
    }
}
