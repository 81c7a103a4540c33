pub mod client;

pub use client::MidjourneyClient;

use std::path::Path;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{GenerationRequest, GenerationResult};

/// Remote generation backend plus the image transfers around it.
///
/// The command logic only talks to this trait, so tests can run the full
/// generate/select flows against a fake without touching the network.
#[async_trait]
pub trait GenerationApi: Send + Sync {
    /// Call the generation endpoint and validate its response.
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult>;

    /// Fetch a reference image and encode it as a base64 data URI tagged
    /// with the fetched content type.
    async fn fetch_data_uri(&self, url: &str) -> Result<String>;

    /// Download a remote image to a local path.
    async fn download_to(&self, url: &str, dest: &Path) -> Result<()>;
}
