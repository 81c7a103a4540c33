use serde::{Deserialize, Serialize};

use crate::error::{MjError, Result};

/// Number of variants the API packs into one grid image.
pub const GRID_SIZE: usize = 4;

const GENERIC_API_FAILURE: &str = "API did not return a valid merged image and four images.";

/// Reference image forwarded to the API to bias generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceImage {
    /// Remote URL, still to be fetched and encoded.
    Url(String),
    /// Already-encoded `data:<content-type>;base64,...` payload.
    DataUri(String),
}

#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub prompt: String,
    pub reference: Option<ReferenceImage>,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            reference: None,
        }
    }

    pub fn with_reference(mut self, reference: ReferenceImage) -> Self {
        self.reference = Some(reference);
        self
    }
}

/// Raw response body of `GET /generate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub merged_image_url: String,
    #[serde(default)]
    pub image_urls: Vec<String>,
    #[serde(default)]
    pub task_id: String,
    #[serde(default)]
    pub status: Option<String>,
}

impl GenerateResponse {
    /// Validate the wire response into a usable result.
    ///
    /// Anything short of `success` plus a grid URL plus exactly four
    /// variant URLs is an API failure, reported with the API-supplied
    /// status text when there is one.
    pub fn validate(self) -> Result<GenerationResult> {
        if !self.success || self.merged_image_url.is_empty() || self.image_urls.len() != GRID_SIZE {
            let message = self
                .status
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| GENERIC_API_FAILURE.to_string());
            return Err(MjError::Api(message));
        }

        let mut urls = self.image_urls.into_iter();
        let image_urls = [
            urls.next().unwrap_or_default(),
            urls.next().unwrap_or_default(),
            urls.next().unwrap_or_default(),
            urls.next().unwrap_or_default(),
        ];

        Ok(GenerationResult {
            grid_url: self.merged_image_url,
            image_urls,
            task_id: self.task_id,
        })
    }
}

/// Validated generation outcome: one grid image plus its four variants.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub grid_url: String,
    pub image_urls: [String; GRID_SIZE],
    pub task_id: String,
}
