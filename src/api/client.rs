use std::path::Path;

use async_trait::async_trait;
use reqwest::Client;

use crate::api::GenerationApi;
use crate::config::MjConfig;
use crate::error::{MjError, Result};
use crate::models::{GenerateResponse, GenerationRequest, GenerationResult, ReferenceImage};

const REFERENCE_ENCODE_FAILURE: &str = "Failed to process reference image for Base64 encoding.";
const DOWNLOAD_FAILURE: &str = "Failed to download the image file.";

/// HTTP client for the remote generation endpoint.
pub struct MidjourneyClient {
    client: Client,
    endpoint: String,
}

impl MidjourneyClient {
    pub fn new(config: &MjConfig) -> Self {
        Self {
            client: Client::new(),
            endpoint: config.endpoint.clone(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl GenerationApi for MidjourneyClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult> {
        let mut params: Vec<(&str, &str)> = vec![("prompt", request.prompt.as_str())];
        if let Some(ReferenceImage::DataUri(data_uri)) = &request.reference {
            params.push(("base64", data_uri.as_str()));
        }

        log::debug!("Requesting generation from {}", self.endpoint);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&params)
            .send()
            .await
            .map_err(|e| MjError::Api(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            // The API reports failures in the `status` field of an
            // otherwise well-formed JSON body even on error codes.
            let message = response
                .json::<GenerateResponse>()
                .await
                .ok()
                .and_then(|body| body.status)
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| format!("API error: {}", status));
            log::warn!("Generation API returned {}: {}", status, message);
            return Err(MjError::Api(message));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| MjError::Api(format!("Failed to parse response: {}", e)))?;

        body.validate()
    }

    async fn fetch_data_uri(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|_| MjError::ReferenceDownload(REFERENCE_ENCODE_FAILURE.to_string()))?;

        if !response.status().is_success() {
            return Err(MjError::ReferenceDownload(
                REFERENCE_ENCODE_FAILURE.to_string(),
            ));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("application/octet-stream")
            .to_string();

        let bytes = response
            .bytes()
            .await
            .map_err(|_| MjError::ReferenceDownload(REFERENCE_ENCODE_FAILURE.to_string()))?;

        log::debug!(
            "Encoded reference image: {} bytes, content type {}",
            bytes.len(),
            content_type
        );

        #[allow(deprecated)]
        let payload = base64::encode(&bytes);
        Ok(format!("data:{};base64,{}", content_type, payload))
    }

    async fn download_to(&self, url: &str, dest: &Path) -> Result<()> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|_| MjError::Transfer(DOWNLOAD_FAILURE.to_string()))?;

        if !response.status().is_success() {
            return Err(MjError::Transfer(DOWNLOAD_FAILURE.to_string()));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|_| MjError::Transfer(DOWNLOAD_FAILURE.to_string()))?;

        tokio::fs::write(dest, &bytes)
            .await
            .map_err(|_| MjError::Transfer(DOWNLOAD_FAILURE.to_string()))?;

        log::debug!("Downloaded {} bytes to {}", bytes.len(), dest.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_uses_configured_endpoint() {
        let config = MjConfig::new().with_endpoint("http://localhost:1234/generate");
        let client = MidjourneyClient::new(&config);
        assert_eq!(client.endpoint(), "http://localhost:1234/generate");
    }
}
