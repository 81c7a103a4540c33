use std::env;
use std::path::PathBuf;

pub const DEFAULT_ENDPOINT: &str =
    "https://e141d348-6fe2-4fcd-acf9-8b35dddddc38-00-3ugo7tquycqjc.sisko.replit.dev/generate";
pub const DEFAULT_CACHE_DIR: &str = "cache";

/// Configuration for the midjourney command.
///
/// Everything has a usable default; `from_env` overrides from the
/// environment and the `with_*` builders override programmatically.
#[derive(Debug, Clone)]
pub struct MjConfig {
    /// Base URL of the remote generation endpoint (the `/generate` route).
    pub endpoint: String,
    /// Directory for scratch downloads, created on first use.
    pub cache_dir: PathBuf,
    /// Cooldown between invocations per user, seconds. Enforced by the
    /// host framework, carried here as command metadata.
    pub cooldown_secs: u64,
}

impl Default for MjConfig {
    fn default() -> Self {
        MjConfig {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            cache_dir: PathBuf::from(DEFAULT_CACHE_DIR),
            cooldown_secs: 45,
        }
    }
}

impl MjConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(endpoint) = env::var("MJ_API_ENDPOINT") {
            config.endpoint = endpoint;
        }
        if let Ok(dir) = env::var("MJ_CACHE_DIR") {
            config.cache_dir = PathBuf::from(dir);
        }
        if let Some(secs) = env::var("MJ_COOLDOWN_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            config.cooldown_secs = secs;
        }
        config
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = dir.into();
        self
    }

    pub fn with_cooldown(mut self, secs: u64) -> Self {
        self.cooldown_secs = secs;
        self
    }
}
