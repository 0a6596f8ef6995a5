use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

pub const DEFAULT_GITHUB_API_BASE_URL: &str = "https://api.github.com";
pub const DEFAULT_INFERENCE_BASE_URL: &str = "https://api-inference.huggingface.co";
pub const DEFAULT_MODEL_ID: &str = "mistralai/Mixtral-8x7B-Instruct-v0.1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// Timeout of one inference request.
pub const DEFAULT_GENERATION_TIMEOUT_SECS: u64 = 300;

/// Endpoints and client settings for the two remote services.
///
/// Defaults point at the public GitHub and Hugging Face APIs; the base URLs can
/// be overridden through `GITHUB_API_BASE_URL` and `HF_INFERENCE_BASE_URL`
/// (used by tests to target a local mock server). The inference call has its
/// own timeout, overridable through `HF_GENERATION_TIMEOUT_SECS`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub github_api_base_url: String,
    pub inference_base_url: String,
    pub model_id: String,
    pub request_timeout_secs: u64,
    pub generation_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            github_api_base_url: DEFAULT_GITHUB_API_BASE_URL.to_string(),
            inference_base_url: DEFAULT_INFERENCE_BASE_URL.to_string(),
            model_id: DEFAULT_MODEL_ID.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            generation_timeout_secs: DEFAULT_GENERATION_TIMEOUT_SECS,
        }
    }
}

impl Settings {
    /// Defaults, with overrides taken from the environment when set and non-blank.
    /// An unparseable timeout override is ignored with a warning.
    pub fn from_env() -> Self {
        let mut settings = Self::default();
        if let Some(url) = env_non_blank("GITHUB_API_BASE_URL") {
            settings.github_api_base_url = url;
        }
        if let Some(url) = env_non_blank("HF_INFERENCE_BASE_URL") {
            settings.inference_base_url = url;
        }
        if let Some(raw) = env_non_blank("HF_GENERATION_TIMEOUT_SECS") {
            match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => settings.generation_timeout_secs = secs,
                _ => warn!(value = %raw, "Ignoring invalid HF_GENERATION_TIMEOUT_SECS"),
            }
        }
        settings
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn generation_timeout(&self) -> Duration {
        Duration::from_secs(self.generation_timeout_secs)
    }

    pub fn trace_loaded(&self) {
        info!(
            github_api_base_url = %self.github_api_base_url,
            inference_base_url = %self.inference_base_url,
            model_id = %self.model_id,
            generation_timeout_secs = self.generation_timeout_secs,
            "Loaded Settings"
        );
        debug!(?self, "Settings loaded (full debug)");
    }
}

fn env_non_blank(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().trim_end_matches('/').to_string())
        .filter(|v| !v.is_empty())
}
