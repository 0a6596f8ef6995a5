//! Generation Client: Hugging Face hosted inference implementation of [`TextGenerator`].
//!
//! One synchronous request per prompt, fixed model, two tuning parameters
//! (`temperature`, maximum output length). No streaming, no retry.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::contract::TextGenerator;
use crate::error::ReadmeError;

pub const TEMPERATURE: f32 = 0.7;
pub const MAX_OUTPUT_LENGTH: u32 = 4000;

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: InferenceParameters,
}

#[derive(Debug, Serialize)]
struct InferenceParameters {
    temperature: f32,
    max_new_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GeneratedText {
    generated_text: String,
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    error: String,
}

pub struct HuggingFaceClient {
    client: Client,
    endpoint: String,
}

impl HuggingFaceClient {
    pub fn new(settings: &Settings) -> Result<Self, ReadmeError> {
        let client = Client::builder()
            .timeout(settings.generation_timeout())
            .build()
            .map_err(|e| ReadmeError::GenerationFailed(e.to_string()))?;
        let endpoint = format!(
            "{}/models/{}",
            settings.inference_base_url.trim_end_matches('/'),
            settings.model_id
        );
        tracing::info!(
            endpoint = %endpoint,
            timeout_secs = settings.generation_timeout_secs,
            "Initialized HuggingFaceClient"
        );
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl TextGenerator for HuggingFaceClient {
    async fn generate(&self, prompt: &str, api_key: &str) -> Result<String, ReadmeError> {
        tracing::info!(
            endpoint = %self.endpoint,
            prompt_chars = prompt.chars().count(),
            "Requesting README generation"
        );

        let body = InferenceRequest {
            inputs: prompt,
            parameters: InferenceParameters {
                temperature: TEMPERATURE,
                max_new_tokens: MAX_OUTPUT_LENGTH,
            },
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = ?e, endpoint = %self.endpoint, "Inference request failed");
                ReadmeError::GenerationFailed(e.to_string())
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ReadmeError::GenerationFailed(e.to_string()))?;

        if !status.is_success() {
            let detail = serde_json::from_str::<ProviderError>(&text)
                .map(|e| e.error)
                .unwrap_or(text);
            tracing::error!(status = %status, detail = %detail, "Inference endpoint returned error");
            return Err(ReadmeError::GenerationFailed(format!("HTTP {status}: {detail}")));
        }

        let generated = parse_generated(&text)?;
        let readme = strip_prompt_echo(&generated, prompt);
        tracing::info!(chars = readme.chars().count(), "README generated");
        Ok(readme)
    }
}

/// Accepts both the list form `[{"generated_text": ..}]` and a bare object.
fn parse_generated(body: &str) -> Result<String, ReadmeError> {
    if let Ok(mut list) = serde_json::from_str::<Vec<GeneratedText>>(body) {
        if list.is_empty() {
            return Err(ReadmeError::GenerationFailed(
                "provider returned no generations".to_string(),
            ));
        }
        return Ok(list.swap_remove(0).generated_text);
    }
    if let Ok(single) = serde_json::from_str::<GeneratedText>(body) {
        return Ok(single.generated_text);
    }
    if let Ok(err) = serde_json::from_str::<ProviderError>(body) {
        return Err(ReadmeError::GenerationFailed(err.error));
    }
    Err(ReadmeError::GenerationFailed(format!(
        "unexpected response: {body}"
    )))
}

/// Text-generation endpoints may return the prompt followed by the completion.
fn strip_prompt_echo(generated: &str, prompt: &str) -> String {
    generated
        .strip_prefix(prompt)
        .unwrap_or(generated)
        .trim_start()
        .to_string()
}
