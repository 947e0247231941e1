/// LLM Client — the single point of entry for completion API calls.
///
/// Sampling parameters are fixed and identical for every call.
/// No retries: a failed call surfaces as `GenerationError` to the caller.
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod prompts;

use crate::llm_client::prompts::build_suggestion_prompt;

/// The completion model used for every suggestion.
pub const MODEL: &str = "text-davinci-003";
const TEMPERATURE: f32 = 0.9;
const MAX_TOKENS: u32 = 2048;
const TOP_P: f32 = 1.0;
const FREQUENCY_PENALTY: f32 = 0.5;
const PRESENCE_PENALTY: f32 = 0.0;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("completion API returned no choices")]
    EmptyCompletion,
}

/// Produces free-text gift suggestions for a person and occasion.
#[async_trait]
pub trait SuggestionGenerator: Send + Sync {
    async fn suggest(
        &self,
        name: &str,
        event_label: &str,
        interests: &str,
    ) -> Result<String, GenerationError>;
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    temperature: f32,
    max_tokens: u32,
    top_p: f32,
    frequency_penalty: f32,
    presence_penalty: f32,
}

#[derive(Debug, Deserialize)]
pub struct CompletionResponse {
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct OpenAiError {
    error: OpenAiErrorBody,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorBody {
    message: String,
}

/// Wraps the legacy text-completions endpoint.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    completions_url: String,
}

impl LlmClient {
    pub fn new(base_url: &str, api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            completions_url: format!("{}/v1/completions", base_url.trim_end_matches('/')),
        }
    }

    /// Makes a single completion call, returning the full response object.
    pub async fn complete(&self, prompt: &str) -> Result<CompletionResponse, GenerationError> {
        let request_body = CompletionRequest {
            model: MODEL,
            prompt,
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
            top_p: TOP_P,
            frequency_penalty: FREQUENCY_PENALTY,
            presence_penalty: PRESENCE_PENALTY,
        };

        let response = self
            .client
            .post(&self.completions_url)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<OpenAiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(GenerationError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let completion: CompletionResponse = response.json().await?;
        if let Some(usage) = &completion.usage {
            debug!(
                "Completion succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }
        Ok(completion)
    }
}

#[async_trait]
impl SuggestionGenerator for LlmClient {
    async fn suggest(
        &self,
        name: &str,
        event_label: &str,
        interests: &str,
    ) -> Result<String, GenerationError> {
        let prompt = build_suggestion_prompt(name, event_label, interests);
        let completion = self.complete(&prompt).await?;
        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.text)
            .ok_or(GenerationError::EmptyCompletion)
    }
}
