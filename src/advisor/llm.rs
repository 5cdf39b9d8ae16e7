//! LLM Provider Module
//!
//! `LlmProvider` is an enum over the concrete backends, so the advisor can
//! hold one by value and call `complete` without trait objects.
//!
//! - `OpenAi`: any endpoint speaking `/v1/chat/completions`
//! - `Offline`: no key configured; every call fails so the fallback table answers
//! - `Dummy`: fixed reply, for local runs and tests without network access

use crate::config::{ConfigError, LlmConfig};
use log::{debug, error};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

// ============================================================
// ERRORS
// ============================================================

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("No LLM API key configured")]
    NotConfigured,

    #[error("LLM request failed: {0}")]
    Request(String),

    #[error("LLM returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("LLM response contained no choices")]
    NoChoices,
}

// ============================================================
// PROVIDER ENUM
// ============================================================

/// A single chat-completion round trip
#[derive(Debug, Clone)]
pub struct CompletionRequest<'a> {
    pub system: &'a str,
    pub prompt: &'a str,
    /// Ask the backend to constrain output to a JSON object
    pub json_mode: bool,
}

#[derive(Debug, Clone)]
pub enum LlmProvider {
    OpenAi(OpenAiProvider),
    Offline,
    Dummy(DummyProvider),
}

impl LlmProvider {
    /// Build the provider selected by configuration
    pub fn from_config(config: &LlmConfig) -> Result<Self, ProviderError> {
        match config.provider {
            ProviderKind::OpenAi => match &config.api_key {
                Some(key) => Ok(LlmProvider::OpenAi(OpenAiProvider::new(config, key.clone())?)),
                None => Ok(LlmProvider::Offline),
            },
            ProviderKind::Offline => Ok(LlmProvider::Offline),
            ProviderKind::Dummy => Ok(LlmProvider::Dummy(DummyProvider::default())),
        }
    }

    /// Short name used in logs and the health endpoint
    pub fn name(&self) -> &'static str {
        match self {
            LlmProvider::OpenAi(_) => "openai",
            LlmProvider::Offline => "offline",
            LlmProvider::Dummy(_) => "dummy",
        }
    }

    /// Returns the first choice's content; empty when that choice has none.
    pub async fn complete(&self, request: &CompletionRequest<'_>) -> Result<String, ProviderError> {
        match self {
            LlmProvider::OpenAi(p) => p.complete(request).await,
            LlmProvider::Offline => Err(ProviderError::NotConfigured),
            LlmProvider::Dummy(p) => Ok(p.reply.clone()),
        }
    }
}

/// Provider names accepted in `LLM_PROVIDER`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    OpenAi,
    Offline,
    Dummy,
}

impl FromStr for ProviderKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" | "openai-compatible" => Ok(ProviderKind::OpenAi),
            "offline" | "none" => Ok(ProviderKind::Offline),
            "dummy" => Ok(ProviderKind::Dummy),
            _ => Err(ConfigError::UnknownProvider(s.to_string())),
        }
    }
}

// ============================================================
// OPENAI-COMPATIBLE PROVIDER
// ============================================================

/// Client for an OpenAI-compatible chat completions endpoint.
///
/// Cheap to clone: `reqwest::Client` shares its connection pool.
#[derive(Debug, Clone)]
pub struct OpenAiProvider {
    client: Client,
    api_url: String,
    model: String,
    max_tokens: u32,
    api_key: String,
}

impl OpenAiProvider {
    pub fn new(config: &LlmConfig, api_key: String) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ProviderError::Request(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            api_key,
        })
    }

    async fn complete(&self, request: &CompletionRequest<'_>) -> Result<String, ProviderError> {
        let payload = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                WireMessage { role: "system", content: request.system },
                WireMessage { role: "user", content: request.prompt },
            ],
            response_format: request.json_mode.then_some(ResponseFormat { kind: "json_object" }),
            max_completion_tokens: self.max_tokens,
        };

        debug!(
            "Sending LLM request: model={} prompt_len={}",
            self.model,
            request.prompt.len()
        );

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                error!("LLM HTTP request to {} failed: {}", self.api_url, e);
                ProviderError::Request(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed = response
            .json::<ChatCompletionResponse>()
            .await
            .map_err(|e| ProviderError::Request(format!("failed to parse response body: {e}")))?;

        debug!("Received LLM response with {} choice(s)", parsed.choices.len());
        first_choice_content(parsed)
    }
}

/// A reply without choices is an error; a choice without content is empty text
fn first_choice_content(parsed: ChatCompletionResponse) -> Result<String, ProviderError> {
    let choice = parsed
        .choices
        .into_iter()
        .next()
        .ok_or(ProviderError::NoChoices)?;
    Ok(choice.message.content.unwrap_or_default())
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
    max_completion_tokens: u32,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

// ============================================================
// DUMMY PROVIDER
// ============================================================

/// Answers every request with the same text
#[derive(Debug, Clone)]
pub struct DummyProvider {
    pub reply: String,
}

impl DummyProvider {
    pub fn with_reply(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
        }
    }
}

impl Default for DummyProvider {
    fn default() -> Self {
        let reply = serde_json::json!({
            "career_overview": "[dummy] Local advice generated without contacting an LLM.",
            "recommended_degree": ["Any accredited program related to your interest"],
            "skills_needed": ["Curiosity", "Consistency"],
            "learning_path": ["Explore the field", "Find a mentor", "Build experience"],
        });
        Self {
            reply: reply.to_string(),
        }
    }
}
