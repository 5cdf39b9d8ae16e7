//! Career Advice Generation
//!
//! Turns a student's message into a `CareerResponse`. The LLM is asked for a
//! four-field JSON object; whatever comes back is normalized so every field is
//! present. Provider failures and unparseable output fall back to the canned
//! table, so `advise` always produces an answer.

use super::fallback::fallback_advice;
use super::llm::{CompletionRequest, LlmProvider};
use super::types::CareerResponse;
use log::{info, warn};
use serde_json::{Map, Value};
use thiserror::Error;

const SYSTEM_PROMPT: &str = "You are an expert career advisor specializing in helping students plan their career paths. Provide detailed, accurate, and actionable career guidance.";

const DEFAULT_OVERVIEW: &str =
    "This is an exciting career field with opportunities for growth and impact.";

const DEFAULT_DEGREES: &[&str] = &[
    "Research specific degree requirements for your chosen field",
    "Consider both traditional university degrees and alternative paths",
];

const DEFAULT_SKILLS: &[&str] = &[
    "Strong communication skills",
    "Problem-solving abilities",
    "Continuous learning mindset",
];

const DEFAULT_LEARNING_PATH: &[&str] = &[
    "Research the specific requirements for your chosen career",
    "Identify key skills and knowledge areas",
    "Create a structured learning plan",
];

#[derive(Debug, Error)]
pub enum AdviceParseError {
    #[error("LLM output is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("LLM output is JSON null")]
    Null,
}

/// Produces career guidance for chat messages
#[derive(Debug, Clone)]
pub struct CareerAdvisor {
    provider: LlmProvider,
}

impl CareerAdvisor {
    pub fn new(provider: LlmProvider) -> Self {
        Self { provider }
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Get advice for a message. Never fails; see module docs.
    pub async fn advise(&self, user_message: &str) -> CareerResponse {
        let prompt = build_prompt(user_message);
        let request = CompletionRequest {
            system: SYSTEM_PROMPT,
            prompt: &prompt,
            json_mode: true,
        };

        let content = match self.provider.complete(&request).await {
            Ok(content) => content,
            Err(e) => {
                warn!("LLM unavailable ({}), using fallback career advice", e);
                return fallback_advice(user_message);
            }
        };

        match normalize_advice(&content) {
            Ok(advice) => advice,
            Err(e) => {
                warn!("{}, using fallback career advice", e);
                info!("Unusable LLM output was {} bytes", content.len());
                fallback_advice(user_message)
            }
        }
    }
}

/// The user prompt sent alongside `SYSTEM_PROMPT`
pub fn build_prompt(user_message: &str) -> String {
    format!(
        r#"You are a professional career advisor for students. Provide CONCISE but DETAILED career advice in JSON format.

User's message: "{user_message}"

Please respond with a JSON object containing exactly these four fields:
1. "career_overview": ONE clear sentence describing what this career does and its impact
2. "recommended_degree": An array of 3-4 SPECIFIC educational paths with details:
   - Include degree names, typical duration, and key focus areas
   - Mix traditional degrees with alternative certifications/bootcamps
   - Mention specific prerequisites or requirements where relevant
3. "skills_needed": An array of 4-5 ESSENTIAL skills with brief context on their importance
4. "learning_path": An array of 4-5 SPECIFIC, actionable steps with timeframes and resources

For education recommendations, be SPECIFIC about:
- Exact degree titles and specializations
- Duration and typical costs when relevant
- Prerequisites and admission requirements
- Alternative pathways (certifications, bootcamps, online programs)
- Specific institutions or programs when applicable

Keep responses SHORT but INFORMATIVE. Prioritize actionable, specific details over generic advice."#
    )
}

/// Parse model output into a complete `CareerResponse`.
///
/// Empty content is read as `{}`; whitespace alone is not valid JSON and
/// `null` is rejected. Any other non-object document has no fields, so every
/// field takes its default. Non-string list items are kept as their JSON text.
pub fn normalize_advice(content: &str) -> Result<CareerResponse, AdviceParseError> {
    let value: Value = if content.is_empty() {
        Value::Object(Map::new())
    } else {
        serde_json::from_str(content)?
    };

    let empty = Map::new();
    let object = match &value {
        Value::Null => return Err(AdviceParseError::Null),
        Value::Object(object) => object,
        _ => &empty,
    };

    let career_overview = object
        .get("career_overview")
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(DEFAULT_OVERVIEW)
        .to_string();

    Ok(CareerResponse {
        career_overview,
        recommended_degree: string_list(object.get("recommended_degree"), DEFAULT_DEGREES),
        skills_needed: string_list(object.get("skills_needed"), DEFAULT_SKILLS),
        learning_path: string_list(object.get("learning_path"), DEFAULT_LEARNING_PATH),
    })
}

fn string_list(value: Option<&Value>, default: &[&str]) -> Vec<String> {
    match value.and_then(Value::as_array) {
        Some(items) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect(),
        None => default.iter().map(|s| s.to_string()).collect(),
    }
}
