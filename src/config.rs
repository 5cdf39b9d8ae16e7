//! Server Configuration
//!
//! Everything is read from environment variables. `main` loads a `.env`
//! file first when one exists.

use crate::advisor::llm::ProviderKind;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_OPENAI_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} has an invalid value: {value:?}")]
    InvalidValue { var: &'static str, value: String },

    #[error("Unknown LLM provider: {0:?} (expected openai, offline or dummy)")]
    UnknownProvider(String),
}

/// LLM connection settings
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub provider: ProviderKind,
    /// Sent as a bearer token; `None` means no outbound calls are made
    pub api_key: Option<String>,
    pub api_url: String,
    pub model: String,
    pub timeout_secs: u64,
    pub max_tokens: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::OpenAi,
            api_key: None,
            api_url: DEFAULT_OPENAI_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: 30,
            max_tokens: 2048,
        }
    }
}

/// Top-level server configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// SQLite file for chat history; in-memory when unset
    pub db_path: Option<PathBuf>,
    pub llm: LlmConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            db_path: None,
            llm: LlmConfig::default(),
        }
    }
}

impl Config {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Config::default();
        let llm_defaults = LlmConfig::default();

        let provider = match get("LLM_PROVIDER") {
            Some(name) => name.parse::<ProviderKind>()?,
            None => llm_defaults.provider,
        };

        let llm = LlmConfig {
            provider,
            api_key: get("OPENAI_API_KEY").or_else(|| get("OPENAI_API_KEY_ENV_VAR")),
            api_url: get("OPENAI_BASE_URL").unwrap_or(llm_defaults.api_url),
            model: get("OPENAI_MODEL").unwrap_or(llm_defaults.model),
            timeout_secs: parse_var("LLM_TIMEOUT_SECS", get("LLM_TIMEOUT_SECS"))?
                .unwrap_or(llm_defaults.timeout_secs),
            max_tokens: parse_var("LLM_MAX_TOKENS", get("LLM_MAX_TOKENS"))?
                .unwrap_or(llm_defaults.max_tokens),
        };

        Ok(Config {
            host: get("HOST").unwrap_or(defaults.host),
            port: parse_var("PORT", get("PORT"))?.unwrap_or(defaults.port),
            db_path: get("CHAT_DB_PATH").map(PathBuf::from),
            llm,
        })
    }
}

fn parse_var<T: FromStr>(var: &'static str, value: Option<String>) -> Result<Option<T>, ConfigError> {
    value
        .map(|v| {
            v.trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue { var, value: v.clone() })
        })
        .transpose()
}
