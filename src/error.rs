//! Application-wide error type for startup and serving.
//!
//! Request handlers never surface this; they answer with `{"error": ...}`
//! bodies instead.

use crate::advisor::{llm::ProviderError, store::StoreError};
use crate::config::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Chat store error: {0}")]
    Store(#[from] StoreError),

    #[error("LLM provider error: {0}")]
    Llm(#[from] ProviderError),

    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
}
