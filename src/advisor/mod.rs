//! Advisor Module - Core of the Career Chat Assistant
//!
//! Architecture:
//! - Types: chat messages, sessions and the structured career answer
//! - Store: session-keyed chat history (SQLite, in-memory by default)
//! - LLM: outbound chat-completion providers
//! - Advice: prompt, response normalization and fallback selection
//! - Fallback: canned answers chosen by keyword
//! - Export: JSON documents for download

pub mod advice;
pub mod export;
pub mod fallback;
pub mod llm;
pub mod store;
pub mod types;

pub use advice::*;
pub use export::*;
pub use fallback::*;
pub use llm::*;
pub use store::*;
pub use types::*;
