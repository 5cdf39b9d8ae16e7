//! Career Chat Backend
//!
//! A chat-style career guidance service:
//! - Students describe a career interest
//! - An LLM answers with overview, degrees, skills and a learning path
//! - Canned answers stand in when the LLM is unavailable
//! - Conversations are kept per session and can be exported as JSON

pub mod advisor;
pub mod api;
pub mod config;
pub mod error;

pub use advisor::*;
pub use api::*;
pub use config::Config;
pub use error::AppError;
