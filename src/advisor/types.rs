//! Career Chat Types
//!
//! Core data structures shared by the store, the advisor and the web API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================
// CAREER RESPONSE
// ============================================================

/// Structured career guidance returned for every chat turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareerResponse {
    /// One sentence describing the career and its impact
    pub career_overview: String,
    /// Degrees, certifications and alternative education paths
    pub recommended_degree: Vec<String>,
    pub skills_needed: Vec<String>,
    /// Ordered, actionable learning steps
    pub learning_path: Vec<String>,
}

// ============================================================
// CHAT MESSAGE
// ============================================================

/// A single stored chat turn: the user's text and the advice given for it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub session_id: String,
    pub message: String,
    pub response: Option<CareerResponse>,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a chat turn; id and timestamp are assigned by the store
#[derive(Debug, Clone)]
pub struct NewChatMessage {
    pub session_id: String,
    pub message: String,
    pub response: Option<CareerResponse>,
}

impl NewChatMessage {
    pub fn new(session_id: &str, message: &str, response: Option<CareerResponse>) -> Self {
        Self {
            session_id: session_id.to_string(),
            message: message.to_string(),
            response,
        }
    }
}

// ============================================================
// SESSION SUMMARY
// ============================================================

/// Overview of one session, derived by grouping messages on `session_id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub session_id: String,
    pub message_count: usize,
    pub last_activity: DateTime<Utc>,
}
