//! Chat History Export
//!
//! Builds the JSON documents served by the export endpoints. Stored content
//! is copied through as-is; only the export timestamp and counts are added.

use super::store::{ChatStore, StoreResult};
use super::types::{CareerResponse, ChatMessage, SessionSummary};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One message as it appears in an export
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedMessage {
    pub id: String,
    pub message: String,
    pub response: Option<CareerResponse>,
    pub created_at: DateTime<Utc>,
}

impl From<ChatMessage> for ExportedMessage {
    fn from(msg: ChatMessage) -> Self {
        Self {
            id: msg.id,
            message: msg.message,
            response: msg.response,
            created_at: msg.created_at,
        }
    }
}

/// Full transcript of one session
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionExport {
    pub session_id: String,
    pub export_date: DateTime<Utc>,
    pub message_count: usize,
    pub messages: Vec<ExportedMessage>,
}

/// Summary of every session
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionsExport {
    pub export_date: DateTime<Utc>,
    pub total_sessions: usize,
    pub sessions: Vec<SessionSummary>,
}

pub fn export_session(store: &ChatStore, session_id: &str) -> StoreResult<SessionExport> {
    let messages: Vec<ExportedMessage> = store
        .get_chat_messages(session_id)?
        .into_iter()
        .map(ExportedMessage::from)
        .collect();

    Ok(SessionExport {
        session_id: session_id.to_string(),
        export_date: Utc::now(),
        message_count: messages.len(),
        messages,
    })
}

pub fn export_all(store: &ChatStore) -> StoreResult<SessionsExport> {
    let sessions = store.get_all_sessions()?;
    Ok(SessionsExport {
        export_date: Utc::now(),
        total_sessions: sessions.len(),
        sessions,
    })
}

/// Download name for a session export
pub fn session_filename(session_id: &str) -> String {
    let safe: String = session_id
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    format!("chat-session-{safe}.json")
}

/// Download name for the all-sessions export, dated by export day
pub fn all_sessions_filename(export_date: &DateTime<Utc>) -> String {
    format!("all-chat-sessions-{}.json", export_date.format("%Y-%m-%d"))
}
