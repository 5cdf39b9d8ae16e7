//! Chat Store Module
//!
//! Keeps every chat turn, grouped by session in insertion order.
//! Backed by SQLite: an in-memory database by default, or a file when a
//! path is configured. Messages are append-only, never updated or deleted.

use super::types::{ChatMessage, NewChatMessage, SessionSummary};
use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;
use uuid::Uuid;

// ============================================================
// ERRORS
// ============================================================

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Invalid stored response: {0}")]
    Response(#[from] serde_json::Error),

    #[error("Invalid stored timestamp: {0}")]
    Timestamp(#[from] chrono::ParseError),
}

pub type StoreResult<T> = Result<T, StoreError>;

// `seq` carries insertion order; timestamps alone can tie.
const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS chat_messages (
        seq INTEGER PRIMARY KEY AUTOINCREMENT,
        id TEXT NOT NULL UNIQUE,
        session_id TEXT NOT NULL,
        message TEXT NOT NULL,
        response TEXT,
        created_at TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_chat_session_id ON chat_messages(session_id);
";

// ============================================================
// CHAT STORE (SQLite-backed)
// ============================================================

/// Session-keyed chat history
#[derive(Clone)]
pub struct ChatStore {
    conn: Arc<Mutex<Connection>>,
}

impl ChatStore {
    /// Open (or create) a file-backed store
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        Self::init(Connection::open(path)?)
    }

    /// Create a store that lives only as long as the process
    pub fn in_memory() -> StoreResult<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> StoreResult<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        // A panic mid-statement leaves SQLite itself consistent.
        self.conn.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Append a chat turn to its session
    pub fn create_chat_message(&self, new_message: NewChatMessage) -> StoreResult<ChatMessage> {
        let message = ChatMessage {
            id: Uuid::new_v4().to_string(),
            session_id: new_message.session_id,
            message: new_message.message,
            response: new_message.response,
            // Truncated to the stored precision so reads compare equal.
            created_at: Utc::now().trunc_subsecs(6),
        };

        let response_json = message
            .response
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        self.conn().execute(
            "INSERT INTO chat_messages (id, session_id, message, response, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                message.id,
                message.session_id,
                message.message,
                response_json,
                format_timestamp(&message.created_at),
            ],
        )?;

        Ok(message)
    }

    /// All messages of a session, oldest first. Unknown sessions are empty.
    pub fn get_chat_messages(&self, session_id: &str) -> StoreResult<Vec<ChatMessage>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT id, session_id, message, response, created_at
             FROM chat_messages
             WHERE session_id = ?1
             ORDER BY seq ASC",
        )?;

        let rows = stmt.query_map([session_id], |row| {
            Ok(StoredMessage {
                id: row.get(0)?,
                session_id: row.get(1)?,
                message: row.get(2)?,
                response: row.get(3)?,
                created_at: row.get(4)?,
            })
        })?;

        let messages = rows
            .map(|row| row?.into_message())
            .collect::<StoreResult<Vec<_>>>()?;
        Ok(messages)
    }

    /// One summary per session, most recently active first
    pub fn get_all_sessions(&self) -> StoreResult<Vec<SessionSummary>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT grouped.session_id, grouped.message_count, last.created_at
             FROM (
                 SELECT session_id, COUNT(*) AS message_count, MAX(seq) AS last_seq
                 FROM chat_messages
                 GROUP BY session_id
             ) AS grouped
             JOIN chat_messages AS last ON last.seq = grouped.last_seq
             ORDER BY last.created_at DESC, last.seq DESC",
        )?;

        let rows = stmt.query_map([], |row| {
            let session_id: String = row.get(0)?;
            let message_count: i64 = row.get(1)?;
            let last_activity: String = row.get(2)?;
            Ok((session_id, message_count, last_activity))
        })?;

        let sessions = rows
            .map(|row| -> StoreResult<SessionSummary> {
                let (session_id, message_count, last_activity) = row?;
                Ok(SessionSummary {
                    session_id,
                    message_count: message_count.max(0) as usize,
                    last_activity: parse_timestamp(&last_activity)?,
                })
            })
            .collect::<StoreResult<Vec<_>>>()?;
        Ok(sessions)
    }
}

// ============================================================
// ROW MAPPING
// ============================================================

struct StoredMessage {
    id: String,
    session_id: String,
    message: String,
    response: Option<String>,
    created_at: String,
}

impl StoredMessage {
    fn into_message(self) -> StoreResult<ChatMessage> {
        let response = self
            .response
            .as_deref()
            .map(serde_json::from_str)
            .transpose()?;

        Ok(ChatMessage {
            id: self.id,
            session_id: self.session_id,
            message: self.message,
            response,
            created_at: parse_timestamp(&self.created_at)?,
        })
    }
}

/// Fixed-width RFC 3339 so text ordering in SQL matches time ordering
fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(raw: &str) -> StoreResult<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(raw)?.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisor::types::CareerResponse;

    fn sample_response() -> CareerResponse {
        CareerResponse {
            career_overview: "Build bridges.".to_string(),
            recommended_degree: vec!["BSc Civil Engineering".to_string()],
            skills_needed: vec!["Statics".to_string()],
            learning_path: vec!["Study mechanics".to_string()],
        }
    }

    #[test]
    fn test_messages_keep_insertion_order() {
        let store = ChatStore::in_memory().unwrap();

        for text in ["first", "second", "third"] {
            store
                .create_chat_message(NewChatMessage::new("s1", text, Some(sample_response())))
                .unwrap();
        }
        store
            .create_chat_message(NewChatMessage::new("s2", "other", None))
            .unwrap();

        let messages = store.get_chat_messages("s1").unwrap();
        let texts: Vec<&str> = messages.iter().map(|m| m.message.as_str()).collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
        assert!(messages.iter().all(|m| m.session_id == "s1"));
    }

    #[test]
    fn test_stored_message_reads_back_unchanged() {
        let store = ChatStore::in_memory().unwrap();
        let created = store
            .create_chat_message(NewChatMessage::new("s1", "civil engineer", Some(sample_response())))
            .unwrap();

        let read = store.get_chat_messages("s1").unwrap();
        assert_eq!(read, vec![created]);
    }

    #[test]
    fn test_null_response_is_preserved() {
        let store = ChatStore::in_memory().unwrap();
        store
            .create_chat_message(NewChatMessage::new("s1", "hello", None))
            .unwrap();

        let read = store.get_chat_messages("s1").unwrap();
        assert_eq!(read.len(), 1);
        assert!(read[0].response.is_none());
    }

    #[test]
    fn test_unknown_session_is_empty() {
        let store = ChatStore::in_memory().unwrap();
        assert!(store.get_chat_messages("missing").unwrap().is_empty());
        assert!(store.get_all_sessions().unwrap().is_empty());
    }

    #[test]
    fn test_sessions_sorted_by_last_activity() {
        let store = ChatStore::in_memory().unwrap();
        store.create_chat_message(NewChatMessage::new("a", "1", None)).unwrap();
        store.create_chat_message(NewChatMessage::new("b", "2", None)).unwrap();
        let last = store.create_chat_message(NewChatMessage::new("a", "3", None)).unwrap();

        let sessions = store.get_all_sessions().unwrap();
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0].session_id, "a");
        assert_eq!(sessions[0].message_count, 2);
        assert_eq!(sessions[0].last_activity, last.created_at);
        assert_eq!(sessions[1].session_id, "b");
        assert_eq!(sessions[1].message_count, 1);
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chat.db");

        {
            let store = ChatStore::open(&path).unwrap();
            store
                .create_chat_message(NewChatMessage::new("s1", "teacher", Some(sample_response())))
                .unwrap();
        }

        let reopened = ChatStore::open(&path).unwrap();
        let messages = reopened.get_chat_messages("s1").unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].response, Some(sample_response()));
    }
}
