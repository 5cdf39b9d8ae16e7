//! Web API Module
//!
//! Exposes the chat, history, session and export endpoints.
//! All endpoints return JSON and require no authentication.

use crate::advisor::{
    advice::CareerAdvisor,
    export::{self, all_sessions_filename, session_filename},
    llm::LlmProvider,
    store::ChatStore,
    types::{CareerResponse, ChatMessage, NewChatMessage, SessionSummary},
};
use crate::config::Config;
use crate::error::AppError;
use actix_cors::Cors;
use actix_web::{
    error, http::header, middleware::Logger, web, App, HttpRequest, HttpResponse, HttpServer,
    Responder,
};
use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

// ============================================================
// APPLICATION STATE
// ============================================================

/// Shared application state
pub struct AppState {
    pub store: ChatStore,
    pub advisor: CareerAdvisor,
}

impl AppState {
    pub fn new(store: ChatStore, advisor: CareerAdvisor) -> Self {
        Self { store, advisor }
    }

    /// Build the store and LLM provider described by `config`
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let store = match &config.db_path {
            Some(path) => {
                info!("Chat history stored in {}", path.display());
                ChatStore::open(path)?
            }
            None => ChatStore::in_memory()?,
        };

        let provider = LlmProvider::from_config(&config.llm)?;
        if matches!(provider, LlmProvider::Offline) {
            warn!("No LLM available; every answer will come from the fallback table");
        }

        Ok(Self::new(store, CareerAdvisor::new(provider)))
    }
}

// ============================================================
// API REQUEST/RESPONSE TYPES
// ============================================================

/// Both fields stay untyped: a mistyped `message` gets the same 400 as a
/// missing one, and a mistyped `sessionId` is replaced like a missing one
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<Value>,
    #[serde(default)]
    pub session_id: Option<Value>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub session_id: String,
    pub response: CareerResponse,
    pub message_id: String,
}

#[derive(Serialize)]
pub struct HistoryResponse {
    pub messages: Vec<ChatMessage>,
}

#[derive(Serialize)]
pub struct SessionsResponse {
    pub sessions: Vec<SessionSummary>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: &str) -> Self {
        Self {
            error: message.to_string(),
        }
    }
}

/// Quick-start prompt offered to new users
#[derive(Debug, Clone, Serialize)]
pub struct ExamplePrompt {
    pub icon: &'static str,
    pub title: &'static str,
    pub query: &'static str,
}

pub const EXAMPLE_PROMPTS: &[ExamplePrompt] = &[
    ExamplePrompt { icon: "🩺", title: "Doctor", query: "I want to be a Medical Doctor" },
    ExamplePrompt { icon: "⚙️", title: "Engineer", query: "I want to be a Software Engineer" },
    ExamplePrompt { icon: "👨‍🏫", title: "Teacher", query: "I want to be a Teacher" },
    ExamplePrompt { icon: "📊", title: "Data Scientist", query: "I want to be a Data Scientist" },
];

// ============================================================
// API HANDLERS
// ============================================================

/// Health check endpoint
async fn health_check(data: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "Career Chat API",
        "version": env!("CARGO_PKG_VERSION"),
        "llm_provider": data.advisor.provider_name(),
    }))
}

/// Answer a chat message and record the turn
async fn chat(data: web::Data<AppState>, req: web::Json<ChatRequest>) -> impl Responder {
    let ChatRequest { message, session_id } = req.into_inner();

    let message = match message {
        Some(Value::String(m)) if !m.trim().is_empty() => m,
        _ => return HttpResponse::BadRequest().json(ErrorBody::new("Message is required")),
    };

    let session_id = match session_id {
        Some(Value::String(id)) if !id.is_empty() => id,
        _ => Uuid::new_v4().to_string(),
    };

    let response = data.advisor.advise(&message).await;

    let new_message = NewChatMessage {
        session_id: session_id.clone(),
        message,
        response: Some(response.clone()),
    };

    match data.store.create_chat_message(new_message) {
        Ok(saved) => {
            info!("Stored message {} in session {}", saved.id, session_id);
            HttpResponse::Ok().json(ChatResponse {
                session_id,
                response,
                message_id: saved.id,
            })
        }
        Err(e) => {
            error!("Chat endpoint error: {}", e);
            HttpResponse::InternalServerError().json(ErrorBody::new(&e.to_string()))
        }
    }
}

/// Get chat history for a session
async fn get_history(data: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let session_id = path.into_inner();

    match data.store.get_chat_messages(&session_id) {
        Ok(messages) => HttpResponse::Ok().json(HistoryResponse { messages }),
        Err(e) => {
            error!("Chat history error: {}", e);
            HttpResponse::InternalServerError()
                .json(ErrorBody::new("Failed to retrieve chat history"))
        }
    }
}

/// Get all chat sessions, most recent first
async fn get_sessions(data: web::Data<AppState>) -> impl Responder {
    match data.store.get_all_sessions() {
        Ok(sessions) => HttpResponse::Ok().json(SessionsResponse { sessions }),
        Err(e) => {
            error!("Sessions overview error: {}", e);
            HttpResponse::InternalServerError().json(ErrorBody::new("Failed to retrieve sessions"))
        }
    }
}

/// Export one session's transcript
async fn export_session(data: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let session_id = path.into_inner();

    match export::export_session(&data.store, &session_id) {
        Ok(doc) => HttpResponse::Ok()
            .insert_header(attachment(&session_filename(&session_id)))
            .json(doc),
        Err(e) => {
            error!("Export error: {}", e);
            HttpResponse::InternalServerError().json(ErrorBody::new("Failed to export data"))
        }
    }
}

/// Export the summary of every session
async fn export_all(data: web::Data<AppState>) -> impl Responder {
    match export::export_all(&data.store) {
        Ok(doc) => HttpResponse::Ok()
            .insert_header(attachment(&all_sessions_filename(&doc.export_date)))
            .json(doc),
        Err(e) => {
            error!("Export error: {}", e);
            HttpResponse::InternalServerError().json(ErrorBody::new("Failed to export data"))
        }
    }
}

/// Quick-start prompts
async fn get_prompts() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({ "prompts": EXAMPLE_PROMPTS }))
}

fn attachment(filename: &str) -> (header::HeaderName, String) {
    (
        header::CONTENT_DISPOSITION,
        format!("attachment; filename=\"{}\"", filename),
    )
}

/// Malformed or mistyped JSON bodies get the same `{"error": ...}` shape
fn json_error_handler(err: error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = HttpResponse::BadRequest().json(ErrorBody::new(&err.to_string()));
    error::InternalError::from_response(err, response).into()
}

// ============================================================
// SERVER CONFIGURATION
// ============================================================

/// Register every route; shared by the server and the tests
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .route("/health", web::get().to(health_check))
        .route("/api/chat", web::post().to(chat))
        .route("/api/chat/{session_id}", web::get().to(get_history))
        .route("/api/sessions", web::get().to(get_sessions))
        .route("/api/export", web::get().to(export_all))
        .route("/api/export/{session_id}", web::get().to(export_session))
        .route("/api/prompts", web::get().to(get_prompts));
}

/// Configure and run the API server
pub async fn run_server(config: Config) -> Result<(), AppError> {
    let state = web::Data::new(AppState::from_config(&config)?);

    info!(
        "Career Chat API starting at http://{}:{} (LLM provider: {})",
        config.host,
        config.port,
        state.advisor.provider_name()
    );
    info!("API Endpoints:");
    info!("   POST /api/chat              - Ask for career advice");
    info!("   GET  /api/chat/:sessionId   - Chat history for a session");
    info!("   GET  /api/sessions          - All sessions");
    info!("   GET  /api/export/:sessionId - Export one session");
    info!("   GET  /api/export            - Export all sessions");
    info!("   GET  /api/prompts           - Quick-start prompts");

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header();

        App::new()
            .wrap(cors)
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    Ok(())
}
