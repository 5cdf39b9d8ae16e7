//! End-to-end tests over the full route table.

use actix_web::{test, web, App};
use career_chat::{
    api::{configure, AppState},
    config::{Config, LlmConfig},
    CareerAdvisor, CareerResponse, ChatStore, FallbackCareer, LlmProvider, ProviderKind,
};
use serde_json::{json, Value};

fn offline_state() -> web::Data<AppState> {
    web::Data::new(AppState::new(
        ChatStore::in_memory().unwrap(),
        CareerAdvisor::new(LlmProvider::Offline),
    ))
}

#[actix_web::test]
async fn conversation_history_and_export() {
    let app = test::init_service(App::new().app_data(offline_state()).configure(configure)).await;

    // First turn opens a session
    let req = test::TestRequest::post()
        .uri("/api/chat")
        .set_json(json!({ "message": "I want to be a Teacher" }))
        .to_request();
    let first: Value = test::call_and_read_body_json(&app, req).await;
    let session_id = first["sessionId"].as_str().unwrap().to_string();

    // Second turn continues it
    let req = test::TestRequest::post()
        .uri("/api/chat")
        .set_json(json!({ "message": "What about software?", "sessionId": session_id }))
        .to_request();
    let second: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(second["sessionId"], session_id.as_str());

    // An unrelated session
    let req = test::TestRequest::post()
        .uri("/api/chat")
        .set_json(json!({ "message": "florist", "sessionId": "other" }))
        .to_request();
    let _: Value = test::call_and_read_body_json(&app, req).await;

    // History keeps insertion order and the stored answers
    let req = test::TestRequest::get()
        .uri(&format!("/api/chat/{}", session_id))
        .to_request();
    let history: Value = test::call_and_read_body_json(&app, req).await;
    let messages = history["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["message"], "I want to be a Teacher");
    assert_eq!(messages[0]["id"], first["messageId"]);
    assert_eq!(messages[1]["message"], "What about software?");
    let stored: CareerResponse = serde_json::from_value(messages[1]["response"].clone()).unwrap();
    assert_eq!(stored, FallbackCareer::SoftwareEngineer.response());

    // Sessions: newest activity first
    let req = test::TestRequest::get().uri("/api/sessions").to_request();
    let sessions: Value = test::call_and_read_body_json(&app, req).await;
    let sessions = sessions["sessions"].as_array().unwrap();
    assert_eq!(sessions.len(), 2);
    assert_eq!(sessions[0]["sessionId"], "other");
    assert_eq!(sessions[1]["sessionId"], session_id.as_str());
    assert_eq!(sessions[1]["messageCount"], 2);

    // Session export mirrors history
    let req = test::TestRequest::get()
        .uri(&format!("/api/export/{}", session_id))
        .to_request();
    let export: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(export["sessionId"], session_id.as_str());
    assert_eq!(export["messageCount"], 2);
    assert_eq!(export["messages"][0]["response"], messages[0]["response"]);
    assert_eq!(export["messages"][1]["createdAt"], messages[1]["createdAt"]);
    assert!(export["exportDate"].is_string());

    // Export of everything
    let req = test::TestRequest::get().uri("/api/export").to_request();
    let all: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(all["totalSessions"], 2);
    assert_eq!(all["sessions"].as_array().unwrap().len(), 2);
}

#[actix_web::test]
async fn unknown_session_has_empty_history() {
    let app = test::init_service(App::new().app_data(offline_state()).configure(configure)).await;

    let req = test::TestRequest::get().uri("/api/chat/nope").to_request();
    let history: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(history["messages"], json!([]));

    let req = test::TestRequest::get().uri("/api/export").to_request();
    let all: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(all["totalSessions"], 0);
}

#[actix_web::test]
async fn configured_dummy_provider_and_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        db_path: Some(dir.path().join("chat.db")),
        llm: LlmConfig {
            provider: ProviderKind::Dummy,
            ..LlmConfig::default()
        },
        ..Config::default()
    };

    let state = web::Data::new(AppState::from_config(&config).unwrap());
    let app = test::init_service(App::new().app_data(state).configure(configure)).await;

    let req = test::TestRequest::post()
        .uri("/api/chat")
        .set_json(json!({ "message": "I want to be a Medical Doctor" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert!(body["response"]["career_overview"]
        .as_str()
        .unwrap()
        .starts_with("[dummy]"));

    // The turn is on disk
    let reopened = ChatStore::open(dir.path().join("chat.db")).unwrap();
    let session_id = body["sessionId"].as_str().unwrap();
    assert_eq!(reopened.get_chat_messages(session_id).unwrap().len(), 1);
}
