//! `OpenAiProvider` against a local chat-completions stand-in.

use actix_web::{dev::ServerHandle, http::StatusCode, web, App, HttpRequest, HttpResponse, HttpServer};
use career_chat::{
    config::LlmConfig, normalize_advice, CareerAdvisor, CompletionRequest, FallbackCareer, LlmProvider,
    OpenAiProvider, ProviderError,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

/// Requests the stand-in received: bearer header and JSON body
type Seen = Arc<Mutex<Vec<(Option<String>, Value)>>>;

struct FakeLlm {
    status: StatusCode,
    body: Value,
    seen: Seen,
}

async fn completions(state: web::Data<FakeLlm>, req: HttpRequest, payload: web::Json<Value>) -> HttpResponse {
    let auth = req
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    state.seen.lock().unwrap().push((auth, payload.into_inner()));
    HttpResponse::build(state.status).json(&state.body)
}

struct Running {
    provider: LlmProvider,
    seen: Seen,
    handle: ServerHandle,
}

fn start(status: StatusCode, body: Value) -> Running {
    let seen: Seen = Arc::default();
    let state = web::Data::new(FakeLlm {
        status,
        body,
        seen: seen.clone(),
    });

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .route("/v1/chat/completions", web::post().to(completions))
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .unwrap();
    let addr = server.addrs()[0];
    let server = server.run();
    let handle = server.handle();
    actix_rt::spawn(server);

    let config = LlmConfig {
        api_url: format!("http://{addr}/v1/chat/completions"),
        timeout_secs: 5,
        ..LlmConfig::default()
    };
    let provider = LlmProvider::OpenAi(OpenAiProvider::new(&config, "sk-test".to_string()).unwrap());

    Running { provider, seen, handle }
}

fn reply_with(content: Value) -> Value {
    json!({ "choices": [{ "message": { "role": "assistant", "content": content } }] })
}

#[actix_web::test]
async fn request_carries_auth_model_and_json_mode() {
    let advice = json!({
        "career_overview": "Fly aircraft safely.",
        "recommended_degree": ["Commercial pilot license"],
        "skills_needed": ["Situational awareness"],
        "learning_path": ["Private license", "Instrument rating"],
    });
    let running = start(StatusCode::OK, reply_with(Value::String(advice.to_string())));

    let answer = CareerAdvisor::new(running.provider.clone())
        .advise("I want to be a pilot")
        .await;
    assert_eq!(answer.career_overview, "Fly aircraft safely.");
    assert_eq!(answer.learning_path, vec!["Private license", "Instrument rating"]);

    let seen = running.seen.lock().unwrap().clone();
    assert_eq!(seen.len(), 1);
    let (auth, payload) = &seen[0];
    assert_eq!(auth.as_deref(), Some("Bearer sk-test"));
    assert_eq!(payload["model"], "gpt-3.5-turbo");
    assert_eq!(payload["response_format"]["type"], "json_object");
    assert_eq!(payload["max_completion_tokens"], 2048);
    assert_eq!(payload["messages"][0]["role"], "system");
    assert_eq!(payload["messages"][1]["role"], "user");
    assert!(payload["messages"][1]["content"]
        .as_str()
        .unwrap()
        .contains("I want to be a pilot"));

    running.handle.stop(true).await;
}

#[actix_web::test]
async fn server_error_falls_back() {
    let running = start(StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": "boom" }));

    let request = CompletionRequest {
        system: "system",
        prompt: "prompt",
        json_mode: true,
    };
    let err = running.provider.complete(&request).await.unwrap_err();
    assert!(matches!(err, ProviderError::Status { status: 500, .. }));

    let answer = CareerAdvisor::new(running.provider.clone())
        .advise("I want to be a teacher")
        .await;
    assert_eq!(answer, FallbackCareer::Teacher.response());

    running.handle.stop(true).await;
}

#[actix_web::test]
async fn null_content_takes_field_defaults() {
    let running = start(StatusCode::OK, reply_with(Value::Null));

    let answer = CareerAdvisor::new(running.provider.clone())
        .advise("I want to be a teacher")
        .await;
    assert_eq!(answer, normalize_advice("").unwrap());

    running.handle.stop(true).await;
}

#[actix_web::test]
async fn no_choices_falls_back() {
    let running = start(StatusCode::OK, json!({ "choices": [] }));

    let answer = CareerAdvisor::new(running.provider.clone())
        .advise("I want to be a teacher")
        .await;
    assert_eq!(answer, FallbackCareer::Teacher.response());

    running.handle.stop(true).await;
}
