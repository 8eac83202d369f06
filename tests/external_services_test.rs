// ABOUTME: Integration tests for the external service clients against mocked HTTP endpoints
// ABOUTME: Covers Groq completions, Piston and Judge0 runners, and the Supabase history store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use codemind::{
    errors::ErrorCode,
    execution::{CodeRunner, ExecutionRequest, Judge0Runner, PistonRunner, Tone},
    history::{HistoryStore, SupabaseHistoryStore},
    llm::{ChatMessage, ChatRequest, GroqProvider, LlmProvider},
    models::{AssistantMode, NewInteraction},
};
use common::init_test_logging;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Groq
// ============================================================================

fn chat() -> ChatRequest {
    ChatRequest::new(vec![
        ChatMessage::system("You are a helpful coding assistant."),
        ChatMessage::user("Explain this"),
    ])
}

#[tokio::test]
async fn test_groq_completion_success() {
    init_test_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer gsk_test"))
        .and(body_partial_json(json!({"model": "llama-3.3-70b-versatile", "stream": false})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model": "llama-3.3-70b-versatile",
            "choices": [{"message": {"content": "```js\nconsole.log(1)\n```"}, "finish_reason": "stop"}],
            "usage": {"prompt_tokens": 12, "completion_tokens": 8, "total_tokens": 20}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = GroqProvider::new("gsk_test".to_owned()).with_base_url(&server.uri());
    let response = provider.complete(&chat()).await.unwrap();

    assert_eq!(response.content, "```js\nconsole.log(1)\n```");
    assert_eq!(response.finish_reason.as_deref(), Some("stop"));
    assert_eq!(response.usage.unwrap().total_tokens, 20);
}

#[tokio::test]
async fn test_groq_empty_choice_yields_placeholder() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;

    let provider = GroqProvider::new("k".to_owned()).with_base_url(&server.uri());
    let response = provider.complete(&chat()).await.unwrap();
    assert_eq!(response.content, "No response generated.");
}

#[tokio::test]
async fn test_groq_error_statuses() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": {"message": "Rate limit reached", "type": "tokens"}
        })))
        .mount(&server)
        .await;

    let provider = GroqProvider::new("k".to_owned()).with_base_url(&server.uri());
    let err = provider.complete(&chat()).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ExternalRateLimited);
    assert!(err.message.contains("Rate limit reached"));
}

#[tokio::test]
async fn test_groq_unreachable_is_unavailable() {
    let provider = GroqProvider::new("k".to_owned()).with_base_url("http://127.0.0.1:1");
    let err = provider.complete(&chat()).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ExternalServiceUnavailable);
}

// ============================================================================
// Piston
// ============================================================================

#[tokio::test]
async fn test_piston_python_stdout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/execute"))
        .and(body_partial_json(json!({
            "language": "python",
            "version": "3.10.0",
            "files": [{"content": "print(\"hi\")"}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "language": "python",
            "version": "3.10.0",
            "run": {"stdout": "hi\n", "stderr": "", "output": "hi\n", "code": 0}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let runner = PistonRunner::new(&format!("{}/execute", server.uri()));
    let result = runner
        .execute(&ExecutionRequest::new("print(\"hi\")", "python"))
        .await
        .unwrap();

    let output = result.classify();
    assert_eq!(output.text, "hi\n");
    assert_eq!(output.tone, Tone::Success);
}

#[tokio::test]
async fn test_piston_compile_failure_takes_precedence() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/execute"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "compile": {"stdout": "", "stderr": "x", "output": "main.c:1: error: expected ';'", "code": 1},
            "run": {"stdout": "", "stderr": "also", "output": "", "code": 1}
        })))
        .mount(&server)
        .await;

    let runner = PistonRunner::new(&format!("{}/execute", server.uri()));
    let output = runner
        .execute(&ExecutionRequest::new("int main() { return 0 }", "c"))
        .await
        .unwrap()
        .classify();

    assert_eq!(output.text, "main.c:1: error: expected ';'");
    assert_eq!(output.tone, Tone::Error);
}

#[tokio::test]
async fn test_piston_unknown_runtime_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/execute"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"message": "runtime is unknown"})),
        )
        .mount(&server)
        .await;

    let runner = PistonRunner::new(&format!("{}/execute", server.uri()));
    let output = runner
        .execute(&ExecutionRequest::new("x", "java"))
        .await
        .unwrap()
        .classify();
    assert_eq!(output.text, "Runtime Error:\nruntime is unknown");
}

#[tokio::test]
async fn test_piston_unsupported_language_makes_no_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let runner = PistonRunner::new(&format!("{}/execute", server.uri()));
    let err = runner
        .execute(&ExecutionRequest::new("puts 1", "ruby"))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::UnsupportedLanguage);
}

// ============================================================================
// Judge0
// ============================================================================

#[tokio::test]
async fn test_judge0_submission() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/submissions"))
        .and(query_param("base64_encoded", "false"))
        .and(query_param("wait", "true"))
        .and(header("X-RapidAPI-Key", "rk"))
        .and(body_partial_json(json!({"language_id": 71, "stdin": "5"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "stdout": null,
            "stderr": "Traceback: ZeroDivisionError",
            "compile_output": null,
            "message": "Exited with error status 1",
            "status": {"id": 11, "description": "Runtime Error (NZEC)"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let runner = Judge0Runner::new(&server.uri(), "rk");
    let output = runner
        .execute(&ExecutionRequest::new("print(1/0)", "python").with_stdin("5"))
        .await
        .unwrap()
        .classify();

    assert_eq!(output.tone, Tone::Error);
    assert!(output.text.starts_with("Runtime Error:\n"));
    assert!(output.text.contains("ZeroDivisionError"));
}

#[tokio::test]
async fn test_judge0_time_limit_is_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/submissions"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "stdout": null,
            "stderr": null,
            "compile_output": null,
            "message": null,
            "status": {"id": 5, "description": "Time Limit Exceeded"}
        })))
        .mount(&server)
        .await;

    let runner = Judge0Runner::new(&server.uri(), "rk");
    let output = runner
        .execute(&ExecutionRequest::new("while True: pass", "python"))
        .await
        .unwrap()
        .classify();

    assert_eq!(output.tone, Tone::Error);
    assert_eq!(output.text, "System Error: Time Limit Exceeded");
}

#[tokio::test]
async fn test_judge0_auth_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/submissions"))
        .respond_with(ResponseTemplate::new(403).set_body_string("invalid key"))
        .mount(&server)
        .await;

    let runner = Judge0Runner::new(&server.uri(), "bad");
    let err = runner
        .execute(&ExecutionRequest::new("x", "c"))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ExternalAuthFailed);
}

// ============================================================================
// Supabase
// ============================================================================

#[tokio::test]
async fn test_supabase_insert_returns_row() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/history"))
        .and(header("apikey", "anon"))
        .and(header("Prefer", "return=representation"))
        .and(body_partial_json(json!([{"mode": "generate", "prompt": "a loop"}])))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([{
            "id": 42,
            "mode": "generate",
            "language": "c",
            "prompt": "a loop",
            "code_output": "for (;;) {}",
            "created_at": "2025-03-04T21:05:00.123456+00:00"
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let store = SupabaseHistoryStore::new(&server.uri(), "anon");
    let record = store
        .insert(&NewInteraction::from_action(
            AssistantMode::Generate,
            "c",
            "int x;",
            "a loop",
            "for (;;) {}",
        ))
        .await
        .unwrap();

    assert_eq!(record.id, "42");
    assert_eq!(record.prompt, "a loop");
}

#[tokio::test]
async fn test_supabase_list_orders_newest_first() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/history"))
        .and(query_param("order", "created_at.desc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "b", "mode": "debug", "language": null, "prompt": "x", "code_output": "y",
             "created_at": "2025-03-05T10:00:00"},
            {"id": "a", "mode": "explain", "language": "java", "prompt": "z", "code_output": "w",
             "created_at": "2025-03-04T10:00:00+00:00"}
        ])))
        .mount(&server)
        .await;

    let store = SupabaseHistoryStore::new(&server.uri(), "anon");
    let records = store.list().await.unwrap();
    let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["b", "a"]);
    assert_eq!(records[0].language, None);
}

#[tokio::test]
async fn test_supabase_delete_missing_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/rest/v1/history"))
        .and(query_param("id", "eq.missing"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let store = SupabaseHistoryStore::new(&server.uri(), "anon");
    let err = store.delete("missing").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
}

#[tokio::test]
async fn test_supabase_rejected_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/history"))
        .respond_with(ResponseTemplate::new(401).set_body_string(r#"{"message":"Invalid API key"}"#))
        .mount(&server)
        .await;

    let store = SupabaseHistoryStore::new(&server.uri(), "wrong");
    let err = store.list().await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ExternalAuthFailed);
}
