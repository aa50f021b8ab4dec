//! Mock Slack Web API + llama.cpp completion server for integration tests.
//!
//! Prompt markers understood by the mock `/completion` route:
//! - `[delay:<ms>]` sleeps before answering
//! - `[broken]` answers 500
//! - `[garbage]` answers 200 with a payload lacking `content`

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use thread_summarizer::{SlackCredentials, SummarizerConfig, ThreadFailurePolicy};

pub const BOT_TOKEN: &str = "xoxb-test";
pub const USER_TOKEN: &str = "xoxp-test";

#[derive(Default)]
struct MockData {
    search_pages: HashMap<String, Value>,
    threads: HashMap<(String, String), Value>,
    users: HashMap<String, Value>,
    failing_users: Vec<String>,
}

#[derive(Clone, Default)]
pub struct MockPlatform {
    data: Arc<Mutex<MockData>>,
    pub search_requests: Arc<Mutex<Vec<(String, String, String)>>>,
    pub replies_requests: Arc<Mutex<Vec<(String, String, String)>>>,
    pub users_info_calls: Arc<AtomicUsize>,
    pub completion_prompts: Arc<Mutex<Vec<String>>>,
    pub completion_n_predict: Arc<Mutex<Vec<u64>>>,
    pub completion_in_flight: Arc<AtomicUsize>,
    pub completion_peak_in_flight: Arc<AtomicUsize>,
}

impl MockPlatform {
    /// Register one `search.messages` page answered for `cursor` (`*` is the first page).
    pub fn search_page(&self, cursor: &str, matches: Vec<Value>, next_cursor: Option<&str>) {
        let mut page = json!({
            "ok": true,
            "messages": { "matches": matches },
        });
        if let Some(next) = next_cursor {
            page["response_metadata"] = json!({ "next_cursor": next });
        }
        self.lock().search_pages.insert(cursor.to_string(), page);
    }

    pub fn thread(&self, channel: &str, ts: &str, messages: Vec<Value>) {
        self.lock().threads.insert(
            (channel.to_string(), ts.to_string()),
            json!({ "ok": true, "messages": messages }),
        );
    }

    pub fn user(&self, id: &str, real_name: &str, name: &str) {
        self.lock().users.insert(
            id.to_string(),
            json!({ "ok": true, "user": { "id": id, "real_name": real_name, "name": name } }),
        );
    }

    /// Make `users.info` answer 500 for `id` until [`Self::user`] is called for it.
    pub fn failing_user(&self, id: &str) {
        self.lock().failing_users.push(id.to_string());
    }

    pub fn heal_user(&self, id: &str, real_name: &str, name: &str) {
        self.lock().failing_users.retain(|failing| failing != id);
        self.user(id, real_name, name);
    }

    pub fn search_cursors(&self) -> Vec<String> {
        self.search_requests
            .lock()
            .unwrap()
            .iter()
            .map(|(_, _, cursor)| cursor.clone())
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockData> {
        self.data.lock().unwrap()
    }
}

fn bearer(headers: &HeaderMap) -> String {
    headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .unwrap_or_default()
        .to_string()
}

async fn handle_search(
    State(state): State<MockPlatform>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    let query = params.get("query").cloned().unwrap_or_default();
    let cursor = params.get("cursor").cloned().unwrap_or_default();
    state
        .search_requests
        .lock()
        .unwrap()
        .push((bearer(&headers), query, cursor.clone()));
    let page = state.lock().search_pages.get(&cursor).cloned();
    Json(page.unwrap_or_else(|| json!({ "ok": false, "error": "invalid_cursor" })))
}

async fn handle_replies(
    State(state): State<MockPlatform>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    let channel = params.get("channel").cloned().unwrap_or_default();
    let ts = params.get("ts").cloned().unwrap_or_default();
    state
        .replies_requests
        .lock()
        .unwrap()
        .push((bearer(&headers), channel.clone(), ts.clone()));
    let thread = state.lock().threads.get(&(channel, ts)).cloned();
    Json(thread.unwrap_or_else(|| json!({ "ok": false, "error": "thread_not_found" })))
}

async fn handle_users_info(
    State(state): State<MockPlatform>,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    state.users_info_calls.fetch_add(1, Ordering::SeqCst);
    let user = params.get("user").cloned().unwrap_or_default();
    let data = state.lock();
    if data.failing_users.contains(&user) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "ok": false, "error": "internal_error" })),
        );
    }
    let body = data
        .users
        .get(&user)
        .cloned()
        .unwrap_or_else(|| json!({ "ok": false, "error": "user_not_found" }));
    (StatusCode::OK, Json(body))
}

fn prompt_delay(prompt: &str) -> Option<Duration> {
    let start = prompt.find("[delay:")? + "[delay:".len();
    let end = prompt[start..].find(']')? + start;
    prompt[start..end].parse().ok().map(Duration::from_millis)
}

/// Transcript portion of a prompt built from the fixed template.
pub fn transcript_of(prompt: &str) -> &str {
    let body = prompt.split_once("\n\n").map_or(prompt, |(_, rest)| rest);
    body.strip_suffix(" [/INST]").unwrap_or(body)
}

async fn handle_completion(
    State(state): State<MockPlatform>,
    Json(payload): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let prompt = payload
        .get("prompt")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    state.completion_prompts.lock().unwrap().push(prompt.clone());
    let n_predict = payload.get("n_predict").and_then(Value::as_u64).unwrap_or(0);
    state.completion_n_predict.lock().unwrap().push(n_predict);

    let in_flight = state.completion_in_flight.fetch_add(1, Ordering::SeqCst) + 1;
    state
        .completion_peak_in_flight
        .fetch_max(in_flight, Ordering::SeqCst);
    if let Some(delay) = prompt_delay(&prompt) {
        tokio::time::sleep(delay).await;
    }
    state.completion_in_flight.fetch_sub(1, Ordering::SeqCst);

    if prompt.contains("[broken]") {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "model crashed" })),
        );
    }
    if prompt.contains("[garbage]") {
        return (StatusCode::OK, Json(json!({ "tokens_predicted": 3 })));
    }
    (
        StatusCode::OK,
        Json(json!({ "content": format!("summary of: {}", transcript_of(&prompt)) })),
    )
}

/// Serve the mock on `127.0.0.1:0`. `None` when local sockets are not permitted.
pub async fn spawn_mock_platform()
-> Result<Option<(String, MockPlatform, tokio::task::JoinHandle<()>)>> {
    let state = MockPlatform::default();
    let app = Router::new()
        .route("/api/search.messages", get(handle_search))
        .route("/api/conversations.replies", get(handle_replies))
        .route("/api/users.info", get(handle_users_info))
        .route("/completion", post(handle_completion))
        .with_state(state.clone());

    let listener = match tokio::net::TcpListener::bind("127.0.0.1:0").await {
        Ok(listener) => listener,
        Err(err) if err.kind() == std::io::ErrorKind::PermissionDenied => {
            eprintln!("skipping mock platform tests: local socket bind is not permitted");
            return Ok(None);
        }
        Err(err) => return Err(err.into()),
    };
    let addr = listener.local_addr()?;
    let handle = tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(Some((format!("http://{addr}"), state, handle)))
}

pub fn credentials() -> SlackCredentials {
    SlackCredentials::new(BOT_TOKEN, USER_TOKEN)
}

/// Config pointing at the mock: no collection pause, 1s inference timeout.
pub fn mock_config(base_url: &str, failure_policy: ThreadFailurePolicy) -> SummarizerConfig {
    SummarizerConfig {
        slack_api_base: format!("{base_url}/api"),
        inference_endpoint: format!("{base_url}/completion"),
        inference_timeout_secs: 1,
        collect_pause: Duration::ZERO,
        failure_policy,
        ..SummarizerConfig::default()
    }
}

pub fn search_match(channel: &str, ts: &str, thread_ts: Option<&str>) -> Value {
    let digits = ts.replace('.', "");
    let mut matched = json!({
        "ts": ts,
        "text": format!("match {ts}"),
        "channel": { "id": channel, "name": "art" },
        "permalink": format!("https://x.slack.com/archives/{channel}/p{digits}"),
    });
    if let Some(thread_ts) = thread_ts {
        matched["thread_ts"] = json!(thread_ts);
    }
    matched
}

pub fn message(user: &str, text: &str, ts: &str) -> Value {
    json!({ "user": user, "text": text, "ts": ts })
}
