#![allow(missing_docs)]

use std::collections::HashMap;
use std::path::PathBuf;

use tempfile::TempDir;
use thread_summarizer::{
    SLACK_BOT_TOKEN_ENV, SLACK_USER_TOKEN_ENV, SlackCredentials, SummarizerError,
    load_runtime_settings_from_paths,
};

fn write_file(path: PathBuf, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent dir");
    }
    std::fs::write(path, content).expect("write yaml");
}

#[test]
fn merge_user_overrides_system() {
    let tmp = TempDir::new().expect("tempdir");
    let system = tmp.path().join("packages/conf/settings.yaml");
    let user = tmp.path().join(".config/thread-summarizer/settings.yaml");

    write_file(
        system.clone(),
        r#"
slack:
  api_base: "https://slack.com/api"
  max_search_pages: 50
inference:
  host: "localhost"
  port: 8080
  timeout_secs: 120
  max_output_tokens: 512
summarizer:
  label_query: "has::art-attention: -has::art-attention-resolved:"
  collect_pause_ms: 1000
  max_concurrent_inference: 4
  failure_policy: "degrade"
gateway:
  bind: "0.0.0.0:8000"
  request_timeout_secs: 600
"#,
    );
    write_file(
        user.clone(),
        r#"
inference:
  host: "llama.internal"
summarizer:
  collect_pause_ms: 250
  failure_policy: "strict"
gateway:
  request_timeout_secs: 90
"#,
    );

    let settings = load_runtime_settings_from_paths(&system, &user);

    assert_eq!(settings.slack.max_search_pages, Some(50));
    assert_eq!(settings.inference.host.as_deref(), Some("llama.internal"));
    assert_eq!(settings.inference.port, Some(8080));
    assert_eq!(settings.inference.max_output_tokens, Some(512));
    assert_eq!(settings.summarizer.collect_pause_ms, Some(250));
    assert_eq!(settings.summarizer.max_concurrent_inference, Some(4));
    assert_eq!(settings.summarizer.failure_policy.as_deref(), Some("strict"));
    assert_eq!(
        settings.summarizer.label_query.as_deref(),
        Some("has::art-attention: -has::art-attention-resolved:")
    );
    assert_eq!(settings.gateway.bind.as_deref(), Some("0.0.0.0:8000"));
    assert_eq!(settings.gateway.request_timeout_secs, Some(90));
}

#[test]
fn missing_files_yield_empty_settings() {
    let tmp = TempDir::new().expect("tempdir");
    let settings = load_runtime_settings_from_paths(
        &tmp.path().join("absent/system.yaml"),
        &tmp.path().join("absent/user.yaml"),
    );

    assert!(settings.inference.host.is_none());
    assert!(settings.summarizer.label_query.is_none());
    assert!(settings.gateway.bind.is_none());
}

#[test]
fn malformed_user_file_is_ignored() {
    let tmp = TempDir::new().expect("tempdir");
    let system = tmp.path().join("system.yaml");
    let user = tmp.path().join("user.yaml");
    write_file(system.clone(), "inference:\n  port: 9090\n");
    write_file(user.clone(), "inference: [not, a, map\n");

    let settings = load_runtime_settings_from_paths(&system, &user);

    assert_eq!(settings.inference.port, Some(9090));
}

#[test]
fn credentials_require_both_tokens() {
    let env: HashMap<&str, &str> = HashMap::from([(SLACK_BOT_TOKEN_ENV, "xoxb-1")]);
    let error = SlackCredentials::from_lookup(|name| env.get(name).map(ToString::to_string))
        .expect_err("user token is missing");
    assert!(matches!(
        error,
        SummarizerError::MissingCredential(name) if name == SLACK_USER_TOKEN_ENV
    ));

    let blank: HashMap<&str, &str> =
        HashMap::from([(SLACK_BOT_TOKEN_ENV, "  "), (SLACK_USER_TOKEN_ENV, "xoxp-1")]);
    let error = SlackCredentials::from_lookup(|name| blank.get(name).map(ToString::to_string))
        .expect_err("blank bot token is rejected");
    assert!(matches!(
        error,
        SummarizerError::MissingCredential(name) if name == SLACK_BOT_TOKEN_ENV
    ));
}

#[test]
fn credentials_are_trimmed_and_redacted_in_debug() {
    let env: HashMap<&str, &str> = HashMap::from([
        (SLACK_BOT_TOKEN_ENV, " xoxb-secret "),
        (SLACK_USER_TOKEN_ENV, "xoxp-secret"),
    ]);
    let credentials = SlackCredentials::from_lookup(|name| env.get(name).map(ToString::to_string))
        .expect("credentials");

    assert_eq!(credentials.bot_token, "xoxb-secret");
    assert_eq!(credentials.user_token, "xoxp-secret");
    let debug = format!("{credentials:?}");
    assert!(!debug.contains("secret"));
}
