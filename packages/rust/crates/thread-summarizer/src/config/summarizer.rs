//! Summarizer configuration: Slack source, inference endpoint, batch behaviour.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::inference::{DEFAULT_INFERENCE_TIMEOUT_SECS, DEFAULT_MAX_OUTPUT_TOKENS};
use crate::slack::{SLACK_DEFAULT_API_BASE, SLACK_SEARCH_DEFAULT_MAX_PAGES};

pub const DEFAULT_INFERENCE_HOST: &str = "localhost";
pub const DEFAULT_INFERENCE_PORT: u16 = 8080;

/// Threads carrying the label reaction and not yet marked resolved.
pub const DEFAULT_LABEL_QUERY: &str = "has::art-attention: -has::art-attention-resolved:";

/// Minimum spacing between successive thread collections in a batch.
pub const DEFAULT_COLLECT_PAUSE_MS: u64 = 1_000;

/// Cap on concurrent inference calls in a batch.
pub const DEFAULT_MAX_CONCURRENT_INFERENCE: usize = 4;

/// Compose the completion URL from host and port.
pub fn inference_endpoint(host: &str, port: u16) -> String {
    format!("http://{}:{port}/completion", host.trim())
}

/// What a thread-level failure (malformed permalink, failed `conversations.replies`)
/// does to the request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreadFailurePolicy {
    /// Log a warning and continue with an empty thread (its empty transcript is still
    /// summarized).
    #[default]
    Degrade,
    /// Return the error to the caller; a batch aborts on the first failed fetch.
    Strict,
}

impl FromStr for ThreadFailurePolicy {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "degrade" => Ok(Self::Degrade),
            "strict" => Ok(Self::Strict),
            other => Err(format!(
                "invalid thread failure policy '{other}' (expected one of: degrade, strict)"
            )),
        }
    }
}

impl fmt::Display for ThreadFailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Degrade => "degrade",
            Self::Strict => "strict",
        })
    }
}

/// Resolved summarizer configuration (credentials are passed separately).
#[derive(Debug, Clone)]
pub struct SummarizerConfig {
    pub slack_api_base: String,
    pub max_search_pages: usize,
    /// Full completion URL, e.g. `http://localhost:8080/completion`.
    pub inference_endpoint: String,
    pub inference_timeout_secs: u64,
    pub max_output_tokens: u32,
    /// `search.messages` query selecting labeled, unresolved threads (passed verbatim).
    pub label_query: String,
    pub collect_pause: Duration,
    /// `None` = no cap on concurrent inference calls.
    pub max_concurrent_inference: Option<usize>,
    pub failure_policy: ThreadFailurePolicy,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            slack_api_base: SLACK_DEFAULT_API_BASE.to_string(),
            max_search_pages: SLACK_SEARCH_DEFAULT_MAX_PAGES,
            inference_endpoint: inference_endpoint(DEFAULT_INFERENCE_HOST, DEFAULT_INFERENCE_PORT),
            inference_timeout_secs: DEFAULT_INFERENCE_TIMEOUT_SECS,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            label_query: DEFAULT_LABEL_QUERY.to_string(),
            collect_pause: Duration::from_millis(DEFAULT_COLLECT_PAUSE_MS),
            max_concurrent_inference: Some(DEFAULT_MAX_CONCURRENT_INFERENCE),
            failure_policy: ThreadFailurePolicy::Degrade,
        }
    }
}
