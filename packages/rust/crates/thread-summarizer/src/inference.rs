//! Inference client: llama.cpp-compatible `POST /completion` (`{prompt, n_predict}` → `{content}`).

use std::time::{Duration, Instant};

use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Instruction template wrapped around each transcript.
pub const SUMMARY_PROMPT_TEMPLATE: &str =
    "[INST] Summarize this conversation taken from Slack:\n\n{text} [/INST]";

/// Maximum tokens the model may generate per summary.
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 512;

/// Default per-request inference timeout.
pub const DEFAULT_INFERENCE_TIMEOUT_SECS: u64 = 120;

const INFERENCE_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    prompt: &'a str,
    n_predict: u32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    content: String,
}

/// Build the model prompt for a transcript (surrounding whitespace trimmed).
pub fn build_summary_prompt(text: &str) -> String {
    SUMMARY_PROMPT_TEMPLATE.replace("{text}", text.trim())
}

/// HTTP client for the completion endpoint.
#[derive(Clone)]
pub struct InferenceClient {
    client: Client,
    endpoint: String,
    max_output_tokens: u32,
}

impl InferenceClient {
    pub fn new(endpoint: &str, timeout_secs: u64) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(INFERENCE_CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(timeout_secs.max(1)))
            .build()
            .unwrap_or_default();
        Self {
            client,
            endpoint: endpoint.to_string(),
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
        }
    }

    #[must_use]
    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = max_output_tokens.max(1);
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Summarize `text`; `None` on transport failure, timeout, non-success status
    /// or an undecodable payload.
    pub async fn summarize_text(&self, text: &str) -> Option<String> {
        let started = Instant::now();
        let prompt = build_summary_prompt(text);
        tracing::debug!(
            event = "inference.summarize.started",
            endpoint = %self.endpoint,
            transcript_chars = text.len(),
            "querying model"
        );
        let body = CompletionRequest {
            prompt: &prompt,
            n_predict: self.max_output_tokens,
        };
        let response = match self.client.post(&self.endpoint).json(&body).send().await {
            Ok(response) => response,
            Err(error) => {
                tracing::warn!(
                    event = "inference.summarize.request_failed",
                    endpoint = %self.endpoint,
                    elapsed_ms = started.elapsed().as_millis(),
                    timed_out = error.is_timeout(),
                    error = %error,
                    "Encountered error while querying the model"
                );
                return None;
            }
        };
        if !response.status().is_success() {
            tracing::warn!(
                event = "inference.summarize.non_success_status",
                status = %response.status(),
                elapsed_ms = started.elapsed().as_millis(),
                "model returned non-success status"
            );
            return None;
        }
        match response.json::<CompletionResponse>().await {
            Ok(data) => {
                tracing::debug!(
                    event = "inference.summarize.completed",
                    elapsed_ms = started.elapsed().as_millis(),
                    summary_chars = data.content.len(),
                    "model summary received"
                );
                Some(data.content)
            }
            Err(error) => {
                tracing::warn!(
                    event = "inference.summarize.decode_failed",
                    elapsed_ms = started.elapsed().as_millis(),
                    error = %error,
                    "model response decode failed"
                );
                None
            }
        }
    }
}
