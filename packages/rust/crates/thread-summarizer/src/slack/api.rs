use std::time::Instant;

use serde::de::DeserializeOwned;

use crate::error::{Result, SummarizerError};

use super::constants::ERROR_BODY_PREVIEW_CHARS;
use super::types::SlackEnvelope;

/// Thin Slack Web API caller: `GET {api_base}/{method}` with a bearer token.
pub(super) struct SlackApi {
    client: reqwest::Client,
    api_base: String,
}

impl SlackApi {
    pub(super) fn new(client: reqwest::Client, api_base: &str) -> Self {
        Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    pub(super) fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Call `method` and decode its body; `ok: false` becomes [`SummarizerError::SlackApi`].
    pub(super) async fn get<T: DeserializeOwned>(
        &self,
        method: &'static str,
        token: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let started = Instant::now();
        let url = format!("{}/{method}", self.api_base);
        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .query(params)
            .send()
            .await
            .map_err(|source| SummarizerError::SlackTransport { method, source })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let preview = body.chars().take(ERROR_BODY_PREVIEW_CHARS).collect();
            return Err(SummarizerError::SlackStatus {
                method,
                status,
                body: preview,
            });
        }

        let envelope: SlackEnvelope<T> = response
            .json()
            .await
            .map_err(|source| SummarizerError::SlackDecode { method, source })?;
        tracing::debug!(
            event = "slack.api.completed",
            method,
            ok = envelope.ok,
            elapsed_ms = started.elapsed().as_millis(),
            "slack api call completed"
        );
        if !envelope.ok {
            return Err(SummarizerError::SlackApi {
                method,
                error: envelope.error.unwrap_or_else(|| "unknown_error".to_string()),
            });
        }
        Ok(envelope.body)
    }
}
