use std::time::Duration;

use super::constants::{SLACK_HTTP_CONNECT_TIMEOUT_SECS, SLACK_HTTP_REQUEST_TIMEOUT_SECS};

pub(super) fn build_slack_http_client() -> reqwest::Client {
    match reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(SLACK_HTTP_CONNECT_TIMEOUT_SECS))
        .timeout(Duration::from_secs(SLACK_HTTP_REQUEST_TIMEOUT_SECS))
        .build()
    {
        Ok(client) => client,
        Err(error) => {
            tracing::warn!(
                error = %error,
                "Failed to build Slack HTTP client with timeouts; falling back to default client"
            );
            reqwest::Client::new()
        }
    }
}
