//! Error types for the thread summarization pipeline.
//!
//! Library code returns [`SummarizerError`]; the binary wraps it in `anyhow`.

use thiserror::Error;

/// Permalink did not match `/archives/<CHANNEL>/p<16 digits>`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid Slack message permalink: {0}")]
pub struct PermalinkError(pub String);

/// Failures that can cross a public entry point.
#[derive(Error, Debug)]
pub enum SummarizerError {
    /// Required credential env var is unset or blank.
    #[error("missing required credential: {0}")]
    MissingCredential(&'static str),

    /// Permalink could not be parsed (strict failure policy only).
    #[error(transparent)]
    InvalidPermalink(#[from] PermalinkError),

    /// Request to the Slack Web API did not complete.
    #[error("slack {method} request failed: {source}")]
    SlackTransport {
        method: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// Slack answered with a non-success HTTP status.
    #[error("slack {method} returned status {status}: {body}")]
    SlackStatus {
        method: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },

    /// Slack answered `ok: false`.
    #[error("slack {method} error: {error}")]
    SlackApi { method: &'static str, error: String },

    /// Slack payload could not be decoded.
    #[error("slack {method} response decode failed: {source}")]
    SlackDecode {
        method: &'static str,
        #[source]
        source: reqwest::Error,
    },
}

impl SummarizerError {
    /// True for errors raised by the messaging platform (as opposed to caller input).
    pub fn is_platform_error(&self) -> bool {
        matches!(
            self,
            Self::SlackTransport { .. }
                | Self::SlackStatus { .. }
                | Self::SlackApi { .. }
                | Self::SlackDecode { .. }
        )
    }
}

pub type Result<T, E = SummarizerError> = std::result::Result<T, E>;
