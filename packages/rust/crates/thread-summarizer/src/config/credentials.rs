//! Slack credentials: bot token (API calls, thread fetch) and user token (search).

use std::fmt;

use crate::error::{Result, SummarizerError};

/// Env var holding the Slack bot token.
pub const SLACK_BOT_TOKEN_ENV: &str = "SLACK_TOKEN";
/// Env var holding the Slack user token (required by `search.messages`).
pub const SLACK_USER_TOKEN_ENV: &str = "USER_TOKEN";

#[derive(Clone, PartialEq, Eq)]
pub struct SlackCredentials {
    pub bot_token: String,
    pub user_token: String,
}

impl SlackCredentials {
    pub fn new(bot_token: impl Into<String>, user_token: impl Into<String>) -> Self {
        Self {
            bot_token: bot_token.into(),
            user_token: user_token.into(),
        }
    }

    /// Read both tokens from the process environment; a missing or blank token is fatal.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    #[doc(hidden)]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |name: &'static str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .ok_or(SummarizerError::MissingCredential(name))
        };
        Ok(Self {
            bot_token: required(SLACK_BOT_TOKEN_ENV)?,
            user_token: required(SLACK_USER_TOKEN_ENV)?,
        })
    }
}

impl fmt::Debug for SlackCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlackCredentials")
            .field("bot_token", &"<redacted>")
            .field("user_token", &"<redacted>")
            .finish()
    }
}
