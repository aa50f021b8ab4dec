//! Slack message and search payload types.

use serde::Deserialize;

/// One Slack message as returned by `conversations.replies` or embedded in a search match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SlackMessage {
    /// Author user id (`U...`); absent for bot/integration posts.
    #[serde(default)]
    pub user: Option<String>,
    /// Display name supplied by the platform for bot/integration posts.
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub text: String,
    /// Fixed-point timestamp (`1699999999.123456`); unique within a channel.
    #[serde(default)]
    pub ts: String,
    /// Root timestamp of the thread this message belongs to, when it is threaded.
    #[serde(default)]
    pub thread_ts: Option<String>,
}

/// Channel reference embedded in a search match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SearchChannel {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// A message located by `search.messages`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SearchMatch {
    #[serde(flatten)]
    pub message: SlackMessage,
    #[serde(default)]
    pub channel: SearchChannel,
    #[serde(default)]
    pub permalink: String,
}

impl SearchMatch {
    /// Root timestamp of the thread: explicit parent reference, else the match itself.
    pub fn thread_root_ts(&self) -> &str {
        self.message
            .thread_ts
            .as_deref()
            .filter(|ts| !ts.is_empty())
            .unwrap_or(&self.message.ts)
    }

    pub fn coordinates(&self) -> ThreadCoordinates {
        ThreadCoordinates {
            channel: self.channel.id.clone(),
            root_ts: self.thread_root_ts().to_string(),
        }
    }
}

/// Channel + root timestamp identifying one thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadCoordinates {
    pub channel: String,
    pub root_ts: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct SlackEnvelope<T> {
    #[serde(default)]
    pub(super) ok: bool,
    #[serde(default)]
    pub(super) error: Option<String>,
    #[serde(flatten)]
    pub(super) body: T,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct RepliesBody {
    #[serde(default)]
    pub(super) messages: Vec<SlackMessage>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct SearchBody {
    #[serde(default)]
    pub(super) messages: SearchMessages,
    #[serde(default)]
    pub(super) response_metadata: Option<ResponseMetadata>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct SearchMessages {
    #[serde(default)]
    pub(super) matches: Vec<SearchMatch>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct ResponseMetadata {
    #[serde(default)]
    pub(super) next_cursor: Option<String>,
}

impl SearchBody {
    /// Cursor for the next page; `None` once the platform reports no more pages.
    pub(super) fn next_cursor(&self) -> Option<&str> {
        self.response_metadata
            .as_ref()
            .and_then(|meta| meta.next_cursor.as_deref())
            .filter(|cursor| !cursor.is_empty())
    }
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct UserInfoBody {
    #[serde(default)]
    pub(super) user: Option<SlackUser>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct SlackUser {
    #[serde(default)]
    pub(super) name: Option<String>,
    #[serde(default)]
    pub(super) real_name: Option<String>,
}

impl SlackUser {
    /// `real_name` when non-empty, else the `name` handle.
    pub(super) fn display_name(&self) -> Option<String> {
        [self.real_name.as_deref(), self.name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|name| !name.is_empty())
            .map(ToString::to_string)
    }
}
