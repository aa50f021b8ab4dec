//! Slack thread source: identity resolution, labeled-message search, thread fetch.

use crate::config::SlackCredentials;
use crate::error::Result;

use super::api::SlackApi;
use super::client::build_slack_http_client;
use super::constants::{
    SLACK_DEFAULT_API_BASE, SLACK_METHOD_CONVERSATIONS_REPLIES, SLACK_METHOD_SEARCH_MESSAGES,
    SLACK_METHOD_USERS_INFO, SLACK_SEARCH_DEFAULT_MAX_PAGES, SLACK_SEARCH_INITIAL_CURSOR,
};
use super::identity::IdentityCache;
use super::types::{RepliesBody, SearchBody, SearchMatch, SlackMessage, UserInfoBody};

/// Reads threads from one Slack workspace.
///
/// The bot token authorizes `conversations.replies` and `users.info`; the user token
/// authorizes `search.messages` (bot tokens cannot search).
pub struct SlackThreadSource {
    api: SlackApi,
    credentials: SlackCredentials,
    identities: IdentityCache,
    max_search_pages: usize,
}

impl SlackThreadSource {
    pub fn new(credentials: SlackCredentials) -> Self {
        Self::new_with_base_url(credentials, SLACK_DEFAULT_API_BASE.to_string())
    }

    /// Create a source against a custom API base (tests, proxies, enterprise grid).
    pub fn new_with_base_url(credentials: SlackCredentials, api_base_url: String) -> Self {
        Self {
            api: SlackApi::new(build_slack_http_client(), &api_base_url),
            credentials,
            identities: IdentityCache::new(),
            max_search_pages: SLACK_SEARCH_DEFAULT_MAX_PAGES,
        }
    }

    #[must_use]
    pub fn with_max_search_pages(mut self, max_search_pages: usize) -> Self {
        self.max_search_pages = max_search_pages.max(1);
        self
    }

    pub fn api_base_url(&self) -> &str {
        self.api.api_base()
    }

    /// Number of author ids resolved so far.
    pub fn cached_identity_count(&self) -> usize {
        self.identities.len()
    }

    /// Resolve a user id to a display name; falls back to the raw id on any failure.
    ///
    /// Failures are not cached, so the next call retries the lookup.
    pub async fn resolve_identity(&self, author_id: &str) -> String {
        if let Some(name) = self.identities.get(author_id) {
            return name;
        }

        let lookup = self
            .api
            .get::<UserInfoBody>(
                SLACK_METHOD_USERS_INFO,
                &self.credentials.bot_token,
                &[("user", author_id)],
            )
            .await;
        let resolved = match lookup {
            Ok(body) => body.user.and_then(|user| user.display_name()),
            Err(error) => {
                tracing::warn!(
                    event = "slack.identity.lookup_failed",
                    user_id = %author_id,
                    error = %error,
                    "Failed to retrieve user name"
                );
                return author_id.to_string();
            }
        };
        match resolved {
            Some(name) => {
                self.identities.insert(author_id, &name);
                name
            }
            None => {
                tracing::warn!(
                    event = "slack.identity.no_name",
                    user_id = %author_id,
                    "users.info returned no usable name"
                );
                author_id.to_string()
            }
        }
    }

    /// Run a `search.messages` query across all cursor pages, oldest match first.
    pub async fn search(&self, query: &str) -> Result<Vec<SearchMatch>> {
        let mut matches: Vec<SearchMatch> = Vec::new();
        let mut cursor = SLACK_SEARCH_INITIAL_CURSOR.to_string();
        let mut pages = 0usize;

        loop {
            let page: SearchBody = self
                .api
                .get(
                    SLACK_METHOD_SEARCH_MESSAGES,
                    &self.credentials.user_token,
                    &[("query", query), ("cursor", cursor.as_str())],
                )
                .await?;
            pages += 1;
            let next_cursor = page.next_cursor().map(ToString::to_string);
            tracing::debug!(
                event = "slack.search.page",
                page = pages,
                matches = page.messages.matches.len(),
                has_more = next_cursor.is_some(),
                "search page fetched"
            );
            matches.extend(page.messages.matches);

            let Some(next) = next_cursor else {
                break;
            };
            if pages >= self.max_search_pages {
                tracing::warn!(
                    event = "slack.search.page_cap_reached",
                    pages,
                    matches = matches.len(),
                    "search pagination stopped at page cap"
                );
                break;
            }
            cursor = next;
        }

        // Search ranking is not chronological; `sort_by` is stable so ties keep page order.
        matches.sort_by(|a, b| a.message.ts.cmp(&b.message.ts));
        Ok(matches)
    }

    /// Fetch every message of the thread rooted at `root_ts` in `channel`.
    pub async fn fetch_thread(&self, channel: &str, root_ts: &str) -> Result<Vec<SlackMessage>> {
        let body: RepliesBody = self
            .api
            .get(
                SLACK_METHOD_CONVERSATIONS_REPLIES,
                &self.credentials.bot_token,
                &[("channel", channel), ("ts", root_ts)],
            )
            .await?;
        tracing::debug!(
            event = "slack.thread.fetched",
            channel,
            thread_ts = root_ts,
            messages = body.messages.len(),
            "thread fetched"
        );
        Ok(body.messages)
    }
}
