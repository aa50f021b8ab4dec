//! Slack Web API constants.

/// Slack Web API base URL.
pub const SLACK_DEFAULT_API_BASE: &str = "https://slack.com/api";

pub(super) const SLACK_HTTP_CONNECT_TIMEOUT_SECS: u64 = 10;
pub(super) const SLACK_HTTP_REQUEST_TIMEOUT_SECS: u64 = 30;

/// First cursor value for `search.messages` cursor pagination.
pub(super) const SLACK_SEARCH_INITIAL_CURSOR: &str = "*";
/// Upper bound on `search.messages` pages fetched by one search.
pub const SLACK_SEARCH_DEFAULT_MAX_PAGES: usize = 100;

pub(super) const SLACK_METHOD_CONVERSATIONS_REPLIES: &str = "conversations.replies";
pub(super) const SLACK_METHOD_SEARCH_MESSAGES: &str = "search.messages";
pub(super) const SLACK_METHOD_USERS_INFO: &str = "users.info";

/// Author placeholder for messages carrying neither a user id nor a username.
pub const UNKNOWN_AUTHOR: &str = "unknown";

pub(super) const ERROR_BODY_PREVIEW_CHARS: usize = 256;
