//! Slack namespace: Web API access, permalink parsing, transcript rendering.

mod api;
mod client;
mod constants;
mod identity;
mod permalink;
mod source;
mod transcript;
mod types;

pub use constants::{SLACK_DEFAULT_API_BASE, SLACK_SEARCH_DEFAULT_MAX_PAGES, UNKNOWN_AUTHOR};
pub use identity::IdentityCache;
pub use permalink::parse_permalink;
pub use source::SlackThreadSource;
pub use types::{SearchChannel, SearchMatch, SlackMessage, ThreadCoordinates};
