//! Slack thread summarizer: thread retrieval + llama.cpp completion; HTTP gateway.
//!
//! - **Thread source**: `search.messages` (cursor paginated), `conversations.replies`,
//!   `users.info` with a per-source identity cache; permalink parsing; transcript rendering.
//! - **Summarizer**: one permalink, or every labeled unresolved thread (paced collection,
//!   capped concurrent inference, positional result pairing).

#![allow(missing_docs)]

mod config;
mod error;
mod gateway;
mod inference;
mod slack;
mod summarizer;

pub use config::{
    DEFAULT_COLLECT_PAUSE_MS, DEFAULT_INFERENCE_HOST, DEFAULT_INFERENCE_PORT, DEFAULT_LABEL_QUERY,
    DEFAULT_MAX_CONCURRENT_INFERENCE, GatewaySettings, InferenceSettings, RuntimeSettings,
    SLACK_BOT_TOKEN_ENV, SLACK_USER_TOKEN_ENV, SlackCredentials, SlackSettings, SummarizerConfig,
    SummarizerSettings, ThreadFailurePolicy, inference_endpoint, load_runtime_settings,
    load_runtime_settings_from_paths, runtime_settings_paths, set_config_home_override,
};
pub use error::{PermalinkError, SummarizerError};
pub use gateway::{
    DEFAULT_REQUEST_TIMEOUT_SECS, GatewayHealthResponse, GatewayState, LabeledSummariesResponse,
    SummarizeUrlQuery, SummarizeUrlResponse, router, run_http,
};
pub use inference::{
    DEFAULT_INFERENCE_TIMEOUT_SECS, DEFAULT_MAX_OUTPUT_TOKENS, InferenceClient,
    SUMMARY_PROMPT_TEMPLATE, build_summary_prompt,
};
pub use slack::{
    IdentityCache, SLACK_DEFAULT_API_BASE, SLACK_SEARCH_DEFAULT_MAX_PAGES, SearchChannel,
    SearchMatch, SlackMessage, SlackThreadSource, ThreadCoordinates, UNKNOWN_AUTHOR,
    parse_permalink,
};
pub use summarizer::{Summarizer, SummaryResult};
