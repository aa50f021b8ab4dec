//! Config namespace: credentials, summarizer config, YAML runtime settings.

mod credentials;
mod settings;
mod summarizer;

pub use credentials::{SLACK_BOT_TOKEN_ENV, SLACK_USER_TOKEN_ENV, SlackCredentials};
pub use settings::{
    GatewaySettings, InferenceSettings, RuntimeSettings, SlackSettings, SummarizerSettings,
    load_runtime_settings, load_runtime_settings_from_paths, runtime_settings_paths,
    set_config_home_override,
};
pub use summarizer::{
    DEFAULT_COLLECT_PAUSE_MS, DEFAULT_INFERENCE_HOST, DEFAULT_INFERENCE_PORT, DEFAULT_LABEL_QUERY,
    DEFAULT_MAX_CONCURRENT_INFERENCE, SummarizerConfig, ThreadFailurePolicy, inference_endpoint,
};
