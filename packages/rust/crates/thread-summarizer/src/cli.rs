use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use thread_summarizer::ThreadFailurePolicy;

#[derive(Parser)]
#[command(name = "thread-summarizer")]
#[command(
    about = "Summarize Slack threads with a llama.cpp completion server. HTTP gateway or one-shot."
)]
pub(crate) struct Cli {
    /// Override config directory (user settings live in `<conf>/thread-summarizer/`).
    #[arg(long, global = true)]
    pub(crate) conf: Option<PathBuf>,

    /// Debug-level logs (RUST_LOG still takes precedence).
    #[arg(long, short, global = true)]
    pub(crate) verbose: bool,

    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub(crate) enum FailurePolicyArg {
    Degrade,
    Strict,
}

impl From<FailurePolicyArg> for ThreadFailurePolicy {
    fn from(value: FailurePolicyArg) -> Self {
        match value {
            FailurePolicyArg::Degrade => Self::Degrade,
            FailurePolicyArg::Strict => Self::Strict,
        }
    }
}

/// Overrides shared by every mode; unset flags fall back to env, settings, then defaults.
#[derive(Debug, Clone, Default, Args)]
pub(crate) struct SummarizerArgs {
    /// Inference server host (env: LLAMA_SERVER_HOST, default: localhost)
    #[arg(long)]
    pub(crate) inference_host: Option<String>,

    /// Inference server port (env: LLAMA_SERVER_PORT, default: 8080)
    #[arg(long)]
    pub(crate) inference_port: Option<u16>,

    /// Slack search query selecting labeled threads (passed verbatim)
    #[arg(long)]
    pub(crate) label_query: Option<String>,

    /// Minimum spacing between thread fetches in a batch, in milliseconds (default: 1000)
    #[arg(long)]
    pub(crate) collect_pause_ms: Option<u64>,

    /// Max concurrent inference calls in a batch (default: 4; 0 = unlimited)
    #[arg(long)]
    pub(crate) max_concurrent_inference: Option<usize>,

    /// What a malformed permalink or failed thread fetch does (default: degrade)
    #[arg(long, value_enum)]
    pub(crate) failure_policy: Option<FailurePolicyArg>,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Run HTTP server (GET /summarize-url, GET /summarize-art-attention). Default bind: 0.0.0.0:8000
    Gateway {
        /// Listen address (e.g. 0.0.0.0:8000)
        #[arg(long)]
        bind: Option<String>,

        /// Per-request timeout in seconds (default: 600)
        #[arg(long)]
        request_timeout: Option<u64>,

        #[command(flatten)]
        summarizer: SummarizerArgs,
    },
    /// Summarize one thread by permalink and print `{"summary": ...}`.
    Thread {
        /// Slack message permalink.
        #[arg(long)]
        url: String,

        #[command(flatten)]
        summarizer: SummarizerArgs,
    },
    /// Summarize every labeled, unresolved thread and print `{"summaries": [...]}`.
    Labeled {
        #[command(flatten)]
        summarizer: SummarizerArgs,
    },
}
