//! thread-summarizer CLI: gateway, thread, or labeled mode.
//!
//! Credentials: `SLACK_TOKEN` (bot) and `USER_TOKEN` (search) must be set.
//!
//! Logging: set `RUST_LOG=thread_summarizer=info` (or `warn`, `debug`) to see logs on stderr.

mod cli;
mod nodes;
mod resolve;
mod summarizer_builder;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use thread_summarizer::{load_runtime_settings, set_config_home_override};

use crate::cli::{Cli, Command};
use crate::nodes::{run_gateway_mode, run_labeled_mode, run_thread_mode};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if let Some(conf_dir) = cli.conf.clone() {
        set_config_home_override(conf_dir);
    }

    // RUST_LOG overrides; --verbose => debug; else info
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if cli.verbose {
            "thread_summarizer=debug"
        } else {
            "thread_summarizer=info"
        })
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let runtime_settings = load_runtime_settings();

    match cli.command {
        Command::Gateway {
            bind,
            request_timeout,
            summarizer,
        } => run_gateway_mode(bind, request_timeout, summarizer, &runtime_settings).await,
        Command::Thread { url, summarizer } => {
            run_thread_mode(url, summarizer, &runtime_settings).await
        }
        Command::Labeled { summarizer } => run_labeled_mode(summarizer, &runtime_settings).await,
    }
}
