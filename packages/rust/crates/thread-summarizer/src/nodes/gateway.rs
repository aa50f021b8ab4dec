use thread_summarizer::{DEFAULT_REQUEST_TIMEOUT_SECS, RuntimeSettings, run_http};

use crate::cli::SummarizerArgs;
use crate::resolve::{resolve_positive_u64, resolve_string};
use crate::summarizer_builder::build_summarizer;

const DEFAULT_GATEWAY_BIND: &str = "0.0.0.0:8000";

pub(crate) async fn run_gateway_mode(
    bind: Option<String>,
    request_timeout: Option<u64>,
    args: SummarizerArgs,
    runtime_settings: &RuntimeSettings,
) -> anyhow::Result<()> {
    let summarizer = build_summarizer(&args, runtime_settings)?;
    let gateway = &runtime_settings.gateway;
    let bind_addr = resolve_string(
        bind,
        "THREAD_SUMMARIZER_BIND",
        gateway.bind.as_deref(),
        DEFAULT_GATEWAY_BIND,
    );
    let timeout = resolve_positive_u64(
        request_timeout,
        "THREAD_SUMMARIZER_REQUEST_TIMEOUT_SECS",
        gateway.request_timeout_secs,
        DEFAULT_REQUEST_TIMEOUT_SECS,
    );
    run_http(summarizer, &bind_addr, Some(timeout)).await
}
