use std::time::Duration;

use anyhow::{Result, anyhow};
use thread_summarizer::{
    DEFAULT_COLLECT_PAUSE_MS, DEFAULT_INFERENCE_HOST, DEFAULT_INFERENCE_PORT,
    DEFAULT_INFERENCE_TIMEOUT_SECS, DEFAULT_LABEL_QUERY, DEFAULT_MAX_CONCURRENT_INFERENCE,
    DEFAULT_MAX_OUTPUT_TOKENS, RuntimeSettings, SLACK_DEFAULT_API_BASE,
    SLACK_SEARCH_DEFAULT_MAX_PAGES, SlackCredentials, Summarizer, SummarizerConfig,
    ThreadFailurePolicy, inference_endpoint,
};

use crate::cli::SummarizerArgs;
use crate::resolve::{
    non_empty_env, resolve_optional_cap, resolve_port, resolve_positive_u64,
    resolve_positive_usize, resolve_string, resolve_u64,
};

fn parse_failure_policy(raw: &str, source: &str) -> Result<ThreadFailurePolicy> {
    raw.parse::<ThreadFailurePolicy>()
        .map_err(|error| anyhow!("invalid {source}: {error}"))
}

fn resolve_failure_policy(
    args: &SummarizerArgs,
    runtime_settings: &RuntimeSettings,
) -> Result<ThreadFailurePolicy> {
    if let Some(policy) = args.failure_policy {
        return Ok(policy.into());
    }
    if let Some(raw) = non_empty_env("THREAD_SUMMARIZER_FAILURE_POLICY") {
        return parse_failure_policy(&raw, "THREAD_SUMMARIZER_FAILURE_POLICY");
    }
    if let Some(raw) = runtime_settings
        .summarizer
        .failure_policy
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
    {
        return parse_failure_policy(raw, "summarizer.failure_policy");
    }
    Ok(ThreadFailurePolicy::default())
}

pub(crate) fn resolve_summarizer_config(
    args: &SummarizerArgs,
    runtime_settings: &RuntimeSettings,
) -> Result<SummarizerConfig> {
    let slack = &runtime_settings.slack;
    let inference = &runtime_settings.inference;
    let summarizer = &runtime_settings.summarizer;

    let host = resolve_string(
        args.inference_host.clone(),
        "LLAMA_SERVER_HOST",
        inference.host.as_deref(),
        DEFAULT_INFERENCE_HOST,
    );
    let port = resolve_port(
        args.inference_port,
        "LLAMA_SERVER_PORT",
        inference.port,
        DEFAULT_INFERENCE_PORT,
    );
    let max_output_tokens = resolve_positive_u64(
        None,
        "THREAD_SUMMARIZER_MAX_OUTPUT_TOKENS",
        inference.max_output_tokens.map(u64::from),
        u64::from(DEFAULT_MAX_OUTPUT_TOKENS),
    );

    Ok(SummarizerConfig {
        slack_api_base: resolve_string(
            None,
            "SLACK_API_BASE",
            slack.api_base.as_deref(),
            SLACK_DEFAULT_API_BASE,
        ),
        max_search_pages: resolve_positive_usize(
            None,
            "THREAD_SUMMARIZER_MAX_SEARCH_PAGES",
            slack.max_search_pages,
            SLACK_SEARCH_DEFAULT_MAX_PAGES,
        ),
        inference_endpoint: inference_endpoint(&host, port),
        inference_timeout_secs: resolve_positive_u64(
            None,
            "THREAD_SUMMARIZER_INFERENCE_TIMEOUT_SECS",
            inference.timeout_secs,
            DEFAULT_INFERENCE_TIMEOUT_SECS,
        ),
        max_output_tokens: u32::try_from(max_output_tokens).unwrap_or(DEFAULT_MAX_OUTPUT_TOKENS),
        label_query: resolve_string(
            args.label_query.clone(),
            "THREAD_SUMMARIZER_LABEL_QUERY",
            summarizer.label_query.as_deref(),
            DEFAULT_LABEL_QUERY,
        ),
        collect_pause: Duration::from_millis(resolve_u64(
            args.collect_pause_ms,
            "THREAD_SUMMARIZER_COLLECT_PAUSE_MS",
            summarizer.collect_pause_ms,
            DEFAULT_COLLECT_PAUSE_MS,
        )),
        max_concurrent_inference: resolve_optional_cap(
            args.max_concurrent_inference,
            "THREAD_SUMMARIZER_MAX_CONCURRENT_INFERENCE",
            summarizer.max_concurrent_inference,
            DEFAULT_MAX_CONCURRENT_INFERENCE,
        ),
        failure_policy: resolve_failure_policy(args, runtime_settings)?,
    })
}

/// Resolve config and credentials; missing `SLACK_TOKEN` / `USER_TOKEN` is fatal.
pub(crate) fn build_summarizer(
    args: &SummarizerArgs,
    runtime_settings: &RuntimeSettings,
) -> Result<Summarizer> {
    let config = resolve_summarizer_config(args, runtime_settings)?;
    let credentials = SlackCredentials::from_env()?;
    tracing::info!(
        slack_api_base = %config.slack_api_base,
        inference_endpoint = %config.inference_endpoint,
        failure_policy = %config.failure_policy,
        collect_pause_ms = config.collect_pause.as_millis(),
        max_concurrent_inference = ?config.max_concurrent_inference,
        "summarizer configured"
    );
    Ok(Summarizer::new(credentials, config))
}
