use thread_summarizer::{LabeledSummariesResponse, RuntimeSettings, SummarizeUrlResponse};

use crate::cli::SummarizerArgs;
use crate::summarizer_builder::build_summarizer;

pub(crate) async fn run_thread_mode(
    url: String,
    args: SummarizerArgs,
    runtime_settings: &RuntimeSettings,
) -> anyhow::Result<()> {
    let summarizer = build_summarizer(&args, runtime_settings)?;
    let result = summarizer.summarize_by_permalink(url.trim()).await?;
    let body = SummarizeUrlResponse {
        summary: result.summary,
    };
    println!("{}", serde_json::to_string_pretty(&body)?);
    Ok(())
}

pub(crate) async fn run_labeled_mode(
    args: SummarizerArgs,
    runtime_settings: &RuntimeSettings,
) -> anyhow::Result<()> {
    let summarizer = build_summarizer(&args, runtime_settings)?;
    let summaries = summarizer.summarize_labeled_threads().await?;
    let body = LabeledSummariesResponse { summaries };
    println!("{}", serde_json::to_string_pretty(&body)?);
    Ok(())
}
