//! Summarizer: single-permalink and labeled-batch thread summarization.
//!
//! Batch run: search → sequential paced collection (fetch + format) → capped concurrent
//! inference → results paired with permalinks by collection order.

mod fan_out;
mod pacer;

use std::time::Duration;

use serde::Serialize;

use crate::config::{SlackCredentials, SummarizerConfig, ThreadFailurePolicy};
use crate::error::Result;
use crate::inference::InferenceClient;
use crate::slack::{SlackThreadSource, ThreadCoordinates, parse_permalink};

use fan_out::summarize_all;
use pacer::CollectionPacer;

/// One summarized thread. `summary: None` means inference failed for this thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryResult {
    pub permalink: String,
    pub summary: Option<String>,
}

pub struct Summarizer {
    source: SlackThreadSource,
    inference: InferenceClient,
    label_query: String,
    collect_pause: Duration,
    max_concurrent_inference: Option<usize>,
    failure_policy: ThreadFailurePolicy,
}

impl Summarizer {
    pub fn new(credentials: SlackCredentials, config: SummarizerConfig) -> Self {
        let source = SlackThreadSource::new_with_base_url(credentials, config.slack_api_base)
            .with_max_search_pages(config.max_search_pages);
        let inference =
            InferenceClient::new(&config.inference_endpoint, config.inference_timeout_secs)
                .with_max_output_tokens(config.max_output_tokens);
        Self {
            source,
            inference,
            label_query: config.label_query,
            collect_pause: config.collect_pause,
            max_concurrent_inference: config.max_concurrent_inference,
            failure_policy: config.failure_policy,
        }
    }

    /// Build with credentials from `SLACK_TOKEN` / `USER_TOKEN`; fails if either is missing.
    pub fn from_env(config: SummarizerConfig) -> Result<Self> {
        Ok(Self::new(SlackCredentials::from_env()?, config))
    }

    pub fn thread_source(&self) -> &SlackThreadSource {
        &self.source
    }

    pub fn inference(&self) -> &InferenceClient {
        &self.inference
    }

    pub fn label_query(&self) -> &str {
        &self.label_query
    }

    pub fn failure_policy(&self) -> ThreadFailurePolicy {
        self.failure_policy
    }

    pub fn max_concurrent_inference(&self) -> Option<usize> {
        self.max_concurrent_inference
    }

    /// Summarize raw text; `None` when the inference call fails.
    pub async fn summarize_text(&self, text: &str) -> Option<String> {
        self.inference.summarize_text(text).await
    }

    /// Summarize the thread a permalink points to.
    ///
    /// Under [`ThreadFailurePolicy::Degrade`] a malformed permalink or failed fetch still
    /// submits the (empty) transcript; under `Strict` the error is returned.
    pub async fn summarize_by_permalink(&self, permalink: &str) -> Result<SummaryResult> {
        tracing::info!(
            event = "summarizer.permalink.started",
            permalink = %permalink,
            "Summarizing thread by permalink"
        );
        let transcript = match parse_permalink(permalink) {
            Ok(coordinates) => self.collect_transcript(&coordinates).await?,
            Err(error) => match self.failure_policy {
                ThreadFailurePolicy::Strict => return Err(error.into()),
                ThreadFailurePolicy::Degrade => String::new(),
            },
        };
        let summary = self.inference.summarize_text(&transcript).await;
        Ok(SummaryResult {
            permalink: permalink.to_string(),
            summary,
        })
    }

    /// Summarize every thread matching the label query, oldest first.
    ///
    /// Search failures always propagate; per-thread fetch failures follow the configured
    /// [`ThreadFailurePolicy`]; inference failures only blank their own entry.
    pub async fn summarize_labeled_threads(&self) -> Result<Vec<SummaryResult>> {
        tracing::info!(
            event = "summarizer.batch.searching",
            query = %self.label_query,
            "Summarizing labeled threads"
        );
        let matches = self.source.search(&self.label_query).await?;
        tracing::info!(
            event = "summarizer.batch.collecting",
            count = matches.len(),
            "Found {} messages to summarize",
            matches.len()
        );

        let mut pacer = CollectionPacer::new(self.collect_pause);
        let mut permalinks = Vec::with_capacity(matches.len());
        let mut transcripts = Vec::with_capacity(matches.len());
        for matched in &matches {
            pacer.wait_turn().await;
            let transcript = self.collect_transcript(&matched.coordinates()).await?;
            transcripts.push(transcript);
            permalinks.push(matched.permalink.clone());
        }

        tracing::info!(
            event = "summarizer.batch.summarizing",
            count = transcripts.len(),
            max_in_flight = ?self.max_concurrent_inference,
            "dispatching inference calls"
        );
        let summaries =
            summarize_all(&self.inference, transcripts, self.max_concurrent_inference).await;
        Ok(permalinks
            .into_iter()
            .zip(summaries)
            .map(|(permalink, summary)| SummaryResult { permalink, summary })
            .collect())
    }

    async fn collect_transcript(&self, coordinates: &ThreadCoordinates) -> Result<String> {
        let thread = match self
            .source
            .fetch_thread(&coordinates.channel, &coordinates.root_ts)
            .await
        {
            Ok(thread) => thread,
            Err(error) => match self.failure_policy {
                ThreadFailurePolicy::Strict => return Err(error),
                ThreadFailurePolicy::Degrade => {
                    tracing::warn!(
                        event = "summarizer.thread.fetch_failed",
                        channel = %coordinates.channel,
                        thread_ts = %coordinates.root_ts,
                        error = %error,
                        "thread fetch failed; continuing with empty thread"
                    );
                    Vec::new()
                }
            },
        };
        Ok(self.source.format_thread(&thread).await)
    }
}
