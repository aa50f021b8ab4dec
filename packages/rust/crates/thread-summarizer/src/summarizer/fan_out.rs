use std::sync::Arc;
use std::time::Instant;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::inference::InferenceClient;

/// Summarize every transcript concurrently; output slot `i` belongs to transcript `i`.
///
/// `max_in_flight` caps concurrent inference calls (`None` or `Some(0)` = uncapped).
/// A failed or panicked call leaves `None` in its own slot only.
pub(super) async fn summarize_all(
    inference: &InferenceClient,
    transcripts: Vec<String>,
    max_in_flight: Option<usize>,
) -> Vec<Option<String>> {
    let started = Instant::now();
    let total = transcripts.len();
    let mut summaries: Vec<Option<String>> = vec![None; total];
    let semaphore = max_in_flight
        .filter(|limit| *limit > 0)
        .map(|limit| Arc::new(Semaphore::new(limit)));
    let mut workers = JoinSet::new();

    for (index, transcript) in transcripts.into_iter().enumerate() {
        let permit = match &semaphore {
            Some(semaphore) => match Arc::clone(semaphore).acquire_owned().await {
                Ok(permit) => Some(permit),
                Err(_) => break,
            },
            None => None,
        };
        let worker_inference = inference.clone();
        workers.spawn(async move {
            let _permit = permit;
            (index, worker_inference.summarize_text(&transcript).await)
        });
    }

    while let Some(joined) = workers.join_next().await {
        match joined {
            Ok((index, summary)) => {
                if let Some(slot) = summaries.get_mut(index) {
                    *slot = summary;
                }
            }
            Err(error) => tracing::error!("inference worker crashed: {error}"),
        }
    }

    tracing::info!(
        event = "summarizer.fan_out.completed",
        total,
        summarized = summaries.iter().filter(|summary| summary.is_some()).count(),
        elapsed_ms = started.elapsed().as_millis(),
        "inference fan-out completed"
    );
    summaries
}
