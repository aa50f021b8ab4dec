use std::time::Duration;

use tokio::time::Instant;

/// Enforces a minimum spacing between successive thread collections.
///
/// Only the remainder of the interval is slept, so slow fetches are not penalised twice.
pub(super) struct CollectionPacer {
    interval: Duration,
    last_turn: Option<Instant>,
}

impl CollectionPacer {
    pub(super) fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_turn: None,
        }
    }

    /// Wait until the next collection may start. The first call never waits.
    pub(super) async fn wait_turn(&mut self) {
        if let Some(last_turn) = self.last_turn {
            let elapsed = last_turn.elapsed();
            if elapsed < self.interval {
                tokio::time::sleep(self.interval - elapsed).await;
            }
        }
        self.last_turn = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::CollectionPacer;

    #[tokio::test]
    async fn spaces_turns_by_interval() {
        let mut pacer = CollectionPacer::new(Duration::from_millis(40));
        let started = tokio::time::Instant::now();
        for _ in 0..3 {
            pacer.wait_turn().await;
        }
        assert!(started.elapsed() >= Duration::from_millis(80));
    }

    #[tokio::test]
    async fn zero_interval_never_sleeps() {
        let mut pacer = CollectionPacer::new(Duration::ZERO);
        let started = tokio::time::Instant::now();
        for _ in 0..10 {
            pacer.wait_turn().await;
        }
        assert!(started.elapsed() < Duration::from_millis(50));
    }
}
