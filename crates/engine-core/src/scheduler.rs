use std::time::Duration;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Why [`PollScheduler::wait`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wake {
    Ticked,
    Cancelled,
}

/// Paces polls at a fixed period.
///
/// The first tick fires one full period after construction. Ticks missed
/// while a poll was running are dropped rather than replayed, so at most one
/// pending tick is ever delivered.
#[derive(Debug)]
pub struct PollScheduler {
    period: Duration,
    interval: Interval,
}

impl PollScheduler {
    pub fn new(period: Duration) -> Self {
        let period = period.max(MIN_PERIOD);
        let mut interval = time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self { period, interval }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Waits for the next tick or for cancellation, whichever comes first.
    /// Cancellation wins when both are ready.
    pub async fn wait(&mut self, cancel: &CancellationToken) -> Wake {
        if cancel.is_cancelled() {
            return Wake::Cancelled;
        }

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Wake::Cancelled,
            _ = self.interval.tick() => Wake::Ticked,
        }
    }
}
