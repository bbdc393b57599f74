//! Suppression of repeated "no original status" warnings.
//!
//! weibo.com occasionally answers a perfectly active profile with an empty
//! feed. At thousands of polls per hour that turns into log noise, so only
//! the first empty result of a burst is reported.

use std::sync::Mutex;
use std::time::Duration;

use tokio::time::Instant;

/// Empty results closer together than this count as one burst.
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(60);

/// Remembers when the last empty result happened.
///
/// Shared by every uid a watcher polls. Races between concurrent polls only
/// change which of them warns, never what they return.
pub struct FailureTracker {
    last: Mutex<Option<Instant>>,
    window: Duration,
}

impl FailureTracker {
    pub fn new(window: Duration) -> Self {
        Self {
            last: Mutex::new(None),
            window,
        }
    }

    /// Records an empty result and decides whether it should be reported.
    ///
    /// With `warn` off nothing is reported. With `warn_on_consecutive` on, a
    /// result within the window of the previous one is suppressed. The
    /// timestamp is updated either way, so a steady stream of empty results
    /// keeps extending the same burst.
    pub fn record(&self, warn: bool, warn_on_consecutive: bool) -> bool {
        let now = Instant::now();
        let mut last = self.last.lock().unwrap_or_else(|e| e.into_inner());
        let within_window = last.is_some_and(|t| now.duration_since(t) <= self.window);
        *last = Some(now);
        warn && !(warn_on_consecutive && within_window)
    }
}

impl Default for FailureTracker {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn burst_warns_once() {
        let tracker = FailureTracker::default();
        assert!(tracker.record(true, true));
        tokio::time::advance(Duration::from_secs(1)).await;
        assert!(!tracker.record(true, true));
        tokio::time::advance(Duration::from_secs(61)).await;
        assert!(tracker.record(true, true));
    }

    #[tokio::test(start_paused = true)]
    async fn exactly_window_is_still_consecutive() {
        let tracker = FailureTracker::default();
        assert!(tracker.record(true, true));
        tokio::time::advance(DEFAULT_WINDOW).await;
        assert!(!tracker.record(true, true));
    }

    #[tokio::test(start_paused = true)]
    async fn suppressed_results_extend_the_burst() {
        let tracker = FailureTracker::default();
        assert!(tracker.record(true, true));
        for _ in 0..5 {
            tokio::time::advance(Duration::from_secs(30)).await;
            assert!(!tracker.record(true, true));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn warn_off_still_updates() {
        let tracker = FailureTracker::default();
        assert!(!tracker.record(false, true));
        assert!(!tracker.record(true, true));
    }

    #[tokio::test(start_paused = true)]
    async fn without_consecutive_check_always_warns() {
        let tracker = FailureTracker::default();
        assert!(tracker.record(true, false));
        assert!(tracker.record(true, false));
    }

    #[tokio::test(start_paused = true)]
    async fn custom_window_is_honoured() {
        let tracker = FailureTracker::new(Duration::from_secs(5));
        assert!(tracker.record(true, true));
        tokio::time::advance(Duration::from_secs(5)).await;
        assert!(!tracker.record(true, true));
        tokio::time::advance(Duration::from_secs(6)).await;
        assert!(tracker.record(true, true));
    }
}
