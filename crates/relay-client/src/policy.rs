//! Poll policy: decides how long to sleep between status checks and when to give up.

use std::time::Duration;

/// Shortest delay between polls. Smaller intervals are raised to this.
pub const MIN_INTERVAL: Duration = Duration::from_millis(50);

/// Poll policy for `RelayClient::wait_for_response`.
///
/// `multiplier == 1.0` is a fixed interval; larger values back off exponentially
/// up to `max_interval`.
#[derive(Debug, Clone, PartialEq)]
pub struct PollPolicy {
    /// Delay after the first poll.
    pub interval: Duration,

    /// Backoff multiplier.
    pub multiplier: f64,

    /// Upper bound for a single delay.
    pub max_interval: Duration,

    /// Total time budget for one wait.
    pub max_wait: Duration,
}

impl PollPolicy {
    /// Fixed interval polling.
    pub fn fixed(interval: Duration, max_wait: Duration) -> Self {
        let interval = interval.max(MIN_INTERVAL);
        Self {
            interval,
            multiplier: 1.0,
            max_interval: interval,
            max_wait,
        }
    }

    pub fn with_backoff(mut self, multiplier: f64, max_interval: Duration) -> Self {
        self.multiplier = multiplier.max(1.0);
        self.max_interval = max_interval.max(self.interval);
        self
    }

    /// Delay before the next poll, given how many polls were already made (1-indexed).
    ///
    /// delay = interval * multiplier^(polls - 1), capped at max_interval,
    /// never below `MIN_INTERVAL` (fields are public, so this is checked here too)
    pub fn next_delay(&self, polls: u32) -> Duration {
        let exponent = polls.saturating_sub(1).min(i32::MAX as u32) as i32;
        let secs = self.interval.as_secs_f64() * self.multiplier.powi(exponent);
        let delay = if !secs.is_finite() || secs >= self.max_interval.as_secs_f64() {
            self.max_interval
        } else {
            Duration::from_secs_f64(secs)
        };
        delay.max(MIN_INTERVAL)
    }
}

impl Default for PollPolicy {
    /// 3 秒間隔の固定ポーリング、最大 5 分待つ
    fn default() -> Self {
        Self::fixed(Duration::from_secs(3), Duration::from_secs(300))
    }
}
