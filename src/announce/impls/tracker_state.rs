use std::time::Duration;
use chrono::Utc;
use tokio::time::Instant;
use crate::announce::enums::tracker_status::TrackerStatus;
use crate::announce::structs::tracker_health::TrackerHealth;
use crate::announce::structs::tracker_state::TrackerState;

const RESPONSE_TIME_ALPHA: f64 = 0.3;

impl TrackerState {
    pub fn new(url: &str) -> TrackerState {
        TrackerState {
            url: url.to_string(),
            status: TrackerStatus::Unknown,
            last_announce: None,
            last_response: None,
            last_response_time_ms: None,
            consecutive_failures: 0,
            average_response_time_ms: 0.0,
            successes: 0,
            failures: 0,
            last_error: None,
            next_attempt: None,
        }
    }

    /// Delay before the next attempt: `base * 2^failures`, never above `cap`.
    pub fn backoff_interval(&self, base: Duration, cap: Duration) -> Duration {
        if self.consecutive_failures == 0 {
            return base.min(cap);
        }
        let factor = 1u32.checked_shl(self.consecutive_failures).unwrap_or(u32::MAX);
        base.checked_mul(factor).unwrap_or(cap).min(cap)
    }

    pub fn is_due(&self, now: Instant) -> bool {
        self.next_attempt.is_none_or(|next| next <= now)
    }

    pub fn record_attempt(&mut self) {
        self.last_announce = Some(Utc::now());
    }

    pub fn record_success(&mut self, elapsed: Duration) {
        let elapsed_ms = elapsed.as_millis() as u64;
        self.average_response_time_ms = if self.successes == 0 {
            elapsed_ms as f64
        } else {
            RESPONSE_TIME_ALPHA * elapsed_ms as f64 + (1.0 - RESPONSE_TIME_ALPHA) * self.average_response_time_ms
        };
        self.status = TrackerStatus::Active;
        self.last_response = Some(Utc::now());
        self.last_response_time_ms = Some(elapsed_ms);
        self.consecutive_failures = 0;
        self.successes += 1;
        self.last_error = None;
        self.next_attempt = None;
    }

    /// Counts a failure and pushes the next attempt out; returns the applied delay.
    pub fn record_failure(&mut self, error: String, base: Duration, cap: Duration, now: Instant) -> Duration {
        self.status = TrackerStatus::Error;
        self.consecutive_failures = self.consecutive_failures.saturating_add(1);
        self.failures += 1;
        self.last_error = Some(error);
        let delay = self.backoff_interval(base, cap);
        self.next_attempt = Some(now + delay);
        delay
    }

    pub fn success_rate(&self) -> f64 {
        let total = self.successes + self.failures;
        if total == 0 {
            return 0.0;
        }
        self.successes as f64 / total as f64
    }

    pub fn health(&self, now: Instant) -> TrackerHealth {
        TrackerHealth {
            state: self.clone(),
            success_rate: self.success_rate(),
            failure_streak: self.consecutive_failures,
            retry_in_secs: self.next_attempt
                .filter(|next| *next > now)
                .map(|next| next.saturating_duration_since(now).as_secs()),
        }
    }
}
