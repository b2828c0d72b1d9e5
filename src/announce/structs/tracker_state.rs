use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::time::Instant;
use crate::announce::enums::tracker_status::TrackerStatus;

#[derive(Serialize, Debug, Clone)]
pub struct TrackerState {
    pub url: String,
    pub status: TrackerStatus,
    pub last_announce: Option<DateTime<Utc>>,
    pub last_response: Option<DateTime<Utc>>,
    pub last_response_time_ms: Option<u64>,
    pub consecutive_failures: u32,
    pub average_response_time_ms: f64,
    pub successes: u64,
    pub failures: u64,
    pub last_error: Option<String>,
    #[serde(skip)]
    pub next_attempt: Option<Instant>,
}
