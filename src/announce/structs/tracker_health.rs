use serde::Serialize;
use crate::announce::structs::tracker_state::TrackerState;

#[derive(Serialize, Debug, Clone)]
pub struct TrackerHealth {
    #[serde(flatten)]
    pub state: TrackerState,
    /// Successful announces over all attempts, 0.0 when never attempted.
    pub success_rate: f64,
    pub failure_streak: u32,
    /// Seconds until the endpoint may be announced to again, when backing off.
    pub retry_in_secs: Option<u64>,
}
