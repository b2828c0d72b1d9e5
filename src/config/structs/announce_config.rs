use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AnnounceConfig {
    pub trackers: Vec<String>,
    pub discovery_enabled: bool,
    pub bootstrap_peers: Vec<String>,
    pub interval: u64,
    pub interval_jitter: u64,
    pub backoff_max: u64,
    pub timeout: u64,
}
