use serde::{Deserialize, Serialize};
use crate::config::enums::validation_strictness::ValidationStrictness;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SwarmConfig {
    pub listen_address: String,
    pub peer_id_prefix: String,
    pub max_peers_per_session: usize,
    pub connect_timeout: u64,
    pub handshake_timeout: u64,
    pub extension_timeout: u64,
    pub metadata_request_timeout: u64,
    pub max_requests_per_peer: usize,
    pub max_bad_contributions: u32,
    pub max_metadata_size: u32,
    pub keep_alive_interval: u64,
    pub validation: ValidationStrictness,
}
