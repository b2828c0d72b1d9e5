use std::time::Duration;
use crate::config::structs::swarm_config::SwarmConfig;
use crate::peer::structs::peer_driver_config::PeerDriverConfig;
use crate::wire::wire::MAX_FRAME_LEN;

impl PeerDriverConfig {
    pub fn from_swarm(config: &SwarmConfig) -> PeerDriverConfig {
        PeerDriverConfig {
            connect_timeout: Duration::from_secs(config.connect_timeout),
            handshake_timeout: Duration::from_secs(config.handshake_timeout),
            extension_timeout: Duration::from_secs(config.extension_timeout),
            keep_alive_interval: Duration::from_secs(config.keep_alive_interval.max(1)),
            max_frame_len: MAX_FRAME_LEN,
        }
    }
}
