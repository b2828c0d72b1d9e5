use std::time::Duration;

#[derive(Debug, Clone, Copy)]
pub struct PeerDriverConfig {
    pub connect_timeout: Duration,
    pub handshake_timeout: Duration,
    pub extension_timeout: Duration,
    pub keep_alive_interval: Duration,
    pub max_frame_len: u32,
}
