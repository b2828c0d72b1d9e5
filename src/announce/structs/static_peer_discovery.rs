use std::net::SocketAddr;

#[derive(Debug, Clone, Default)]
pub struct StaticPeerDiscovery {
    pub peers: Vec<SocketAddr>,
}
