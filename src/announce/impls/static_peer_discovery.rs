use std::net::SocketAddr;
use async_trait::async_trait;
use log::warn;
use crate::announce::enums::announce_error::AnnounceError;
use crate::announce::structs::announce_request::AnnounceRequest;
use crate::announce::structs::static_peer_discovery::StaticPeerDiscovery;
use crate::announce::traits::announce_backend::AnnounceBackend;

pub const DISCOVERY_ENDPOINT: &str = "discovery://static";

impl StaticPeerDiscovery {
    pub fn from_config(bootstrap_peers: &[String]) -> StaticPeerDiscovery {
        let peers = bootstrap_peers.iter()
            .filter_map(|peer| match peer.parse::<SocketAddr>() {
                Ok(address) => Some(address),
                Err(_) => {
                    warn!("[ANNOUNCE] ignoring invalid bootstrap peer '{peer}'");
                    None
                }
            })
            .collect();
        StaticPeerDiscovery { peers }
    }
}

#[async_trait]
impl AnnounceBackend for StaticPeerDiscovery {
    fn handles(&self, endpoint: &str) -> bool {
        endpoint == DISCOVERY_ENDPOINT
    }

    async fn announce(&self, _endpoint: &str, _request: &AnnounceRequest) -> Result<Vec<SocketAddr>, AnnounceError> {
        Ok(self.peers.clone())
    }
}
