use std::net::SocketAddr;
use serde::{Deserialize, Serialize};
use crate::identity::structs::info_hash::InfoHash;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ResolvedIdentity {
    pub info_hash: InfoHash,
    pub display_name: String,
    pub source_uri: String,
    pub trackers: Vec<String>,
    pub peers: Vec<SocketAddr>,
}
