use std::collections::BTreeMap;
use std::sync::Arc;
use chrono::{DateTime, Utc};
use serde::Serialize;
use crate::identity::structs::info_hash::InfoHash;
use crate::metadata::structs::torrent_info::TorrentInfo;
use crate::peer::structs::peer_connection::PeerConnection;
use crate::session::enums::session_role::SessionRole;
use crate::session::enums::session_status::SessionStatus;

#[derive(Serialize, Debug, Clone)]
pub struct SessionSnapshot {
    pub content_hash: InfoHash,
    pub display_name: String,
    pub source_uri: String,
    pub role: SessionRole,
    pub status: SessionStatus,
    pub progress: f64,
    /// Attached peers by connection id.
    pub peers: BTreeMap<u64, PeerConnection>,
    #[serde(skip)]
    pub metadata: Option<Arc<Vec<u8>>>,
    pub info: Option<TorrentInfo>,
    pub metadata_size: Option<u32>,
    /// Failed checksum verifications of assembled metadata.
    pub metadata_failures: u32,
    pub created: DateTime<Utc>,
}
