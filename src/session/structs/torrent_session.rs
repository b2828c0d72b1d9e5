use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::Arc;
use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, watch};
use crate::catalog::enums::catalog_update::CatalogUpdate;
use crate::identity::structs::info_hash::InfoHash;
use crate::metadata::structs::metadata_assembler::MetadataAssembler;
use crate::metadata::structs::torrent_info::TorrentInfo;
use crate::config::structs::configuration::Configuration;
use crate::peer::enums::peer_event::PeerEvent;
use crate::peer::structs::peer_driver_config::PeerDriverConfig;
use crate::session::enums::session_role::SessionRole;
use crate::session::enums::session_status::SessionStatus;
use crate::session::structs::peer_entry::PeerEntry;
use crate::session::structs::session_snapshot::SessionSnapshot;
use crate::wire::structs::peer_id::PeerId;

/// Actor-owned session state. Only the actor task touches it.
pub struct TorrentSession {
    pub content_hash: InfoHash,
    pub display_name: String,
    pub source_uri: String,
    pub role: SessionRole,
    pub status: SessionStatus,
    pub progress: f64,
    pub created: DateTime<Utc>,
    pub metadata: Option<Arc<Vec<u8>>>,
    pub info: Option<TorrentInfo>,
    pub assembler: Option<MetadataAssembler>,
    pub peers: BTreeMap<u64, PeerEntry>,
    /// Peers to dial on start and resume: identifier hints and discovered addresses.
    pub known_peers: Vec<SocketAddr>,
    pub(crate) config: Arc<Configuration>,
    pub(crate) local_peer_id: PeerId,
    pub(crate) driver_config: PeerDriverConfig,
    pub(crate) status_before_pause: Option<SessionStatus>,
    pub(crate) metadata_failures: u32,
    pub(crate) next_conn_id: u64,
    pub(crate) cancel_rx: watch::Receiver<bool>,
    pub(crate) events_tx: mpsc::UnboundedSender<(u64, PeerEvent)>,
    pub(crate) snapshot_tx: watch::Sender<SessionSnapshot>,
    pub(crate) catalog_tx: Option<mpsc::UnboundedSender<CatalogUpdate>>,
    pub(crate) last_persisted: Option<(SessionStatus, u64, usize, bool, String)>,
}
