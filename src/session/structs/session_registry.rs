use std::collections::BTreeMap;
use std::sync::Arc;
use parking_lot::RwLock;
use tokio::sync::mpsc;
use crate::announce::structs::announce_coordinator::AnnounceCoordinator;
use crate::catalog::enums::catalog_update::CatalogUpdate;
use crate::config::structs::configuration::Configuration;
use crate::identity::structs::info_hash::InfoHash;
use crate::session::structs::session_handle::SessionHandle;
use crate::wire::structs::peer_id::PeerId;

pub struct SessionRegistry {
    pub config: Arc<Configuration>,
    pub sessions: RwLock<BTreeMap<InfoHash, SessionHandle>>,
    pub coordinator: Arc<AnnounceCoordinator>,
    pub peer_id: PeerId,
    pub(crate) catalog_tx: Option<mpsc::UnboundedSender<CatalogUpdate>>,
}
