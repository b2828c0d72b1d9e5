use std::collections::BTreeMap;
use std::sync::Arc;
use parking_lot::RwLock;
use crate::announce::structs::tracker_state::TrackerState;
use crate::announce::traits::announce_backend::AnnounceBackend;
use crate::config::structs::announce_config::AnnounceConfig;

pub struct AnnounceCoordinator {
    pub config: AnnounceConfig,
    pub trackers: RwLock<BTreeMap<String, TrackerState>>,
    pub backends: Vec<Arc<dyn AnnounceBackend>>,
}
