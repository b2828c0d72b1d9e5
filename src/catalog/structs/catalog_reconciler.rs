use std::collections::BTreeMap;
use std::sync::Arc;
use parking_lot::Mutex;
use crate::catalog::enums::pending_write::PendingWrite;
use crate::catalog::traits::catalog_backend::CatalogBackend;
use crate::identity::structs::info_hash::InfoHash;
use crate::session::structs::session_registry::SessionRegistry;

pub struct CatalogReconciler {
    pub backend: Arc<dyn CatalogBackend>,
    pub registry: Arc<SessionRegistry>,
    /// Latest failed write per content hash.
    pub(crate) pending: Mutex<BTreeMap<InfoHash, PendingWrite>>,
}
