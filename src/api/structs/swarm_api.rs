use std::sync::Arc;
use crate::session::structs::session_registry::SessionRegistry;

#[derive(Clone)]
pub struct SwarmApi {
    pub registry: Arc<SessionRegistry>,
}
