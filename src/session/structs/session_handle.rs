use std::sync::Arc;
use crate::session::structs::session_shared::SessionShared;

/// Cheap to clone; every clone refers to the same session.
#[derive(Clone)]
pub struct SessionHandle {
    pub(crate) shared: Arc<SessionShared>,
}
