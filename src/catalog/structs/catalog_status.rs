use serde::{Deserialize, Serialize};
use crate::session::enums::session_status::SessionStatus;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CatalogStatus {
    pub progress: f64,
    pub peers: usize,
    pub state: SessionStatus,
}
