use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TorrentFileEntry {
    pub name: String,
    /// Relative path below the session's storage directory, `/` separated.
    pub path: String,
    pub size: u64,
}
