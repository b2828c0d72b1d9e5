use serde::{Deserialize, Serialize};
use crate::metadata::structs::torrent_file_entry::TorrentFileEntry;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TorrentInfo {
    pub name: String,
    pub total_size: u64,
    pub piece_length: u64,
    pub files: Vec<TorrentFileEntry>,
}
