use serde::Serialize;
use crate::identity::structs::info_hash::InfoHash;

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SessionInfo {
    pub content_hash: InfoHash,
    pub display_name: String,
    pub source_uri: String,
}
